use crate::error::ApiError;
use axum::extract::{FromRequestParts, Query};

/// Query string extractor whose failures render as the JSON error body
#[derive(FromRequestParts, Debug, Clone, Default)]
#[from_request(via(Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
