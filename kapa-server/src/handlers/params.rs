//! Path parameter normalization.
//!
//! Clients address resources with a literal colon before each value, e.g.
//! `/api/v1/apps/deployments/:default/:web`, and the listing endpoints glue
//! the namespace onto a fixed prefix (`get-pods:default`).

use crate::error::{ApiError, ApiResult};

pub const PODS_PREFIX: &str = "get-pods";
pub const EVENTS_PREFIX: &str = "get-namespace-events";

/// Strip a single leading colon from a path parameter
pub fn trim_param(value: &str) -> &str {
    value.strip_prefix(':').unwrap_or(value)
}

/// Extract the value glued onto a fixed segment prefix
///
/// `get-pods:default`, `get-podsdefault` and `get-pods` yield `default`,
/// `default` and the empty string. Segments without the prefix are not
/// routes this server knows.
pub fn prefixed_param<'a>(segment: &'a str, prefix: &str) -> ApiResult<&'a str> {
    segment
        .strip_prefix(prefix)
        .map(trim_param)
        .ok_or_else(|| ApiError::NotFound(segment.to_string()))
}
