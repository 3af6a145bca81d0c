// Re-export commonly used items
pub mod error;
pub mod manifest;
pub mod types;

// Convenience re-exports
pub use error::CommonError;
pub use manifest::{deployment_name, parse_deployment, with_namespace};
pub use types::{
    ErrorResponse, EventsResponse, LogQuery, LogsResponse, NamespacesResponse, PodListQuery,
    PodListResponse, StatusResponse,
};
