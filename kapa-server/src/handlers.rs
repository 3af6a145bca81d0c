// Module declarations for HTTP handlers
pub mod deployments;
pub mod extract;
pub mod health;
pub mod namespaces;
pub mod params;
pub mod pods;

// Re-exports
pub use deployments::{
    create_deployment_handler, delete_deployment_handler, get_deployment_handler,
    update_deployment_handler,
};
pub use health::health_handler;
pub use namespaces::{namespace_events_handler, namespaces_handler};
pub use pods::{pod_logs_handler, pods_handler};
