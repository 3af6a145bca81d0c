use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, put},
    Router,
};
use tower_http::trace::TraceLayer;

/// Build the HTTP server with all routes and middleware
///
/// `max_manifest_bytes` caps deployment manifest bodies; larger requests
/// are answered with 413 before reaching a handler.
pub fn build_router(state: AppState, max_manifest_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(handlers::health_handler))
        .nest("/api/v1/apps", apps_routes())
        .nest("/api/v1/core", core_routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_manifest_bytes))
        .layer(TraceLayer::new_for_http())
}

fn apps_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/deployments/:namespace",
            put(handlers::create_deployment_handler).patch(handlers::update_deployment_handler),
        )
        .route(
            "/deployments/:namespace/:name",
            get(handlers::get_deployment_handler).delete(handlers::delete_deployment_handler),
        )
}

fn core_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/pods/get-pod-logs/:pod_name/:namespace",
            get(handlers::pod_logs_handler),
        )
        // get-pods:<namespace>
        .route("/pods/:segment", get(handlers::pods_handler))
        .route(
            "/namespaces/get-namespaces",
            get(handlers::namespaces_handler),
        )
        // get-namespace-events:<namespace>
        .route("/namespaces/:segment", get(handlers::namespace_events_handler))
}
