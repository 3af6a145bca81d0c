use crate::error::ApiResult;
use crate::handlers::params::{prefixed_param, EVENTS_PREFIX};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Json;
use common::{EventsResponse, NamespacesResponse};

pub async fn namespaces_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<NamespacesResponse>> {
    let namespaces = state
        .namespaces
        .list_namespaces()
        .await
        .inspect_err(|e| tracing::error!("Error listing namespaces: {}", e))?;

    Ok(Json(NamespacesResponse {
        namespaces: namespaces
            .into_iter()
            .filter_map(|ns| ns.metadata.name)
            .collect(),
    }))
}

/// Messages of the events recorded in a namespace
///
/// Routed as `get-namespace-events:<namespace>`. Events carrying no message
/// still occupy a slot so counts line up with the cluster.
pub async fn namespace_events_handler(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> ApiResult<Json<EventsResponse>> {
    let namespace = prefixed_param(&segment, EVENTS_PREFIX)?;

    let events = state
        .namespaces
        .list_events(namespace)
        .await
        .inspect_err(|e| tracing::error!("Error getting events in {:?}: {}", namespace, e))?;

    Ok(Json(EventsResponse {
        events: events
            .into_iter()
            .map(|event| event.message.unwrap_or_default())
            .collect(),
    }))
}
