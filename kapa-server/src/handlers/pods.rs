use crate::error::ApiResult;
use crate::handlers::params::{prefixed_param, trim_param, PODS_PREFIX};
use crate::state::AppState;
use crate::handlers::extract::ApiQuery;
use axum::extract::{Path, State};
use axum::Json;
use common::{LogQuery, LogsResponse, PodListQuery, PodListResponse};

/// List pod names in a namespace
///
/// Routed as `get-pods:<namespace>`; an empty namespace lists every pod
/// the service account can see.
pub async fn pods_handler(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    ApiQuery(query): ApiQuery<PodListQuery>,
) -> ApiResult<Json<PodListResponse>> {
    let namespace = prefixed_param(&segment, PODS_PREFIX)?;
    let selector = query.label_selector.as_deref().unwrap_or_default();

    tracing::debug!("Listing pods in {:?} (selector {:?})", namespace, selector);

    let pods = state
        .pods
        .list_pods(namespace, selector)
        .await
        .inspect_err(|e| tracing::error!("Error getting pods in {:?}: {}", namespace, e))?;

    let names = pods
        .into_iter()
        .filter_map(|pod| pod.metadata.name)
        .collect();

    Ok(Json(PodListResponse::new(namespace, names)))
}

/// Fetch the current logs of a pod, one entry per line
pub async fn pod_logs_handler(
    State(state): State<AppState>,
    Path((pod_name, namespace)): Path<(String, String)>,
    ApiQuery(query): ApiQuery<LogQuery>,
) -> ApiResult<Json<LogsResponse>> {
    let pod_name = trim_param(&pod_name);
    let namespace = trim_param(&namespace);

    tracing::debug!("Fetching logs for pod {}/{}", namespace, pod_name);

    let logs = state
        .pods
        .pod_logs(namespace, pod_name, &query)
        .await
        .inspect_err(|e| {
            tracing::error!("Error getting logs for {}/{}: {}", namespace, pod_name, e)
        })?;

    Ok(Json(LogsResponse {
        logs: logs.lines().map(String::from).collect(),
    }))
}
