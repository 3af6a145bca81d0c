use crate::error::ApiResult;
use crate::handlers::params::trim_param;
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use common::types::{DEPLOYMENT_CREATED, DEPLOYMENT_DELETED, DEPLOYMENT_UPDATED};
use common::{deployment_name, parse_deployment, with_namespace, StatusResponse};
use k8s_openapi::api::apps::v1::Deployment;

/// Fetch a deployment and return the cluster's object as-is
pub async fn get_deployment_handler(
    State(state): State<AppState>,
    Path((namespace, name)): Path<(String, String)>,
) -> ApiResult<Json<Deployment>> {
    let namespace = trim_param(&namespace);
    let name = trim_param(&name);

    tracing::debug!("Getting deployment {}/{}", namespace, name);

    let deployment = state
        .deployments
        .get_deployment(namespace, name)
        .await
        .inspect_err(|e| {
            tracing::error!("Failed to get deployment {}/{}: {}", namespace, name, e)
        })?;

    Ok(Json(deployment))
}

/// Create a deployment from a YAML or JSON manifest
#[axum::debug_handler]
pub async fn create_deployment_handler(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
    body: Bytes,
) -> ApiResult<Json<StatusResponse>> {
    let namespace = trim_param(&namespace);
    let deployment = decode_manifest(&body, namespace)?;
    let name = deployment_name(&deployment)?;

    state
        .deployments
        .create_deployment(namespace, &deployment)
        .await
        .inspect_err(|e| {
            tracing::error!("Failed to create deployment {}/{}: {}", namespace, name, e)
        })?;

    tracing::info!("Created deployment {}/{}", namespace, name);

    Ok(Json(StatusResponse::new(namespace, DEPLOYMENT_CREATED)))
}

/// Replace an existing deployment with the submitted manifest
#[axum::debug_handler]
pub async fn update_deployment_handler(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
    body: Bytes,
) -> ApiResult<Json<StatusResponse>> {
    let namespace = trim_param(&namespace);
    let deployment = decode_manifest(&body, namespace)?;
    let name = deployment_name(&deployment)?;

    state
        .deployments
        .update_deployment(namespace, &deployment)
        .await
        .inspect_err(|e| {
            tracing::error!("Failed to update deployment {}/{}: {}", namespace, name, e)
        })?;

    tracing::info!("Updated deployment {}/{}", namespace, name);

    Ok(Json(StatusResponse::new(namespace, DEPLOYMENT_UPDATED)))
}

pub async fn delete_deployment_handler(
    State(state): State<AppState>,
    Path((namespace, name)): Path<(String, String)>,
) -> ApiResult<Json<StatusResponse>> {
    let namespace = trim_param(&namespace);
    let name = trim_param(&name);

    state
        .deployments
        .delete_deployment(namespace, name)
        .await
        .inspect_err(|e| {
            tracing::error!("Failed to delete deployment {}/{}: {}", namespace, name, e)
        })?;

    tracing::info!("Deleted deployment {}/{}", namespace, name);

    Ok(Json(StatusResponse::new(namespace, DEPLOYMENT_DELETED)))
}

fn decode_manifest(body: &[u8], namespace: &str) -> ApiResult<Deployment> {
    let deployment =
        parse_deployment(body).inspect_err(|e| tracing::warn!("Rejected manifest: {}", e))?;
    Ok(with_namespace(deployment, namespace)?)
}
