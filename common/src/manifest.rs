//! Decoding of Deployment manifests submitted by clients.
//!
//! Bodies may be YAML or JSON. Only the first document of a multi-document
//! YAML stream is read.

use crate::error::CommonError;
use k8s_openapi::api::apps::v1::Deployment;
use serde::Deserialize;
use serde_yaml::Value;

/// Parse a YAML or JSON manifest into a typed Deployment
///
/// `apiVersion` and `kind` are required and must be `apps/v1` and
/// `Deployment`.
pub fn parse_deployment(manifest: &[u8]) -> Result<Deployment, CommonError> {
    if manifest.iter().all(u8::is_ascii_whitespace) {
        return Err(CommonError::EmptyManifest);
    }

    let document = serde_yaml::Deserializer::from_slice(manifest)
        .next()
        .ok_or(CommonError::EmptyManifest)?;
    let object = Value::deserialize(document)?;

    for field in ["apiVersion", "kind"] {
        if object.get(field).and_then(Value::as_str).is_none() {
            return Err(CommonError::InvalidData(format!(
                "manifest is missing {}",
                field
            )));
        }
    }

    Ok(serde_yaml::from_value(object)?)
}

/// Bind a deployment to the namespace it was addressed to
///
/// A manifest without a namespace takes the request namespace. A manifest
/// naming a different namespace is rejected.
pub fn with_namespace(mut deployment: Deployment, namespace: &str) -> Result<Deployment, CommonError> {
    let manifest_namespace = deployment
        .metadata
        .namespace
        .clone()
        .filter(|ns| !ns.is_empty());

    match manifest_namespace {
        None => deployment.metadata.namespace = Some(namespace.to_string()),
        Some(ns) if ns == namespace => {}
        Some(ns) => {
            return Err(CommonError::InvalidData(format!(
                "manifest namespace {} does not match request namespace {}",
                ns, namespace
            )))
        }
    }

    Ok(deployment)
}

/// Name of the deployment, required for create and replace
pub fn deployment_name(deployment: &Deployment) -> Result<&str, CommonError> {
    deployment
        .metadata
        .name
        .as_deref()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| CommonError::InvalidData("manifest is missing metadata.name".to_string()))
}
