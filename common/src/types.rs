use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEPLOYMENT_CREATED: &str = "Deployment Created";
pub const DEPLOYMENT_UPDATED: &str = "Deployment Updated";
pub const DEPLOYMENT_DELETED: &str = "Deployment Deleted";

/// Outcome of a deployment mutation, keyed by namespace
///
/// Serializes as `{"<namespace>": "<status>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusResponse(pub BTreeMap<String, String>);

impl StatusResponse {
    pub fn new(namespace: &str, status: &str) -> Self {
        Self(BTreeMap::from([(namespace.to_string(), status.to_string())]))
    }

    pub fn status(&self, namespace: &str) -> Option<&str> {
        self.0.get(namespace).map(String::as_str)
    }
}

/// Pod names keyed by the namespace they were listed from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PodListResponse(pub BTreeMap<String, Vec<String>>);

impl PodListResponse {
    pub fn new(namespace: &str, pods: Vec<String>) -> Self {
        Self(BTreeMap::from([(namespace.to_string(), pods)]))
    }

    pub fn pods(&self, namespace: &str) -> Option<&[String]> {
        self.0.get(namespace).map(Vec::as_slice)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogsResponse {
    pub logs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespacesResponse {
    pub namespaces: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventsResponse {
    pub events: Vec<String>,
}

/// Body returned for every failed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Query parameters accepted by the pod listing endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_selector: Option<String>,
}

/// Options for fetching container logs
///
/// Mirrors the subset of the pod log options that make sense for a
/// single, non-following read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tail_lines: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since_seconds: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_bytes: Option<i64>,
    #[serde(default)]
    pub previous: bool,
    #[serde(default)]
    pub timestamps: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_response_keyed_by_namespace() {
        let response = StatusResponse::new("default", DEPLOYMENT_CREATED);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value, json!({ "default": "Deployment Created" }));
        assert_eq!(response.status("default"), Some(DEPLOYMENT_CREATED));
    }

    #[test]
    fn test_pod_list_response_keyed_by_namespace() {
        let response =
            PodListResponse::new("kube-system", vec!["coredns".to_string(), "etcd".to_string()]);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value, json!({ "kube-system": ["coredns", "etcd"] }));
    }

    #[test]
    fn test_log_query_camel_case() {
        let query: LogQuery = serde_json::from_value(json!({
            "container": "app",
            "tailLines": 50,
            "timestamps": true
        }))
        .unwrap();

        assert_eq!(query.container.as_deref(), Some("app"));
        assert_eq!(query.tail_lines, Some(50));
        assert_eq!(query.since_seconds, None);
        assert!(query.timestamps);
        assert!(!query.previous);
    }

    #[test]
    fn test_log_query_defaults() {
        let query: LogQuery = serde_json::from_value(json!({})).unwrap();
        assert_eq!(query, LogQuery::default());
    }

    #[test]
    fn test_error_response_shape() {
        let body = ErrorResponse {
            error: "boom".to_string(),
        };
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({ "error": "boom" }));
    }
}
