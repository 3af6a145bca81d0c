use crate::error::ApiResult;
use async_trait::async_trait;
use common::LogQuery;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Event, Namespace, Pod};

/// Deployment CRUD in the apps/v1 group
#[async_trait]
pub trait DeploymentOperations: Send + Sync {
    async fn get_deployment(&self, namespace: &str, name: &str) -> ApiResult<Deployment>;

    /// Create a deployment, returning the object as stored by the cluster
    async fn create_deployment(
        &self,
        namespace: &str,
        deployment: &Deployment,
    ) -> ApiResult<Deployment>;

    /// Replace the deployment named by `deployment.metadata.name`
    async fn update_deployment(
        &self,
        namespace: &str,
        deployment: &Deployment,
    ) -> ApiResult<Deployment>;

    async fn delete_deployment(&self, namespace: &str, name: &str) -> ApiResult<()>;
}

/// Pod reads in the core group
#[async_trait]
pub trait PodOperations: Send + Sync {
    /// List pods in a namespace matching a label selector
    ///
    /// An empty namespace lists across all namespaces and an empty
    /// selector matches every pod.
    async fn list_pods(&self, namespace: &str, label_selector: &str) -> ApiResult<Vec<Pod>>;

    /// Fetch the current logs of a pod as a single string
    async fn pod_logs(&self, namespace: &str, name: &str, query: &LogQuery) -> ApiResult<String>;
}

/// Namespace and event reads in the core group
#[async_trait]
pub trait NamespaceOperations: Send + Sync {
    async fn list_namespaces(&self) -> ApiResult<Vec<Namespace>>;

    /// List events recorded in a namespace (all namespaces when empty)
    async fn list_events(&self, namespace: &str) -> ApiResult<Vec<Event>>;
}
