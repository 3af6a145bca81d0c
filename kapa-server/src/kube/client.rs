use crate::error::{ApiError, ApiResult};
use crate::kube::traits::{DeploymentOperations, NamespaceOperations, PodOperations};
use async_trait::async_trait;
use common::LogQuery;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Event, Namespace, Pod};
use k8s_openapi::NamespaceResourceScope;
use kube::{
    api::{DeleteParams, ListParams, LogParams, PostParams},
    config::{KubeConfigOptions, Kubeconfig},
    Api, Client, Config, Resource,
};

/// Real Kubernetes client implementation using kube-rs
#[derive(Clone)]
pub struct KubeClient {
    client: Client,
}

impl KubeClient {
    /// Create a new Kubernetes client
    ///
    /// An explicit kubeconfig path wins. Otherwise the in-cluster service
    /// account is tried first, falling back to the default kubeconfig
    /// (`$KUBECONFIG` or `~/.kube/config`). A context forces kubeconfig use.
    pub async fn new(kubeconfig_path: Option<&str>, context: Option<&str>) -> ApiResult<Self> {
        let options = KubeConfigOptions {
            context: context.map(str::to_string),
            ..Default::default()
        };

        let config = match kubeconfig_path {
            Some(path) => {
                tracing::info!("Loading kubeconfig from {}", path);
                let kubeconfig = Kubeconfig::read_from(path)
                    .map_err(|e| ApiError::Kubernetes(format!("Failed to read kubeconfig: {}", e)))?;
                Config::from_custom_kubeconfig(kubeconfig, &options)
                    .await
                    .map_err(|e| ApiError::Kubernetes(format!("Failed to load kubeconfig: {}", e)))?
            }
            None if context.is_some() => Config::from_kubeconfig(&options)
                .await
                .map_err(|e| ApiError::Kubernetes(format!("Failed to load kubeconfig: {}", e)))?,
            None => match Config::incluster() {
                Ok(config) => {
                    tracing::info!("Using in-cluster service account");
                    config
                }
                Err(e) => {
                    tracing::debug!("In-cluster config unavailable ({}), using kubeconfig", e);
                    Config::from_kubeconfig(&options).await.map_err(|e| {
                        ApiError::Kubernetes(format!("Failed to load kubeconfig: {}", e))
                    })?
                }
            },
        };

        let client = Client::try_from(config)
            .map_err(|e| ApiError::Kubernetes(format!("Failed to create K8s client: {}", e)))?;

        Ok(Self { client })
    }

    /// Namespaced API, or cluster-wide when the namespace is empty
    fn scoped<K>(&self, namespace: &str) -> Api<K>
    where
        K: Resource<Scope = NamespaceResourceScope>,
        <K as Resource>::DynamicType: Default,
    {
        if namespace.is_empty() {
            Api::all(self.client.clone())
        } else {
            Api::namespaced(self.client.clone(), namespace)
        }
    }
}

fn log_params(query: &LogQuery) -> LogParams {
    LogParams {
        container: query.container.clone(),
        tail_lines: query.tail_lines,
        since_seconds: query.since_seconds,
        limit_bytes: query.limit_bytes,
        previous: query.previous,
        timestamps: query.timestamps,
        ..Default::default()
    }
}

#[async_trait]
impl DeploymentOperations for KubeClient {
    async fn get_deployment(&self, namespace: &str, name: &str) -> ApiResult<Deployment> {
        let deployments: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        let deployment = deployments.get(name).await?;
        Ok(deployment)
    }

    async fn create_deployment(
        &self,
        namespace: &str,
        deployment: &Deployment,
    ) -> ApiResult<Deployment> {
        let deployments: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        let created = deployments
            .create(&PostParams::default(), deployment)
            .await?;
        Ok(created)
    }

    async fn update_deployment(
        &self,
        namespace: &str,
        deployment: &Deployment,
    ) -> ApiResult<Deployment> {
        let name = deployment
            .metadata
            .name
            .as_deref()
            .ok_or_else(|| ApiError::InvalidInput("manifest is missing metadata.name".to_string()))?;

        let deployments: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        let replaced = deployments
            .replace(name, &PostParams::default(), deployment)
            .await?;
        Ok(replaced)
    }

    async fn delete_deployment(&self, namespace: &str, name: &str) -> ApiResult<()> {
        let deployments: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        // Either the object pending finalization or a Status; both mean accepted
        deployments.delete(name, &DeleteParams::default()).await?;
        Ok(())
    }
}

#[async_trait]
impl PodOperations for KubeClient {
    async fn list_pods(&self, namespace: &str, label_selector: &str) -> ApiResult<Vec<Pod>> {
        let pods: Api<Pod> = self.scoped(namespace);

        let mut list_params = ListParams::default();
        if !label_selector.is_empty() {
            list_params = list_params.labels(label_selector);
        }

        let pod_list = pods.list(&list_params).await?;

        Ok(pod_list.items)
    }

    async fn pod_logs(&self, namespace: &str, name: &str, query: &LogQuery) -> ApiResult<String> {
        let pods: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let logs = pods.logs(name, &log_params(query)).await?;
        Ok(logs)
    }
}

#[async_trait]
impl NamespaceOperations for KubeClient {
    async fn list_namespaces(&self) -> ApiResult<Vec<Namespace>> {
        let namespaces: Api<Namespace> = Api::all(self.client.clone());
        let namespace_list = namespaces.list(&ListParams::default()).await?;
        Ok(namespace_list.items)
    }

    async fn list_events(&self, namespace: &str) -> ApiResult<Vec<Event>> {
        let events: Api<Event> = self.scoped(namespace);
        let event_list = events.list(&ListParams::default()).await?;
        Ok(event_list.items)
    }
}
