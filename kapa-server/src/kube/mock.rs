use crate::error::{ApiError, ApiResult};
use crate::kube::traits::{DeploymentOperations, NamespaceOperations, PodOperations};
use async_trait::async_trait;
use common::LogQuery;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Event, Namespace, Pod};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Store {
    deployments: HashMap<String, Deployment>,
    pods: HashMap<String, Pod>,
    logs: HashMap<String, String>,
    namespaces: Vec<Namespace>,
    events: Vec<Event>,
    failure: Option<String>,
    last_log_query: Option<LogQuery>,
}

/// In-memory cluster implementing every service trait, for unit testing
///
/// `fail_with` makes every subsequent call return a cluster error, the way
/// an unreachable API server would.
#[derive(Clone)]
pub struct MockCluster {
    store: Arc<Mutex<Store>>,
}

impl MockCluster {
    /// Create a new mock with an empty cluster
    pub fn new() -> Self {
        Self {
            store: Arc::new(Mutex::new(Store::default())),
        }
    }

    /// Make every call fail with the given cluster error message
    pub fn fail_with(&self, message: &str) {
        self.store.lock().unwrap().failure = Some(message.to_string());
    }

    pub fn add_deployment(&self, namespace: &str, deployment: Deployment) {
        let key = make_key(namespace, deployment.metadata.name.as_deref().unwrap_or_default());
        self.store.lock().unwrap().deployments.insert(key, deployment);
    }

    pub fn add_pod(&self, namespace: &str, pod: Pod) {
        let key = make_key(namespace, pod.metadata.name.as_deref().unwrap_or_default());
        self.store.lock().unwrap().pods.insert(key, pod);
    }

    pub fn set_logs(&self, namespace: &str, pod: &str, logs: &str) {
        self.store
            .lock()
            .unwrap()
            .logs
            .insert(make_key(namespace, pod), logs.to_string());
    }

    pub fn add_namespace(&self, name: &str) {
        self.store.lock().unwrap().namespaces.push(Namespace {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            ..Default::default()
        });
    }

    pub fn add_event(&self, namespace: &str, message: Option<&str>) {
        self.store.lock().unwrap().events.push(Event {
            metadata: ObjectMeta {
                namespace: Some(namespace.to_string()),
                ..Default::default()
            },
            message: message.map(str::to_string),
            ..Default::default()
        });
    }

    /// Stored copy of a deployment, bypassing failure injection
    pub fn deployment(&self, namespace: &str, name: &str) -> Option<Deployment> {
        self.store
            .lock()
            .unwrap()
            .deployments
            .get(&make_key(namespace, name))
            .cloned()
    }

    /// Options passed to the most recent log fetch
    pub fn last_log_query(&self) -> Option<LogQuery> {
        self.store.lock().unwrap().last_log_query.clone()
    }

    /// Helper to create a test pod
    pub fn create_test_pod(name: &str, namespace: &str, labels: HashMap<String, String>) -> Pod {
        // Convert HashMap to BTreeMap for Pod metadata
        let btree_labels: BTreeMap<String, String> = labels.into_iter().collect();

        Pod {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some(namespace.to_string()),
                labels: Some(btree_labels),
                resource_version: Some("1".to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Helper to create a minimal test deployment
    pub fn create_test_deployment(name: &str, namespace: Option<&str>) -> Deployment {
        Deployment {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                namespace: namespace.map(str::to_string),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn check_failure(store: &Store) -> ApiResult<()> {
        match &store.failure {
            Some(message) => Err(ApiError::Kubernetes(message.clone())),
            None => Ok(()),
        }
    }

    fn matches_selector(labels: &BTreeMap<String, String>, selector: &str) -> bool {
        // Simple label selector parsing: "key1=value1,key2=value2"
        if selector.is_empty() {
            return true;
        }

        for pair in selector.split(',') {
            let parts: Vec<&str> = pair.split('=').collect();
            if parts.len() != 2 {
                continue;
            }

            let key = parts[0].trim();
            let value = parts[1].trim();

            if labels.get(key).map(String::as_str) != Some(value) {
                return false;
            }
        }

        true
    }
}

impl Default for MockCluster {
    fn default() -> Self {
        Self::new()
    }
}

fn make_key(namespace: &str, name: &str) -> String {
    format!("{}/{}", namespace, name)
}

fn in_namespace(key: &str, namespace: &str) -> bool {
    namespace.is_empty() || key.starts_with(&format!("{}/", namespace))
}

fn not_found(kind: &str, name: &str) -> ApiError {
    ApiError::Kubernetes(format!("{} \"{}\" not found", kind, name))
}

fn bump_version(current: Option<&str>) -> String {
    current
        .and_then(|version| version.parse::<u64>().ok())
        .unwrap_or(0)
        .wrapping_add(1)
        .to_string()
}

#[async_trait]
impl DeploymentOperations for MockCluster {
    async fn get_deployment(&self, namespace: &str, name: &str) -> ApiResult<Deployment> {
        let store = self.store.lock().unwrap();
        Self::check_failure(&store)?;

        store
            .deployments
            .get(&make_key(namespace, name))
            .cloned()
            .ok_or_else(|| not_found("deployments.apps", name))
    }

    async fn create_deployment(
        &self,
        namespace: &str,
        deployment: &Deployment,
    ) -> ApiResult<Deployment> {
        let mut store = self.store.lock().unwrap();
        Self::check_failure(&store)?;

        let name = deployment.metadata.name.clone().unwrap_or_default();
        let key = make_key(namespace, &name);
        if store.deployments.contains_key(&key) {
            return Err(ApiError::Kubernetes(format!(
                "deployments.apps \"{}\" already exists",
                name
            )));
        }

        let mut created = deployment.clone();
        created.metadata.namespace = Some(namespace.to_string());
        created.metadata.resource_version = Some("1".to_string());
        store.deployments.insert(key, created.clone());

        Ok(created)
    }

    async fn update_deployment(
        &self,
        namespace: &str,
        deployment: &Deployment,
    ) -> ApiResult<Deployment> {
        let mut store = self.store.lock().unwrap();
        Self::check_failure(&store)?;

        let name = deployment.metadata.name.clone().unwrap_or_default();
        let key = make_key(namespace, &name);
        let current = store
            .deployments
            .get(&key)
            .ok_or_else(|| not_found("deployments.apps", &name))?;

        let mut replaced = deployment.clone();
        replaced.metadata.namespace = Some(namespace.to_string());
        replaced.metadata.resource_version =
            Some(bump_version(current.metadata.resource_version.as_deref()));
        store.deployments.insert(key, replaced.clone());

        Ok(replaced)
    }

    async fn delete_deployment(&self, namespace: &str, name: &str) -> ApiResult<()> {
        let mut store = self.store.lock().unwrap();
        Self::check_failure(&store)?;

        store
            .deployments
            .remove(&make_key(namespace, name))
            .map(|_| ())
            .ok_or_else(|| not_found("deployments.apps", name))
    }
}

#[async_trait]
impl PodOperations for MockCluster {
    async fn list_pods(&self, namespace: &str, label_selector: &str) -> ApiResult<Vec<Pod>> {
        let store = self.store.lock().unwrap();
        Self::check_failure(&store)?;

        let mut matching_pods: Vec<(&String, &Pod)> = store
            .pods
            .iter()
            .filter(|(key, pod)| {
                in_namespace(key, namespace)
                    && Self::matches_selector(
                        &pod.metadata.labels.clone().unwrap_or_default(),
                        label_selector,
                    )
            })
            .collect();
        matching_pods.sort_by(|a, b| a.0.cmp(b.0));

        Ok(matching_pods.into_iter().map(|(_, pod)| pod.clone()).collect())
    }

    async fn pod_logs(&self, namespace: &str, name: &str, query: &LogQuery) -> ApiResult<String> {
        let mut store = self.store.lock().unwrap();
        Self::check_failure(&store)?;

        store.last_log_query = Some(query.clone());

        let key = make_key(namespace, name);
        if !store.pods.contains_key(&key) {
            return Err(not_found("pods", name));
        }

        Ok(store.logs.get(&key).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl NamespaceOperations for MockCluster {
    async fn list_namespaces(&self) -> ApiResult<Vec<Namespace>> {
        let store = self.store.lock().unwrap();
        Self::check_failure(&store)?;

        Ok(store.namespaces.clone())
    }

    async fn list_events(&self, namespace: &str) -> ApiResult<Vec<Event>> {
        let store = self.store.lock().unwrap();
        Self::check_failure(&store)?;

        Ok(store
            .events
            .iter()
            .filter(|event| {
                namespace.is_empty() || event.metadata.namespace.as_deref() == Some(namespace)
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_list_pods_empty() {
        let mock = MockCluster::new();
        let pods = mock.list_pods("test-ns", "").await.unwrap();
        assert_eq!(pods.len(), 0);
    }

    #[tokio::test]
    async fn test_mock_list_pods_with_selector() {
        let mock = MockCluster::new();

        let mut labels1 = HashMap::new();
        labels1.insert("app".to_string(), "web".to_string());
        labels1.insert("tier".to_string(), "frontend".to_string());

        let mut labels2 = HashMap::new();
        labels2.insert("app".to_string(), "web".to_string());
        labels2.insert("tier".to_string(), "backend".to_string());

        mock.add_pod(
            "test-ns",
            MockCluster::create_test_pod("pod1", "test-ns", labels1),
        );
        mock.add_pod(
            "test-ns",
            MockCluster::create_test_pod("pod2", "test-ns", labels2),
        );

        let pods = mock
            .list_pods("test-ns", "app=web,tier=frontend")
            .await
            .unwrap();
        assert_eq!(pods.len(), 1);
        assert_eq!(pods[0].metadata.name.as_deref(), Some("pod1"));

        let all = mock.list_pods("test-ns", "").await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_mock_list_pods_all_namespaces() {
        let mock = MockCluster::new();
        mock.add_pod("a", MockCluster::create_test_pod("p1", "a", HashMap::new()));
        mock.add_pod("b", MockCluster::create_test_pod("p2", "b", HashMap::new()));

        assert_eq!(mock.list_pods("a", "").await.unwrap().len(), 1);
        assert_eq!(mock.list_pods("", "").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_mock_deployment_lifecycle() {
        let mock = MockCluster::new();
        let deployment = MockCluster::create_test_deployment("web", None);

        let created = mock.create_deployment("prod", &deployment).await.unwrap();
        assert_eq!(created.metadata.resource_version.as_deref(), Some("1"));

        let duplicate = mock.create_deployment("prod", &deployment).await;
        assert!(duplicate.is_err());

        let updated = mock.update_deployment("prod", &deployment).await.unwrap();
        assert_eq!(updated.metadata.resource_version.as_deref(), Some("2"));

        mock.delete_deployment("prod", "web").await.unwrap();
        assert!(mock.get_deployment("prod", "web").await.is_err());
    }

    #[tokio::test]
    async fn test_mock_update_missing_deployment() {
        let mock = MockCluster::new();
        let deployment = MockCluster::create_test_deployment("ghost", None);

        let err = mock.update_deployment("prod", &deployment).await.unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn test_mock_pod_logs_records_query() {
        let mock = MockCluster::new();
        mock.add_pod("ns", MockCluster::create_test_pod("p", "ns", HashMap::new()));
        mock.set_logs("ns", "p", "one\ntwo\n");

        let query = LogQuery {
            tail_lines: Some(2),
            ..Default::default()
        };
        let logs = mock.pod_logs("ns", "p", &query).await.unwrap();

        assert_eq!(logs, "one\ntwo\n");
        assert_eq!(mock.last_log_query(), Some(query));
    }

    #[tokio::test]
    async fn test_mock_events_filtered_by_namespace() {
        let mock = MockCluster::new();
        mock.add_event("a", Some("Scheduled"));
        mock.add_event("b", Some("Pulled"));

        let events = mock.list_events("a").await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message.as_deref(), Some("Scheduled"));
        assert_eq!(mock.list_events("").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_mock_failure_injection() {
        let mock = MockCluster::new();
        mock.add_namespace("default");
        mock.fail_with("connection refused");

        let err = mock.list_namespaces().await.unwrap_err();
        assert_eq!(err.to_string(), "connection refused");
        assert!(mock.list_pods("default", "").await.is_err());
    }
}
