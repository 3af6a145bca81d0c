use crate::kube::{DeploymentOperations, NamespaceOperations, PodOperations};
use std::sync::Arc;

/// Application state shared across all handlers
///
/// Holds one read-only handle per resource service. The handles are trait
/// objects so tests can swap the cluster for an in-memory mock.
#[derive(Clone)]
pub struct AppState {
    pub deployments: Arc<dyn DeploymentOperations>,
    pub pods: Arc<dyn PodOperations>,
    pub namespaces: Arc<dyn NamespaceOperations>,
}

impl AppState {
    pub fn new(
        deployments: Arc<dyn DeploymentOperations>,
        pods: Arc<dyn PodOperations>,
        namespaces: Arc<dyn NamespaceOperations>,
    ) -> Self {
        Self {
            deployments,
            pods,
            namespaces,
        }
    }

    /// Serve every resource from a single cluster implementation
    pub fn from_cluster<C>(cluster: Arc<C>) -> Self
    where
        C: DeploymentOperations + PodOperations + NamespaceOperations + 'static,
    {
        Self {
            deployments: cluster.clone(),
            pods: cluster.clone(),
            namespaces: cluster,
        }
    }
}
