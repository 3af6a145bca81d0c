use anyhow::{Context, Result};
/// Test utilities for integration tests
/// Manages kind cluster lifecycle and test fixtures
use std::process::Command;

pub const CLUSTER_NAME: &str = "kapa";
pub const TEST_NAMESPACE: &str = "kapa-test";

/// Test fixture that manages kind cluster lifecycle
pub struct KindCluster {
    cluster_name: String,
}

impl KindCluster {
    /// Get or create the test cluster
    /// Idempotent - safe to call multiple times
    pub fn setup() -> Result<Self> {
        let cluster = Self {
            cluster_name: CLUSTER_NAME.to_string(),
        };

        if !cluster.exists()? {
            println!("Creating kind cluster: {}", CLUSTER_NAME);
            cluster.create()?;
        } else {
            println!("Using existing kind cluster: {}", CLUSTER_NAME);
        }

        cluster.ensure_namespace(TEST_NAMESPACE)?;

        Ok(cluster)
    }

    /// Check if cluster exists
    fn exists(&self) -> Result<bool> {
        let output = Command::new("kind")
            .args(["get", "clusters"])
            .output()
            .context("Failed to execute 'kind get clusters'")?;

        if !output.status.success() {
            return Ok(false);
        }

        let clusters = String::from_utf8_lossy(&output.stdout);
        Ok(clusters
            .lines()
            .any(|line| line.trim() == self.cluster_name))
    }

    /// Create a single-node kind cluster
    fn create(&self) -> Result<()> {
        let status = Command::new("kind")
            .args(["create", "cluster", "--name", &self.cluster_name])
            .stdout(std::process::Stdio::inherit())
            .stderr(std::process::Stdio::inherit())
            .status()
            .context("Failed to spawn 'kind create cluster'")?;

        if !status.success() {
            anyhow::bail!("kind create cluster failed");
        }

        self.wait_for_ready()
    }

    /// Wait for cluster nodes to be ready
    fn wait_for_ready(&self) -> Result<()> {
        println!("Waiting for cluster nodes to be ready...");

        let status = Command::new("kubectl")
            .args([
                "--context",
                &self.context_name(),
                "wait",
                "--for=condition=Ready",
                "nodes",
                "--all",
                "--timeout=60s",
            ])
            .stdout(std::process::Stdio::inherit())
            .stderr(std::process::Stdio::inherit())
            .status()
            .context("Failed to wait for nodes")?;

        if !status.success() {
            anyhow::bail!("Nodes did not become ready in time");
        }

        Ok(())
    }

    /// Create the namespace unless it already exists
    fn ensure_namespace(&self, name: &str) -> Result<()> {
        let exists = Command::new("kubectl")
            .args(["--context", &self.context_name(), "get", "namespace", name])
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .context("Failed to query namespace")?
            .success();

        if exists {
            return Ok(());
        }

        println!("Creating namespace: {}", name);

        let status = Command::new("kubectl")
            .args(["--context", &self.context_name(), "create", "namespace", name])
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .context("Failed to create namespace")?;

        if !status.success() {
            anyhow::bail!("Failed to create namespace: {}", name);
        }

        Ok(())
    }

    /// Get cluster name for kubectl context
    pub fn context_name(&self) -> String {
        format!("kind-{}", self.cluster_name)
    }
}

/// Delete the test cluster
/// Call this explicitly if you want to clean up
#[allow(dead_code)]
pub fn teardown_cluster() -> Result<()> {
    println!("Deleting kind cluster: {}", CLUSTER_NAME);

    let status = Command::new("kind")
        .args(["delete", "cluster", "--name", CLUSTER_NAME])
        .stdout(std::process::Stdio::inherit())
        .stderr(std::process::Stdio::inherit())
        .status()
        .context("Failed to delete cluster")?;

    if !status.success() {
        anyhow::bail!("Failed to delete cluster");
    }

    Ok(())
}

/// Client bound to the test cluster's kubeconfig context
///
/// Fixtures must not follow whatever context is current.
pub async fn kind_client() -> Result<kube::Client> {
    let options = kube::config::KubeConfigOptions {
        context: Some(format!("kind-{}", CLUSTER_NAME)),
        ..Default::default()
    };
    let config = kube::Config::from_kubeconfig(&options)
        .await
        .context("Failed to load kind kubeconfig context")?;

    kube::Client::try_from(config).context("Failed to create kind client")
}

/// YAML manifest for a small nginx deployment
pub fn nginx_deployment_manifest(name: &str, replicas: i32) -> String {
    format!(
        r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: {name}
  labels:
    app: {name}
spec:
  replicas: {replicas}
  selector:
    matchLabels:
      app: {name}
  template:
    metadata:
      labels:
        app: {name}
    spec:
      containers:
      - name: nginx
        image: nginx:alpine
        ports:
        - containerPort: 80
"#,
        name = name,
        replicas = replicas
    )
}

/// Helper to create a test pod that writes a few known log lines
pub async fn create_test_pod(
    namespace: &str,
    name: &str,
    labels: std::collections::HashMap<String, String>,
) -> Result<()> {
    use k8s_openapi::api::core::v1::Pod;
    use kube::Api;

    let client = kind_client().await?;
    let pods: Api<Pod> = Api::namespaced(client, namespace);

    let pod = serde_json::json!({
        "apiVersion": "v1",
        "kind": "Pod",
        "metadata": {
            "name": name,
            "labels": labels,
        },
        "spec": {
            "containers": [{
                "name": "logger",
                "image": "busybox:1.36",
                "command": ["sh", "-c", "echo kapa-line-1; echo kapa-line-2; sleep 3600"],
            }],
        },
    });

    let pp = kube::api::PostParams::default();
    pods.create(&pp, &serde_json::from_value(pod)?)
        .await
        .context("Failed to create test pod")?;

    Ok(())
}

/// Helper to delete a test pod
pub async fn delete_test_pod(namespace: &str, name: &str) -> Result<()> {
    use k8s_openapi::api::core::v1::Pod;
    use kube::Api;

    let client = kind_client().await?;
    let pods: Api<Pod> = Api::namespaced(client, namespace);

    let dp = kube::api::DeleteParams::default();
    pods.delete(name, &dp)
        .await
        .context("Failed to delete pod")?;

    Ok(())
}

/// Helper to delete a deployment, ignoring ones that are already gone
pub async fn delete_test_deployment(namespace: &str, name: &str) -> Result<()> {
    use k8s_openapi::api::apps::v1::Deployment;
    use kube::Api;

    let client = kind_client().await?;
    let deployments: Api<Deployment> = Api::namespaced(client, namespace);

    if deployments.get_opt(name).await?.is_some() {
        deployments
            .delete(name, &Default::default())
            .await
            .context("Failed to delete deployment")?;
    }

    Ok(())
}

/// Helper to wait for pod to be ready
pub async fn wait_for_pod_ready(namespace: &str, name: &str) -> Result<()> {
    use k8s_openapi::api::core::v1::Pod;
    use kube::Api;
    use std::time::Duration;
    use tokio::time::sleep;

    let client = kind_client().await?;
    let pods: Api<Pod> = Api::namespaced(client, namespace);

    for _ in 0..60 {
        let pod = pods.get(name).await?;

        if let Some(status) = &pod.status {
            if let Some(conditions) = &status.conditions {
                if conditions
                    .iter()
                    .any(|c| c.type_ == "Ready" && c.status == "True")
                {
                    return Ok(());
                }
            }
        }

        sleep(Duration::from_secs(1)).await;
    }

    anyhow::bail!("Pod {} did not become ready in time", name)
}
