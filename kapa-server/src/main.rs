use kapa_server::{kube, server, AppState, Config};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(config.log_level.clone())
        .init();

    tracing::info!(
        "KAPA starting on port {} at {}",
        config.port,
        chrono::Local::now().format("%-I:%M%p")
    );
    tracing::info!("Manifest size limit: {} bytes", config.max_manifest_bytes);

    // Initialize Kubernetes client
    tracing::info!("Connecting to Kubernetes...");
    let kube_client = kube::KubeClient::new(
        config.kubeconfig_path.as_deref(),
        config.kube_context.as_deref(),
    )
    .await?;
    tracing::info!("Connected to Kubernetes");

    // Create application state
    let state = AppState::from_cluster(Arc::new(kube_client));

    // Build HTTP server
    let app = server::build_router(state, config.max_manifest_bytes);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("KAPA listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
