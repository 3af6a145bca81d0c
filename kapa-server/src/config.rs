use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub kubeconfig_path: Option<String>,
    pub kube_context: Option<String>,
    pub max_manifest_bytes: usize,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            kubeconfig_path: non_empty_var("KUBECONFIG_PATH"),
            kube_context: non_empty_var("KUBE_CONTEXT"),
            max_manifest_bytes: env::var("MAX_MANIFEST_BYTES")
                .unwrap_or_else(|_| "1048576".to_string())
                .parse()?,
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
