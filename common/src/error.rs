use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommonError {
    #[error("Failed to parse manifest: {0}")]
    Manifest(#[from] serde_yaml::Error),

    #[error("Manifest is empty")]
    EmptyManifest,

    #[error("Invalid data: {0}")]
    InvalidData(String),
}
