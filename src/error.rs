use binpub_core::PublishError;
use binpub_traits::HostError;
use thiserror::Error;

/// Errors of the command-line front end and manifest loading.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid manifest: {0}")]
    Manifest(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Publishing failed: {0}")]
    Publish(#[from] PublishError),

    #[error("Host error: {0}")]
    Host(#[from] HostError),
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Manifest(e.to_string())
    }
}
