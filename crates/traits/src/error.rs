use thiserror::Error;

/// Error type for every call into the host.
///
/// The resolver never interprets these beyond logging; they reach the caller unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Failed to publish '{id}': {message}")]
    PublishFailed { id: String, message: String },

    #[error("External content library error: {0}")]
    External(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Invalid host data: {0}")]
    InvalidData(String),

    #[error("Host state lock poisoned")]
    LockPoisoned,
}

impl From<std::io::Error> for HostError {
    fn from(err: std::io::Error) -> Self {
        HostError::Io(err.to_string())
    }
}
