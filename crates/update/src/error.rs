//! Update error types.

/// Errors produced while submitting an update.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    #[error("client error: {0}")]
    Client(#[from] fwdeck_client::ClientError),

    #[error("invalid artifact selection: {0}")]
    InvalidArtifacts(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no release selected")]
    EmptySelection,

    #[error("an update is already in flight")]
    Busy,

    #[error("upload failed: {0}")]
    Upload(String),
}
