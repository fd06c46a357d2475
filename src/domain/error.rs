use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("No 24 character video key found in: {0}")]
    IdentifierNotFound(String),

    #[error("Metadata fetch failed: {0}")]
    FetchFailed(FetchFailure),

    #[error("API returned an empty payload")]
    EmptyPayload,

    #[error("Malformed API payload: {0}")]
    MalformedPayload(String),

    #[error("Failed to save sidecar {filename}: {reason}")]
    SidecarSaveFailed { filename: String, reason: String },

    #[error("Binary download failed: {0}")]
    BinaryDownloadFailed(String),

    #[error("I/O error: {0}")]
    Io(String),
}

/// Why the metadata request did not produce a usable response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("unauthorised (401)")]
    Unauthorized,

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),
}
