use std::fmt;
use std::path::PathBuf;

use crate::domain::AppError;

/// The 24 character alphanumeric key naming one video on the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoKey(String);

impl VideoKey {
    pub(crate) fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadMode {
    /// Video file plus JSON sidecar
    Full,
    /// JSON sidecar only
    MetadataOnly,
}

#[derive(Debug, Clone)]
pub enum DownloadOutcome {
    /// Not on a video page; nothing was attempted.
    WrongContext,
    Completed {
        base_filename: String,
        sidecar: PathBuf,
        binary: BinaryOutcome,
    },
}

#[derive(Debug, Clone)]
pub enum BinaryOutcome {
    Skipped,
    Saved(PathBuf),
    Failed(AppError),
}

impl BinaryOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, BinaryOutcome::Failed(_))
    }
}
