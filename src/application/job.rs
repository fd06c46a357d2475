use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::AppError;

/// Moves a remote file onto local storage.
#[async_trait]
pub trait BinaryDownloader: Send + Sync {
    /// `on_progress` receives a fraction in [0, 1]; 0 when the size is unknown.
    /// It may borrow from the caller's stack.
    async fn download(
        &self,
        url: &str,
        filename: &str,
        on_progress: &(dyn Fn(f32) + Send + Sync),
    ) -> Result<PathBuf, AppError>;
}

/// Writes an in-memory artifact under the given name.
#[async_trait]
pub trait FileSaver: Send + Sync {
    async fn save(&self, filename: &str, contents: Bytes) -> Result<PathBuf, AppError>;
}

/// Shows a short transient message to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// One outbound transfer and the hooks that observe it.
pub struct DownloadJob {
    pub url: String,
    pub filename: String,
    on_success: Box<dyn Fn(&PathBuf) + Send + Sync>,
    on_progress: Box<dyn Fn(f32) + Send + Sync>,
    on_failure: Box<dyn Fn(&AppError) + Send + Sync>,
}

impl DownloadJob {
    pub fn new(url: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            filename: filename.into(),
            on_success: Box::new(|_| {}),
            on_progress: Box::new(|_| {}),
            on_failure: Box::new(|_| {}),
        }
    }

    pub fn on_success(mut self, hook: impl Fn(&PathBuf) + Send + Sync + 'static) -> Self {
        self.on_success = Box::new(hook);
        self
    }

    pub fn on_progress(mut self, hook: impl Fn(f32) + Send + Sync + 'static) -> Self {
        self.on_progress = Box::new(hook);
        self
    }

    pub fn on_failure(mut self, hook: impl Fn(&AppError) + Send + Sync + 'static) -> Self {
        self.on_failure = Box::new(hook);
        self
    }

    /// Run to completion. Exactly one of `on_success`/`on_failure` fires, once.
    pub async fn run(self, downloader: &dyn BinaryDownloader) -> Result<PathBuf, AppError> {
        let result = downloader
            .download(&self.url, &self.filename, self.on_progress.as_ref())
            .await
            .map_err(|e| match e {
                AppError::BinaryDownloadFailed(_) => e,
                other => AppError::BinaryDownloadFailed(other.to_string()),
            });

        match &result {
            Ok(path) => (self.on_success)(path),
            Err(e) => (self.on_failure)(e),
        }
        result
    }
}
