use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;

use super::job::{BinaryDownloader, DownloadJob, FileSaver, Notifier};
use crate::{
    api::{parse_video_payload, VideoMetadata, VideoSource},
    domain::{
        sanitize, AppError, BinaryOutcome, DownloadMode, DownloadOutcome, FetchFailure,
        SanitizedMetadata, VideoKey,
    },
    progress::ProgressBar,
    utils::{base_filename, extract_video_key, file_extension, is_video_page},
};

/// User-facing notification texts
pub mod messages {
    pub const NOT_VIDEO_PAGE: &str = "You need to be on a video page";
    pub const NO_VIDEO_KEY: &str = "Error: no video key found, check the log";
    pub const UNAUTHORISED: &str = "API returned unauthorised. Are you signed in?";
    pub const BAD_RESPONSE: &str = "Bad response from API, check the log";
    pub const EMPTY_RESPONSE: &str = "Empty response from API, check the log";
    pub const INVALID_RESPONSE: &str = "Invalid JSON response from API, check the log";
    pub const SAVE_FAILED: &str = "Error: failed to save file, check the log";
    pub const TEST: &str = "Test notification";
}

/// Turns a video page into a media file plus a JSON sidecar.
#[derive(Clone)]
pub struct DownloadCoordinator {
    source: Arc<dyn VideoSource>,
    downloader: Arc<dyn BinaryDownloader>,
    saver: Arc<dyn FileSaver>,
    notifier: Arc<dyn Notifier>,
    progress: ProgressBar,
}

impl DownloadCoordinator {
    pub fn new(
        source: Arc<dyn VideoSource>,
        downloader: Arc<dyn BinaryDownloader>,
        saver: Arc<dyn FileSaver>,
        notifier: Arc<dyn Notifier>,
        progress: ProgressBar,
    ) -> Self {
        Self {
            source,
            downloader,
            saver,
            notifier,
            progress,
        }
    }

    pub fn progress(&self) -> &ProgressBar {
        &self.progress
    }

    /// Show a message and mirror it into the log
    pub fn notify(&self, message: &str) {
        tracing::info!(text = message, "notification");
        self.notifier.notify(message);
    }

    /// Download whatever `context` (a page URL) points at.
    ///
    /// The media transfer and the sidecar save run side by side. A failed
    /// transfer is reported in the outcome; only a failed sidecar is an error.
    pub async fn run(&self, context: &str, mode: DownloadMode) -> Result<DownloadOutcome, AppError> {
        if !is_video_page(context) {
            tracing::debug!(context, "combo pressed but not on video page");
            self.notify(messages::NOT_VIDEO_PAGE);
            return Ok(DownloadOutcome::WrongContext);
        }

        let key = extract_video_key(context).ok_or_else(|| {
            tracing::error!(context, "unable to find 24 character video key");
            self.notify(messages::NO_VIDEO_KEY);
            AppError::IdentifierNotFound(context.to_string())
        })?;

        self.progress.trickle(None);
        let metadata = self.fetch_metadata(&key).await?;
        tracing::info!(key = %key, "fetched metadata");

        let base = base_filename(metadata.uploader_name(), &key, metadata.title());
        let extension = file_extension(metadata.video_url());
        self.notify(&format!("Starting download: {}", base));

        let binary_job = match mode {
            DownloadMode::Full => Some(self.binary_job(metadata.video_url(), &base, &extension)),
            DownloadMode::MetadataOnly => None,
        };
        let sidecar_name = format!("{}.json", base);
        let sanitized = sanitize(metadata);

        let (binary, sidecar) = tokio::join!(
            async {
                match binary_job {
                    Some(job) => match job.run(self.downloader.as_ref()).await {
                        Ok(path) => BinaryOutcome::Saved(path),
                        Err(e) => BinaryOutcome::Failed(e),
                    },
                    None => BinaryOutcome::Skipped,
                }
            },
            self.save_sidecar(&sidecar_name, &sanitized)
        );
        let sidecar = sidecar?;

        if !binary.is_failed() {
            self.progress.set(100.0);
        }

        Ok(DownloadOutcome::Completed {
            base_filename: base,
            sidecar,
            binary,
        })
    }

    async fn fetch_metadata(&self, key: &VideoKey) -> Result<VideoMetadata, AppError> {
        let response = self.source.fetch_video(key).await.map_err(|e| {
            tracing::error!(key = %key, error = %e, "metadata request failed");
            self.notify(messages::BAD_RESPONSE);
            AppError::FetchFailed(FetchFailure::Transport(e.to_string()))
        })?;

        if !response.is_success() {
            tracing::error!(key = %key, status = response.status, "bad response");
            let failure = if response.status == 401 {
                self.notify(messages::UNAUTHORISED);
                FetchFailure::Unauthorized
            } else {
                self.notify(messages::BAD_RESPONSE);
                FetchFailure::Status(response.status)
            };
            return Err(AppError::FetchFailed(failure));
        }

        parse_video_payload(&response.body).map_err(|e| {
            tracing::error!(key = %key, error = %e, "unexpected response from /api/videos");
            match e {
                AppError::EmptyPayload => self.notify(messages::EMPTY_RESPONSE),
                _ => self.notify(messages::INVALID_RESPONSE),
            }
            e
        })
    }

    fn binary_job(&self, url: &str, base: &str, extension: &str) -> DownloadJob {
        let filename = format!("{}{}", base, extension);
        let on_progress = self.progress.clone();
        let on_success = self.progress.clone();
        let on_failure = self.progress.clone();
        let notifier = Arc::clone(&self.notifier);
        let failed_name = filename.clone();

        DownloadJob::new(url, filename)
            .on_progress(move |_| on_progress.trickle(None))
            .on_success(move |path| {
                tracing::info!(path = %path.display(), "download finished");
                on_success.set(100.0);
            })
            .on_failure(move |e| {
                tracing::error!(file = %failed_name, error = %e, "download failed");
                on_failure.reset();
                let message = format!("Error during download: {}", failed_name);
                tracing::info!(text = %message, "notification");
                notifier.notify(&message);
            })
    }

    async fn save_sidecar(
        &self,
        filename: &str,
        metadata: &SanitizedMetadata,
    ) -> Result<PathBuf, AppError> {
        let saved = match metadata.to_json_pretty() {
            Ok(json) => self.saver.save(filename, Bytes::from(json)).await,
            Err(e) => Err(AppError::Io(format!("JSON encode error: {}", e))),
        };

        saved.map_err(|e| {
            tracing::error!(file = filename, error = %e, "error saving sidecar");
            self.notify(messages::SAVE_FAILED);
            AppError::SidecarSaveFailed {
                filename: filename.to_string(),
                reason: e.to_string(),
            }
        })
    }
}
