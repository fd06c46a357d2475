//! In-memory stand-ins for the network, disk and toast collaborators.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;

use super::job::{BinaryDownloader, FileSaver, Notifier};
use super::DownloadCoordinator;
use crate::api::{self, ApiError, ApiResponse, VideoSource};
use crate::domain::{AppError, VideoKey};
use crate::progress::ProgressBar;

pub(crate) const VIDEO_PAGE: &str = "https://pmvhaven.com/video/Best-Of_68f1c2d3e4b5a69788776655";

pub(crate) struct FakeSource {
    response: Option<(u16, String)>,
    requests: AtomicUsize,
}

impl FakeSource {
    pub(crate) fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VideoSource for FakeSource {
    async fn fetch_video(&self, _key: &VideoKey) -> api::Result<ApiResponse> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Some((status, body)) => Ok(ApiResponse {
                status: *status,
                body: Bytes::from(body.clone()),
            }),
            None => Err(ApiError::ApiError("connection refused".to_string())),
        }
    }
}

#[derive(Default)]
pub(crate) struct FakeDownloader {
    fail: bool,
    calls: Mutex<Vec<(String, String)>>,
}

impl FakeDownloader {
    pub(crate) fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BinaryDownloader for FakeDownloader {
    async fn download(
        &self,
        url: &str,
        filename: &str,
        on_progress: &(dyn Fn(f32) + Send + Sync),
    ) -> Result<PathBuf, AppError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), filename.to_string()));
        on_progress(0.5);
        if self.fail {
            Err(AppError::BinaryDownloadFailed("connection reset".to_string()))
        } else {
            Ok(PathBuf::from(filename))
        }
    }
}

#[derive(Default)]
pub(crate) struct MemorySaver {
    fail: bool,
    files: Mutex<Vec<(String, Bytes)>>,
}

impl MemorySaver {
    pub(crate) fn files(&self) -> Vec<(String, Bytes)> {
        self.files.lock().unwrap().clone()
    }

    pub(crate) fn only_file(&self) -> (String, Bytes) {
        let files = self.files();
        assert_eq!(files.len(), 1, "expected exactly one saved file");
        files.into_iter().next().unwrap()
    }
}

#[async_trait]
impl FileSaver for MemorySaver {
    async fn save(&self, filename: &str, contents: Bytes) -> Result<PathBuf, AppError> {
        if self.fail {
            return Err(AppError::Io("permission denied".to_string()));
        }
        self.files
            .lock()
            .unwrap()
            .push((filename.to_string(), contents));
        Ok(PathBuf::from(filename))
    }
}

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub(crate) fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

pub(crate) struct Harness {
    pub source: Arc<FakeSource>,
    pub downloader: Arc<FakeDownloader>,
    pub saver: Arc<MemorySaver>,
    pub notifier: Arc<RecordingNotifier>,
    pub progress: ProgressBar,
}

impl Harness {
    fn build(response: Option<(u16, String)>) -> Self {
        Self {
            source: Arc::new(FakeSource {
                response,
                requests: AtomicUsize::new(0),
            }),
            downloader: Arc::default(),
            saver: Arc::default(),
            notifier: Arc::default(),
            progress: ProgressBar::new(),
        }
    }

    pub(crate) fn ok(body: &str) -> Self {
        Self::build(Some((200, body.to_string())))
    }

    pub(crate) fn with_status(status: u16, body: &str) -> Self {
        Self::build(Some((status, body.to_string())))
    }

    pub(crate) fn unreachable() -> Self {
        Self::build(None)
    }

    pub(crate) fn failing_download(mut self) -> Self {
        self.downloader = Arc::new(FakeDownloader {
            fail: true,
            ..Default::default()
        });
        self
    }

    pub(crate) fn failing_save(mut self) -> Self {
        self.saver = Arc::new(MemorySaver {
            fail: true,
            ..Default::default()
        });
        self
    }

    pub(crate) fn coordinator(&self) -> DownloadCoordinator {
        DownloadCoordinator::new(
            self.source.clone(),
            self.downloader.clone(),
            self.saver.clone(),
            self.notifier.clone(),
            self.progress.clone(),
        )
    }
}
