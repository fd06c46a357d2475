use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use tokio::io::AsyncWriteExt;

use super::job::{BinaryDownloader, FileSaver};
use crate::{api::ApiClient, domain::AppError, utils::sanitize_filename};

fn target_path(dir: &Path, filename: &str) -> PathBuf {
    dir.join(sanitize_filename(filename))
}

/// Saves artifacts into a directory, escaping characters filesystems reject.
#[derive(Debug, Clone)]
pub struct DiskSaver {
    dir: PathBuf,
}

impl DiskSaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl FileSaver for DiskSaver {
    async fn save(&self, filename: &str, contents: Bytes) -> Result<PathBuf, AppError> {
        let path = target_path(&self.dir, filename);
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::Io(format!("Failed to create {}: {}", self.dir.display(), e)))?;
        tokio::fs::write(&path, &contents)
            .await
            .map_err(|e| AppError::Io(format!("Failed to write {}: {}", path.display(), e)))?;

        tracing::debug!(path = %path.display(), bytes = contents.len(), "file saved");
        Ok(path)
    }
}

/// Streams media over HTTP into a directory.
#[derive(Clone)]
pub struct HttpDownloader {
    api_client: ApiClient,
    dir: PathBuf,
}

impl HttpDownloader {
    pub fn new(api_client: ApiClient, dir: impl Into<PathBuf>) -> Self {
        Self {
            api_client,
            dir: dir.into(),
        }
    }

    async fn write_stream(
        &self,
        url: &str,
        path: &Path,
        on_progress: &(dyn Fn(f32) + Send + Sync),
    ) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::Io(format!("Failed to create {}: {}", self.dir.display(), e)))?;
        let mut file = tokio::fs::File::create(path)
            .await
            .map_err(|e| AppError::Io(format!("Failed to create file: {}", e)))?;

        let (total, mut stream) = self
            .api_client
            .download_file_stream(url)
            .await
            .map_err(|e| AppError::BinaryDownloadFailed(e.to_string()))?;
        on_progress(0.0);

        let mut downloaded = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| AppError::BinaryDownloadFailed(e.to_string()))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| AppError::Io(format!("Write error: {}", e)))?;

            downloaded += chunk.len() as u64;
            on_progress(match total {
                Some(total) if total > 0 => downloaded as f32 / total as f32,
                _ => 0.0,
            });
        }

        file.sync_all()
            .await
            .map_err(|e| AppError::Io(format!("Failed to sync file: {}", e)))
    }
}

#[async_trait]
impl BinaryDownloader for HttpDownloader {
    async fn download(
        &self,
        url: &str,
        filename: &str,
        on_progress: &(dyn Fn(f32) + Send + Sync),
    ) -> Result<PathBuf, AppError> {
        let path = target_path(&self.dir, filename);

        if let Err(e) = self.write_stream(url, &path, on_progress).await {
            if let Err(remove_err) = tokio::fs::remove_file(&path).await {
                tracing::debug!(path = %path.display(), error = %remove_err, "no partial file to remove");
            }
            return Err(e);
        }

        tracing::debug!(path = %path.display(), "media saved");
        Ok(path)
    }
}
