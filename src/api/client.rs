use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use reqwest::header::COOKIE;
use reqwest::Client;
use thiserror::Error;
use url::Url;

use super::models::{ApiConfig, ApiResponse};
use crate::domain::VideoKey;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Where video metadata comes from.
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Fetch `/api/videos/{key}`. Non-2xx statuses are returned, not raised.
    async fn fetch_video(&self, key: &VideoKey) -> Result<ApiResponse>;
}

#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    http: Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn video_endpoint(&self, key: &VideoKey) -> String {
        format!(
            "{}/api/videos/{}",
            self.config.base_url.trim_end_matches('/'),
            key.as_str()
        )
    }

    /// Resolve a possibly relative media URL against the site origin
    pub fn resolve_url(&self, raw: &str) -> Result<Url> {
        let base = Url::parse(&self.config.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.config.base_url, e)))?;
        base.join(raw)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))
    }

    /// Stream a media file. Returns (total_size, stream)
    pub async fn download_file_stream(
        &self,
        download_url: &str,
    ) -> Result<(Option<u64>, BoxStream<'static, Result<bytes::Bytes>>)> {
        let url = self.resolve_url(download_url)?;
        let response = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| ApiError::ApiError(format!("Download request failed: {}", e)))?;

        let total_size = response.content_length();
        let stream = response.bytes_stream().map_err(ApiError::RequestError).boxed();

        Ok((total_size, stream))
    }
}

#[async_trait]
impl VideoSource for ApiClient {
    async fn fetch_video(&self, key: &VideoKey) -> Result<ApiResponse> {
        let mut request = self
            .http
            .get(self.video_endpoint(key))
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(cookie) = &self.config.cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        tracing::debug!(key = %key, status, bytes = body.len(), "metadata response received");

        Ok(ApiResponse { status, body })
    }
}
