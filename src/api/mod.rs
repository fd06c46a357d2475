pub mod client;
pub mod models;

pub use client::{ApiClient, ApiError, Result, VideoSource};
pub use models::{parse_video_payload, ApiConfig, ApiResponse, VideoMetadata};
