use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::AppError;

const FALLBACK_UPLOADER: &str = "Unknown";

/// Raw answer from the metadata endpoint, before any validation
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: bytes::Bytes,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The `data` object of `GET /api/videos/{key}`.
///
/// The object is kept exactly as the service sent it, key order and nulls
/// included. Only `videoUrl` and `title` are checked; everything else is read
/// leniently through the accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VideoMetadata {
    fields: Map<String, Value>,
}

impl VideoMetadata {
    /// Requires a non-empty string `videoUrl` and a string `title`.
    pub fn from_data(fields: Map<String, Value>) -> Result<Self, AppError> {
        let has_video_url = fields
            .get("videoUrl")
            .and_then(Value::as_str)
            .is_some_and(|url| !url.is_empty());
        if !has_video_url {
            return Err(AppError::MalformedPayload(
                "videoUrl not found in payload".to_string(),
            ));
        }
        if !fields.get("title").is_some_and(Value::is_string) {
            return Err(AppError::MalformedPayload(
                "title not found in payload".to_string(),
            ));
        }
        Ok(Self { fields })
    }

    fn str_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    pub fn video_url(&self) -> &str {
        self.str_field("videoUrl").unwrap_or_default()
    }

    pub fn title(&self) -> &str {
        self.str_field("title").unwrap_or_default()
    }

    /// First credited creator, falling back to the uploading account
    pub fn uploader_name(&self) -> &str {
        let first_creator = match self.fields.get("creator") {
            Some(Value::Array(creators)) => creators.first().and_then(Value::as_str),
            Some(Value::String(creator)) => Some(creator.as_str()),
            _ => None,
        };

        first_creator
            .filter(|name| !name.is_empty())
            .or(self.str_field("uploader").filter(|name| !name.is_empty()))
            .unwrap_or(FALLBACK_UPLOADER)
    }

    /// Drop every field for which `keep` returns false, preserving order
    pub(crate) fn retain_fields(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.fields.retain(|key, _| keep(key));
    }

    #[cfg(test)]
    pub(crate) fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// Decode and validate a metadata response body.
///
/// A body that decodes to nothing (`null`, `false`, `0`, `""`) is
/// [`AppError::EmptyPayload`]. Anything without a usable `data.videoUrl` is
/// [`AppError::MalformedPayload`].
pub fn parse_video_payload(body: &[u8]) -> Result<VideoMetadata, AppError> {
    let json: Value = serde_json::from_slice(body)
        .map_err(|e| AppError::MalformedPayload(format!("JSON decode error: {}", e)))?;

    let empty = match &json {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    };
    if empty {
        return Err(AppError::EmptyPayload);
    }

    let data = match json {
        Value::Object(mut map) => map.remove("data"),
        _ => None,
    };
    match data {
        Some(Value::Object(fields)) => VideoMetadata::from_data(fields),
        _ => Err(AppError::MalformedPayload(
            "data object not found in payload".to_string(),
        )),
    }
}

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Origin of the site; relative media URLs resolve against it
    pub base_url: String,
    /// Session cookie for signed-in requests
    pub cookie: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://pmvhaven.com".to_string(),
            cookie: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    #[test]
    fn test_parse_valid_payload() {
        let metadata = parse_video_payload(&body(json!({
            "data": {
                "videoUrl": "https://cdn.example.com/v/clip.mp4",
                "title": "Clip",
                "creator": ["Alice", "Carol"],
                "uploader": "Bob",
                "views": 7
            }
        })))
        .unwrap();

        assert_eq!(metadata.video_url(), "https://cdn.example.com/v/clip.mp4");
        assert_eq!(metadata.title(), "Clip");
        assert_eq!(metadata.uploader_name(), "Alice");
        assert_eq!(metadata.fields().get("views"), Some(&json!(7)));
    }

    #[test]
    fn test_uploader_fallback() {
        let metadata = parse_video_payload(&body(json!({
            "data": { "videoUrl": "u.mp4", "title": "T", "creator": [], "uploader": "Bob" }
        })))
        .unwrap();
        assert_eq!(metadata.uploader_name(), "Bob");

        let metadata = parse_video_payload(&body(json!({
            "data": { "videoUrl": "u.mp4", "title": "T", "uploader": "Bob" }
        })))
        .unwrap();
        assert_eq!(metadata.uploader_name(), "Bob");

        let metadata = parse_video_payload(&body(json!({
            "data": { "videoUrl": "u.mp4", "title": "T", "creator": null }
        })))
        .unwrap();
        assert_eq!(metadata.uploader_name(), "Unknown");
    }

    #[test]
    fn test_odd_creator_shapes_are_tolerated() {
        let metadata = parse_video_payload(&body(json!({
            "data": { "creator": ["Alice", null], "videoUrl": "u.mp4", "title": "T" }
        })))
        .unwrap();
        assert_eq!(metadata.uploader_name(), "Alice");

        let metadata = parse_video_payload(&body(json!({
            "data": { "creator": [null, "Carol"], "uploader": "Bob", "videoUrl": "u.mp4", "title": "T" }
        })))
        .unwrap();
        assert_eq!(metadata.uploader_name(), "Bob");

        let metadata = parse_video_payload(&body(json!({
            "data": { "creator": "Dana", "uploader": {"id": 4}, "videoUrl": "u.mp4", "title": "T" }
        })))
        .unwrap();
        assert_eq!(metadata.uploader_name(), "Dana");

        let metadata = parse_video_payload(&body(json!({
            "data": { "creator": [{"name": "Eve"}], "uploader": 12, "videoUrl": "u.mp4", "title": "T" }
        })))
        .unwrap();
        assert_eq!(metadata.uploader_name(), "Unknown");
    }

    #[test]
    fn test_empty_payload() {
        assert!(matches!(parse_video_payload(b"null"), Err(AppError::EmptyPayload)));
        assert!(matches!(parse_video_payload(b"\"\""), Err(AppError::EmptyPayload)));
        assert!(matches!(parse_video_payload(b"false"), Err(AppError::EmptyPayload)));
    }

    #[test]
    fn test_malformed_payload() {
        for raw in [
            &b"not json"[..],
            b"{}",
            b"{\"data\": null}",
            b"{\"data\": {\"title\": \"T\"}}",
            b"{\"data\": {\"videoUrl\": \"\", \"title\": \"T\"}}",
            b"{\"data\": {\"videoUrl\": \"u.mp4\"}}",
            b"{\"data\": {\"videoUrl\": \"u.mp4\", \"title\": null}}",
            b"[1, 2]",
        ] {
            assert!(
                matches!(parse_video_payload(raw), Err(AppError::MalformedPayload(_))),
                "accepted {}",
                String::from_utf8_lossy(raw)
            );
        }
    }
}
