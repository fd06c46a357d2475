use regex::Regex;
use url::Url;

use crate::domain::VideoKey;

const DEFAULT_EXTENSION: &str = ".mp4";

/// Find the first run of 24 alphanumeric characters in `context`
pub fn extract_video_key(context: &str) -> Option<VideoKey> {
    let re = Regex::new(r"[A-Za-z0-9]{24}").ok()?;
    re.find(context).map(|m| VideoKey::new(m.as_str()))
}

/// Only `/video...` pages carry a key worth downloading.
///
/// A pasted address without a scheme is read as `https://`.
pub fn is_video_page(context: &str) -> bool {
    let context = context.trim();
    let parsed = match Url::parse(context) {
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("https://{}", context))
        }
        other => other,
    };
    parsed
        .map(|url| url.path().starts_with("/video"))
        .unwrap_or(false)
}

/// Extension of the last path segment, dot included; `.mp4` when there is none
pub fn file_extension(url: &str) -> String {
    let Ok(re) = Regex::new(r"\.([a-zA-Z0-9]+)(\?|$)") else {
        return DEFAULT_EXTENSION.to_string();
    };
    match re.captures(url) {
        Some(caps) => format!(".{}", &caps[1]),
        None => DEFAULT_EXTENSION.to_string(),
    }
}

/// `"{uploader} - {key} - {title}"` with surrounding whitespace trimmed.
///
/// Spacing inside the uploader or title is kept as is. No filesystem escaping
/// happens here; that is up to whatever writes the file.
pub fn base_filename(uploader: &str, key: &VideoKey, title: &str) -> String {
    format!("{} - {} - {}", uploader.trim(), key, title.trim())
        .trim()
        .to_string()
}

/// Sanitize filename to remove invalid characters
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            _ => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}
