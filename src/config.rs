use std::env;
use std::path::PathBuf;

use crate::api::ApiConfig;

pub const BASE_URL_VAR: &str = "PMVHAVEN_BASE_URL";
pub const COOKIE_VAR: &str = "PMVHAVEN_COOKIE";
pub const DOWNLOAD_DIR_VAR: &str = "PMVHAVEN_DOWNLOAD_DIR";

#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiConfig,
    pub download_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            download_dir: PathBuf::from("."),
        }
    }
}

impl Settings {
    /// Defaults overridden by whichever `PMVHAVEN_*` variables are set
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(base_url) = non_empty(BASE_URL_VAR) {
            settings.api.base_url = base_url;
        }
        settings.api.cookie = non_empty(COOKIE_VAR);
        if let Some(dir) = non_empty(DOWNLOAD_DIR_VAR) {
            settings.download_dir = PathBuf::from(dir);
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(|_| None);
        assert_eq!(settings.api.base_url, "https://pmvhaven.com");
        assert!(settings.api.cookie.is_none());
        assert_eq!(settings.download_dir, PathBuf::from("."));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            (BASE_URL_VAR, "http://localhost:8080"),
            (COOKIE_VAR, "session=abc"),
            (DOWNLOAD_DIR_VAR, "/tmp/videos"),
        ]
        .into_iter()
        .collect();
        let settings = Settings::from_lookup(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(settings.api.base_url, "http://localhost:8080");
        assert_eq!(settings.api.cookie.as_deref(), Some("session=abc"));
        assert_eq!(settings.download_dir, PathBuf::from("/tmp/videos"));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let settings = Settings::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(settings.api.base_url, "https://pmvhaven.com");
        assert!(settings.api.cookie.is_none());
    }
}
