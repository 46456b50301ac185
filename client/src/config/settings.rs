// Client settings: embedded defaults, optional JSON override file and an
// environment override for the store address.
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ClientError;

pub const API_URL_ENV: &str = "ARTICLES_API_URL";

const DEFAULT_CONFIG: &str = include_str!("../../assets/config/default.json");

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ClientSettings {
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub notice_ttl_ms: u64,
    pub undo_ttl_ms: u64,
    pub page_size_options: Vec<usize>,
    pub default_page_size: usize,
    pub preferences_file: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        ClientSettings {
            api_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 30,
            notice_ttl_ms: 3000,
            undo_ttl_ms: 5000,
            page_size_options: vec![5, 10, 25],
            default_page_size: 10,
            preferences_file: "preferences.json".to_string(),
        }
    }
}

impl ClientSettings {
    pub fn load_default() -> Result<Self, ClientError> {
        Self::from_json(DEFAULT_CONFIG)
    }

    pub fn from_json(json: &str) -> Result<Self, ClientError> {
        let settings: ClientSettings = serde_json::from_str(json)
            .map_err(|e| ClientError::Config(format!("Invalid settings JSON: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, ClientError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("Failed to read settings '{}': {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Loads `path` when given, the embedded defaults otherwise, then applies
    /// the `ARTICLES_API_URL` override.
    pub fn load(path: Option<&Path>) -> Result<Self, ClientError> {
        let mut settings = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::load_default()?,
        };
        if let Ok(url) = std::env::var(API_URL_ENV) {
            settings = settings.with_api_url(url);
        }
        Ok(settings)
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn notice_ttl(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.notice_ttl_ms as i64)
    }

    pub fn undo_ttl(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.undo_ttl_ms as i64)
    }

    fn validate(&self) -> Result<(), ClientError> {
        if self.api_url.trim().is_empty() {
            return Err(ClientError::Config("api_url must not be empty".to_string()));
        }
        if self.page_size_options.is_empty() || self.page_size_options.contains(&0) {
            return Err(ClientError::Config("page_size_options must be non-empty and positive".to_string()));
        }
        if !self.page_size_options.contains(&self.default_page_size) {
            return Err(ClientError::Config(format!(
                "default_page_size {} is not one of {:?}",
                self.default_page_size, self.page_size_options
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_embedded_defaults_match_default_impl() {
        assert_eq!(ClientSettings::load_default().unwrap(), ClientSettings::default());
    }

    #[test]
    fn test_from_file_override() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"api_url": "http://store:9000", "request_timeout_secs": 5, "notice_ttl_ms": 1000,
                "undo_ttl_ms": 2000, "page_size_options": [10, 50], "default_page_size": 50,
                "preferences_file": "prefs.json"}}"#
        )
        .unwrap();
        let settings = ClientSettings::from_file(file.path()).unwrap();
        assert_eq!(settings.api_url, "http://store:9000");
        assert_eq!(settings.default_page_size, 50);
        assert_eq!(settings.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_default_page_size_must_be_an_option() {
        let mut settings = ClientSettings::default();
        settings.default_page_size = 7;
        assert!(matches!(settings.validate(), Err(ClientError::Config(_))));
    }

    #[test]
    fn test_with_api_url_trims_trailing_slash() {
        let settings = ClientSettings::default().with_api_url("http://example.test/");
        assert_eq!(settings.api_url, "http://example.test");
    }
}
