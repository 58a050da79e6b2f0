use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BASE_URL, MIN_POLL_INTERVAL_MS, POLL_INTERVAL_MS};

/// Connection settings for the dashboard backend, loadable from a JSON file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoreConfig {
    /// Backend base URL, e.g. `https://dashboard.apps.example.com`
    pub base_url: String,

    /// Bearer token forwarded verbatim as `Authorization`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Poll interval for the connection-type list
    pub poll_interval_ms: u64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            poll_interval_ms: POLL_INTERVAL_MS,
        }
    }
}

impl CoreConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Load config from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: CoreConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Reject values the poller cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms < MIN_POLL_INTERVAL_MS {
            bail!(
                "pollIntervalMs must be at least {}, got {}",
                MIN_POLL_INTERVAL_MS,
                self.poll_interval_ms
            );
        }
        Ok(())
    }

    /// Resolve the effective config: explicit file, then the default file if
    /// present, then environment overrides on top.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::load(&path)?,
                _ => Self::default(),
            },
        };
        config.apply_env();
        Ok(config)
    }

    /// `ODH_BASE_URL` and `ODH_TOKEN` take precedence over file values
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("ODH_BASE_URL") {
            if !url.is_empty() {
                self.base_url = url;
            }
        }
        if let Ok(token) = std::env::var("ODH_TOKEN") {
            if !token.is_empty() {
                self.token = Some(token);
            }
        }
    }

    /// Never shorter than [`MIN_POLL_INTERVAL_MS`], even for configs built in code
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(MIN_POLL_INTERVAL_MS))
    }
}

/// `~/.config/odh-dashboard/config.json` (platform equivalent elsewhere)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("odh-dashboard").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_config_minimal() {
        let config: CoreConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.poll_interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_parse_config_full() {
        let json = r#"{
            "baseUrl": "https://dashboard.example.com",
            "token": "sha256~abc",
            "pollIntervalMs": 5000
        }"#;
        let config: CoreConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.base_url, "https://dashboard.example.com");
        assert_eq!(config.token.as_deref(), Some("sha256~abc"));
        assert_eq!(config.poll_interval_ms, 5000);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"baseUrl": "http://127.0.0.1:9000"}}"#).unwrap();

        let config = CoreConfig::load(file.path()).unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert!(config.token.is_none());
    }

    #[test]
    fn test_load_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = CoreConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse config file"));
    }

    #[test]
    fn test_load_rejects_zero_poll_interval() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"pollIntervalMs": 0}}"#).unwrap();

        let err = CoreConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Invalid config file"));
        assert_eq!(
            err.root_cause().to_string(),
            "pollIntervalMs must be at least 1000, got 0"
        );
    }

    #[test]
    fn test_poll_interval_has_floor() {
        let config = CoreConfig {
            poll_interval_ms: 10,
            ..CoreConfig::default()
        };
        assert!(config.validate().is_err());
        assert_eq!(config.poll_interval(), Duration::from_millis(1_000));

        let config = CoreConfig {
            poll_interval_ms: 1_000,
            ..CoreConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_token_not_serialized_when_absent() {
        let json = serde_json::to_string(&CoreConfig::default()).unwrap();
        assert!(!json.contains("token"));
    }
}
