//! Synchronizer configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use idsync_route::RouterOptions;

use crate::error::CoreError;
use crate::sync::{SyncConfig, DEFAULT_PARAM_KEY, DEFAULT_WAIT_TIMEOUT_MS};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Query key carrying the identifiers
    pub param_key: String,
    /// How long `get_ids` waits, in milliseconds. `null` waits forever.
    pub wait_timeout_ms: Option<u64>,
    /// Navigate even when a delete removes nothing
    pub navigate_on_noop: bool,
    /// History entries kept by the in-process router
    pub max_history: usize,
}

impl Config {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;

        tracing::debug!(path = %path.as_ref().display(), "Loaded configuration");

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.param_key.trim().is_empty() {
            return Err(CoreError::Config("param_key cannot be empty".to_string()));
        }
        if self.max_history == 0 {
            return Err(CoreError::Config(
                "max_history must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig {
            key: self.param_key.clone(),
            wait_timeout: self.wait_timeout_ms.map(Duration::from_millis),
            navigate_on_noop: self.navigate_on_noop,
        }
    }

    pub fn router_options(&self) -> RouterOptions {
        RouterOptions {
            max_history: self.max_history,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let router = RouterOptions::default();

        Self {
            param_key: DEFAULT_PARAM_KEY.to_string(),
            wait_timeout_ms: Some(DEFAULT_WAIT_TIMEOUT_MS),
            navigate_on_noop: false,
            max_history: router.max_history,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_matches_sync_default() {
        let config = Config::default();
        assert_eq!(config.sync_config(), SyncConfig::default());
        assert_eq!(config.router_options().max_history, 100);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "param_key": "open", "wait_timeout_ms": null }}"#).unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.param_key, "open");
        assert_eq!(config.sync_config().wait_timeout, None);
        assert!(!config.navigate_on_noop);
        assert_eq!(config.max_history, 100);
    }

    #[test]
    fn test_load_rejects_empty_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "param_key": "  " }}"#).unwrap();

        assert!(matches!(Config::load(file.path()), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_history() {
        let config = Config {
            max_history: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "max_history": 0 }}"#).unwrap();
        assert!(matches!(Config::load(file.path()), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("/nonexistent/idsync.json");
        assert!(matches!(result, Err(CoreError::Io(_))));
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(matches!(
            Config::load(file.path()),
            Err(CoreError::Serialization(_))
        ));
    }
}
