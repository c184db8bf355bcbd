//! # Application Configuration
//!
//! Where the collections live, what the receipts say, and the password rules.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     ESTORE_DATA_DIR=/srv/estore                                         │
//! │     ESTORE_STORE_NAME="Downtown Electronics"                            │
//! │     ESTORE_MIN_PASSWORD_LEN=8                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     ~/.config/estore/config.toml (Linux)                                │
//! │     ~/Library/Application Support/com.estore.estore/config.toml (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! data_dir = "/srv/estore"
//! store_name = "Electronic Store"
//! receipt_dir_name = "bills"
//! min_password_len = 4
//! default_reset_password = "changeme"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};
use estore_db::{DbConfig, DEFAULT_RECEIPT_DIR};

/// Back office configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the collection files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Printed in the receipt header.
    #[serde(default = "default_store_name")]
    pub store_name: String,

    /// Sub-directory of `data_dir` for exported receipts.
    #[serde(default = "default_receipt_dir_name")]
    pub receipt_dir_name: String,

    /// Shortest accepted password.
    /// Default: 4
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,

    /// Password an administrator reset assigns.
    #[serde(default = "default_reset_password")]
    pub default_reset_password: String,
}

fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "estore", "estore")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("data"))
}

fn default_store_name() -> String {
    "Electronic Store".to_string()
}

fn default_receipt_dir_name() -> String {
    DEFAULT_RECEIPT_DIR.to_string()
}

fn default_min_password_len() -> usize {
    4
}

fn default_reset_password() -> String {
    "changeme".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_dir: default_data_dir(),
            store_name: default_store_name(),
            receipt_dir_name: default_receipt_dir_name(),
            min_password_len: default_min_password_len(),
            default_reset_password: default_reset_password(),
        }
    }
}

impl AppConfig {
    /// Loads configuration: defaults, then the TOML file (if present), then
    /// environment overrides. The result is validated.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Like [`load`](Self::load), falling back to defaults on any error.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ConfigError::SaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::SaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        info!(?path, "Config saved");
        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::InvalidConfig("store_name must not be empty".into()));
        }
        if self.receipt_dir_name.trim().is_empty()
            || self.receipt_dir_name.contains(['/', '\\'])
        {
            return Err(ConfigError::InvalidConfig(format!(
                "receipt_dir_name must be a plain directory name, got: '{}'",
                self.receipt_dir_name
            )));
        }
        if self.min_password_len == 0 {
            return Err(ConfigError::InvalidConfig(
                "min_password_len must be at least 1".into(),
            ));
        }
        if self.default_reset_password.chars().count() < self.min_password_len {
            return Err(ConfigError::InvalidConfig(format!(
                "default_reset_password must be at least {} characters",
                self.min_password_len
            )));
        }
        Ok(())
    }

    /// Store configuration derived from this config.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.data_dir).receipt_dir(&self.receipt_dir_name)
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("ESTORE_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data directory from environment");
            self.data_dir = PathBuf::from(dir);
        }

        if let Some(name) = lookup("ESTORE_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(len) = lookup("ESTORE_MIN_PASSWORD_LEN") {
            match len.parse() {
                Ok(len) => self.min_password_len = len,
                Err(_) => warn!(value = %len, "Ignoring invalid ESTORE_MIN_PASSWORD_LEN"),
            }
        }
    }

    /// `<platform config dir>/config.toml`
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "estore", "estore")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.receipt_dir_name, "bills");
        assert_eq!(config.min_password_len, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("config.toml");

        let config = AppConfig {
            data_dir: dir.path().join("data"),
            store_name: "Downtown Electronics".to_string(),
            ..AppConfig::default()
        };
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("store_name = \"Downtown Electronics\""));

        let loaded: AppConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let loaded: AppConfig = toml::from_str("store_name = \"Corner Shop\"").unwrap();
        assert_eq!(loaded.store_name, "Corner Shop");
        assert_eq!(loaded.receipt_dir_name, "bills");
        assert_eq!(loaded.min_password_len, 4);
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(Some(dir.path().join("absent.toml")));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "min_password_len = \"four\"").unwrap();
        assert!(matches!(
            AppConfig::load(Some(path)),
            Err(ConfigError::LoadFailed(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let mut config = AppConfig::default();
        config.apply_overrides(|key| match key {
            "ESTORE_DATA_DIR" => Some("/srv/estore".to_string()),
            "ESTORE_STORE_NAME" => Some("Override Store".to_string()),
            "ESTORE_MIN_PASSWORD_LEN" => Some("not-a-number".to_string()),
            _ => None,
        });
        assert_eq!(config.data_dir, PathBuf::from("/srv/estore"));
        assert_eq!(config.store_name, "Override Store");
        assert_eq!(config.min_password_len, 4);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = AppConfig {
            receipt_dir_name: "a/b".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AppConfig {
            min_password_len: 12,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_db_config() {
        let config = AppConfig {
            data_dir: PathBuf::from("/srv/estore"),
            receipt_dir_name: "receipts".to_string(),
            ..AppConfig::default()
        };
        let db = config.db_config();
        assert_eq!(db.data_dir, Some(PathBuf::from("/srv/estore")));
        assert_eq!(db.receipt_dir, "receipts");
    }
}
