//! Configuration for [`DirFs`](crate::DirFs)
//!
//! Configurations are JSON documents; see [`DirFsConfig`] for the fields.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Settings for opening a [`DirFs`](crate::DirFs)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirFsConfig {
    /// Host directory the filesystem is rooted at
    pub root: PathBuf,
    /// Create the root, and any missing parents, if it does not exist
    #[serde(default)]
    pub create_root: bool,
    /// Permission bits for directories created for the root
    #[serde(default = "default_root_mode")]
    pub root_mode: u32,
}

fn default_root_mode() -> u32 {
    0o755
}

impl DirFsConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            create_root: false,
            root_mode: default_root_mode(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("root cannot be empty".to_string()));
        }
        if self.root_mode & !0o777 != 0 {
            return Err(ConfigError::Invalid(format!(
                "root_mode {:o} has bits outside 0o777",
                self.root_mode
            )));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration
    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        let config: DirFsConfig =
            serde_json::from_str(data).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data =
            fs::read_to_string(path.as_ref()).map_err(|err| ConfigError::Io(err.to_string()))?;
        Self::from_json(&data)
    }
}

/// Errors loading or applying a [`DirFsConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_config_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("dirfs.json");
        fs::write(&config_path, r#"{ "root": "/srv/data" }"#).unwrap();

        let config = DirFsConfig::load_from_path(&config_path).unwrap();
        assert_eq!(config.root, PathBuf::from("/srv/data"));
        assert!(!config.create_root);
        assert_eq!(config.root_mode, 0o755);
    }

    #[test]
    fn test_load_full_config() {
        let config = DirFsConfig::from_json(
            r#"
            {
              "root": "/var/cache/app",
              "create_root": true,
              "root_mode": 448
            }
            "#,
        )
        .unwrap();
        assert!(config.create_root);
        assert_eq!(config.root_mode, 0o700);
    }

    #[test]
    fn test_missing_root_fails_to_parse() {
        let result = DirFsConfig::from_json(r#"{ "create_root": true }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_empty_root_is_invalid() {
        let result = DirFsConfig::from_json(r#"{ "root": "" }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_oversized_mode_is_invalid() {
        let mut config = DirFsConfig::new("/tmp");
        config.root_mode = 0o4755;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let result = DirFsConfig::load_from_path(dir.path().join("absent.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = DirFsConfig::new("/data");
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(DirFsConfig::from_json(&json).unwrap(), config);
    }
}
