//! Configuration file support for bd-inspect.
//!
//! Provides YAML-based configuration through `bd-inspect.config.yml` files,
//! including data structures, file loading, validation and environment overrides.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::adapters::outbound::ArtifactoryCredentials;
use crate::inspection::services::{
    parse_time_zone, DateTimeManager, DEFAULT_DATE_TIME_PATTERN, DEFAULT_MAX_RETRY_COUNT,
};
use crate::shared::error::PropertyError;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "bd-inspect.config.yml";

pub const ENV_ARTIFACTORY_URL: &str = "ARTIFACTORY_BASEURL";
pub const ENV_ARTIFACTORY_USERNAME: &str = "ARTIFACTORY_USERNAME";
pub const ENV_ARTIFACTORY_PASSWORD: &str = "ARTIFACTORY_PASSWORD";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub artifactory: Option<ArtifactoryConfig>,
    pub max_retry_count: Option<u32>,
    pub date_time_pattern: Option<String>,
    pub date_time_zone: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Connection settings of the Artifactory instance holding the properties.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ArtifactoryConfig {
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ConfigFile {
    /// Overrides Artifactory settings with `ARTIFACTORY_*` environment variables.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let url = lookup(ENV_ARTIFACTORY_URL);
        let username = lookup(ENV_ARTIFACTORY_USERNAME);
        let password = lookup(ENV_ARTIFACTORY_PASSWORD);

        if url.is_none() && username.is_none() && password.is_none() {
            return;
        }

        let artifactory = self.artifactory.get_or_insert_with(ArtifactoryConfig::default);
        if url.is_some() {
            artifactory.url = url;
        }
        if username.is_some() {
            artifactory.username = username;
        }
        if password.is_some() {
            artifactory.password = password;
        }
    }

    pub fn max_retry_count(&self) -> u32 {
        self.max_retry_count.unwrap_or(DEFAULT_MAX_RETRY_COUNT)
    }

    /// Builds the date formatting rules from `date_time_pattern` and `date_time_zone`.
    pub fn date_time_manager(&self) -> Result<DateTimeManager> {
        DateTimeManager::with_time_zone_name(
            self.date_time_pattern
                .as_deref()
                .unwrap_or(DEFAULT_DATE_TIME_PATTERN),
            self.date_time_zone.as_deref(),
        )
    }

    pub fn artifactory_url(&self) -> Option<&str> {
        self.artifactory.as_ref().and_then(|a| a.url.as_deref())
    }

    /// Basic authentication credentials, when a username is configured.
    pub fn artifactory_credentials(&self) -> Option<ArtifactoryCredentials> {
        let artifactory = self.artifactory.as_ref()?;
        let username = artifactory.username.clone()?;
        Some(ArtifactoryCredentials {
            username,
            password: artifactory.password.clone().unwrap_or_default(),
        })
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = if content.trim().is_empty() {
        ConfigFile::default()
    } else {
        serde_yaml_ng::from_str(&content).with_context(|| {
            format!(
                "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
                path.display()
            )
        })?
    };

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.max_retry_count == Some(0) {
        return Err(invalid_config(format!(
            "max_retry_count must be at least 1.\n\n💡 Hint: The plugin default is {}.",
            DEFAULT_MAX_RETRY_COUNT
        )));
    }

    if let Some(ref pattern) = config.date_time_pattern {
        if pattern.trim().is_empty() {
            return Err(invalid_config(format!(
                "date_time_pattern must not be empty.\n\n💡 Hint: Use a strftime pattern such as \"{}\".",
                DEFAULT_DATE_TIME_PATTERN
            )));
        }
    }

    if let Some(zone) = config.date_time_zone.as_deref().filter(|z| !z.trim().is_empty()) {
        parse_time_zone(zone).context("Invalid config: date_time_zone")?;
    }

    config
        .date_time_manager()
        .context("Invalid config: date_time_pattern")?;

    Ok(())
}

fn invalid_config(message: String) -> anyhow::Error {
    PropertyError::Validation {
        message: format!("Invalid config: {}", message),
    }
    .into()
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        tracing::warn!("Unknown config field '{}' will be ignored.", key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
artifactory:
  url: http://localhost:8081/artifactory
  username: admin
  password: password
max_retry_count: 3
date_time_pattern: "%Y-%m-%d %H:%M:%S"
date_time_zone: "+02:00"
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(
            config.artifactory_url(),
            Some("http://localhost:8081/artifactory")
        );
        assert_eq!(config.max_retry_count(), 3);
        let credentials = config.artifactory_credentials().unwrap();
        assert_eq!(credentials.username, "admin");
        assert_eq!(credentials.password, "password");

        let manager = config.date_time_manager().unwrap();
        assert_eq!(manager.pattern(), "%Y-%m-%d %H:%M:%S");
        assert_eq!(
            manager.time_zone().unwrap().offset_at(chrono::Utc::now()).local_minus_utc(),
            7200
        );
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_FILENAME);
        fs::write(&config_path, "max_retry_count: 7\n").unwrap();

        let config = discover_config(dir.path()).unwrap();
        assert!(config.is_some());
        assert_eq!(config.unwrap().max_retry_count(), 7);
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        let config = discover_config(dir.path()).unwrap();
        assert!(config.is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config_from_path(Path::new("/nonexistent/config.yml"));
        assert!(result.is_err());
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("bad.yml");
        fs::write(&config_path, "invalid: yaml: [[[broken").unwrap();

        let result = load_config_from_path(&config_path);
        assert!(result.is_err());
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_zero_max_retry_count_validation_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "max_retry_count: 0\n").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("max_retry_count must be at least 1"));
    }

    #[test]
    fn test_blank_pattern_validation_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "date_time_pattern: \"   \"\n").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("date_time_pattern must not be empty"));
    }

    #[test]
    fn test_invalid_time_zone_validation_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "date_time_zone: Mars/Olympus\n").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("date_time_zone"));
    }

    #[test]
    fn test_named_time_zone_accepted() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "date_time_zone: Europe/Paris\n").unwrap();

        let manager = load_config_from_path(&config_path)
            .unwrap()
            .date_time_manager()
            .unwrap();
        assert_eq!(manager.time_zone().unwrap().to_string(), "Europe/Paris");
    }

    #[test]
    fn test_blank_time_zone_means_none() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "date_time_zone: \"  \"\n").unwrap();

        let manager = load_config_from_path(&config_path)
            .unwrap()
            .date_time_manager()
            .unwrap();
        assert!(manager.time_zone().is_none());
    }

    #[test]
    fn test_unknown_fields_warning() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
max_retry_count: 5
unknown_field: true
another_unknown: value
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.unknown_fields.len(), 2);
        assert!(config.unknown_fields.contains_key("unknown_field"));
        assert!(config.unknown_fields.contains_key("another_unknown"));
    }

    #[test]
    fn test_env_overrides_replace_file_values() {
        let mut config = ConfigFile {
            artifactory: Some(ArtifactoryConfig {
                url: Some("http://file:8081/artifactory".to_string()),
                username: Some("file-user".to_string()),
                password: None,
            }),
            ..ConfigFile::default()
        };

        config.apply_overrides(|key| match key {
            ENV_ARTIFACTORY_URL => Some("http://env:8081/artifactory".to_string()),
            ENV_ARTIFACTORY_PASSWORD => Some("secret".to_string()),
            _ => None,
        });

        assert_eq!(config.artifactory_url(), Some("http://env:8081/artifactory"));
        let credentials = config.artifactory_credentials().unwrap();
        assert_eq!(credentials.username, "file-user");
        assert_eq!(credentials.password, "secret");
    }

    #[test]
    fn test_env_overrides_ignore_blank_values() {
        let mut config = ConfigFile::default();
        config.apply_overrides(|_| Some("  ".to_string()));
        assert!(config.artifactory.is_none());
    }

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();
        assert!(config.artifactory.is_none());
        assert_eq!(config.max_retry_count(), DEFAULT_MAX_RETRY_COUNT);
        assert!(config.artifactory_credentials().is_none());
        assert_eq!(
            config.date_time_manager().unwrap().pattern(),
            DEFAULT_DATE_TIME_PATTERN
        );
        assert!(config.unknown_fields.is_empty());
    }
}
