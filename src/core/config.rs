use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::dispatcher::DispatchSettings;
use crate::core::explorer::client::DEFAULT_REGION;
use crate::core::response::DEFAULT_ACTION_GROUP;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_format")]
    pub default_format: String,
    #[serde(default = "default_color")]
    pub color: String,
    /// Action group echoed in responses when the request has none.
    #[serde(default = "default_action_group")]
    pub action_group: String,
    /// Largest `lookback_days` accepted by the anomaly query.
    #[serde(default = "default_max_lookback_days")]
    pub max_lookback_days: u32,
}

fn default_format() -> String {
    "text".to_string()
}
fn default_color() -> String {
    "auto".to_string()
}
fn default_action_group() -> String {
    DEFAULT_ACTION_GROUP.to_string()
}
/// Upper bound accepted for `max_lookback_days`.
pub const LOOKBACK_DAYS_LIMIT: u32 = 365;

fn default_max_lookback_days() -> u32 {
    90
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_format: default_format(),
            color: default_color(),
            action_group: default_action_group(),
            max_lookback_days: default_max_lookback_days(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialMode {
    /// AWS default credential chain.
    #[default]
    Default,
    /// Keys from this config file.
    Static,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsSettings {
    #[serde(default = "default_region")]
    pub region: String,
    /// Overrides `https://ce.<region>.amazonaws.com`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub credentials: CredentialMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_access_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

impl Default for AwsSettings {
    fn default() -> Self {
        Self {
            region: default_region(),
            endpoint: None,
            credentials: CredentialMode::Default,
            access_key_id: None,
            secret_access_key: None,
            session_token: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub aws: AwsSettings,
}

impl AppConfig {
    /// Get the config file path, respecting XDG_CONFIG_HOME
    pub fn config_path() -> PathBuf {
        let config_dir = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("~"))
                    .join(".config")
            });
        config_dir.join("cost-explorer-tool").join("config.toml")
    }

    /// Load config from the default path, falling back to defaults if not found
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Serialize and write this config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn dispatch_settings(&self) -> DispatchSettings {
        DispatchSettings {
            action_group: self.settings.action_group.clone(),
            max_lookback_days: self.settings.max_lookback_days.min(LOOKBACK_DAYS_LIMIT),
        }
    }

    /// Validate the config
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if !["text", "json"].contains(&self.settings.default_format.as_str()) {
            issues.push(format!(
                "Invalid default_format: '{}' (must be 'text' or 'json')",
                self.settings.default_format
            ));
        }
        if !["auto", "always", "never"].contains(&self.settings.color.as_str()) {
            issues.push(format!(
                "Invalid color: '{}' (must be 'auto', 'always', or 'never')",
                self.settings.color
            ));
        }
        if self.settings.action_group.trim().is_empty() {
            issues.push("action_group must not be empty".to_string());
        }
        if self.settings.max_lookback_days == 0 {
            issues.push("max_lookback_days must be greater than 0".to_string());
        } else if self.settings.max_lookback_days > LOOKBACK_DAYS_LIMIT {
            issues.push(format!(
                "max_lookback_days must be at most {}, got {}",
                LOOKBACK_DAYS_LIMIT, self.settings.max_lookback_days
            ));
        }
        if self.aws.region.trim().is_empty() {
            issues.push("aws.region must not be empty".to_string());
        }
        if let Some(endpoint) = &self.aws.endpoint {
            if !endpoint.starts_with("https://") {
                issues.push(format!("aws.endpoint must use HTTPS, got: '{}'", endpoint));
            }
        }
        if self.aws.credentials == CredentialMode::Static
            && (self.aws.access_key_id.is_none() || self.aws.secret_access_key.is_none())
        {
            issues.push(
                "aws.credentials = 'static' requires access_key_id and secret_access_key"
                    .to_string(),
            );
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        let issues = config.validate();
        assert!(issues.is_empty(), "Default config should be valid, got: {:?}", issues);
    }

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.settings.default_format, "text");
        assert_eq!(config.settings.color, "auto");
        assert_eq!(config.settings.action_group, "cost-explorer-actions");
        assert_eq!(config.settings.max_lookback_days, 90);
        assert_eq!(config.aws.region, "us-east-1");
        assert_eq!(config.aws.credentials, CredentialMode::Default);
    }

    #[test]
    fn validate_catches_invalid_format() {
        let mut config = AppConfig::default();
        config.settings.default_format = "xml".to_string();
        let issues = config.validate();
        assert!(issues.iter().any(|i| i.contains("default_format")));
    }

    #[test]
    fn validate_catches_invalid_color() {
        let mut config = AppConfig::default();
        config.settings.color = "blue".to_string();
        let issues = config.validate();
        assert!(issues.iter().any(|i| i.contains("color")));
    }

    #[test]
    fn validate_catches_zero_lookback() {
        let mut config = AppConfig::default();
        config.settings.max_lookback_days = 0;
        assert!(config.validate().iter().any(|i| i.contains("max_lookback_days")));
    }

    #[test]
    fn validate_catches_oversized_lookback() {
        let mut config = AppConfig::default();
        config.settings.max_lookback_days = u32::MAX;
        assert!(config
            .validate()
            .iter()
            .any(|i| i.contains("max_lookback_days must be at most 365")));
        assert_eq!(config.dispatch_settings().max_lookback_days, LOOKBACK_DAYS_LIMIT);
    }

    #[test]
    fn validate_catches_http_endpoint() {
        let mut config = AppConfig::default();
        config.aws.endpoint = Some("http://localhost:4566".to_string());
        assert!(config.validate().iter().any(|i| i.contains("HTTPS")));
    }

    #[test]
    fn validate_catches_incomplete_static_credentials() {
        let mut config = AppConfig::default();
        config.aws.credentials = CredentialMode::Static;
        config.aws.access_key_id = Some("AKID".to_string());
        assert!(config.validate().iter().any(|i| i.contains("static")));
    }

    #[test]
    fn parse_minimal_toml() {
        let toml = r#"
[settings]
default_format = "json"
max_lookback_days = 60
"#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.settings.default_format, "json");
        assert_eq!(config.settings.color, "auto");
        assert_eq!(config.settings.max_lookback_days, 60);
        assert_eq!(config.aws.region, "us-east-1");
    }

    #[test]
    fn parse_aws_toml() {
        let toml = r#"
[aws]
region = "eu-west-1"
endpoint = "https://ce.eu-west-1.amazonaws.com"
credentials = "static"
access_key_id = "AKID"
secret_access_key = "secret"
"#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.aws.region, "eu-west-1");
        assert_eq!(config.aws.credentials, CredentialMode::Static);
        assert_eq!(config.aws.secret_access_key.as_deref(), Some("secret"));
        assert!(config.validate().is_empty());
    }

    #[test]
    fn parse_empty_toml_gives_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.settings.default_format, "text");
        assert_eq!(config.aws.region, "us-east-1");
    }

    #[test]
    fn save_then_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.settings.action_group = "finops".to_string();
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.settings.action_group, "finops");
        assert_eq!(loaded.dispatch_settings().action_group, "finops");
    }

    #[test]
    fn load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.settings.max_lookback_days, 90);
    }

    #[test]
    fn config_path_uses_xdg_when_set() {
        std::env::set_var("XDG_CONFIG_HOME", "/tmp/test_xdg_config");
        let path = AppConfig::config_path();
        std::env::remove_var("XDG_CONFIG_HOME");
        assert_eq!(
            path,
            PathBuf::from("/tmp/test_xdg_config/cost-explorer-tool/config.toml")
        );
    }
}
