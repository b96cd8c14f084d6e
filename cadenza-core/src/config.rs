use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub lookup: LookupConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Base URL of the music lookup service
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load config from file or create template on first run
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read, parsed, or if
    /// required fields are missing.
    pub fn load_or_create() -> Result<Self> {
        let config_path = crate::paths::config_path();

        if !config_path.exists() {
            // Create config directory if it doesn't exist
            if let Some(parent) = config_path.parent() {
                fs::create_dir_all(parent)?;
            }

            fs::write(&config_path, CONFIG_TEMPLATE)?;
            info!("Wrote config template to {}", config_path.display());

            return Err(CoreError::ConfigNotFound { path: config_path });
        }

        let content = fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.lookup.base_url.is_empty() {
            return Err(CoreError::ConfigMissingField {
                field: "lookup.base_url".to_string(),
            });
        }
        Ok(())
    }
}

const CONFIG_TEMPLATE: &str = r#"# Cadenza configuration
# ~/.config/cadenza/config.toml

[lookup]
# Required: base URL of the music lookup service,
# e.g. "https://music.example.com/api"
base_url = ""
# Request timeout in seconds
timeout_secs = 30
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            "[lookup]\nbase_url = \"https://music.example.com/api\"\ntimeout_secs = 10\n",
        )
        .unwrap();
        assert_eq!(config.lookup.base_url, "https://music.example.com/api");
        assert_eq!(config.lookup.timeout_secs, 10);
    }

    #[test]
    fn test_timeout_defaults_to_thirty_seconds() {
        let config: Config =
            toml::from_str("[lookup]\nbase_url = \"https://music.example.com/api\"\n").unwrap();
        assert_eq!(config.lookup.timeout_secs, 30);
    }

    #[test]
    fn test_validate_rejects_empty_base_url() {
        let config: Config = toml::from_str("[lookup]\nbase_url = \"\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(CoreError::ConfigMissingField { .. })
        ));
    }

    #[test]
    fn test_template_parses_and_fails_validation() {
        let config: Config = toml::from_str(CONFIG_TEMPLATE).unwrap();
        assert!(config.validate().is_err());
    }
}
