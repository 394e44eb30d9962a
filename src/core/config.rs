use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

use crate::core::currency::BASE_CURRENCY;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RatesProviderConfig {
    #[serde(default = "default_rates_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
}

fn default_rates_base_url() -> String {
    "https://v6.exchangerate-api.com".to_string()
}

impl Default for RatesProviderConfig {
    fn default() -> Self {
        RatesProviderConfig {
            base_url: default_rates_base_url(),
            api_key: String::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Currency the running balance is displayed in.
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub rates: RatesProviderConfig,
    pub data_path: Option<String>,
}

fn default_currency() -> String {
    BASE_CURRENCY.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            currency: default_currency(),
            rates: RatesProviderConfig::default(),
            data_path: None,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "billfold", "billfold")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("dev", "billfold", "billfold")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
currency: "EUR"
rates:
  base_url: "http://example.com/rates"
  api_key: "test-key"
data_path: "/tmp/billfold-data"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.currency, "EUR");
        assert_eq!(config.rates.base_url, "http://example.com/rates");
        assert_eq!(config.rates.api_key, "test-key");
        assert_eq!(config.data_path.as_deref(), Some("/tmp/billfold-data"));
        assert_eq!(
            config.default_data_path().unwrap(),
            PathBuf::from("/tmp/billfold-data")
        );
    }

    #[test]
    fn test_config_defaults() {
        let config: AppConfig = serde_yaml::from_str("data_path: null").unwrap();
        assert_eq!(config.currency, "USD");
        assert_eq!(config.rates.base_url, "https://v6.exchangerate-api.com");
        assert!(config.rates.api_key.is_empty());
    }
}
