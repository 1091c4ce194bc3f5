use crate::error::{AssistantError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub listing: ListingConfig,
}

/// Tunables for the listing generator
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Multiplier applied to the extracted price to derive the MRP
    pub mrp_markup: f64,
    /// Maximum number of sentence fragments kept for the Key Features field
    pub key_feature_limit: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            mrp_markup: 1.2,
            key_feature_limit: 5,
        }
    }
}

impl Config {
    /// Load configuration from `config.toml` in the working directory.
    /// A missing file is not an error; defaults apply.
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }
        let config_content = fs::read_to_string(path).map_err(|e| {
            AssistantError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.listing.mrp_markup, 1.2);
        assert_eq!(config.listing.key_feature_limit, 5);
    }

    #[test]
    fn test_parse_overrides() {
        let config: Config = toml::from_str(
            r#"
            [listing]
            mrp_markup = 1.5
            key_feature_limit = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.listing.mrp_markup, 1.5);
        assert_eq!(config.listing.key_feature_limit, 3);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = Config::load_from("does-not-exist.toml").unwrap();
        assert_eq!(config.listing.mrp_markup, 1.2);
    }
}
