// Rust guideline compliant 2026-10-16

//! Configuration management for Adoptly.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// JSON output format.
    Json,
    /// Human-readable table format.
    #[default]
    Table,
    /// Plain text format.
    Plain,
}

/// What happens when a second, different principal schedules a visit on a
/// listing that already has an adopter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AdopterPolicy {
    /// The first adopter keeps the reservation; later principals get a conflict.
    #[default]
    Exclusive,
    /// The later principal overwrites the recorded adopter.
    Replace,
}

/// Configuration for Adoptly behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Multi-adopter policy for scheduling.
    #[serde(default)]
    pub adopter_policy: AdopterPolicy,

    /// Default output format for commands.
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Log level (error, warn, info, debug).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Maximum number of images on one listing.
    #[serde(default = "default_max_images")]
    pub max_images: usize,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_max_images() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            adopter_policy: AdopterPolicy::default(),
            output_format: OutputFormat::default(),
            log_level: default_log_level(),
            max_images: default_max_images(),
        }
    }
}

impl Config {
    /// Loads configuration from file and environment variables.
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. Configuration file at `.adoptly/config.toml`
    /// 3. Environment variables with `ADOPTLY_` prefix
    ///
    /// # Arguments
    ///
    /// * `adoptly_dir` - Path to the `.adoptly` directory
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file exists but cannot be read
    /// - Configuration file contains invalid TOML
    /// - Configuration values fail validation
    pub fn load(adoptly_dir: &Path) -> Result<Self> {
        let mut config = Self::default();

        let config_path = adoptly_dir.join("config.toml");
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            config = toml::from_str(&content)
                .map_err(|e| Error::InvalidConfig(format!("Invalid config file: {}", e)))?;
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Applies environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `ADOPTLY_ADOPTER_POLICY` - exclusive/replace
    /// - `ADOPTLY_OUTPUT_FORMAT` - json/table/plain
    /// - `ADOPTLY_LOG_LEVEL` - error/warn/info/debug
    /// - `ADOPTLY_MAX_IMAGES` - positive number
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("ADOPTLY_ADOPTER_POLICY") {
            self.adopter_policy = match val.to_lowercase().as_str() {
                "exclusive" => AdopterPolicy::Exclusive,
                "replace" => AdopterPolicy::Replace,
                _ => {
                    return Err(Error::InvalidConfig(
                        "ADOPTLY_ADOPTER_POLICY must be exclusive or replace".to_string(),
                    ))
                }
            };
        }

        if let Ok(val) = std::env::var("ADOPTLY_OUTPUT_FORMAT") {
            self.output_format = match val.as_str() {
                "json" => OutputFormat::Json,
                "table" => OutputFormat::Table,
                "plain" => OutputFormat::Plain,
                _ => {
                    return Err(Error::InvalidConfig(
                        "ADOPTLY_OUTPUT_FORMAT must be json, table, or plain".to_string(),
                    ))
                }
            };
        }

        if let Ok(val) = std::env::var("ADOPTLY_LOG_LEVEL") {
            self.log_level = val;
        }

        if let Ok(val) = std::env::var("ADOPTLY_MAX_IMAGES") {
            self.max_images = val.parse().map_err(|_| {
                Error::InvalidConfig("ADOPTLY_MAX_IMAGES must be a positive number".to_string())
            })?;
        }

        Ok(())
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - log_level is not one of error, warn, info, debug
    /// - max_images is zero
    fn validate(&self) -> Result<()> {
        if !matches!(
            self.log_level.to_lowercase().as_str(),
            "error" | "warn" | "info" | "debug"
        ) {
            return Err(Error::InvalidConfig(format!(
                "log_level must be error, warn, info or debug, got {}",
                self.log_level
            )));
        }

        if self.max_images == 0 {
            return Err(Error::InvalidConfig(
                "max_images must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Saves the configuration to `config.toml` in `adoptly_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn save(&self, adoptly_dir: &Path) -> Result<()> {
        let config_path = adoptly_dir.join("config.toml");
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::InvalidConfig(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Tests below mutate process-wide environment variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_all_env_vars() {
        std::env::remove_var("ADOPTLY_ADOPTER_POLICY");
        std::env::remove_var("ADOPTLY_OUTPUT_FORMAT");
        std::env::remove_var("ADOPTLY_LOG_LEVEL");
        std::env::remove_var("ADOPTLY_MAX_IMAGES");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.adopter_policy, AdopterPolicy::Exclusive);
        assert_eq!(config.output_format, OutputFormat::Table);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.max_images, 10);
    }

    #[test]
    fn test_config_load_missing_file() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.adopter_policy, AdopterPolicy::Exclusive);
        assert_eq!(config.max_images, 10);
    }

    #[test]
    fn test_config_load_from_file() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        let content = r#"
adopter_policy = "replace"
output_format = "json"
log_level = "debug"
max_images = 4
"#;
        std::fs::write(temp_dir.path().join("config.toml"), content).unwrap();

        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.adopter_policy, AdopterPolicy::Replace);
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.max_images, 4);
    }

    #[test]
    fn test_config_validation_zero_max_images() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("config.toml"), "max_images = 0").unwrap();

        assert!(Config::load(temp_dir.path()).is_err());
    }

    #[test]
    fn test_config_validation_unknown_log_level() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("config.toml"), "log_level = \"loud\"").unwrap();

        assert!(Config::load(temp_dir.path()).is_err());
    }

    #[test]
    fn test_config_env_override_policy() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("config.toml"),
            "adopter_policy = \"exclusive\"",
        )
        .unwrap();

        std::env::set_var("ADOPTLY_ADOPTER_POLICY", "replace");
        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.adopter_policy, AdopterPolicy::Replace);

        clear_all_env_vars();
    }

    #[test]
    fn test_config_env_invalid_policy() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();

        std::env::set_var("ADOPTLY_ADOPTER_POLICY", "waitlist");
        assert!(Config::load(temp_dir.path()).is_err());

        clear_all_env_vars();
    }

    #[test]
    fn test_config_env_invalid_max_images() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();

        std::env::set_var("ADOPTLY_MAX_IMAGES", "many");
        assert!(Config::load(temp_dir.path()).is_err());

        clear_all_env_vars();
    }

    #[test]
    fn test_config_save_and_load() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();

        let original = Config {
            adopter_policy: AdopterPolicy::Replace,
            output_format: OutputFormat::Plain,
            log_level: "info".to_string(),
            max_images: 3,
        };

        original.save(temp_dir.path()).unwrap();
        let loaded = Config::load(temp_dir.path()).unwrap();

        assert_eq!(original.adopter_policy, loaded.adopter_policy);
        assert_eq!(original.output_format, loaded.output_format);
        assert_eq!(original.log_level, loaded.log_level);
        assert_eq!(original.max_images, loaded.max_images);
    }
}
