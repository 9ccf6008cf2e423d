//! Configuration file support for Litrbol.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/litrbol/config.toml`.
//! The estimation model constants live here so regional BAC models can be
//! tuned without touching the algorithm.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub containers: ContainerConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Widmark-model constants for the BAC estimator
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Body-water distribution ratio for male profiles
    #[serde(default = "default_widmark_male")]
    pub widmark_male: f64,

    /// Body-water distribution ratio for female profiles
    #[serde(default = "default_widmark_female")]
    pub widmark_female: f64,

    /// Ethanol density in g/mL
    #[serde(default = "default_ethanol_density")]
    pub ethanol_density: f64,

    /// Metabolic elimination rate in per-mille per hour
    #[serde(default = "default_elimination_rate")]
    pub elimination_rate_per_hour: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            widmark_male: default_widmark_male(),
            widmark_female: default_widmark_female(),
            ethanol_density: default_ethanol_density(),
            elimination_rate_per_hour: default_elimination_rate(),
        }
    }
}

/// Rolling-session configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    /// How far back the active drink session reaches, in hours
    #[serde(default = "default_window_hours")]
    pub window_hours: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            window_hours: default_window_hours(),
        }
    }
}

/// Reference containers for lifetime-equivalent statistics
///
/// Values are milliliters of pure alcohol per container: a half-liter of
/// 5% beer holds 25 mL, a half-liter of 40% spirits holds 200 mL.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContainerConfig {
    #[serde(default = "default_beer_container")]
    pub beer_bottle_alcohol_ml: f64,

    #[serde(default = "default_vodka_container")]
    pub vodka_bottle_alcohol_ml: f64,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            beer_bottle_alcohol_ml: default_beer_container(),
            vodka_bottle_alcohol_ml: default_vodka_container(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("litrbol")
}

fn default_widmark_male() -> f64 {
    0.68
}

fn default_widmark_female() -> f64 {
    0.55
}

fn default_ethanol_density() -> f64 {
    0.789
}

fn default_elimination_rate() -> f64 {
    0.15
}

fn default_window_hours() -> i64 {
    24
}

fn default_beer_container() -> f64 {
    25.0
}

fn default_vodka_container() -> f64 {
    200.0
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("litrbol").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.model.widmark_male, 0.68);
        assert_eq!(config.model.widmark_female, 0.55);
        assert_eq!(config.model.ethanol_density, 0.789);
        assert_eq!(config.model.elimination_rate_per_hour, 0.15);
        assert_eq!(config.session.window_hours, 24);
        assert_eq!(config.containers.beer_bottle_alcohol_ml, 25.0);
        assert_eq!(config.containers.vodka_bottle_alcohol_ml, 200.0);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.model.widmark_male, parsed.model.widmark_male);
        assert_eq!(config.session.window_hours, parsed.session.window_hours);
        assert_eq!(
            config.containers.vodka_bottle_alcohol_ml,
            parsed.containers.vodka_bottle_alcohol_ml
        );
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[model]
elimination_rate_per_hour = 0.1
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.model.elimination_rate_per_hour, 0.1);
        assert_eq!(config.model.widmark_male, 0.68); // default
        assert_eq!(config.session.window_hours, 24); // default
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.session.window_hours = 12;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.session.window_hours, 12);
    }
}
