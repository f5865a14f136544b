//! Shelfkeeper configuration system
//!
//! Configuration is a single TOML document split into sections. Each
//! section implements [`ConfigSection`] and validates itself; the root
//! [`Config`] aggregates them.
//!
//! Loading is forgiving: a missing file yields defaults and validation
//! problems are only logged. Saving is strict: the config must validate,
//! the previous file is backed up, and the write is atomic.
//!
//! # Example
//!
//! ```rust,no_run
//! use shelfkeeper_config::{Config, ConfigManager};
//!
//! let manager = ConfigManager::new().expect("Failed to initialize config");
//! let config = manager.load().unwrap_or_else(|e| {
//!     eprintln!("Config error: {}, using defaults", e);
//!     Config::default()
//! });
//!
//! println!("Library: {}", config.library.name);
//! ```

mod error;
mod manager;
mod persistence;
mod validation;

// Config sections
pub mod app_config;
mod library_config;
mod simulation_config;

pub use error::{ConfigError, ConfigResult, ValidationError};
pub use manager::{
    apply_overrides, ConfigManager, ENV_APP_LOG_LEVEL, ENV_LIBRARY_NAME, ENV_SIMULATION_SEED,
    ENV_SIMULATION_STEPS,
};
pub use validation::{ConfigSection, Validator};

pub use app_config::{AppConfig, LogLevel};
pub use library_config::LibraryConfig;
pub use simulation_config::SimulationConfig;

use serde::{Deserialize, Serialize};

/// Current config file format version
pub const CONFIG_VERSION: u32 = 1;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Config file format version
    pub version: u32,

    /// Application-level settings
    pub app: AppConfig,

    /// Library identity and reporting
    pub library: LibraryConfig,

    /// Simulation driver parameters
    pub simulation: SimulationConfig,
}

impl Config {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the entire configuration
    ///
    /// Returns all validation errors found across all sections.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(mut e) = self.app.validate() {
            errors.append(&mut e);
        }

        if let Err(mut e) = self.library.validate() {
            errors.append(&mut e);
        }

        if let Err(mut e) = self.simulation.validate() {
            errors.append(&mut e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Merges this config with another, preferring values from `other`
    ///
    /// Used for override chains: defaults < file < env vars < CLI args
    pub fn merge(&mut self, other: Config) {
        self.app.merge(other.app);
        self.library.merge(other.library);
        self.simulation.merge(other.simulation);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            app: AppConfig::default(),
            library: LibraryConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_version_is_set() {
        let config = Config::default();
        assert_eq!(config.version, CONFIG_VERSION);
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        let mut override_config = Config::default();
        override_config.library.name = "Override".to_string();
        override_config.simulation.steps = 5;

        base.merge(override_config);
        assert_eq!(base.library.name, "Override");
        assert_eq!(base.simulation.steps, 5);
    }

    #[test]
    fn test_validate_collects_across_sections() {
        let mut config = Config::default();
        config.library.name = String::new();
        config.simulation.steps = 0;

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "library.name");
        assert_eq!(errors[1].field, "simulation.steps");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[library]\nname = \"East\"\n").unwrap();
        assert_eq!(config.library.name, "East");
        assert_eq!(config.library.report_limit, 5);
        assert_eq!(config.simulation, SimulationConfig::default());
    }
}
