//! Configuration manager - main API for config operations

use crate::persistence::ConfigPersistence;
use crate::{Config, ConfigError, ConfigResult, LogLevel};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Environment variable overriding `library.name`
pub const ENV_LIBRARY_NAME: &str = "SHELFKEEPER_LIBRARY_NAME";
/// Environment variable overriding `simulation.steps`
pub const ENV_SIMULATION_STEPS: &str = "SHELFKEEPER_SIMULATION_STEPS";
/// Environment variable overriding `simulation.seed`
pub const ENV_SIMULATION_SEED: &str = "SHELFKEEPER_SIMULATION_SEED";
/// Environment variable overriding `app.log_level`
pub const ENV_APP_LOG_LEVEL: &str = "SHELFKEEPER_APP_LOG_LEVEL";

fn invalid_override(variable: &str, value: &str) -> ConfigError {
    ConfigError::InvalidOverride {
        variable: variable.to_string(),
        value: value.to_string(),
    }
}

/// Applies overrides supplied by `lookup` (normally the process environment)
///
/// Unset variables leave the config untouched; unparsable values fail.
pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> ConfigResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(name) = lookup(ENV_LIBRARY_NAME) {
        config.library.name = name;
    }

    if let Some(raw) = lookup(ENV_SIMULATION_STEPS) {
        config.simulation.steps = raw
            .trim()
            .parse()
            .map_err(|_| invalid_override(ENV_SIMULATION_STEPS, &raw))?;
    }

    if let Some(raw) = lookup(ENV_SIMULATION_SEED) {
        let seed = raw
            .trim()
            .parse()
            .map_err(|_| invalid_override(ENV_SIMULATION_SEED, &raw))?;
        config.simulation.seed = Some(seed);
    }

    if let Some(raw) = lookup(ENV_APP_LOG_LEVEL) {
        config.app.log_level = raw
            .parse::<LogLevel>()
            .map_err(|_| invalid_override(ENV_APP_LOG_LEVEL, &raw))?;
    }

    Ok(())
}

/// Main configuration manager
///
/// Owns the location of the config file and mediates every load and save.
pub struct ConfigManager {
    persistence: ConfigPersistence,
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager using the platform config directory
    ///
    /// - Linux: `~/.config/shelfkeeper/`
    /// - macOS: `~/Library/Application Support/shelfkeeper/`
    /// - Windows: `%APPDATA%\shelfkeeper\`
    pub fn new() -> ConfigResult<Self> {
        let config_dir = Self::default_config_dir()?;
        Self::with_directory(config_dir)
    }

    /// Creates a config manager with a custom config directory
    pub fn with_directory(config_dir: PathBuf) -> ConfigResult<Self> {
        let config_path = config_dir.join("config.toml");
        let persistence = ConfigPersistence::new(config_path);

        Ok(Self {
            persistence,
            config_dir,
        })
    }

    fn default_config_dir() -> ConfigResult<PathBuf> {
        ProjectDirs::from("", "", "shelfkeeper")
            .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
            .ok_or_else(|| ConfigError::PathResolutionError {
                reason: "Could not determine user config directory".to_string(),
            })
    }

    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Loads the configuration from file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// If the file is corrupted, returns an error.
    pub fn load(&self) -> ConfigResult<Config> {
        self.persistence.load()
    }

    /// Loads the configuration, falling back to defaults on any error
    pub fn load_or_default(&self) -> Config {
        match self.load() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load config: {}, using defaults", e);
                Config::default()
            }
        }
    }

    /// Saves the configuration, validating first and writing atomically
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        self.persistence.save(config)
    }

    /// Loads the config, applies `update_fn` and saves the result
    ///
    /// ```rust,no_run
    /// # use shelfkeeper_config::ConfigManager;
    /// # let manager = ConfigManager::new().unwrap();
    /// manager.update(|config| {
    ///     config.simulation.steps = 100;
    /// }).expect("Failed to update config");
    /// ```
    pub fn update<F>(&self, update_fn: F) -> ConfigResult<()>
    where
        F: FnOnce(&mut Config),
    {
        let mut config = self.load()?;
        update_fn(&mut config);
        self.save(&config)
    }

    /// Writes a default config file if none exists
    ///
    /// Returns Ok(true) if a new file was created, Ok(false) if one already exists.
    pub fn initialize(&self) -> ConfigResult<bool> {
        if self.config_path().exists() {
            log::info!(
                "Config file already exists at {}",
                self.config_path().display()
            );
            return Ok(false);
        }

        self.persistence.write_default()?;
        Ok(true)
    }

    /// Overwrites the config file with defaults
    pub fn reset(&self) -> ConfigResult<()> {
        self.save(&Config::default())
    }

    /// Validates the current configuration file
    ///
    /// Returns the rendered validation errors; empty means valid.
    pub fn validate(&self) -> ConfigResult<Vec<String>> {
        let config = self.load()?;

        match config.validate() {
            Ok(()) => Ok(Vec::new()),
            Err(errors) => Ok(errors.iter().map(|e| e.to_string()).collect()),
        }
    }

    /// Loads the config and applies `SHELFKEEPER_*` environment overrides
    pub fn load_with_env_overrides(&self) -> ConfigResult<Config> {
        let mut config = self.load()?;
        apply_overrides(&mut config, |key| std::env::var(key).ok())?;

        if let Err(errors) = config.validate() {
            log::warn!(
                "Config validation warnings after env overrides: {}",
                crate::persistence::join_errors(&errors)
            );
        }

        Ok(config)
    }
}
