//! Configuration for the `paddock` binary.
//!
//! Loaded with figment from, lowest precedence first:
//! 1. Built-in defaults
//! 2. `paddock.toml` in the working directory, or the `--config` file
//! 3. Environment variables prefixed with `PADDOCK_`, sections split on
//!    a double underscore (`PADDOCK_DISPLAY__THEME=light`)

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use paddock_protocol::ThemeMode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "paddock.toml";
const ENV_PREFIX: &str = "PADDOCK_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Figment(#[from] Box<figment::Error>),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        Self::Figment(Box::new(e))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub theme: ThemeMode,
    /// Skip the hero entrance and the track-map sweep.
    pub reduced_motion: bool,
    /// Redraw interval while something is animating.
    pub tick_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub file: PathBuf,
    /// Used when neither `-v`/`-q` nor `RUST_LOG` is given.
    pub level: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: ThemeMode::Dark,
            reduced_motion: false,
            tick_ms: 33,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("paddock.log"),
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load from defaults, the config file (if present) and the
    /// environment. A missing file is not an error.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = path.unwrap_or_else(|| Path::new(CONFIG_FILE_NAME));
        Self::from_figment(
            Figment::from(Serialized::defaults(Config::default()))
                .merge(Toml::file(file))
                .merge(Env::prefixed(ENV_PREFIX).split("__")),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.tick_ms == 0 {
            return Err(ConfigError::Invalid(
                "display.tick_ms must be greater than 0".to_string(),
            ));
        }
        if self.log.file.file_name().is_none() {
            return Err(ConfigError::Invalid(format!(
                "log.file {} is not a file path",
                self.log.file.display()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_toml(toml: &str) -> Result<Config, ConfigError> {
        Config::from_figment(
            Figment::from(Serialized::defaults(Config::default())).merge(Toml::string(toml)),
        )
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.display.theme, ThemeMode::Dark);
        assert!(!config.display.reduced_motion);
        assert_eq!(config.display.tick_ms, 33);
        assert_eq!(config.log.file, PathBuf::from("paddock.log"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_file_uses_defaults() {
        let config = Config::load_from(Some(Path::new("/nonexistent/paddock.toml")));
        assert!(config.is_ok());
    }

    #[test]
    fn file_overrides_defaults() {
        let config = with_toml(
            r#"
            [display]
            theme = "light"
            reduced_motion = true

            [log]
            level = "debug"
            "#,
        )
        .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(config.display.theme, ThemeMode::Light);
        assert!(config.display.reduced_motion);
        // Untouched keys keep their defaults.
        assert_eq!(config.display.tick_ms, 33);
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn rejects_zero_tick() {
        let err = with_toml("[display]\ntick_ms = 0");
        assert!(matches!(err, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_unknown_theme() {
        let err = with_toml("[display]\ntheme = \"sepia\"");
        assert!(matches!(err, Err(ConfigError::Figment(_))));
    }
}
