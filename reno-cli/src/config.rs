//! Runtime settings for the estimator.
//!
//! Sources, lowest precedence first:
//!
//! 1. Built-in defaults ([`Settings::default`])
//! 2. A TOML file: `--config <path>`, or `reno-estimator.toml` in the
//!    working directory when present
//! 3. Environment: `RENO_PRICING_TABLE`, `RENO_REVEAL_MS`, `RENO_LOG_FILE`,
//!    `RENO_LOG_LEVEL`
//! 4. Command-line flags (applied by the binary)
//!
//! ```toml
//! pricing_table = "pricing/standard.csv"
//! reveal_ms = 1500
//! animate = true
//! log_file = "reno-estimator.log"
//! log_level = "info"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reno_core::reveal::DEFAULT_REVEAL_DURATION;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "reno-estimator.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value '{value}' for {var}")]
    InvalidEnv { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// CSV pricing table; the built-in table when absent.
    pub pricing_table: Option<PathBuf>,
    /// How long the range takes to count up.
    pub reveal_ms: u64,
    /// Show the count-up at all.
    pub animate: bool,
    pub log_file: Option<PathBuf>,
    /// Bare level or full `EnvFilter` directive.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pricing_table: None,
            reveal_ms: u64::try_from(DEFAULT_REVEAL_DURATION.as_millis()).unwrap_or(1500),
            animate: true,
            log_file: None,
            log_level: "info".into(),
        }
    }
}

impl Settings {
    /// Reveal duration, zero when animation is off.
    pub fn reveal_duration(&self) -> Duration {
        if self.animate {
            Duration::from_millis(self.reveal_ms)
        } else {
            Duration::ZERO
        }
    }

    /// Parses settings from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Reads settings from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overlays environment variables read through `lookup`.
    pub fn apply_env_overrides<F>(
        &mut self,
        lookup: F,
    ) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("RENO_PRICING_TABLE") {
            self.pricing_table = non_empty(v).map(PathBuf::from);
        }
        if let Some(v) = lookup("RENO_REVEAL_MS") {
            self.reveal_ms = v.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: "RENO_REVEAL_MS",
                value: v.clone(),
            })?;
        }
        if let Some(v) = lookup("RENO_LOG_FILE") {
            self.log_file = non_empty(v).map(PathBuf::from);
        }
        if let Some(v) = lookup("RENO_LOG_LEVEL") {
            if let Some(level) = non_empty(v) {
                self.log_level = level;
            }
        }
        Ok(())
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Loads settings from `path` (which must exist) or from
/// [`DEFAULT_CONFIG_FILE`] (which may not), then applies the process
/// environment.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let mut settings = match path {
        Some(path) => Settings::from_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                Settings::from_file(default_path)?
            } else {
                Settings::default()
            }
        }
    };

    settings.apply_env_overrides(|var| std::env::var(var).ok())?;
    debug!(?settings, "settings loaded");
    Ok(settings)
}
