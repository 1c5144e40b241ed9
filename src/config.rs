//! Probe configuration.
//!
//! Loaded from `~/.probe/config.toml`, or from the path given with `--config`.
//! Every key is optional; a missing default file means all defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("visits must be at least 1 in {}", .0.display())]
    NoVisits(PathBuf),
}

/// Mission tunables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Where the mission log is written.
    pub output: PathBuf,

    /// How many planets a mission visits.
    pub visits: u32,

    /// Fuel spent per leg.
    pub fuel_per_leg: f64,

    /// Energy spent per leg.
    pub energy_per_leg: f64,

    /// Simulated flight time before arrival.
    pub travel_delay_ms: u64,

    /// Simulated pause after the arrival report.
    pub settle_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: PathBuf::from("space_probe_data.txt"),
            visits: 3,
            fuel_per_leg: 5.0,
            energy_per_leg: 10.0,
            travel_delay_ms: 2_000,
            settle_delay_ms: 1_000,
        }
    }
}

impl Config {
    /// Load config from an explicit path, or from `~/.probe/config.toml`.
    ///
    /// An explicit path must exist. The default path is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        match Self::path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load config from a TOML file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if config.visits == 0 {
            return Err(ConfigError::NoVisits(path.to_path_buf()));
        }

        Ok(config)
    }

    /// The config file path: `~/.probe/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".probe").join("config.toml"))
    }

    pub fn travel_delay(&self) -> Duration {
        Duration::from_millis(self.travel_delay_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}
