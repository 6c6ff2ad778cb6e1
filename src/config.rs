//! Runtime configuration.
//!
//! Values load in order (later wins):
//! 1. Compiled defaults
//! 2. An optional TOML file
//! 3. Environment variables (`LINEDIST_*`)
//!
//! ```toml
//! [storage]
//! backend = "local"          # or "mock"
//! path = "linedist.json"
//!
//! [playback]
//! poll_interval_ms = 100
//!
//! [timeline]
//! fallback_duration = 180.0
//!
//! [logging]
//! level = "info"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::playback::sampler::{MAX_POLL_INTERVAL, MIN_POLL_INTERVAL};
use crate::types::timeline::DEFAULT_FALLBACK_DURATION;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub playback: PlaybackConfig,
    pub timeline: TimelineConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON file on disk, with demo data as a read fallback.
    #[default]
    Local,
    /// Seeded in-memory store; nothing survives the process.
    Mock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Local,
            path: PathBuf::from("linedist.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub poll_interval_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
        }
    }
}

impl PlaybackConfig {
    /// The configured interval, clamped to what the sampler accepts.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms).clamp(MIN_POLL_INTERVAL, MAX_POLL_INTERVAL)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Duration used for an empty timeline without an explicit length.
    pub fallback_duration: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            fallback_duration: DEFAULT_FALLBACK_DURATION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Defaults, then `path` if given, then the process environment.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies `LINEDIST_*` overrides read through `lookup`. Unparseable
    /// values are ignored.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("LINEDIST_STORAGE_PATH") {
            self.storage.path = PathBuf::from(path);
        }
        match lookup("LINEDIST_BACKEND").as_deref() {
            Some("local") => self.storage.backend = StorageBackend::Local,
            Some("mock") => self.storage.backend = StorageBackend::Mock,
            _ => {}
        }
        if let Some(ms) = lookup("LINEDIST_POLL_INTERVAL_MS").and_then(|v| v.parse().ok()) {
            self.playback.poll_interval_ms = ms;
        }
        if let Some(level) = lookup("LINEDIST_LOG_LEVEL") {
            self.logging.level = level;
        }
    }
}
