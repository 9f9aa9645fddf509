//! Configuration loading and config file resolution
//!
//! Config file resolution priority:
//! 1. Command-line argument (highest priority)
//! 2. `CREMA_CONFIG` environment variable
//! 3. `<config dir>/crema/config.toml` if it exists
//! 4. Compiled defaults (fallback)
//!
//! A missing file is never fatal: a warning is logged and defaults are
//! used. A file that exists but does not parse or validate is an error.

use crate::i18n::Language;
use crate::radar::{RadarConfig, DEFAULT_LABEL_OFFSET, DEFAULT_RADIUS_RATIO};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "CREMA_CONFIG";

/// Longest accepted notification lifetime (one day)
pub const MAX_TOAST_DURATION_MS: u64 = 24 * 60 * 60 * 1000;

/// Top-level TOML configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Display language for labels and notifications
    pub language: Language,

    /// How long an unlock notification stays visible
    ///
    /// Default: 3000 ms
    pub toast_duration_ms: u64,

    /// Maximum buffered events before the oldest are dropped
    pub event_log_capacity: usize,

    pub logging: LoggingConfig,

    pub radar: RadarSettings,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            toast_duration_ms: 3000,
            event_log_capacity: 1000,
            logging: LoggingConfig::default(),
            radar: RadarSettings::default(),
        }
    }
}

impl TomlConfig {
    /// Reject values the renderer cannot use
    pub fn validate(&self) -> Result<()> {
        if self.toast_duration_ms > MAX_TOAST_DURATION_MS {
            return Err(Error::Config(format!(
                "toast_duration_ms must be at most {}, got {}",
                MAX_TOAST_DURATION_MS, self.toast_duration_ms
            )));
        }

        let radar = &self.radar;
        if !(radar.size.is_finite() && radar.size > 0.0) {
            return Err(Error::Config(format!(
                "radar.size must be positive, got {}",
                radar.size
            )));
        }
        if !(radar.radius_ratio > 0.0 && radar.radius_ratio <= 1.0) {
            return Err(Error::Config(format!(
                "radar.radius_ratio must be in (0, 1], got {}",
                radar.radius_ratio
            )));
        }
        if !(radar.label_offset.is_finite() && radar.label_offset >= 0.0) {
            return Err(Error::Config(format!(
                "radar.label_offset must be non-negative, got {}",
                radar.label_offset
            )));
        }
        Ok(())
    }

    pub fn toast_duration(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(i64::try_from(self.toast_duration_ms).unwrap_or(i64::MAX))
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Radar chart rendering settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarSettings {
    /// Canvas edge length in pixels
    pub size: f64,
    pub radius_ratio: f64,
    pub label_offset: f64,
}

impl Default for RadarSettings {
    fn default() -> Self {
        Self {
            size: 200.0,
            radius_ratio: DEFAULT_RADIUS_RATIO,
            label_offset: DEFAULT_LABEL_OFFSET,
        }
    }
}

impl RadarSettings {
    pub fn projector_config(&self) -> RadarConfig {
        RadarConfig {
            radius_ratio: self.radius_ratio,
            label_offset: self.label_offset,
        }
    }
}

/// Platform config file location (`~/.config/crema/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("crema").join("config.toml"))
}

/// Pick the config file to read, if any
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    // Priority 3: Platform config dir, only if the file is there
    default_config_path().filter(|p| p.exists())
}

/// Read and validate one TOML file
///
/// A missing file yields defaults with a warning.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(
                "Config file {} not found, using compiled defaults",
                path.display()
            );
            return Ok(TomlConfig::default());
        }
        Err(e) => return Err(Error::Io(e)),
    };

    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;
    config.validate()?;
    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Resolve and load configuration (priority order in the module docs)
pub fn load(cli_arg: Option<&Path>) -> Result<TomlConfig> {
    match resolve_config_path(cli_arg) {
        Some(path) => load_toml_config(&path),
        None => {
            info!("No config file found, using compiled defaults");
            Ok(TomlConfig::default())
        }
    }
}
