//! Process configuration
//!
//! Precedence, lowest to highest: built-in defaults, YAML config file,
//! environment variables, command-line flags (applied by the binary).

use crate::coordinator::{CoordinatorConfig, DEFAULT_IDENTITY_KEY, DEFAULT_STALENESS_THRESHOLD};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable overriding the staleness threshold (e.g. `4h`)
pub const ENV_CACHE_TIME: &str = "CACHE_TIME";
pub const ENV_IDENTITY_KEY: &str = "PROFILE_IDENTITY_KEY";
pub const ENV_DB_PATH: &str = "PROFILE_DB";
pub const ENV_SNAPSHOT_PATH: &str = "PROFILE_SNAPSHOT";

const APP_DIR: &str = "profile-grabber";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid duration '{value}': {reason}")]
    InvalidDuration { value: String, reason: String },
}

/// On-disk shape of the config file; every field optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    staleness_threshold: Option<DurationSetting>,
    identity_key: Option<String>,
    db_path: Option<PathBuf>,
    snapshot_path: Option<PathBuf>,
}

/// A duration written either as text (`4h`) or as a number of seconds
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DurationSetting {
    Seconds(u64),
    Text(String),
}

impl DurationSetting {
    fn resolve(self) -> Result<Duration, ConfigError> {
        match self {
            Self::Seconds(secs) => Ok(Duration::from_secs(secs)),
            Self::Text(text) => parse_duration(&text),
        }
    }
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub staleness_threshold: Duration,
    pub identity_key: String,
    /// SQLite database; `None` means the per-user default location
    pub db_path: Option<PathBuf>,
    /// Rendered HTML snapshot the profile is extracted from
    pub snapshot_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            staleness_threshold: DEFAULT_STALENESS_THRESHOLD,
            identity_key: DEFAULT_IDENTITY_KEY.to_string(),
            db_path: None,
            snapshot_path: None,
        }
    }
}

impl Config {
    /// Load configuration from `path` (or the default location) and the
    /// process environment.
    ///
    /// An explicitly named file must exist; a missing default file just
    /// means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(default) if default.exists() => Self::from_file(&default)?,
                _ => Self::default(),
            },
        };
        config.with_env(|name| std::env::var(name).ok())
    }

    /// Parse a YAML config file on top of the defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = if text.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(text)?
        };
        let mut config = Self::default();
        if let Some(threshold) = file.staleness_threshold {
            config.staleness_threshold = threshold.resolve()?;
        }
        if let Some(key) = file.identity_key {
            config.identity_key = key;
        }
        config.db_path = file.db_path;
        config.snapshot_path = file.snapshot_path;
        Ok(config)
    }

    /// Apply environment overrides read through `lookup`
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(value) = lookup(ENV_CACHE_TIME) {
            self.staleness_threshold = parse_duration(&value)?;
        }
        if let Some(value) = lookup(ENV_IDENTITY_KEY) {
            self.identity_key = value;
        }
        if let Some(value) = lookup(ENV_DB_PATH) {
            self.db_path = Some(PathBuf::from(value));
        }
        if let Some(value) = lookup(ENV_SNAPSHOT_PATH) {
            self.snapshot_path = Some(PathBuf::from(value));
        }
        Ok(self)
    }

    /// The configured database path, or `<data_dir>/profile-grabber/profile.db`
    pub fn db_path_or_default(&self) -> PathBuf {
        self.db_path.clone().unwrap_or_else(default_db_path)
    }

    pub fn coordinator_config(&self) -> CoordinatorConfig {
        CoordinatorConfig::default()
            .with_identity_key(self.identity_key.clone())
            .with_staleness_threshold(self.staleness_threshold)
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.yaml"))
}

fn default_db_path() -> PathBuf {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".local/share"));
    data_dir.join(APP_DIR).join("profile.db")
}

/// Parse a duration such as `4h`, `90m`, `1h30m`, `1.5h`, `45s`, `250ms`.
///
/// A bare `0` is accepted; any other number needs a unit.
pub fn parse_duration(input: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidDuration {
        value: input.to_string(),
        reason: reason.to_string(),
    };

    let text = input.trim();
    if text == "0" {
        return Ok(Duration::ZERO);
    }
    if text.is_empty() {
        return Err(invalid("empty"));
    }

    let is_number = |c: char| c.is_ascii_digit() || c == '.';
    let mut millis = 0f64;
    let mut rest = text;
    while !rest.is_empty() {
        let number_end = rest.find(|c: char| !is_number(c)).ok_or_else(|| invalid("missing unit"))?;
        if number_end == 0 {
            return Err(invalid("expected a number"));
        }
        let value: f64 = rest[..number_end]
            .parse()
            .map_err(|_| invalid("malformed number"))?;

        let after = &rest[number_end..];
        let unit_end = after.find(is_number).unwrap_or(after.len());
        let scale = match &after[..unit_end] {
            "ms" => 1.0,
            "s" => 1_000.0,
            "m" => 60_000.0,
            "h" => 3_600_000.0,
            _ => return Err(invalid("unknown unit (use ms, s, m, h)")),
        };
        millis += value * scale;
        rest = &after[unit_end..];
    }
    Duration::try_from_secs_f64(millis / 1_000.0).map_err(|_| invalid("out of range"))
}
