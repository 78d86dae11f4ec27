//! Process configuration loaded from TOML.
//!
//! Every section and field has a default, so an empty document is a valid
//! config that runs against an in-memory database with stderr logging.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::db::DEFAULT_MAX_IDLE_CONNECTIONS;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CoreConfig {
    pub database: DatabaseSection,
    pub logging: LoggingConfig,
    pub auth: AuthSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DatabaseSection {
    /// SQLite file path; `None` selects a private in-memory database.
    pub path: Option<PathBuf>,
    pub max_idle_connections: usize,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            path: None,
            max_idle_connections: DEFAULT_MAX_IDLE_CONNECTIONS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Absolute directory for rotating log files; `None` logs to stderr.
    pub dir: Option<PathBuf>,
    pub duplicate_to_stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: crate::logging::default_log_level().to_string(),
            dir: None,
            duplicate_to_stderr: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AuthSection {
    pub token_secret: String,
    pub token_ttl_seconds: u64,
    pub argon2_memory_kib: u32,
    pub argon2_iterations: u32,
    pub argon2_parallelism: u32,
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            token_secret: String::new(),
            token_ttl_seconds: 24 * 60 * 60,
            argon2_memory_kib: argon2::Params::DEFAULT_M_COST,
            argon2_iterations: argon2::Params::DEFAULT_T_COST,
            argon2_parallelism: argon2::Params::DEFAULT_P_COST,
        }
    }
}

impl AuthSection {
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_seconds)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(toml::de::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

impl CoreConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.token_secret.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "auth.token_secret must not be empty".to_string(),
            ));
        }
        if self.auth.token_ttl_seconds == 0 {
            return Err(ConfigError::Invalid(
                "auth.token_ttl_seconds must be greater than zero".to_string(),
            ));
        }
        if let Some(dir) = &self.logging.dir {
            if !dir.is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "logging.dir must be an absolute path, got `{}`",
                    dir.display()
                )));
            }
        }
        Ok(())
    }

    /// Returns the configured database file.
    ///
    /// Front ends whose calls span several processes use this to refuse the
    /// in-memory default, which would start empty on every run.
    pub fn require_database_path(&self) -> Result<&Path, ConfigError> {
        self.database.path.as_deref().ok_or_else(|| {
            ConfigError::Invalid(
                "database.path must be set; an in-memory database does not outlive the process"
                    .to_string(),
            )
        })
    }
}

/// Reads and validates a config file.
pub fn read_config(path: &Path) -> Result<CoreConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    CoreConfig::from_toml_str(&contents)
}
