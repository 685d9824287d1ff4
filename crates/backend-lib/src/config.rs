// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use crate::auth::{HashParams, MAX_SESSION_TTL};
use anyhow::Result;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Prefix of environment overrides, e.g. `CREDENTIALS_BIND_ADDR`.
/// Nested keys use a double underscore: `CREDENTIALS_HASHER__LOG_N`.
pub const ENV_PREFIX: &str = "CREDENTIALS_";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Which identity store backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    /// Lost on restart
    Memory,
    /// `identities.json` under `data_dir`
    FlatFile,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Data directory path
    pub data_dir: PathBuf,
    /// Log level
    pub log_level: String,
    /// Session TTL in seconds
    pub session_ttl_secs: u64,
    /// How often expired sessions are swept, in seconds
    pub session_cleanup_secs: u64,
    /// Name of the session cookie
    pub cookie_name: String,
    /// Mark the session cookie `Secure`
    pub cookie_secure: bool,
    pub store: StoreKind,
    /// Scrypt cost parameters
    pub hasher: HashParams,
}

/// Reasons a settings value is rejected
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("session TTL must be greater than zero")]
    ZeroSessionTtl,

    #[error("session TTL of {0}s exceeds the maximum of {max}s", max = MAX_SESSION_TTL.as_secs())]
    SessionTtlTooLong(u64),

    #[error("session cleanup interval must be greater than zero")]
    ZeroCleanupInterval,

    #[error("invalid cookie name: {0:?}")]
    InvalidCookieName(String),

    #[error("invalid hasher parameters: {0}")]
    InvalidHasher(String),
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_dir: PathBuf::from("data"),
            log_level: "info".to_string(),
            session_ttl_secs: 60 * 60 * 24 * 7, // 7 days
            session_cleanup_secs: 15 * 60,
            cookie_name: "session".to_string(),
            cookie_secure: false,
            store: StoreKind::FlatFile,
            hasher: HashParams::default(),
        }
    }
}

impl Settings {
    /// Load from `config.{toml,yaml,json}` in the working directory,
    /// then environment variables
    pub fn load() -> Result<Self> {
        let figment = Self::defaults()
            .merge(Toml::file("config.toml"))
            .merge(Yaml::file("config.yaml"))
            .merge(Json::file("config.json"))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self::extract(figment)
    }

    /// Load from an explicit file, then environment variables.
    /// The format follows the file extension; anything else is read as TOML.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("config file not found: {}", path.display());
        }

        let figment = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::defaults().merge(Yaml::file(path)),
            Some("json") => Self::defaults().merge(Json::file(path)),
            _ => Self::defaults().merge(Toml::file(path)),
        };
        Self::extract(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    fn defaults() -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
    }

    fn extract(figment: Figment) -> Result<Self> {
        let settings: Settings = figment.extract()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check values that deserialize fine but make no sense
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(self.log_level.clone()));
        }
        if self.session_ttl_secs == 0 {
            return Err(ConfigError::ZeroSessionTtl);
        }
        if self.session_ttl_secs > MAX_SESSION_TTL.as_secs() {
            return Err(ConfigError::SessionTtlTooLong(self.session_ttl_secs));
        }
        if self.session_cleanup_secs == 0 {
            return Err(ConfigError::ZeroCleanupInterval);
        }
        let cookie_ok = !self.cookie_name.is_empty()
            && self
                .cookie_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !cookie_ok {
            return Err(ConfigError::InvalidCookieName(self.cookie_name.clone()));
        }
        self.hasher
            .validate()
            .map_err(|e| ConfigError::InvalidHasher(e.to_string()))?;
        Ok(())
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn session_cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.session_cleanup_secs)
    }
}
