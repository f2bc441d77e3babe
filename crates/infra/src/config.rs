//! Configuration loading and representation.
//!
//! Values come from the process environment, optionally seeded from a local
//! `.env` file. Unset or empty variables fall back to development defaults.

use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_APP_PORT: u16 = 3000;
pub const DEFAULT_APP_ENV: &str = "development";
pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_DB_USER: &str = "postgres";
pub const DEFAULT_DB_PASSWORD: &str = "postgres";
pub const DEFAULT_DB_DATABASE: &str = "car-rental";
pub const DEFAULT_DB_PING_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: `{value}` ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// HTTP application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `APP_PORT`
    pub port: u16,
    /// `APP_ENV` (free-form tag, e.g. `development`, `production`).
    pub env: String,
}

impl AppConfig {
    /// Load from `.env` (if present) and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        load_dotenv();
        Self::from_lookup(env_lookup)
    }

    /// Load from an arbitrary key lookup (used by tests and embedders).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            port: parse_or("APP_PORT", &lookup, DEFAULT_APP_PORT)?,
            env: string_or("APP_ENV", &lookup, DEFAULT_APP_ENV),
        })
    }

    pub fn is_development(&self) -> bool {
        self.env.eq_ignore_ascii_case(DEFAULT_APP_ENV)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_APP_PORT,
            env: DEFAULT_APP_ENV.to_string(),
        }
    }
}

/// Postgres connection parameters.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    /// Upper bound for a single connectivity probe (`DB_PING_TIMEOUT_SECS`).
    pub ping_timeout: Duration,
}

impl DatabaseConfig {
    pub fn load() -> Result<Self, ConfigError> {
        load_dotenv();
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let timeout_secs: u64 =
            parse_or("DB_PING_TIMEOUT_SECS", &lookup, DEFAULT_DB_PING_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "DB_PING_TIMEOUT_SECS",
                value: "0".to_string(),
                reason: "must be at least 1 second".to_string(),
            });
        }

        Ok(Self {
            host: string_or("DB_HOST", &lookup, DEFAULT_DB_HOST),
            port: parse_or("DB_PORT", &lookup, DEFAULT_DB_PORT)?,
            user: string_or("DB_USER", &lookup, DEFAULT_DB_USER),
            password: string_or("DB_PASSWORD", &lookup, DEFAULT_DB_PASSWORD),
            database: string_or("DB_DATABASE", &lookup, DEFAULT_DB_DATABASE),
            ping_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// `host:port`, as used in log lines.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_DB_HOST.to_string(),
            port: DEFAULT_DB_PORT,
            user: DEFAULT_DB_USER.to_string(),
            password: DEFAULT_DB_PASSWORD.to_string(),
            database: DEFAULT_DB_DATABASE.to_string(),
            ping_timeout: Duration::from_secs(DEFAULT_DB_PING_TIMEOUT_SECS),
        }
    }
}

impl core::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("ping_timeout", &self.ping_timeout)
            .finish()
    }
}

fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("loaded environment overrides from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("ignoring unreadable .env file: {e}"),
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn string_or(key: &str, lookup: &impl Fn(&str) -> Option<String>, default: &str) -> String {
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_or<T>(
    key: &'static str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: T,
) -> Result<T, ConfigError>
where
    T: core::str::FromStr,
    T::Err: core::fmt::Display,
{
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}
