//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use mindblog_infra::{JwtConfig, RateLimitConfig};

/// Listen on every interface unless `HOST` says otherwise.
const DEFAULT_HOST: &str = "0.0.0.0";

/// Configuration errors. Any of these stops the process at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Document store settings. Absent when `MONGODB_URI` is unset.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub uri: String,
    pub database: String,
    pub timeout: Duration,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub frontend_origin: Option<String>,
    pub admin_email: String,
    pub admin_password_hash: String,
    pub jwt: JwtConfig,
    pub store: Option<StoreConfig>,
    pub rate_limit: RateLimitConfig,
    pub rate_limit_idle: Duration,
    pub scheduler_enabled: bool,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let store = optional("MONGODB_URI").map(|uri| {
            Ok::<_, ConfigError>(StoreConfig {
                uri,
                database: optional("MONGODB_DB").unwrap_or_else(|| "mindblog".to_string()),
                timeout: Duration::from_secs(parsed("MONGODB_TIMEOUT_SECS", 10)?),
            })
        });

        Ok(Self {
            host: host("HOST"),
            port: parsed("PORT", 8080)?,
            frontend_origin: optional("FRONTEND_ORIGIN"),
            admin_email: required("ADMIN_EMAIL")?,
            admin_password_hash: required("ADMIN_PASSWORD_HASH")?,
            jwt: JwtConfig {
                secret: required("JWT_SECRET")?,
                expiration_hours: parsed("JWT_EXPIRATION_HOURS", 24)?,
                issuer: optional("JWT_ISSUER").unwrap_or_else(|| "mindblog-api".to_string()),
            },
            store: store.transpose()?,
            rate_limit: RateLimitConfig {
                max_requests: parsed("RATE_LIMIT_PER_SECOND", 10)?,
                window: Duration::from_secs(1),
            },
            rate_limit_idle: Duration::from_secs(parsed("RATE_LIMIT_IDLE_SECS", 300)?),
            scheduler_enabled: flag("SCHEDULER_ENABLED", true),
        })
    }
}

// Empty values count as unset.
fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn host(name: &str) -> String {
    optional(name).unwrap_or_else(|| DEFAULT_HOST.to_string())
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::Missing(name))
}

fn parsed<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match optional(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

fn flag(name: &str, default: bool) -> bool {
    optional(name)
        .map(|v| v != "false" && v != "0")
        .unwrap_or(default)
}
