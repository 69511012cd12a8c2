use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderValue;
use fairshare_db::DbConfig;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Deployment environment, from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "production" => Ok(Self::Production),
            _ => Err(()),
        }
    }
}

/// Log output format, from `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(()),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the database URL have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `4000`).
    pub port: u16,
    pub environment: Environment,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub log_format: LogFormat,
    pub db: DbConfig,
    /// Upper bound on a single store query (default: 10s).
    pub query_timeout: Duration,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `4000`                  |
    /// | `APP_ENV`                 | `development`           |
    /// | `CORS_ORIGINS`            | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
    /// | `LOG_FORMAT`              | `text`                  |
    /// | `DATABASE_URL`            | required                |
    /// | `DB_MAX_CONNECTIONS`      | `25`                    |
    /// | `DB_MIN_CONNECTIONS`      | `5`                     |
    /// | `DB_IDLE_TIMEOUT_SECS`    | `900`                   |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `5`                     |
    /// | `DB_QUERY_TIMEOUT_SECS`   | `10`                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. `from_env` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &'static str, default: &str| -> String {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let cors_origins: Vec<String> = env("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        for origin in &cors_origins {
            if HeaderValue::from_str(origin).is_err() {
                return Err(ConfigError::Invalid {
                    key: "CORS_ORIGINS",
                    value: origin.clone(),
                });
            }
        }

        let url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let db = DbConfig {
            url,
            max_connections: parse("DB_MAX_CONNECTIONS", env("DB_MAX_CONNECTIONS", "25"))?,
            min_connections: parse("DB_MIN_CONNECTIONS", env("DB_MIN_CONNECTIONS", "5"))?,
            idle_timeout: Duration::from_secs(parse(
                "DB_IDLE_TIMEOUT_SECS",
                env("DB_IDLE_TIMEOUT_SECS", "900"),
            )?),
            acquire_timeout: Duration::from_secs(parse(
                "DB_ACQUIRE_TIMEOUT_SECS",
                env("DB_ACQUIRE_TIMEOUT_SECS", "5"),
            )?),
        };

        Ok(Self {
            host: env("HOST", "0.0.0.0"),
            port: parse("PORT", env("PORT", "4000"))?,
            environment: parse("APP_ENV", env("APP_ENV", "development"))?,
            cors_origins,
            request_timeout_secs: parse("REQUEST_TIMEOUT_SECS", env("REQUEST_TIMEOUT_SECS", "30"))?,
            log_format: parse("LOG_FORMAT", env("LOG_FORMAT", "text"))?,
            db,
            query_timeout: Duration::from_secs(parse(
                "DB_QUERY_TIMEOUT_SECS",
                env("DB_QUERY_TIMEOUT_SECS", "10"),
            )?),
        })
    }
}

fn parse<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}
