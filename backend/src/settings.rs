//! Application configuration loaded via OrthoConfig.
//!
//! Values come from `BLOG_*` environment variables, matching CLI flags or a
//! configuration file. Numeric settings carry OrthoConfig defaults so a bare
//! start loads; text settings are optional and their accessors apply defaults.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_RATE_LIMIT_WINDOW_MS: u64 = 15 * 60 * 1000;
const DEFAULT_RATE_LIMIT_MAX_REQUESTS: u32 = 100;
const DEFAULT_ENVIRONMENT: &str = "development";

/// Configuration rejected at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The rate-limit window must be positive.
    #[error("rate limit window must be greater than zero")]
    ZeroRateLimitWindow,
    /// The rate-limit budget must be positive.
    #[error("rate limit budget must be greater than zero")]
    ZeroRateLimitBudget,
    /// The pool must hold at least one connection.
    #[error("database pool size must be greater than zero")]
    ZeroPoolSize,
}

/// Server, database and rate-limit settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BLOG")]
pub struct AppConfig {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    #[ortho_config(default = 3000)]
    pub port: u16,
    /// PostgreSQL connection URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    #[ortho_config(default = 10)]
    pub db_pool_max_size: u32,
    /// Rate-limit window length in milliseconds.
    #[ortho_config(default = 900_000)]
    pub rate_limit_window_ms: u64,
    /// Requests allowed per client per window.
    #[ortho_config(default = 100)]
    pub rate_limit_max_requests: u32,
    /// Deployment label reported at startup.
    pub environment: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: DEFAULT_PORT,
            database_url: None,
            db_pool_max_size: DEFAULT_POOL_MAX_SIZE,
            rate_limit_window_ms: DEFAULT_RATE_LIMIT_WINDOW_MS,
            rate_limit_max_requests: DEFAULT_RATE_LIMIT_MAX_REQUESTS,
            environment: None,
        }
    }
}

impl AppConfig {
    /// Interface to bind, defaulting to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Port to bind.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Configured database URL, if any. Blank values count as absent.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }

    /// Maximum pooled connections.
    pub fn db_pool_max_size(&self) -> u32 {
        self.db_pool_max_size
    }

    /// Rate-limit window length.
    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_millis(self.rate_limit_window_ms)
    }

    /// Requests allowed per client per window.
    pub fn rate_limit_max_requests(&self) -> u32 {
        self.rate_limit_max_requests
    }

    /// Deployment label.
    pub fn environment(&self) -> &str {
        self.environment.as_deref().unwrap_or(DEFAULT_ENVIRONMENT)
    }

    /// Reject values the server cannot run with.
    ///
    /// # Examples
    /// ```
    /// use blog_backend::settings::{AppConfig, ConfigError};
    ///
    /// assert!(AppConfig::default().validate().is_ok());
    /// let config = AppConfig {
    ///     rate_limit_max_requests: 0,
    ///     ..AppConfig::default()
    /// };
    /// assert_eq!(config.validate(), Err(ConfigError::ZeroRateLimitBudget));
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rate_limit_window().is_zero() {
            return Err(ConfigError::ZeroRateLimitWindow);
        }
        if self.rate_limit_max_requests() == 0 {
            return Err(ConfigError::ZeroRateLimitBudget);
        }
        if self.db_pool_max_size() == 0 {
            return Err(ConfigError::ZeroPoolSize);
        }
        Ok(())
    }
}
