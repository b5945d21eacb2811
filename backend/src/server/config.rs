//! HTTP server configuration object and helpers.

use std::sync::Arc;

use blog_backend::RateLimiter;
use blog_backend::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) rate_limiter: Arc<RateLimiter>,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration bound to `host:port`.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16, rate_limiter: RateLimiter) -> Self {
        Self {
            host: host.into(),
            port,
            rate_limiter: Arc::new(rate_limiter),
            db_pool: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, the server uses the PostgreSQL repositories; otherwise
    /// records live in an in-memory store for the lifetime of the process.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
