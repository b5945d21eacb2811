//! Request middleware.
//!
//! Purpose: define middleware components for request lifecycle concerns such
//! as tracing, request logging, rate limiting, CORS and security headers.

pub mod rate_limit;
pub mod security;
pub mod trace;

pub use rate_limit::{RateLimit, RateLimiter};
pub use security::{cors, security_headers};
pub use trace::Trace;
