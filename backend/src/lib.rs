//! Blog backend library modules.
//!
//! Domain rules and services live in [`domain`]; the HTTP adapter in
//! [`inbound`]; storage adapters in [`outbound`].

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::{RateLimit, RateLimiter, Trace};
