//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use blog_backend::doc::{ApiDoc, OPENAPI_JSON_PATH, SWAGGER_UI_PATH};
use blog_backend::inbound::http::health::{HealthState, health, live, ready};
use blog_backend::inbound::http::state::HttpState;
use blog_backend::inbound::http::validation::json_config;
use blog_backend::inbound::http::{API_BASE_PATH, configure_api};
use blog_backend::middleware::{cors, security_headers};
use blog_backend::{RateLimit, RateLimiter, Trace};

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    rate_limiter: Arc<RateLimiter>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        rate_limiter,
    } = deps;

    // Outermost last: Trace, security headers, CORS, then the limiter, so
    // preflights skip the budget and 429s still carry every header.
    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(RateLimit::new(rate_limiter))
        .wrap(cors())
        .wrap(security_headers())
        .wrap(Trace)
        .service(web::scope(API_BASE_PATH).configure(configure_api))
        .service(health)
        .service(ready)
        .service(live)
        .service(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: pre-built [`ServerConfig`] containing binding, rate-limit and
///   optional database settings.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(config.db_pool.as_ref());
    let ServerConfig {
        host,
        port,
        rate_limiter,
        db_pool: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            rate_limiter: Arc::clone(&rate_limiter),
        })
    })
    .bind((host.as_str(), port))?
    .disable_signals()
    .run();

    health_state.mark_ready();
    Ok(server)
}
