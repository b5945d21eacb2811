//! Backend entry-point: loads configuration, prepares storage, and serves the
//! REST API with OpenAPI docs.

mod server;

use actix_web::dev::ServerHandle;
use actix_web::web;
use color_eyre::eyre::{Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use blog_backend::RateLimiter;
use blog_backend::inbound::http::health::HealthState;
use blog_backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use blog_backend::settings::AppConfig;
use server::{ServerConfig, create_server};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = terminate.recv() => {}
                }
            }
            Err(error) => {
                warn!(%error, "SIGTERM handler unavailable; waiting for Ctrl-C only");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

/// Report the drain on the liveness probe, then stop accepting connections
/// and let in-flight requests finish.
async fn shutdown_on_signal(handle: ServerHandle, health_state: web::Data<HealthState>) {
    wait_for_shutdown_signal().await;
    info!("shutdown signal received");
    health_state.mark_unhealthy();
    handle.stop(true).await;
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let config = AppConfig::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load configuration: {err}"))?;
    config.validate()?;
    info!(
        environment = config.environment(),
        host = config.host(),
        port = config.port(),
        "starting blog backend"
    );

    let limiter = RateLimiter::new(config.rate_limit_window(), config.rate_limit_max_requests());
    let mut server_config = ServerConfig::new(config.host(), config.port(), limiter);
    if let Some(url) = config.database_url() {
        run_migrations(url).await?;
        let pool = DbPool::new(PoolConfig::new(url).with_max_size(config.db_pool_max_size())).await?;
        server_config = server_config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), server_config)?;
    actix_web::rt::spawn(shutdown_on_signal(server.handle(), health_state));

    server.await?;
    info!("server stopped");
    Ok(())
}
