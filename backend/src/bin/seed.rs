//! Replace every stored user and post with the sample data set.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;

use blog_backend::domain::SeedPlan;
use blog_backend::domain::ports::SeedRepository;
use blog_backend::outbound::persistence::{
    DbPool, DieselSeedRepository, PoolConfig, run_migrations,
};
use clap::Parser;
use color_eyre::eyre::{Result, bail};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

const DATABASE_URL_ENV: &str = "BLOG_DATABASE_URL";

/// `seed` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "seed",
    about = "Clear posts and users, then insert the sample users and posts",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `BLOG_DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn resolve_database_url(explicit: Option<String>) -> Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            bail!("--database-url must not be empty when provided");
        }
        return Ok(value);
    }

    match env::var(DATABASE_URL_ENV) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => bail!("database URL missing: set --database-url or {DATABASE_URL_ENV}"),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = CliArgs::parse();
    let database_url = resolve_database_url(args.database_url)?;
    run_migrations(&database_url).await?;
    let pool = DbPool::new(PoolConfig::new(&database_url)).await?;

    info!("start seeding");
    let outcome = DieselSeedRepository::new(pool)
        .reseed(&SeedPlan::sample())
        .await?;
    for user in &outcome.users {
        info!(id = %user.id, email = %user.email, "created user");
    }
    for post in &outcome.posts {
        info!(id = %post.id, title = %post.title, published = post.published, "created post");
    }
    info!(
        users = outcome.users.len(),
        posts = outcome.posts.len(),
        "seeding finished"
    );
    Ok(())
}
