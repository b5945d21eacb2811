//! Builders for HTTP state from the configured repositories.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use blog_backend::inbound::http::state::HttpState;
use blog_backend::outbound::memory::InMemoryStore;
use blog_backend::outbound::persistence::{DbPool, DieselPostRepository, DieselUserRepository};

/// Build the services once, over PostgreSQL when a pool is available and over
/// a process-local store otherwise.
pub(super) fn build_http_state(db_pool: Option<&DbPool>) -> web::Data<HttpState> {
    let state = match db_pool {
        Some(pool) => HttpState::with_repositories(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselPostRepository::new(pool.clone())),
        ),
        None => {
            warn!("no database configured; records are kept in memory");
            let store = Arc::new(InMemoryStore::new());
            HttpState::with_repositories(Arc::clone(&store), store)
        }
    };
    web::Data::new(state)
}
