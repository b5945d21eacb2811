//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    PostRepository, PostsCommand, PostsQuery, UserRepository, UsersCommand, UsersQuery,
};
use crate::domain::{PostService, UserService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub posts: Arc<dyn PostsCommand>,
    pub posts_query: Arc<dyn PostsQuery>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(
        users: Arc<dyn UsersCommand>,
        users_query: Arc<dyn UsersQuery>,
        posts: Arc<dyn PostsCommand>,
        posts_query: Arc<dyn PostsQuery>,
    ) -> Self {
        Self {
            users,
            users_query,
            posts,
            posts_query,
        }
    }

    /// Build the domain services once over the given repositories and expose
    /// them through the driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use blog_backend::inbound::http::state::HttpState;
    /// use blog_backend::outbound::memory::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let state = HttpState::with_repositories(store.clone(), store);
    /// let _users = state.users_query.clone();
    /// ```
    pub fn with_repositories<U, P>(users: Arc<U>, posts: Arc<P>) -> Self
    where
        U: UserRepository + 'static,
        P: PostRepository + 'static,
    {
        let user_service = Arc::new(UserService::new(Arc::clone(&users)));
        let post_service = Arc::new(PostService::new(posts, users));
        Self::new(
            user_service.clone(),
            user_service,
            post_service.clone(),
            post_service,
        )
    }
}
