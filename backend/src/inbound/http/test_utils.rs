//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, Error, web};

use crate::Trace;
use crate::domain::ports::{
    MockPostsCommand, MockPostsQuery, MockUsersCommand, MockUsersQuery, PostRepository,
    UserRepository,
};
use crate::domain::{NewPost, NewUser, Post, User};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::json_config;
use crate::inbound::http::{API_BASE_PATH, configure_api};
use crate::outbound::memory::InMemoryStore;

/// Build an application exposing the API over `state`.
pub(crate) fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .wrap(Trace)
        .service(web::scope(API_BASE_PATH).configure(configure_api))
}

/// Real services over a fresh in-memory store.
pub(crate) fn memory_state() -> (Arc<InMemoryStore>, HttpState) {
    let store = Arc::new(InMemoryStore::new());
    let state = HttpState::with_repositories(Arc::clone(&store), Arc::clone(&store));
    (store, state)
}

/// State backed by mocks; callers set expectations on the ports they use.
pub(crate) fn mock_state(
    users: MockUsersCommand,
    users_query: MockUsersQuery,
    posts: MockPostsCommand,
    posts_query: MockPostsQuery,
) -> HttpState {
    HttpState::new(
        Arc::new(users),
        Arc::new(users_query),
        Arc::new(posts),
        Arc::new(posts_query),
    )
}

/// Insert a user directly, bypassing the service rules.
pub(crate) async fn insert_user(store: &InMemoryStore, email: &str, name: Option<&str>) -> User {
    UserRepository::create(
        store,
        &NewUser {
            email: email.to_owned(),
            name: name.map(str::to_owned),
        },
    )
    .await
    .expect("insert user")
    .user
}

/// Insert a post directly, bypassing the service rules.
pub(crate) async fn insert_post(
    store: &InMemoryStore,
    author: &User,
    title: &str,
    content: Option<&str>,
) -> Post {
    PostRepository::create(
        store,
        &NewPost {
            title: title.to_owned(),
            content: content.map(str::to_owned),
            author_id: author.id,
        },
    )
    .await
    .expect("insert post")
    .post
}
