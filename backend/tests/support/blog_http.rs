//! In-process HTTP harness over the in-memory store.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::Method;
use actix_web::{App, Error, test, web};
use blog_backend::Trace;
use blog_backend::inbound::http::state::HttpState;
use blog_backend::inbound::http::validation::json_config;
use blog_backend::inbound::http::{API_BASE_PATH, configure_api};
use blog_backend::outbound::memory::InMemoryStore;
use serde_json::Value;

/// Status and JSON body captured from one response.
#[derive(Debug, Clone)]
pub(crate) struct Captured {
    pub(crate) status: u16,
    pub(crate) body: Value,
}

/// Fresh services over an empty in-memory store.
pub(crate) fn memory_state() -> HttpState {
    let store = Arc::new(InMemoryStore::new());
    HttpState::with_repositories(Arc::clone(&store), store)
}

pub(crate) fn blog_app(
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

/// Issue one request against a freshly initialised app sharing `state`.
pub(crate) async fn send(
    state: HttpState,
    method: Method,
    path: String,
    body: Option<Value>,
) -> Captured {
    let app = test::init_service(blog_app(state)).await;
    let mut request = test::TestRequest::default().method(method).uri(&path);
    if let Some(body) = body {
        request = request.set_json(body);
    }
    let response = test::call_service(&app, request.to_request()).await;
    let status = response.status().as_u16();
    let body = test::read_body_json(response).await;
    Captured { status, body }
}
