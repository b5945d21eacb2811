//! Behaviour tests for the user and post lifecycle over HTTP.
#[path = "support/blog_http.rs"]
mod blog_http;

use std::sync::Mutex;

use actix_web::http::Method;
use blog_backend::inbound::http::state::HttpState;
use blog_http::{Captured, memory_state, send};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

/// Scenario state. The `LocalSet` drives Actix's `!Send` services on the
/// thread that owns the world.
struct BlogWorld {
    runtime: Runtime,
    local: LocalSet,
    state: HttpState,
    user_id: Option<String>,
    post_id: Option<String>,
    last: Option<Captured>,
}

impl BlogWorld {
    fn new() -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("tokio runtime");
        Self {
            runtime,
            local: LocalSet::new(),
            state: memory_state(),
            user_id: None,
            post_id: None,
            last: None,
        }
    }

    fn request(&mut self, method: Method, path: String, body: Option<Value>) {
        let state = self.state.clone();
        let captured = self
            .local
            .block_on(&self.runtime, send(state, method, path, body));
        self.last = Some(captured);
    }

    fn last(&self) -> &Captured {
        self.last.as_ref().expect("a request was sent")
    }

    fn user_id(&self) -> &str {
        self.user_id.as_deref().expect("user created")
    }

    fn post_id(&self) -> &str {
        self.post_id.as_deref().expect("post created")
    }
}

#[fixture]
fn world() -> Mutex<BlogWorld> {
    Mutex::new(BlogWorld::new())
}

#[given("an empty blog")]
fn an_empty_blog(world: &Mutex<BlogWorld>) {
    let world = world.lock().expect("world lock");
    assert!(world.last.is_none());
}

#[when("a user registers with email {email}")]
fn a_user_registers(world: &Mutex<BlogWorld>, email: String) {
    let mut world = world.lock().expect("world lock");
    world.request(
        Method::POST,
        "/api/v1/users".to_owned(),
        Some(json!({ "email": email })),
    );
    world.user_id = world.last().body["id"].as_str().map(str::to_owned);
}

#[when("the user creates a post titled {title}")]
fn the_user_creates_a_post(world: &Mutex<BlogWorld>, title: String) {
    let mut world = world.lock().expect("world lock");
    let author_id = world.user_id().to_owned();
    world.request(
        Method::POST,
        "/api/v1/posts".to_owned(),
        Some(json!({ "title": title, "authorId": author_id })),
    );
    world.post_id = world.last().body["id"].as_str().map(str::to_owned);
}

#[when("the post is published")]
fn the_post_is_published(world: &Mutex<BlogWorld>) {
    let mut world = world.lock().expect("world lock");
    let path = format!("/api/v1/posts/{}/publish", world.post_id());
    world.request(Method::PATCH, path, None);
}

#[when("the post content is set to {content}")]
fn the_post_content_is_set(world: &Mutex<BlogWorld>, content: String) {
    let mut world = world.lock().expect("world lock");
    let path = format!("/api/v1/posts/{}", world.post_id());
    world.request(Method::PUT, path, Some(json!({ "content": content })));
    assert_eq!(world.last().status, 200);
}

#[when("the user is deleted")]
fn the_user_is_deleted(world: &Mutex<BlogWorld>) {
    let mut world = world.lock().expect("world lock");
    let path = format!("/api/v1/users/{}", world.user_id());
    world.request(Method::DELETE, path, None);
}

#[when("the post is deleted")]
fn the_post_is_deleted(world: &Mutex<BlogWorld>) {
    let mut world = world.lock().expect("world lock");
    let path = format!("/api/v1/posts/{}", world.post_id());
    world.request(Method::DELETE, path, None);
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &Mutex<BlogWorld>, status: u16) {
    let world = world.lock().expect("world lock");
    assert_eq!(world.last().status, status, "body: {}", world.last().body);
}

#[then("the user has an id and no posts")]
fn the_user_has_an_id_and_no_posts(world: &Mutex<BlogWorld>) {
    let world = world.lock().expect("world lock");
    assert!(world.user_id.is_some());
    assert_eq!(world.last().body["posts"], json!([]));
}

#[then("the post is not yet published")]
fn the_post_is_not_yet_published(world: &Mutex<BlogWorld>) {
    let world = world.lock().expect("world lock");
    assert_eq!(world.last().body["published"], json!(false));
}

#[then("the post is marked published")]
fn the_post_is_marked_published(world: &Mutex<BlogWorld>) {
    let world = world.lock().expect("world lock");
    assert_eq!(world.last().body["published"], json!(true));
}

#[then("publishing is refused for missing content")]
fn publishing_is_refused(world: &Mutex<BlogWorld>) {
    let world = world.lock().expect("world lock");
    assert_eq!(
        world.last().body["message"],
        "Post must have content (at least 10 characters) before publishing"
    );
}

#[then("deletion is refused because the user has posts")]
fn deletion_is_refused(world: &Mutex<BlogWorld>) {
    let world = world.lock().expect("world lock");
    assert_eq!(
        world.last().body["message"],
        "Cannot delete user with existing posts"
    );
}

#[scenario(path = "tests/features/blog_lifecycle.feature")]
fn blog_lifecycle(world: Mutex<BlogWorld>) {
    drop(world);
}
