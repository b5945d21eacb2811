//! Tests for the posts HTTP handlers.

use super::*;
use crate::domain::User;
use crate::domain::ports::{MockPostsCommand, MockPostsQuery, MockUsersCommand, MockUsersQuery};
use crate::inbound::http::test_utils::{
    insert_post, insert_user, memory_state, mock_state, test_app,
};
use crate::outbound::memory::InMemoryStore;
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;

const MISSING_ID: &str = "00000000-0000-0000-0000-000000000000";

async fn call(state: HttpState, request: actix_test::TestRequest) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(state)).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body: Value = actix_test::read_body_json(response).await;
    (status, body)
}

async fn with_author() -> (Arc<InMemoryStore>, HttpState, User) {
    let (store, state) = memory_state();
    let author = insert_user(&store, "alice@example.com", Some("Alice")).await;
    (store, state, author)
}

#[rstest]
#[actix_web::test]
async fn create_post_starts_unpublished_with_author() {
    let (_store, state, author) = with_author().await;

    let (status, body) = call(
        state,
        actix_test::TestRequest::post().uri("/api/v1/posts").set_json(json!({
            "title": "Hello",
            "content": "Some body text",
            "authorId": author.id.to_string(),
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "Hello");
    assert_eq!(body["published"], false);
    assert_eq!(body["authorId"], author.id.to_string());
    assert_eq!(body["author"]["email"], "alice@example.com");
}

#[rstest]
#[case(json!({ "authorId": MISSING_ID }), "title")]
#[case(json!({ "title": "Hello" }), "authorId")]
#[case(json!({ "title": "", "authorId": MISSING_ID }), "title")]
#[case(json!({ "title": "Hello", "authorId": "" }), "authorId")]
#[case(json!({ "title": "a".repeat(201), "authorId": MISSING_ID }), "title")]
#[actix_web::test]
async fn create_post_validates_the_body(#[case] payload: Value, #[case] field: &str) {
    let (_store, state) = memory_state();

    let (status, body) = call(
        state,
        actix_test::TestRequest::post().uri("/api/v1/posts").set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation failed");
    assert_eq!(body["details"]["field"], field);
}

#[rstest]
#[case(MISSING_ID)]
#[case("not-a-uuid")]
#[actix_web::test]
async fn create_post_rejects_unknown_authors(#[case] author_id: &str) {
    let (_store, state) = memory_state();

    let (status, body) = call(
        state,
        actix_test::TestRequest::post()
            .uri("/api/v1/posts")
            .set_json(json!({ "title": "Hello", "authorId": author_id })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Author not found");
}

#[rstest]
#[actix_web::test]
async fn create_post_rejects_blank_titles() {
    let (_store, state, author) = with_author().await;

    let (status, body) = call(
        state,
        actix_test::TestRequest::post().uri("/api/v1/posts").set_json(json!({
            "title": "   ",
            "authorId": author.id.to_string(),
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Post title is required");
}

#[rstest]
#[actix_web::test]
async fn fixed_paths_are_not_treated_as_ids() {
    let (store, state, author) = with_author().await;
    insert_post(&store, &author, "Draft", None).await;
    let app = actix_test::init_service(test_app(state)).await;

    for uri in ["/api/v1/posts/published", "/api/v1/posts/search"] {
        let request = actix_test::TestRequest::get().uri(uri).to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }
}

#[rstest]
#[case("/api/v1/posts/search?q=RUST", 1)]
#[case("/api/v1/posts/search?q=", 2)]
#[case("/api/v1/posts/search?q=%20%20", 2)]
#[case("/api/v1/posts/search", 2)]
#[case("/api/v1/posts/search?q=python", 0)]
#[actix_web::test]
async fn search_matches_title_or_content(#[case] uri: &str, #[case] expected: usize) {
    let (store, state, author) = with_author().await;
    insert_post(&store, &author, "Learning Rust", None).await;
    insert_post(&store, &author, "Cooking", Some("Pasta recipes")).await;

    let (status, body) = call(state, actix_test::TestRequest::get().uri(uri)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(expected));
}

#[rstest]
#[actix_web::test]
async fn publish_requires_content_then_lists_as_published() {
    let (store, state, author) = with_author().await;
    let short = insert_post(&store, &author, "Short", Some("tiny")).await;
    let long = insert_post(&store, &author, "Long", Some("Plenty of content here")).await;
    let app = actix_test::init_service(test_app(state)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/v1/posts/{}/publish", short.id))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body["message"],
        "Post must have content (at least 10 characters) before publishing"
    );

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/v1/posts/{}/publish", long.id))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/v1/posts/author/{}/published", author.id))
        .to_request();
    let published: Vec<PostWithAuthor> = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].post.id, long.id);

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/v1/posts/{}/unpublish", long.id))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: PostWithAuthor = actix_test::read_body_json(response).await;
    assert!(!body.post.published);
}

#[rstest]
#[case("/api/v1/posts/author/00000000-0000-0000-0000-000000000000")]
#[case("/api/v1/posts/author/00000000-0000-0000-0000-000000000000/published")]
#[case("/api/v1/posts/author/nope")]
#[actix_web::test]
async fn unknown_authors_are_not_found_on_listings(#[case] uri: &str) {
    let (_store, state) = memory_state();

    let (status, body) = call(state, actix_test::TestRequest::get().uri(uri)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Author not found");
}

#[rstest]
#[case(actix_test::TestRequest::get(), "")]
#[case(actix_test::TestRequest::delete(), "")]
#[case(actix_test::TestRequest::patch(), "/publish")]
#[case(actix_test::TestRequest::patch(), "/unpublish")]
#[case(actix_test::TestRequest::put().set_json(json!({ "title": "x" })), "")]
#[case(actix_test::TestRequest::get(), "-not-a-uuid")]
#[actix_web::test]
async fn unknown_posts_are_not_found(
    #[case] request: actix_test::TestRequest,
    #[case] suffix: &str,
) {
    let (_store, state) = memory_state();

    let uri = format!("/api/v1/posts/{MISSING_ID}{suffix}");
    let (status, body) = call(state, request.uri(&uri)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Post not found");
}

#[rstest]
#[actix_web::test]
async fn update_post_changes_fields_and_checks_titles() {
    let (store, state, author) = with_author().await;
    let post = insert_post(&store, &author, "Old", None).await;
    let app = actix_test::init_service(test_app(state)).await;
    let uri = format!("/api/v1/posts/{}", post.id);

    let request = actix_test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({ "title": "New", "content": "Fresh body" }))
        .to_request();
    let updated: PostWithAuthor = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(updated.post.title, "New");
    assert_eq!(updated.post.content.as_deref(), Some("Fresh body"));

    let request = actix_test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({ "title": "" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Post title is required");
}

#[rstest]
#[actix_web::test]
async fn delete_post_returns_the_removed_record() {
    let (store, state, author) = with_author().await;
    let post = insert_post(&store, &author, "Bye", None).await;

    let (status, body) = call(
        state,
        actix_test::TestRequest::delete().uri(&format!("/api/v1/posts/{}", post.id)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Post deleted successfully");
    assert_eq!(body["post"]["id"], post.id.to_string());
}

#[rstest]
#[actix_web::test]
async fn store_failures_use_operation_messages() {
    let mut posts = MockPostsCommand::new();
    posts
        .expect_publish_post()
        .times(1)
        .return_once(|_| Err(ServiceError::store("deadlock detected")));
    let state = mock_state(
        MockUsersCommand::new(),
        MockUsersQuery::new(),
        posts,
        MockPostsQuery::new(),
    );

    let (status, body) = call(
        state,
        actix_test::TestRequest::patch().uri(&format!("/api/v1/posts/{MISSING_ID}/publish")),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to publish post");
    assert!(body.get("details").is_none());
}

#[rstest]
#[actix_web::test]
async fn search_passes_the_untrimmed_query() {
    let mut posts_query = MockPostsQuery::new();
    posts_query
        .expect_search()
        .withf(|query| query == " rust ")
        .times(1)
        .return_once(|_| Ok(Vec::new()));
    let state = mock_state(
        MockUsersCommand::new(),
        MockUsersQuery::new(),
        MockPostsCommand::new(),
        posts_query,
    );

    let (status, body) = call(
        state,
        actix_test::TestRequest::get().uri("/api/v1/posts/search?q=%20rust%20"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}
