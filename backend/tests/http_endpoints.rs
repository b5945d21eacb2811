//! Integration tests for the assembled HTTP surface.
#[path = "support/blog_http.rs"]
mod blog_http;

use std::sync::Arc;
use std::time::Duration;

use actix_web::http::{Method, StatusCode, header};
use actix_web::test as actix_test;
use actix_web::{App, web};
use blog_backend::inbound::http::{API_BASE_PATH, configure_api};
use blog_backend::middleware::{cors, security_headers};
use blog_backend::{RateLimit, RateLimiter, Trace};
use blog_http::{memory_state, send};
use rstest::rstest;
use serde_json::{Value, json};

#[rstest]
#[actix_web::test]
async fn rate_limit_applies_per_client_across_endpoints() {
    let limiter = Arc::new(RateLimiter::new(Duration::from_secs(900), 2));
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(memory_state()))
            .wrap(RateLimit::new(limiter))
            .wrap(Trace)
            .service(web::scope(API_BASE_PATH).configure(configure_api)),
    )
    .await;

    for uri in ["/api/v1/users", "/api/v1/posts"] {
        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get("ratelimit-limit")
                .and_then(|value| value.to_str().ok()),
            Some("2")
        );
    }

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/users").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key("trace-id"));
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "too_many_requests");
    assert_eq!(
        body["message"],
        "Too many requests from this IP, please try again later."
    );
    assert!(body["traceId"].is_string());
}

#[rstest]
#[actix_web::test]
async fn cors_and_security_headers_reach_limited_responses() {
    let limiter = Arc::new(RateLimiter::new(Duration::from_secs(900), 1));
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(memory_state()))
            .wrap(RateLimit::new(limiter))
            .wrap(cors())
            .wrap(security_headers())
            .wrap(Trace)
            .service(web::scope(API_BASE_PATH).configure(configure_api)),
    )
    .await;

    let mut statuses = Vec::new();
    for _ in 0..2 {
        let request = actix_test::TestRequest::get()
            .uri("/api/v1/posts")
            .insert_header((header::ORIGIN, "https://reader.example"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        statuses.push(response.status());

        let headers = response.headers();
        let text = |name: &str| headers.get(name).and_then(|value| value.to_str().ok());
        assert_eq!(text("access-control-allow-origin"), Some("*"));
        assert_eq!(text("x-content-type-options"), Some("nosniff"));
        assert_eq!(text("x-frame-options"), Some("SAMEORIGIN"));
        assert_eq!(
            text("strict-transport-security"),
            Some("max-age=31536000; includeSubDomains")
        );
    }

    assert_eq!(statuses, [StatusCode::OK, StatusCode::TOO_MANY_REQUESTS]);
}

#[rstest]
#[actix_web::test]
async fn users_and_posts_round_trip_through_the_api() {
    let state = memory_state();

    let created = send(
        state.clone(),
        Method::POST,
        "/api/v1/users".to_owned(),
        Some(json!({ "email": "dana@example.com", "name": "Dana" })),
    )
    .await;
    assert_eq!(created.status, 201);
    let author_id = created.body["id"].as_str().expect("user id").to_owned();

    for (title, content) in [
        ("Rust Ownership", "Borrowing rules in depth"),
        ("Gardening", "Tomatoes and RUST-coloured leaves"),
        ("Cooking", "Pasta"),
    ] {
        let post = send(
            state.clone(),
            Method::POST,
            "/api/v1/posts".to_owned(),
            Some(json!({ "title": title, "content": content, "authorId": author_id })),
        )
        .await;
        assert_eq!(post.status, 201);
    }

    let found = send(
        state.clone(),
        Method::GET,
        "/api/v1/posts/search?q=rust".to_owned(),
        None,
    )
    .await;
    assert_eq!(found.body.as_array().map(Vec::len), Some(2));

    let everything = send(
        state.clone(),
        Method::GET,
        "/api/v1/posts/search?q=".to_owned(),
        None,
    )
    .await;
    assert_eq!(everything.body.as_array().map(Vec::len), Some(3));

    let published = send(
        state.clone(),
        Method::GET,
        format!("/api/v1/posts/author/{author_id}/published"),
        None,
    )
    .await;
    assert_eq!(published.status, 200);
    assert_eq!(published.body, json!([]));

    let user = send(
        state,
        Method::GET,
        format!("/api/v1/users/{author_id}/posts"),
        None,
    )
    .await;
    assert_eq!(user.body["posts"].as_array().map(Vec::len), Some(3));
}

#[rstest]
#[case(json!({ "email": "dana@example.com" }), 400, "User with this email already exists")]
#[case(json!({ "email": "broken" }), 400, "Invalid email format")]
#[actix_web::test]
async fn duplicate_and_malformed_emails_are_rejected(
    #[case] payload: Value,
    #[case] status: u16,
    #[case] message: &str,
) {
    let state = memory_state();
    send(
        state.clone(),
        Method::POST,
        "/api/v1/users".to_owned(),
        Some(json!({ "email": "dana@example.com" })),
    )
    .await;

    let response = send(state, Method::POST, "/api/v1/users".to_owned(), Some(payload)).await;

    assert_eq!(response.status, status);
    assert_eq!(response.body["message"], message);
}
