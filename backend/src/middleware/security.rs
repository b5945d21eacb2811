//! Cross-origin access and baseline security headers.
//!
//! [`cors`] lets any origin call the API, answering preflight requests
//! before they reach the rate limiter. [`security_headers`] stamps every
//! response with the hardening headers below unless a handler already set
//! them.

use actix_cors::Cors;
use actix_web::http::Method;
use actix_web::middleware::DefaultHeaders;

/// Headers added to every response.
pub const SECURITY_HEADERS: [(&str, &str); 11] = [
    ("Cross-Origin-Opener-Policy", "same-origin"),
    ("Cross-Origin-Resource-Policy", "same-origin"),
    ("Origin-Agent-Cluster", "?1"),
    ("Referrer-Policy", "no-referrer"),
    (
        "Strict-Transport-Security",
        "max-age=31536000; includeSubDomains",
    ),
    ("X-Content-Type-Options", "nosniff"),
    ("X-DNS-Prefetch-Control", "off"),
    ("X-Download-Options", "noopen"),
    ("X-Frame-Options", "SAMEORIGIN"),
    ("X-Permitted-Cross-Domain-Policies", "none"),
    ("X-XSS-Protection", "0"),
];

/// Middleware adding [`SECURITY_HEADERS`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use blog_backend::middleware::security_headers;
///
/// let app = App::new().wrap(security_headers());
/// # drop(app);
/// ```
pub fn security_headers() -> DefaultHeaders {
    SECURITY_HEADERS
        .into_iter()
        .fold(DefaultHeaders::new(), |headers, pair| headers.add(pair))
}

/// Middleware allowing any origin to call the API with any request header.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allowed_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_any_header()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::{StatusCode, header};
    use actix_web::test as actix_test;
    use actix_web::{App, HttpResponse, web};
    use rstest::rstest;

    #[rstest]
    #[actix_web::test]
    async fn every_hardening_header_is_present() {
        let app = actix_test::init_service(
            App::new()
                .wrap(security_headers())
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request())
                .await;

        for (name, value) in SECURITY_HEADERS {
            assert_eq!(
                res.headers().get(name).and_then(|v| v.to_str().ok()),
                Some(value),
                "{name}"
            );
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn handler_headers_take_precedence() {
        let app = actix_test::init_service(App::new().wrap(security_headers()).route(
            "/",
            web::get().to(|| async {
                HttpResponse::Ok()
                    .insert_header(("X-Frame-Options", "DENY"))
                    .finish()
            }),
        ))
        .await;

        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request())
                .await;

        assert_eq!(
            res.headers().get("X-Frame-Options").and_then(|v| v.to_str().ok()),
            Some("DENY")
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn preflight_allows_any_origin() {
        let app = actix_test::init_service(
            App::new()
                .wrap(cors())
                .route("/", web::post().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = actix_test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/")
            .insert_header((header::ORIGIN, "https://blog.example"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }
}
