//! Fixed-window rate limiting keyed by client IP address.
//!
//! Every response carries `RateLimit-Limit`, `RateLimit-Remaining` and
//! `RateLimit-Reset` (seconds until the window resets). Requests beyond the
//! budget receive `429 Too Many Requests` with the standard error payload.

use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
use actix_web::{Error, ResponseError};
use dashmap::DashMap;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::warn;

use crate::domain::Error as ApiError;

/// Message returned once a client exhausts its budget.
pub const RATE_LIMIT_MESSAGE: &str = "Too many requests from this IP, please try again later.";

/// Number of tracked clients above which expired windows are pruned.
const PRUNE_THRESHOLD: usize = 10_000;

const LIMIT_HEADER: &str = "ratelimit-limit";
const REMAINING_HEADER: &str = "ratelimit-remaining";
const RESET_HEADER: &str = "ratelimit-reset";

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Outcome of a single [`RateLimiter::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    /// Whether the request fits in the current window.
    pub allowed: bool,
    /// Requests allowed per window.
    pub limit: u32,
    /// Requests left in the current window.
    pub remaining: u32,
    /// Time until the current window resets.
    pub reset_after: Duration,
}

impl RateDecision {
    fn reset_secs(&self) -> u64 {
        let secs = self.reset_after.as_secs();
        if self.reset_after.subsec_nanos() > 0 {
            secs + 1
        } else {
            secs
        }
    }

    fn apply_headers(&self, headers: &mut HeaderMap) {
        let pairs = [
            (LIMIT_HEADER, u64::from(self.limit)),
            (REMAINING_HEADER, u64::from(self.remaining)),
            (RESET_HEADER, self.reset_secs()),
        ];
        for (name, value) in pairs {
            headers.insert(HeaderName::from_static(name), HeaderValue::from(value));
        }
    }
}

/// Thread-safe fixed-window counter per client key.
///
/// # Examples
/// ```
/// use std::time::{Duration, Instant};
/// use blog_backend::middleware::RateLimiter;
///
/// let limiter = RateLimiter::new(Duration::from_secs(60), 2);
/// let now = Instant::now();
/// assert!(limiter.check("10.0.0.1", now).allowed);
/// assert!(limiter.check("10.0.0.1", now).allowed);
/// assert!(!limiter.check("10.0.0.1", now).allowed);
/// ```
#[derive(Debug)]
pub struct RateLimiter {
    window: Duration,
    max_requests: u32,
    clients: DashMap<String, Window>,
}

impl RateLimiter {
    /// Allow `max_requests` per `window` for each client.
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
            clients: DashMap::new(),
        }
    }

    /// Count one request from `client` at `now` and report whether it fits.
    pub fn check(&self, client: &str, now: Instant) -> RateDecision {
        if self.clients.len() > PRUNE_THRESHOLD {
            self.prune(now);
        }

        let mut entry = self.clients.entry(client.to_owned()).or_insert(Window {
            started: now,
            count: 0,
        });
        let window = entry.value_mut();
        if now.duration_since(window.started) >= self.window {
            window.started = now;
            window.count = 0;
        }
        window.count = window.count.saturating_add(1);

        RateDecision {
            allowed: window.count <= self.max_requests,
            limit: self.max_requests,
            remaining: self.max_requests.saturating_sub(window.count),
            reset_after: self
                .window
                .saturating_sub(now.duration_since(window.started)),
        }
    }

    fn prune(&self, now: Instant) {
        self.clients
            .retain(|_, window| now.duration_since(window.started) < self.window);
    }
}

/// Middleware applying a shared [`RateLimiter`] to every request.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use actix_web::App;
/// use blog_backend::middleware::{RateLimit, RateLimiter};
///
/// let limiter = Arc::new(RateLimiter::new(Duration::from_secs(900), 100));
/// let app = App::new().wrap(RateLimit::new(limiter));
/// ```
#[derive(Clone)]
pub struct RateLimit {
    limiter: Arc<RateLimiter>,
}

impl RateLimit {
    /// Wrap a shared limiter; clones of the middleware share counters.
    pub fn new(limiter: Arc<RateLimiter>) -> Self {
        Self { limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limiter: Arc::clone(&self.limiter),
        }))
    }
}

/// Service wrapper produced by [`RateLimit`].
pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limiter: Arc<RateLimiter>,
}

fn client_key(req: &ServiceRequest) -> String {
    req.peer_addr()
        .map_or_else(|| "unknown".to_owned(), |addr| addr.ip().to_string())
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let client = client_key(&req);
        let decision = self.limiter.check(&client, Instant::now());
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if !decision.allowed {
                warn!(%client, "rate limit exceeded");
                let error = ApiError::too_many_requests(RATE_LIMIT_MESSAGE);
                let mut response = error.error_response();
                decision.apply_headers(response.headers_mut());
                return Ok(req.into_response(response).map_into_right_body());
            }

            let mut res = service.call(req).await?;
            decision.apply_headers(res.headers_mut());
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use actix_web::{App, HttpResponse, web};
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    fn budget_is_per_client() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 1);
        let now = Instant::now();

        assert!(limiter.check("a", now).allowed);
        assert!(!limiter.check("a", now).allowed);
        assert!(limiter.check("b", now).allowed);
    }

    #[rstest]
    fn window_resets_after_expiry() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 1);
        let start = Instant::now();

        assert!(limiter.check("a", start).allowed);
        assert!(!limiter.check("a", start + Duration::from_secs(59)).allowed);
        let decision = limiter.check("a", start + Duration::from_secs(60));
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 0);
        assert_eq!(decision.reset_after, Duration::from_secs(60));
    }

    #[rstest]
    fn remaining_counts_down() {
        let limiter = RateLimiter::new(Duration::from_secs(10), 3);
        let now = Instant::now();

        let remaining: Vec<u32> = (0..4).map(|_| limiter.check("a", now).remaining).collect();

        assert_eq!(remaining, [2, 1, 0, 0]);
    }

    #[rstest]
    #[case(Duration::from_millis(1500), 2)]
    #[case(Duration::from_secs(3), 3)]
    #[case(Duration::ZERO, 0)]
    fn reset_header_rounds_up(#[case] reset_after: Duration, #[case] expected: u64) {
        let decision = RateDecision {
            allowed: true,
            limit: 1,
            remaining: 0,
            reset_after,
        };
        assert_eq!(decision.reset_secs(), expected);
    }

    #[actix_web::test]
    async fn rejects_requests_over_budget() {
        let limiter = Arc::new(RateLimiter::new(Duration::from_secs(900), 1));
        let app = actix_test::init_service(
            App::new()
                .wrap(RateLimit::new(limiter))
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let first =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request())
                .await;
        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(
            first.headers().get("RateLimit-Remaining").map(HeaderValue::as_bytes),
            Some(&b"0"[..])
        );

        let second =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request())
                .await;
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(second.headers().contains_key("RateLimit-Reset"));
        let body: Value = actix_test::read_body_json(second).await;
        assert_eq!(body["code"], "too_many_requests");
        assert_eq!(body["message"], RATE_LIMIT_MESSAGE);
    }
}
