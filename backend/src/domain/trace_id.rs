//! Per-request correlation id.
//!
//! The [`crate::Trace`] middleware generates one id per request and runs the
//! rest of the pipeline inside [`TraceId::scope`]. Anything executing in that
//! task, such as [`crate::domain::Error::new`], can read it back with
//! [`TraceId::current`]. Task locals do not follow `tokio::spawn`; wrap spawned
//! work in [`TraceId::scope`] again if it needs the id.

use std::fmt;
use std::future::Future;

use uuid::Uuid;

/// Name of the response header that echoes the request's trace id.
pub const TRACE_ID_HEADER: &str = "trace-id";

tokio::task_local! {
    static CURRENT: TraceId;
}

/// Identifier shared by the request log line, the `trace-id` header and any
/// error payload produced while handling the request.
///
/// ```
/// use blog_backend::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id: TraceId = "6f1c2a8e-3b4d-4f5a-9c7e-0d1b2a3c4d5e".parse().unwrap();
/// assert_eq!(TraceId::scope(id, async { TraceId::current() }).await, Some(id));
/// assert_eq!(TraceId::current(), None);
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The id of the request being handled, if any.
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `id` as the current trace id.
    pub async fn scope<F: Future>(id: Self, fut: F) -> F::Output {
        CURRENT.scope(id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl std::str::FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(raw).map(Self)
    }
}
