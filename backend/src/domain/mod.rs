//! Domain primitives, rules and services.
//!
//! Purpose: define the user and post records, the rules that guard their
//! lifecycle, and the services that apply those rules above the driven
//! repository ports. Nothing here depends on HTTP or on a storage engine.
//!
//! Public surface:
//! - `User`, `UserWithPosts`, `Post`, `PostWithAuthor` and their ids.
//! - `ServiceError`: tagged rule violations with stable messages.
//! - `UserService`, `PostService`: implementations of the driving ports.
//! - `Error` / `ErrorCode`: transport-facing error payload.

pub mod error;
pub mod ports;
pub mod post;
pub mod post_service;
pub mod seed;
pub mod service_error;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::post::{
    NewPost, PUBLISH_MIN_CONTENT_CHARS, Post, PostChanges, PostFilter, PostId, PostWithAuthor,
    TITLE_MAX_CHARS, validate_title,
};
pub use self::post_service::PostService;
pub use self::seed::{SeedPlan, SeedPost, SeedUser};
pub use self::service_error::{Entity, ServiceError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    InvalidIdError, NewUser, User, UserChanges, UserId, UserWithPosts, is_valid_email,
};
pub use self::user_service::UserService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use blog_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("User not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
