//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and status
//! codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, ServiceError, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        error.clone().without_details()
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

/// Map a service failure onto the HTTP error payload.
///
/// Missing records become `404`, other rule violations `400`. Store failures
/// are logged with their detail and answered with `fallback` as a generic
/// `500` message.
///
/// # Examples
/// ```
/// use blog_backend::domain::{Entity, ErrorCode, ServiceError};
/// use blog_backend::inbound::http::error::map_service_error;
///
/// let err = map_service_error(ServiceError::NotFound(Entity::Post), "Failed to fetch post");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.message(), "Post not found");
/// ```
pub fn map_service_error(err: ServiceError, fallback: &str) -> Error {
    match err {
        ServiceError::NotFound(_) => Error::not_found(err.to_string()),
        ServiceError::Store { message } => {
            error!(error = %message, "{fallback}");
            Error::internal(fallback)
        }
        other => Error::invalid_request(other.to_string()),
    }
}

/// Like [`map_service_error`], but an unresolved author is reported as a
/// missing resource. Used by the by-author listings where the author is part
/// of the path.
pub fn map_author_lookup_error(err: ServiceError, fallback: &str) -> Error {
    match err {
        ServiceError::AuthorNotFound => Error::not_found(err.to_string()),
        other => map_service_error(other, fallback),
    }
}
