//! Request-shape validation shared by the HTTP handlers.
//!
//! These checks run before any service call. Every failure answers `400` with
//! the message `Validation failed` and a `details` object naming the field.

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, ResponseError, web};
use serde_json::json;

use crate::domain::{Error, TITLE_MAX_CHARS};

/// Top-level message carried by every request validation failure.
pub const VALIDATION_FAILED: &str = "Validation failed";

/// Validation error codes reported in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    TooLong,
    InvalidBody,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::TooLong => "too_long",
            ErrorCode::InvalidBody => "invalid_body",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

pub(crate) const EMAIL: FieldName = FieldName::new("email");
pub(crate) const TITLE: FieldName = FieldName::new("title");
pub(crate) const AUTHOR_ID: FieldName = FieldName::new("authorId");

/// Builder for validation errors with field context.
struct ValidationError {
    field: Option<&'static str>,
    message: String,
}

impl ValidationError {
    fn new(field: Option<&'static str>, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        let mut details = json!({
            "code": code.as_str(),
            "message": self.message,
        });
        if let Some(field) = self.field {
            details["field"] = json!(field);
        }
        Error::invalid_request(VALIDATION_FAILED).with_details(details)
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(Some(field), format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn title_too_long_error() -> Error {
    ValidationError::new(
        Some(TITLE.as_str()),
        format!("Post title must be less than {TITLE_MAX_CHARS} characters"),
    )
    .with_code(ErrorCode::TooLong)
}

/// Unwrap a required text field or report it as missing. An empty string
/// counts as missing; whitespace does not.
pub(crate) fn require(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value
        .filter(|text| !text.is_empty())
        .ok_or_else(|| missing_field_error(field))
}

/// Reject titles longer than [`TITLE_MAX_CHARS`] characters.
pub(crate) fn check_title_length(title: Option<&str>) -> Result<(), Error> {
    match title {
        Some(title) if title.chars().count() > TITLE_MAX_CHARS => Err(title_too_long_error()),
        _ => Ok(()),
    }
}

pub(crate) fn invalid_body_error(err: &JsonPayloadError) -> Error {
    ValidationError::new(None, err.to_string()).with_code(ErrorCode::InvalidBody)
}

/// JSON extractor configuration answering malformed or mistyped bodies with
/// the validation payload instead of Actix's plain-text default.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use blog_backend::inbound::http::validation::json_config;
///
/// let app = App::new().app_data(json_config());
/// ```
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        let payload = invalid_body_error(&err);
        InternalError::from_response(err, payload.error_response()).into()
    })
}
