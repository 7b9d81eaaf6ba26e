//! Shared validation helpers for inbound HTTP adapters.

use actix_web::web;
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidInteger,
    MalformedBody,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidInteger => "invalid_integer",
            ErrorCode::MalformedBody => "malformed_body",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

pub(crate) fn invalid_integer_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a 64-bit integer")).with_details(json!({
        "field": field,
        "value": value,
        "code": ErrorCode::InvalidInteger.as_str(),
    }))
}

/// Parse a path segment into a signed 64-bit identifier.
pub(crate) fn parse_i64_id(value: &str, field: FieldName) -> Result<i64, Error> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| invalid_integer_error(field, value))
}

/// JSON extractor configuration turning body errors into domain errors.
///
/// Unreadable bodies, wrong content types and missing fields all surface as
/// `invalid_request` with the parser's reason in `details`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let reason = err.to_string();
        debug!(%reason, "rejected request body");
        Error::invalid_request("request body is not valid JSON")
            .with_details(json!({
                "code": ErrorCode::MalformedBody.as_str(),
                "reason": reason,
            }))
            .into()
    })
}
