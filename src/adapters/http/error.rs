//! HTTP error mapping shared by all endpoint modules.
//!
//! `FORM_LOCKED` and `RESPONSE_INVALID` intentionally map to different
//! statuses (409 vs 400): a client may retry a fixed submission, but must
//! not retry an edit against a frozen schema.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::foundation::ErrorCode;
use crate::domain::form::FormError;

/// Standard error payload: human-readable message plus a stable code.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    /// Publish blockers, present only for SCHEMA_INVALID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasons: Option<Vec<String>>,
    /// Offending field label, present only for RESPONSE_INVALID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: impl ToString, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
            reasons: None,
            field: None,
        }
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", error)
    }
}

/// Maps a domain error onto status + JSON body.
pub fn form_error_response(err: FormError) -> Response {
    let status = match err.code() {
        ErrorCode::FormNotFound | ErrorCode::FieldNotFound | ErrorCode::ResponseNotFound => {
            StatusCode::NOT_FOUND
        }
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::FormLocked | ErrorCode::AlreadyPublished => StatusCode::CONFLICT,
        ErrorCode::SchemaInvalid
        | ErrorCode::ResponseInvalid
        | ErrorCode::FormNotPublished
        | ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::OutOfRange
        | ErrorCode::InvalidFormat
        | ErrorCode::InvalidStateTransition => StatusCode::BAD_REQUEST,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let mut body = ErrorResponse::new(err.code(), err.message());
    match &err {
        FormError::SchemaInvalid(reasons) => body.reasons = Some(reasons.clone()),
        FormError::ResponseInvalid(violation) => body.field = Some(violation.label.clone()),
        _ => {}
    }

    if status.is_server_error() {
        tracing::error!(code = %err.code(), "request failed: {}", err);
    }

    (status, Json(body)).into_response()
}
