//! Transport-level errors: requests that never reach the services.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use chatline_types::chat::TimeBoundParseError;
use chatline_types::envelope::ResponseEnvelope;

/// A request that could not be decoded. Rendered as HTTP 400 carrying a
/// failure envelope, so clients parse one body shape everywhere.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<TimeBoundParseError> for AppError {
    fn from(e: TimeBoundParseError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(message) => {
                tracing::debug!(%message, "Rejected malformed request");
                (
                    StatusCode::BAD_REQUEST,
                    Json(ResponseEnvelope::failure(message)),
                )
                    .into_response()
            }
        }
    }
}
