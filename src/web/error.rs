//! Server error types

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::gate::GateError;
use crate::library::LibraryError;

/// Request-level error
///
/// Clients only ever see the generic status text; details are logged.
#[derive(Error, Debug)]
pub enum ServeError {
    #[error("Not found: {reason}")]
    NotFound { reason: String },

    #[error("Bad request: {reason}")]
    BadRequest { reason: String },

    #[error("Internal server error: {reason}")]
    Internal { reason: String },

    #[error("Server bind failed: {reason}")]
    BindFailed { reason: String },
}

impl ServeError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ServeError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServeError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ServeError::Internal { .. } | ServeError::BindFailed { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<LibraryError> for ServeError {
    fn from(e: LibraryError) -> Self {
        if e.is_not_found() {
            ServeError::NotFound {
                reason: e.to_string(),
            }
        } else {
            ServeError::Internal {
                reason: e.to_string(),
            }
        }
    }
}

impl From<GateError> for ServeError {
    fn from(e: GateError) -> Self {
        ServeError::Internal {
            reason: e.to_string(),
        }
    }
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }

        let text = status.canonical_reason().unwrap_or("Error");
        (
            status,
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
                (header::CACHE_CONTROL, "no-cache"),
            ],
            text,
        )
            .into_response()
    }
}
