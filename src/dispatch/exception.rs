//! Errors raised by handlers.

use axum::http::StatusCode;
use thiserror::Error;

use crate::routing::RouteError;

/// Message carried by the redirect signal.
///
/// An [`HttpException`] with this message is never rendered by the
/// dispatcher; it is handed back to the hosting server instead.
pub const REDIRECT_SIGNAL: &str = "SEGMENT_REDIRECT";

/// An error with an optional HTTP status.
///
/// Handlers return this to produce a JSON error body
/// `{ statusCode, message, isError: true }`. Without a status the dispatcher
/// answers 500.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HttpException {
    status: Option<StatusCode>,
    message: String,
    location: Option<String>,
}

impl HttpException {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
            location: None,
        }
    }

    /// An error without a status code (rendered as 500).
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
            location: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// The redirect signal. The hosting server answers with a redirect to `location`.
    pub fn redirect(location: impl Into<String>) -> Self {
        Self {
            status: None,
            message: REDIRECT_SIGNAL.to_string(),
            location: Some(location.into()),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Status used when rendering.
    pub fn status_code(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn is_redirect(&self) -> bool {
        self.message == REDIRECT_SIGNAL
    }
}

impl From<RouteError> for HttpException {
    fn from(err: RouteError) -> Self {
        Self::new(err.status(), err.to_string())
    }
}

impl From<serde_json::Error> for HttpException {
    fn from(err: serde_json::Error) -> Self {
        Self::from_message(err.to_string())
    }
}

impl From<axum::Error> for HttpException {
    fn from(err: axum::Error) -> Self {
        Self::from_message(err.to_string())
    }
}
