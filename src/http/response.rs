//! JSON response construction.
//!
//! # Responsibilities
//! - Serialize success bodies as JSON with the given status
//! - Build the error envelope `{ statusCode, message, isError: true }`
//!
//! # Design Decisions
//! - Always `Content-Type: application/json`
//! - A body that fails to serialize degrades to a fixed 500 envelope

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;
use serde::{Deserialize, Serialize};

const SERIALIZATION_FAILURE: &str =
    r#"{"statusCode":500,"message":"Failed to serialize response body","isError":true}"#;

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponseBody {
    pub status_code: u16,
    pub message: String,
    pub is_error: bool,
}

/// Serialize `body` as JSON with `status`.
pub fn respond<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => json_response(status, Body::from(bytes)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize response body");
            json_response(StatusCode::INTERNAL_SERVER_ERROR, Body::from(SERIALIZATION_FAILURE))
        }
    }
}

/// Error envelope with `status`.
pub fn respond_with_error(status: StatusCode, message: &str) -> Response {
    respond(
        status,
        &ErrorResponseBody {
            status_code: status.as_u16(),
            message: message.to_string(),
            is_error: true,
        },
    )
}

fn json_response(status: StatusCode, body: Body) -> Response {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}
