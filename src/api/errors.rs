//! HTTP error responses
//!
//! Maps the pipeline error taxonomy onto status codes and a JSON error body.
//! Generation failures never reach this module - they travel inside
//! success-shaped answers as sentinel strings.

use crate::errors::RagError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::error;

/// JSON body returned for request failures
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
}

/// Wrapper turning a `RagError` into an HTTP response
pub struct ApiErrorResponse(pub RagError);

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Client errors carry the real reason; server errors get a logged
        // diagnostic and an opaque body
        let body = if status.is_server_error() {
            error!("Request failed [{}]: {}", self.0.error_code(), self.0);
            ErrorResponse {
                error_type: "internal_error".to_string(),
                message: "Internal server error".to_string(),
            }
        } else {
            ErrorResponse {
                error_type: self.0.error_code().to_lowercase(),
                message: self.0.to_string(),
            }
        };

        (status, axum::response::Json(body)).into_response()
    }
}
