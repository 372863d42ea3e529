//! Error types for the SMS relay.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use beem_client::BeemError;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Relay error types.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The batch was rejected before anything was sent.
    #[error("{0}")]
    Validation(String),

    #[error("Invalid request body")]
    InvalidBody(String),

    /// A Beem call failed; the whole batch is abandoned.
    #[error("Failed to send SMS via Beem")]
    Provider(#[from] BeemError),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl RelayError {
    /// HTTP status the relay answers with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::Validation(_) | RelayError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            RelayError::Provider(e) => e
                .status()
                .and_then(|s| StatusCode::from_u16(s).ok())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            RelayError::Validation(_) => ErrorResponse {
                ok: false,
                error: self.to_string(),
                status: None,
                details: None,
            },
            RelayError::InvalidBody(reason) => ErrorResponse {
                ok: false,
                error: self.to_string(),
                status: None,
                details: Some(Value::String(reason.clone())),
            },
            RelayError::Provider(e) => ErrorResponse {
                ok: false,
                error: self.to_string(),
                status: Some(status.as_u16()),
                details: Some(e.details()),
            },
        };

        (status, Json(body)).into_response()
    }
}
