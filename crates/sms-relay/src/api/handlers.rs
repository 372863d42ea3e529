//! HTTP request handlers.

use super::types::{HealthResponse, SendSmsRequest, SendSmsResponse};
use super::AppState;
use crate::error::RelayError;
use crate::relay::{relay_batch, BatchPlan};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::{info, warn};

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        message: "UKSS Beem SMS backend running".to_string(),
    })
}

/// Relay a batch of messages to Beem, one call per message.
pub async fn send_sms(
    State(state): State<AppState>,
    payload: Result<Json<SendSmsRequest>, JsonRejection>,
) -> Result<Json<SendSmsResponse>, RelayError> {
    let Json(request) = payload.map_err(|e| {
        warn!(error = %e, "Rejected send-sms body");
        RelayError::InvalidBody(e.body_text())
    })?;

    let plan = BatchPlan::from_items(&request.messages)?;
    info!(
        submitted = request.messages.len(),
        sends = plan.dispatches.len(),
        "Send-sms request received"
    );

    let outcome = relay_batch(&state.beem, plan).await?;

    Ok(Json(SendSmsResponse::from(outcome)))
}
