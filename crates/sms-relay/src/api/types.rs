//! API request and response types.

use crate::relay::{BatchOutcome, SmsItem, SmsResult};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of `POST /api/send-sms`.
#[derive(Debug, Default, Deserialize)]
pub struct SendSmsRequest {
    /// Anything other than an array or a non-empty string is an empty batch.
    #[serde(default, deserialize_with = "lenient_messages")]
    pub messages: Vec<SmsItem>,
}

/// A non-empty string counts as one unusable item per character, so it is
/// accepted but sends nothing.
fn lenient_messages<'de, D>(deserializer: D) -> Result<Vec<SmsItem>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().map(SmsItem::from).collect(),
        Value::String(s) => s.chars().map(|_| SmsItem::default()).collect(),
        _ => Vec::new(),
    })
}

/// Response after relaying a batch.
#[derive(Debug, Serialize)]
pub struct SendSmsResponse {
    pub ok: bool,
    pub count: usize,
    pub results: Vec<SmsResult>,
}

impl From<BatchOutcome> for SendSmsResponse {
    fn from(outcome: BatchOutcome) -> Self {
        Self {
            ok: true,
            count: outcome.results.len(),
            results: outcome.results,
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub message: String,
}
