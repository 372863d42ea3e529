//! Beem API types.

use serde::{Deserialize, Serialize};

/// One destination inside a send envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub recipient_id: usize,
    pub dest_addr: String,
}

/// Body of `POST /v1/send`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendSmsRequest {
    pub source_addr: String,
    /// Empty string means "send now".
    pub schedule_time: String,
    /// 0 is plain GSM text.
    pub encoding: u8,
    pub message: String,
    pub recipients: Vec<Recipient>,
}

impl SendSmsRequest {
    /// Build an immediate, plain-text envelope addressed to a single recipient.
    pub fn single(
        source_addr: impl Into<String>,
        message: impl Into<String>,
        recipient: Recipient,
    ) -> Self {
        Self {
            source_addr: source_addr.into(),
            schedule_time: String::new(),
            encoding: 0,
            message: message.into(),
            recipients: vec![recipient],
        }
    }
}
