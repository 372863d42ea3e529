//! Beem HTTP client.

use crate::error::BeemError;
use crate::types::*;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// Public Beem SMS API host.
pub const DEFAULT_BASE_URL: &str = "https://apisms.beem.africa";

/// Beem bulk SMS client.
///
/// The API key and secret are kept as `SecretString` so they never show up
/// in logs or debug output.
#[derive(Clone)]
pub struct BeemClient {
    client: Client,
    base_url: String,
    api_key: SecretString,
    secret_key: SecretString,
    source_addr: String,
}

impl BeemClient {
    /// Create a new Beem client.
    pub fn new(
        base_url: impl Into<String>,
        api_key: SecretString,
        secret_key: SecretString,
        source_addr: impl Into<String>,
    ) -> Result<Self, BeemError> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            secret_key,
            source_addr: source_addr.into(),
        })
    }

    /// Sender id stamped on every envelope.
    pub fn source_addr(&self) -> &str {
        &self.source_addr
    }

    /// Value of the `Authorization` header: Basic auth over `api_key:secret_key`.
    pub fn authorization(&self) -> String {
        let token = STANDARD.encode(format!(
            "{}:{}",
            self.api_key.expose_secret(),
            self.secret_key.expose_secret()
        ));
        format!("Basic {}", token)
    }

    /// Send one message to one recipient.
    ///
    /// Returns Beem's response body untouched.
    #[instrument(skip(self, message), fields(recipient_id = recipient.recipient_id))]
    pub async fn send_sms(&self, message: &str, recipient: Recipient) -> Result<Value, BeemError> {
        let request = SendSmsRequest::single(&self.source_addr, message, recipient);

        debug!(dest_addr = %request.recipients[0].dest_addr, "Sending SMS via Beem");

        let response = self
            .client
            .post(format!("{}/v1/send", self.base_url))
            .header("Authorization", self.authorization())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn handle_response(&self, response: Response) -> Result<Value, BeemError> {
        let status = response.status();
        read_body(status, response.text().await)
    }
}

/// Map a Beem status and its body read onto the call result.
///
/// A non-2xx status is always reported as `Api`, even when the body
/// could not be read.
fn read_body(status: StatusCode, text: reqwest::Result<String>) -> Result<Value, BeemError> {
    if !status.is_success() {
        let body = match text {
            Ok(text) => {
                warn!(status = %status, body = %text, "Beem send failed");
                parse_body(&text)
            }
            Err(e) => {
                warn!(status = %status, error = %e, "Beem send failed, body unreadable");
                None
            }
        };
        return Err(BeemError::Api {
            status: status.as_u16(),
            body,
        });
    }

    Ok(parse_body(&text?).unwrap_or_else(|| Value::String(String::new())))
}

/// JSON bodies are decoded, anything else is kept as a JSON string.
fn parse_body(text: &str) -> Option<Value> {
    if text.is_empty() {
        return None;
    }
    Some(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())))
}
