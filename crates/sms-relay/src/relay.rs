//! Batch planning and sequential dispatch to Beem.

use crate::error::RelayError;
use beem_client::{BeemClient, Recipient};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, instrument};

/// Strip whitespace and hyphens from a phone number. Nothing else is touched.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

/// One submitted item, read leniently.
///
/// Any JSON value deserializes; a field that is missing, empty, or not a
/// string or number is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub struct SmsItem {
    pub phone: Option<String>,
    pub message: Option<String>,
}

impl SmsItem {
    pub fn new(phone: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            phone: Some(phone.into()),
            message: Some(message.into()),
        }
    }
}

impl From<Value> for SmsItem {
    fn from(value: Value) -> Self {
        let field = |name: &str| match value.get(name) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Number(n)) if n.as_f64() != Some(0.0) => Some(n.to_string()),
            _ => None,
        };

        Self {
            phone: field("phone"),
            message: field("message"),
        }
    }
}

/// A single outbound send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    /// 1-based position in the submitted batch, skipped items included.
    pub recipient_id: usize,
    pub dest_addr: String,
    pub message: String,
}

/// Validated batch, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPlan {
    pub dispatches: Vec<Dispatch>,
    /// Items dropped for lacking a phone or message.
    pub skipped: usize,
}

impl BatchPlan {
    /// Validate a submitted batch.
    ///
    /// Only an empty batch is an error. Incomplete items are skipped and
    /// tallied, never reported.
    pub fn from_items(items: &[SmsItem]) -> Result<Self, RelayError> {
        if items.is_empty() {
            return Err(RelayError::Validation("No messages provided".into()));
        }

        let mut dispatches = Vec::with_capacity(items.len());
        let mut skipped = 0;

        for (index, item) in items.iter().enumerate() {
            match (&item.phone, &item.message) {
                (Some(phone), Some(message)) => dispatches.push(Dispatch {
                    recipient_id: index + 1,
                    dest_addr: normalize_phone(phone),
                    message: message.clone(),
                }),
                _ => skipped += 1,
            }
        }

        Ok(Self {
            dispatches,
            skipped,
        })
    }
}

/// Outcome of one successful send.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmsResult {
    pub phone: String,
    #[serde(rename = "beemResponse")]
    pub beem_response: Value,
}

/// Outcome of a fully delivered batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub results: Vec<SmsResult>,
    pub skipped: usize,
}

/// Send every dispatch in order, one Beem call at a time.
///
/// The first failure abandons the batch: later items are not attempted and
/// results gathered so far are dropped.
#[instrument(skip(client, plan), fields(sends = plan.dispatches.len(), skipped = plan.skipped))]
pub async fn relay_batch(client: &BeemClient, plan: BatchPlan) -> Result<BatchOutcome, RelayError> {
    let mut results = Vec::with_capacity(plan.dispatches.len());

    for dispatch in plan.dispatches {
        let recipient = Recipient {
            recipient_id: dispatch.recipient_id,
            dest_addr: dispatch.dest_addr,
        };
        let phone = recipient.dest_addr.clone();

        let beem_response = match client.send_sms(&dispatch.message, recipient).await {
            Ok(body) => body,
            Err(e) => {
                let details = e.details();
                error!(
                    status = e.status().unwrap_or(500),
                    details = %details,
                    recipient_id = dispatch.recipient_id,
                    sent = results.len(),
                    "Beem send-sms failed, aborting batch"
                );
                return Err(e.into());
            }
        };

        debug!(phone = %phone, "SMS accepted by Beem");
        results.push(SmsResult {
            phone,
            beem_response,
        });
    }

    info!(count = results.len(), skipped = plan.skipped, "Batch relayed");

    Ok(BatchOutcome {
        results,
        skipped: plan.skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("+255 712-345 678"), "+255712345678");
        assert_eq!(normalize_phone("\t0712\n345-678 "), "0712345678");
    }

    #[test]
    fn test_normalize_phone_is_idempotent() {
        let once = normalize_phone("+255 712-345 678");
        assert_eq!(normalize_phone(&once), once);
    }

    #[test]
    fn test_normalize_phone_keeps_other_characters() {
        assert_eq!(normalize_phone("(0712) 345.678"), "(0712)345.678");
    }

    #[test]
    fn test_item_from_json() {
        let item: SmsItem =
            serde_json::from_value(json!({"phone": "0712", "message": "hi"})).unwrap();
        assert_eq!(item, SmsItem::new("0712", "hi"));

        let item: SmsItem =
            serde_json::from_value(json!({"phone": 255712345678u64, "message": "hi"})).unwrap();
        assert_eq!(item.phone.as_deref(), Some("255712345678"));
    }

    #[test]
    fn test_item_lenient_fields() {
        for value in [
            json!({}),
            json!(null),
            json!("text"),
            json!({"phone": "", "message": "hi"}),
            json!({"phone": null, "message": "hi"}),
            json!({"phone": true, "message": "hi"}),
            json!({"phone": 0, "message": "hi"}),
        ] {
            let item: SmsItem = serde_json::from_value(value).unwrap();
            assert!(item.phone.is_none());
        }
    }

    #[test]
    fn test_empty_batch_rejected() {
        let err = BatchPlan::from_items(&[]).unwrap_err();
        assert!(matches!(err, RelayError::Validation(ref m) if m == "No messages provided"));
    }

    #[test]
    fn test_recipient_ids_keep_submitted_positions() {
        let items = vec![
            SmsItem::new("A", "x"),
            SmsItem::default(),
            SmsItem::new("B", "y"),
        ];

        let plan = BatchPlan::from_items(&items).unwrap();

        assert_eq!(plan.skipped, 1);
        assert_eq!(plan.dispatches.len(), 2);
        assert_eq!(plan.dispatches[0].recipient_id, 1);
        assert_eq!(plan.dispatches[0].dest_addr, "A");
        assert_eq!(plan.dispatches[1].recipient_id, 3);
        assert_eq!(plan.dispatches[1].message, "y");
    }

    #[test]
    fn test_all_items_skipped_is_not_an_error() {
        let items = vec![
            SmsItem {
                phone: Some("0712".into()),
                message: None,
            },
            SmsItem {
                phone: None,
                message: Some("hi".into()),
            },
        ];

        let plan = BatchPlan::from_items(&items).unwrap();
        assert!(plan.dispatches.is_empty());
        assert_eq!(plan.skipped, 2);
    }

    #[test]
    fn test_plan_normalizes_phones() {
        let plan = BatchPlan::from_items(&[SmsItem::new("+255 712-345 678", "hi")]).unwrap();
        assert_eq!(plan.dispatches[0].dest_addr, "+255712345678");
    }

    #[test]
    fn test_result_serializes_camel_case_response() {
        let result = SmsResult {
            phone: "0712".into(),
            beem_response: json!({"foo": "bar"}),
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"phone": "0712", "beemResponse": {"foo": "bar"}})
        );
    }
}
