//! Beem client errors.

use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BeemError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Beem answered with a non-2xx status.
    #[error("Request failed with status code {status}")]
    Api { status: u16, body: Option<Value> },
}

impl BeemError {
    /// HTTP status reported by Beem, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            BeemError::Http(e) => e.status().map(|s| s.as_u16()),
            BeemError::Api { status, .. } => Some(*status),
        }
    }

    /// Raw error body from Beem, or the error text when there is none.
    pub fn details(&self) -> Value {
        match self {
            BeemError::Api {
                body: Some(body), ..
            } => body.clone(),
            other => Value::String(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_error_details_prefers_body() {
        let err = BeemError::Api {
            status: 401,
            body: Some(json!({"code": 120, "message": "Invalid api_key"})),
        };
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.details()["message"], "Invalid api_key");
    }

    #[test]
    fn test_api_error_without_body_uses_message() {
        let err = BeemError::Api {
            status: 502,
            body: None,
        };
        assert_eq!(
            err.details(),
            Value::String("Request failed with status code 502".into())
        );
    }
}
