//! # SDK Error Types
//!
//! Typed error handling for the AgnoPay SDK.
//! Every fallible SDK operation returns `Result<T, AgnoPayError>`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Message used when the API rejects an order without an error envelope
pub const GENERIC_ORDER_FAILURE: &str = "Failed to create order";

/// Message used when the order request never produced a response
pub const NETWORK_FAILURE: &str = "Network error while creating order";

/// Error code reported when no publishable key is available
pub const MISSING_KEY_CODE: &str = "MISSING_KEY";

/// Core error type for all SDK operations
#[derive(Debug, Clone, Error)]
pub enum AgnoPayError {
    /// No publishable key was configured
    #[error("AgnoPay publishable key is required. Set AGNOPAY_PUBLISHABLE_KEY or pass publishable_key option.")]
    MissingKey,

    /// The API answered with a non-2xx status
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        code: Option<String>,
        details: Option<Value>,
    },

    /// The request could not complete (no response)
    #[error("Network error while creating order: {0}")]
    Network(String),

    /// The API answered 2xx but the body was not an order
    #[error("Failed to decode order response: {0}")]
    Decode(String),

    /// Checkout container selector resolved to nothing
    #[error("Container element not found: {selector}")]
    ContainerNotFound { selector: String },

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration errors (unparseable URLs and the like)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AgnoPayError {
    /// Build an API error from a non-2xx response body.
    ///
    /// The body is expected to look like `{ "error": { "message", "code" } }`;
    /// anything else falls back to a generic message.
    pub fn from_api_response(status: u16, body: &str) -> Self {
        let details = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v.get("error").cloned())
            .filter(|e| !e.is_null());

        let message = details
            .as_ref()
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(GENERIC_ORDER_FAILURE)
            .to_string();

        let code = details
            .as_ref()
            .and_then(|e| e.get("code"))
            .and_then(Value::as_str)
            .map(String::from);

        AgnoPayError::Api {
            status,
            message,
            code,
            details,
        }
    }

    /// Human-readable message, as surfaced to integrators
    pub fn message(&self) -> String {
        match self {
            AgnoPayError::Api { message, .. } => message.clone(),
            AgnoPayError::Network(_) => NETWORK_FAILURE.to_string(),
            other => other.to_string(),
        }
    }

    /// Machine-readable error code, when one exists
    pub fn code(&self) -> Option<&str> {
        match self {
            AgnoPayError::MissingKey => Some(MISSING_KEY_CODE),
            AgnoPayError::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Extra diagnostic payload
    pub fn details(&self) -> Option<Value> {
        match self {
            AgnoPayError::Api { details, .. } => details.clone(),
            AgnoPayError::Network(cause) | AgnoPayError::Decode(cause) => {
                Some(Value::String(cause.clone()))
            }
            _ => None,
        }
    }

    /// Returns the HTTP status code appropriate for this error when it is
    /// relayed by a server-side route: caller-attributable failures are 400,
    /// everything else is 500.
    pub fn status_code(&self) -> u16 {
        match self {
            AgnoPayError::MissingKey => 400,
            AgnoPayError::Api { .. } => 400,
            AgnoPayError::Network(_) => 400,
            AgnoPayError::ContainerNotFound { .. } => 400,
            AgnoPayError::InvalidRequest(_) => 400,
            AgnoPayError::Decode(_) => 500,
            AgnoPayError::Configuration(_) => 500,
            AgnoPayError::Internal(_) => 500,
        }
    }

    /// Serializable `{ message, code, details }` view of this error
    pub fn to_envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            message: self.message(),
            code: self.code().map(String::from),
            details: self.details(),
        }
    }
}

/// Wire shape of an error, both as returned by the API and as relayed to
/// browser code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            details: None,
        }
    }
}

impl From<AgnoPayError> for ErrorEnvelope {
    fn from(err: AgnoPayError) -> Self {
        err.to_envelope()
    }
}

impl From<url::ParseError> for AgnoPayError {
    fn from(err: url::ParseError) -> Self {
        AgnoPayError::Configuration(format!("invalid URL: {}", err))
    }
}

/// Result type alias for SDK operations
pub type AgnoPayResult<T> = Result<T, AgnoPayError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_error_uses_envelope() {
        let body = r#"{"error":{"message":"bad item","code":"E1"}}"#;
        let err = AgnoPayError::from_api_response(400, body);

        assert_eq!(err.message(), "bad item");
        assert_eq!(err.code(), Some("E1"));
        assert_eq!(
            err.details(),
            Some(json!({"message": "bad item", "code": "E1"}))
        );
    }

    #[test]
    fn test_api_error_generic_fallback() {
        let err = AgnoPayError::from_api_response(502, "<html>gateway</html>");
        assert_eq!(err.message(), GENERIC_ORDER_FAILURE);
        assert_eq!(err.code(), None);
        assert!(err.details().is_none());

        let err = AgnoPayError::from_api_response(400, r#"{"error":{"code":"E2"}}"#);
        assert_eq!(err.message(), GENERIC_ORDER_FAILURE);
        assert_eq!(err.code(), Some("E2"));
    }

    #[test]
    fn test_network_error_message() {
        let err = AgnoPayError::Network("connection refused".into());
        assert_eq!(err.message(), NETWORK_FAILURE);
        assert_eq!(err.details(), Some(json!("connection refused")));
    }

    #[test]
    fn test_missing_key_code() {
        let envelope = AgnoPayError::MissingKey.to_envelope();
        assert_eq!(envelope.code.as_deref(), Some("MISSING_KEY"));
        assert!(envelope.message.contains("publishable key"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AgnoPayError::MissingKey.status_code(), 400);
        assert_eq!(AgnoPayError::Network("x".into()).status_code(), 400);
        assert_eq!(AgnoPayError::Decode("x".into()).status_code(), 500);
        assert_eq!(AgnoPayError::Internal("x".into()).status_code(), 500);
    }

    #[test]
    fn test_envelope_skips_empty_fields() {
        let value = serde_json::to_value(ErrorEnvelope::new("nope")).unwrap();
        assert_eq!(value, json!({"message": "nope"}));
    }
}
