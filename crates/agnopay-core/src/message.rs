//! # Checkout Message Protocol
//!
//! The hosted checkout page reports its outcome to the embedding page with
//! `postMessage`. Two payloads are recognised, discriminated by `type`:
//!
//! | `type` | effect |
//! |--------|--------|
//! | `agnopay:payment:success` | success callback with the order id |
//! | `agnopay:payment:error` | error callback with `error` (or "Payment failed") |
//!
//! Anything else is ignored. Messages are only considered when their origin
//! passes the [`OriginMatcher`].

use crate::error::{AgnoPayError, AgnoPayResult};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::cell::Cell;
use std::fmt;
use tracing::{debug, warn};
use url::Url;

/// `type` of a successful payment message
pub const PAYMENT_SUCCESS_TYPE: &str = "agnopay:payment:success";

/// `type` of a failed payment message
pub const PAYMENT_ERROR_TYPE: &str = "agnopay:payment:error";

/// Error text used when a failure message carries no `error`
pub const DEFAULT_PAYMENT_ERROR: &str = "Payment failed";

/// A recognised message from the hosted checkout page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CheckoutMessage {
    #[serde(rename = "agnopay:payment:success")]
    PaymentSuccess,

    #[serde(rename = "agnopay:payment:error")]
    PaymentError {
        #[serde(
            default,
            deserialize_with = "lenient_error",
            skip_serializing_if = "Option::is_none"
        )]
        error: Option<String>,
    },
}

impl CheckoutMessage {
    /// Parse a message payload.
    ///
    /// `Ok(None)` for payloads that are not ours (no `type`, or an unknown
    /// one); `Err` only when a recognised `type` comes with a malformed body.
    pub fn parse(data: &Value) -> Result<Option<Self>, serde_json::Error> {
        match data.get("type").and_then(Value::as_str) {
            Some(PAYMENT_SUCCESS_TYPE) | Some(PAYMENT_ERROR_TYPE) => {
                serde_json::from_value(data.clone()).map(Some)
            }
            _ => Ok(None),
        }
    }
}

/// Accept any JSON for `error`: strings as-is, null/empty as absent, other
/// values by their JSON text.
fn lenient_error<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// How a message origin is compared with the wallet URL
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OriginPolicy {
    /// Origin must equal the wallet URL's serialized origin
    #[default]
    Exact,
    /// Origin must start with the wallet URL string. Also accepts hosts such
    /// as `https://wallet.example.com.attacker.net`; opt-in only.
    Prefix,
}

impl fmt::Display for OriginPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OriginPolicy::Exact => write!(f, "exact"),
            OriginPolicy::Prefix => write!(f, "prefix"),
        }
    }
}

impl std::str::FromStr for OriginPolicy {
    type Err = AgnoPayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact" => Ok(OriginPolicy::Exact),
            "prefix" => Ok(OriginPolicy::Prefix),
            other => Err(AgnoPayError::Configuration(format!(
                "unknown origin policy: {}",
                other
            ))),
        }
    }
}

/// Decides whether a message origin belongs to the hosted checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginMatcher {
    policy: OriginPolicy,
    expected: String,
}

impl OriginMatcher {
    pub fn new(wallet_url: &str, policy: OriginPolicy) -> AgnoPayResult<Self> {
        let expected = match policy {
            OriginPolicy::Exact => {
                let origin = Url::parse(wallet_url)?.origin();
                if !origin.is_tuple() {
                    return Err(AgnoPayError::Configuration(format!(
                        "wallet URL has no origin: {}",
                        wallet_url
                    )));
                }
                origin.ascii_serialization()
            }
            OriginPolicy::Prefix => wallet_url.trim_end_matches('/').to_string(),
        };

        Ok(Self { policy, expected })
    }

    pub fn policy(&self) -> OriginPolicy {
        self.policy
    }

    /// The origin (or origin prefix) messages are compared against
    pub fn expected(&self) -> &str {
        &self.expected
    }

    pub fn matches(&self, origin: &str) -> bool {
        match self.policy {
            OriginPolicy::Exact => origin == self.expected,
            OriginPolicy::Prefix => origin.starts_with(&self.expected),
        }
    }
}

/// Payment outcome reported by the hosted checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    Succeeded { order_id: String },
    Failed { message: String },
}

/// Lifecycle of a [`CheckoutListener`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    Listening,
    TornDown,
}

type SuccessCallback = Box<dyn Fn(&str)>;
type ErrorCallback = Box<dyn Fn(&str)>;

/// Turns incoming messages into outcomes for one order.
///
/// Starts in [`ListenerState::Listening`]; [`teardown`](Self::teardown) moves
/// it to [`ListenerState::TornDown`] for good, after which every message is
/// ignored.
pub struct CheckoutListener {
    order_id: String,
    origin: OriginMatcher,
    state: Cell<ListenerState>,
    on_success: Option<SuccessCallback>,
    on_error: Option<ErrorCallback>,
}

impl CheckoutListener {
    pub fn new(order_id: impl Into<String>, origin: OriginMatcher) -> Self {
        Self {
            order_id: order_id.into(),
            origin,
            state: Cell::new(ListenerState::Listening),
            on_success: None,
            on_error: None,
        }
    }

    /// Builder: callback receiving the order id on success
    pub fn on_success(mut self, callback: impl Fn(&str) + 'static) -> Self {
        self.on_success = Some(Box::new(callback));
        self
    }

    /// Builder: callback receiving the error text on failure
    pub fn on_error(mut self, callback: impl Fn(&str) + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn state(&self) -> ListenerState {
        self.state.get()
    }

    pub fn is_listening(&self) -> bool {
        self.state() == ListenerState::Listening
    }

    /// Whether a message from `origin` would be looked at at all
    pub fn accepts(&self, origin: &str) -> bool {
        self.is_listening() && self.origin.matches(origin)
    }

    /// Classify a message without invoking callbacks.
    ///
    /// Foreign origins, unknown types and malformed payloads yield `None`;
    /// malformed payloads are logged.
    pub fn classify(&self, origin: &str, data: &Value) -> Option<CheckoutOutcome> {
        if !self.is_listening() {
            return None;
        }

        if !self.origin.matches(origin) {
            debug!(origin = %origin, "Ignoring message from foreign origin");
            return None;
        }

        match CheckoutMessage::parse(data) {
            Ok(Some(CheckoutMessage::PaymentSuccess)) => Some(CheckoutOutcome::Succeeded {
                order_id: self.order_id.clone(),
            }),
            Ok(Some(CheckoutMessage::PaymentError { error })) => Some(CheckoutOutcome::Failed {
                message: error.unwrap_or_else(|| DEFAULT_PAYMENT_ERROR.to_string()),
            }),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Error handling message from iframe");
                None
            }
        }
    }

    /// Classify a message and invoke the matching callback
    pub fn handle_message(&self, origin: &str, data: &Value) -> Option<CheckoutOutcome> {
        let outcome = self.classify(origin, data)?;

        match &outcome {
            CheckoutOutcome::Succeeded { order_id } => {
                debug!(order_id = %order_id, "Checkout reported payment success");
                if let Some(callback) = &self.on_success {
                    callback(order_id);
                }
            }
            CheckoutOutcome::Failed { message } => {
                debug!(order_id = %self.order_id, error = %message, "Checkout reported payment failure");
                if let Some(callback) = &self.on_error {
                    callback(message);
                }
            }
        }

        Some(outcome)
    }

    /// Stop handling messages. Returns `false` if already torn down.
    pub fn teardown(&self) -> bool {
        self.state.replace(ListenerState::TornDown) == ListenerState::Listening
    }
}

impl fmt::Debug for CheckoutListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutListener")
            .field("order_id", &self.order_id)
            .field("origin", &self.origin)
            .field("state", &self.state.get())
            .finish()
    }
}
