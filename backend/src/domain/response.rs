//! The uniform result envelope returned by every account and expense
//! operation.
//!
//! Success and failure travel in the same wire shape so clients never have to
//! branch on the HTTP layer alone: `success` tells them which it was,
//! `message` is human readable, and `data` carries the payload when present.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Wire envelope wrapping an operation outcome.
///
/// ## Invariants
/// - Failure envelopes always carry a non-empty `message` and no `data`.
/// - Success envelopes always carry `success == true`; the message may be
///   empty for plain reads.
///
/// # Examples
/// ```
/// use backend::domain::ServiceResponse;
///
/// let ok = ServiceResponse::ok(42).with_message("Welcome to Tally!");
/// assert!(ok.success());
/// assert_eq!(ok.data(), Some(&42));
///
/// let failed = ServiceResponse::<i32>::failure("Username is taken!");
/// assert!(!failed.success());
/// assert!(failed.data().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResponse<T> {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T> ServiceResponse<T> {
    /// Wrap a successful payload with an empty message.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: String::new(),
            data: Some(data),
        }
    }

    /// Build a failure envelope carrying only a message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }

    /// Attach a human-readable message to the envelope.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Whether the operation succeeded.
    pub fn success(&self) -> bool {
        self.success
    }

    /// Human-readable outcome message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Payload, present on success.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_serialises_camel_case() {
        let envelope = ServiceResponse::ok(7).with_message("Welcome to Tally!");
        let value = serde_json::to_value(&envelope).expect("envelope serialises");
        assert_eq!(
            value,
            json!({ "success": true, "message": "Welcome to Tally!", "data": 7 })
        );
    }

    #[test]
    fn failure_envelope_omits_data() {
        let envelope = ServiceResponse::<String>::failure("Wrong password!");
        let value = serde_json::to_value(&envelope).expect("envelope serialises");
        assert_eq!(
            value,
            json!({ "success": false, "message": "Wrong password!" })
        );
    }

    #[test]
    fn round_trips_through_json() {
        let envelope = ServiceResponse::ok("token".to_owned());
        let raw = serde_json::to_string(&envelope).expect("serialise");
        let back: ServiceResponse<String> = serde_json::from_str(&raw).expect("deserialise");
        assert_eq!(back, envelope);
    }
}
