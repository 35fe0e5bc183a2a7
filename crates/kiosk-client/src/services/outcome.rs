//! Dual-shape success normalization for provisioning endpoints.
//!
//! The backend reports a successful purchase either as
//! `{ "success": true, "data": {...} }` or as a bare
//! `{ "statusCode": 200, "data": {...} }`, and failures as
//! `{ "success": false, "message": "..." }`. [`normalize`] decides in
//! priority order: an explicit flag wins; otherwise a numeric 200 status
//! with a payload present counts as success; anything else is a failure
//! whose message passes through unchanged.

use serde_json::Value;

use kiosk_core::ApiError;
use kiosk_core::domain::OrderReceipt;

/// Normalized provisioning outcome.
#[derive(Debug)]
pub(crate) struct Outcome {
    pub success: bool,
    pub message: String,
    pub receipt: Option<OrderReceipt>,
}

pub(crate) fn normalize(raw: &Value) -> Outcome {
    let message = raw
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let receipt: Option<OrderReceipt> = raw
        .get("data")
        .and_then(|data| serde_json::from_value(data.clone()).ok());

    let explicit = raw.get("success").and_then(Value::as_bool);
    let numeric = raw
        .get("statusCode")
        .or_else(|| raw.get("status"))
        .and_then(Value::as_u64);

    let success = match explicit {
        Some(flag) => flag,
        None => numeric == Some(200) && receipt.is_some(),
    };

    Outcome {
        success,
        message,
        receipt,
    }
}

impl Outcome {
    /// Apply the uniform error discipline: a failed outcome becomes a
    /// classified error carrying the upstream message.
    pub(crate) fn into_result(self) -> Result<OrderReceipt, ApiError> {
        if !self.success {
            let message = if self.message.is_empty() {
                "The order was not accepted".to_string()
            } else {
                self.message
            };
            return Err(ApiError::api(message, 200, None, None));
        }
        self.receipt.ok_or_else(|| {
            ApiError::api("The server confirmed the order without a receipt", 500, None, None)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiosk_core::domain::OrderStatus;
    use serde_json::json;

    #[test]
    fn explicit_flag_with_receipt_is_success() {
        let outcome = normalize(&json!({
            "success": true,
            "message": "Order created",
            "data": { "code": "X", "totalPrice": 5000, "status": "setup" }
        }));
        assert!(outcome.success);
        let receipt = outcome.into_result().unwrap();
        assert_eq!(receipt.code, "X");
        assert_eq!(receipt.total_price, 5000);
        assert_eq!(receipt.status, OrderStatus::Setup);
    }

    #[test]
    fn bare_status_code_shape_normalizes_identically() {
        let outcome = normalize(&json!({
            "statusCode": 200,
            "data": { "code": "X", "totalPrice": 5000, "status": "setup" }
        }));
        assert!(outcome.success);
        let receipt = outcome.into_result().unwrap();
        assert_eq!(receipt.code, "X");
        assert_eq!(receipt.total_price, 5000);
        assert_eq!(receipt.status, OrderStatus::Setup);
    }

    #[test]
    fn status_key_variant_also_counts() {
        let outcome = normalize(&json!({
            "status": 200,
            "data": { "code": "Y", "totalPrice": 100, "status": "pending" }
        }));
        assert!(outcome.success);
    }

    #[test]
    fn failure_message_passes_through_unchanged() {
        let outcome = normalize(&json!({
            "success": false,
            "message": "Số dư không đủ"
        }));
        assert!(!outcome.success);
        let error = outcome.into_result().unwrap_err();
        assert_eq!(error.message(), "Số dư không đủ");
    }

    #[test]
    fn explicit_flag_wins_over_the_status_heuristic() {
        let outcome = normalize(&json!({
            "success": false,
            "statusCode": 200,
            "message": "rejected",
            "data": { "code": "Z", "totalPrice": 1, "status": "failed" }
        }));
        assert!(!outcome.success);
    }

    #[test]
    fn status_200_without_payload_is_a_failure() {
        let outcome = normalize(&json!({ "statusCode": 200 }));
        assert!(!outcome.success);
        assert!(outcome.into_result().is_err());
    }

    #[test]
    fn empty_failure_message_gets_a_default() {
        let error = normalize(&json!({ "success": false }))
            .into_result()
            .unwrap_err();
        assert!(!error.message().is_empty());
    }
}
