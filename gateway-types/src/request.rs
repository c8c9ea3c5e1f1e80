//! The generic provider request payload.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::{Card, Currency, ItemBag, OrderId, TransactionId};

/// The generic payment payload handed to a provider client.
///
/// The named fields are the contract every provider can rely on;
/// anything provider-specific goes through [`PaymentRequest::set_extra`]
/// and is flattened next to them on serialization. Keys serialize in
/// camelCase to match the wire convention of the provider SDK lineage
/// this layer replaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Amount in major currency units
    pub amount: Decimal,
    pub currency: Currency,
    /// The internal transaction id
    pub transaction_id: TransactionId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<String>,
    /// Outgoing: the transaction hash. Overwritten with the prior
    /// provider reference for capture and refund.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,
    /// Webhook callback URL, present only when the provider supports
    /// webhooks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_url: Option<String>,
    /// Human-facing order reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<OrderId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_shipping: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_note: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_override: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<ItemBag>,
    /// Provider-specific keys, serialized alongside the named fields.
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

impl PaymentRequest {
    pub fn new(amount: Decimal, currency: Currency, transaction_id: TransactionId) -> Self {
        Self {
            amount,
            currency,
            transaction_id,
            description: None,
            client_ip: None,
            transaction_reference: None,
            return_url: None,
            cancel_url: None,
            notify_url: None,
            order: None,
            order_id: None,
            receipt_email: None,
            no_shipping: None,
            allow_note: None,
            address_override: None,
            button_source: None,
            card: None,
            items: None,
            extra: BTreeMap::new(),
        }
    }

    /// Adds a provider-specific key next to the named fields.
    pub fn set_extra(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.extra.insert(key.into(), value);
    }

    /// Reads back a provider-specific key.
    pub fn extra(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }
}

/// The wire-level body a provider request will transmit.
///
/// Hook listeners that replace the outgoing payload deal in this type,
/// so a replacement can target whichever encoding the provider speaks.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestData {
    Json(serde_json::Value),
    /// Ordered key/value pairs for form-encoded providers.
    Form(Vec<(String, String)>),
    Text(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_serializes_camel_case_and_skips_absent_fields() {
        let mut request = PaymentRequest::new(dec!(19.99), Currency::USD, TransactionId::new());
        request.transaction_reference = Some("abc123".into());
        request.return_url = Some("https://shop.test/complete".into());

        let value = serde_json::to_value(&request).unwrap();
        let obj = value.as_object().unwrap();

        assert!(obj.contains_key("transactionId"));
        assert!(obj.contains_key("transactionReference"));
        assert!(obj.contains_key("returnUrl"));
        assert!(!obj.contains_key("cancelUrl"));
        assert!(!obj.contains_key("card"));
    }

    #[test]
    fn test_extras_flatten_next_to_named_fields() {
        let mut request = PaymentRequest::new(dec!(5), Currency::EUR, TransactionId::new());
        request.set_extra("landingPage", serde_json::json!("Billing"));

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["landingPage"], "Billing");
        assert_eq!(
            request.extra("landingPage"),
            Some(&serde_json::json!("Billing"))
        );
    }
}
