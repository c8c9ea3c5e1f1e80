//! Payment form input and the card assembled from it.

use serde::{Deserialize, Serialize};

use super::order::{Address, Order};

/// Buyer-submitted payment details.
///
/// Either a raw card (number, expiry, cvv) or a tokenized reference to
/// a stored card. The client IP rides along because it is a property
/// of the submission, not of the order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub number: Option<String>,
    pub expiry_month: Option<u8>,
    pub expiry_year: Option<u16>,
    pub cvv: Option<String>,
    /// Provider token for a stored payment source.
    pub token: Option<String>,
    pub client_ip: Option<String>,
}

impl PaymentForm {
    /// Renders a short human-readable label for this payment method,
    /// with the card number masked down to its last four digits.
    pub fn summary(&self) -> String {
        if let Some(number) = &self.number {
            let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
            if digits.len() >= 4 {
                return format!("Card ending in {}", &digits[digits.len() - 4..]);
            }
        }
        if self.token.is_some() {
            return "Stored payment source".to_string();
        }
        "Payment card".to_string()
    }
}

/// A payment card ready to be embedded in a provider request.
///
/// Serialized with camelCase keys to match the generic payload contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_month: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_year: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvv: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Address>,
}

impl Card {
    /// Assembles a card from the submitted form and the order it pays.
    ///
    /// Cardholder names fall back to the billing address when the form
    /// left them blank, and billing names are backfilled from the
    /// cardholder when the address has none. The fallback runs in that
    /// order so an explicit cardholder name always wins.
    pub fn build(form: &PaymentForm, order: Option<&Order>) -> Self {
        let billing = order.and_then(|o| o.billing_address.clone());
        let shipping = order.and_then(|o| o.shipping_address.clone());

        let mut card = Card {
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            number: form.number.clone(),
            expiry_month: form.expiry_month,
            expiry_year: form.expiry_year,
            cvv: form.cvv.clone(),
            token: form.token.clone(),
            email: order.and_then(|o| o.email.clone()),
            billing_address: billing,
            shipping_address: shipping,
        };

        if let Some(billing) = &card.billing_address {
            if card.first_name.is_none() {
                card.first_name = billing.first_name.clone();
            }
            if card.last_name.is_none() {
                card.last_name = billing.last_name.clone();
            }
        }

        if let Some(billing) = &mut card.billing_address {
            if billing.first_name.is_none() {
                billing.first_name = card.first_name.clone();
            }
            if billing.last_name.is_none() {
                billing.last_name = card.last_name.clone();
            }
        }

        card
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Currency;
    use rust_decimal_macros::dec;

    fn order_with_billing(first: Option<&str>, last: Option<&str>) -> Order {
        Order::new("2001", Currency::USD, dec!(10)).with_billing_address(Address {
            first_name: first.map(str::to_owned),
            last_name: last.map(str::to_owned),
            address1: Some("1 High St".into()),
            ..Address::default()
        })
    }

    #[test]
    fn test_card_names_fall_back_to_billing_address() {
        let form = PaymentForm {
            number: Some("4242424242424242".into()),
            ..PaymentForm::default()
        };
        let order = order_with_billing(Some("Ada"), Some("Lovelace"));

        let card = Card::build(&form, Some(&order));

        assert_eq!(card.first_name.as_deref(), Some("Ada"));
        assert_eq!(card.last_name.as_deref(), Some("Lovelace"));
    }

    #[test]
    fn test_billing_names_backfilled_from_cardholder() {
        let form = PaymentForm {
            first_name: Some("Grace".into()),
            last_name: Some("Hopper".into()),
            ..PaymentForm::default()
        };
        let order = order_with_billing(None, None);

        let card = Card::build(&form, Some(&order));

        let billing = card.billing_address.unwrap();
        assert_eq!(billing.first_name.as_deref(), Some("Grace"));
        assert_eq!(billing.last_name.as_deref(), Some("Hopper"));
    }

    #[test]
    fn test_explicit_cardholder_name_wins() {
        let form = PaymentForm {
            first_name: Some("Grace".into()),
            ..PaymentForm::default()
        };
        let order = order_with_billing(Some("Ada"), Some("Lovelace"));

        let card = Card::build(&form, Some(&order));

        assert_eq!(card.first_name.as_deref(), Some("Grace"));
        assert_eq!(card.last_name.as_deref(), Some("Lovelace"));
    }

    #[test]
    fn test_form_summary_masks_number() {
        let form = PaymentForm {
            number: Some("4242 4242 4242 4242".into()),
            ..PaymentForm::default()
        };
        assert_eq!(form.summary(), "Card ending in 4242");

        let tokenized = PaymentForm {
            token: Some("tok_abc".into()),
            ..PaymentForm::default()
        };
        assert_eq!(tokenized.summary(), "Stored payment source");
    }
}
