//! Normalized provider responses.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a buyer should be sent to an offsite provider page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RedirectMethod {
    Get,
    Post,
}

impl std::fmt::Display for RedirectMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RedirectMethod::Get => write!(f, "GET"),
            RedirectMethod::Post => write!(f, "POST"),
        }
    }
}

/// An offsite redirect requested by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Redirect {
    pub url: String,
    pub method: RedirectMethod,
    /// Form fields to submit with a POST redirect.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
}

impl Redirect {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: RedirectMethod::Get,
            data: BTreeMap::new(),
        }
    }

    pub fn post(url: impl Into<String>, data: BTreeMap<String, String>) -> Self {
        Self {
            url: url.into(),
            method: RedirectMethod::Post,
            data,
        }
    }
}

/// What a provider client extracted from the provider's reply.
///
/// This is the transport-level result. `success` reflects the
/// provider's verdict on the payment; a decline is a successful
/// dispatch that carries `success == false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawResponse {
    pub success: bool,
    pub message: Option<String>,
    /// Provider's reference for this payment, used by later captures
    /// and refunds.
    pub reference: Option<String>,
    pub redirect: Option<Redirect>,
    /// The provider's reply as parsed, for diagnostics.
    pub payload: serde_json::Value,
}

/// The single response contract callers program against.
///
/// Immutable once constructed; the dispatcher builds exactly one per
/// operation from the transport's [`RawResponse`].
#[derive(Debug, Clone)]
pub struct GatewayResponse {
    success: bool,
    message: Option<String>,
    reference: Option<String>,
    redirect: Option<Redirect>,
    raw: serde_json::Value,
}

impl GatewayResponse {
    /// Whether the provider accepted the payment. A decline is not an
    /// error; callers branch on this flag.
    pub fn is_successful(&self) -> bool {
        self.success
    }

    /// Whether completing the payment requires an offsite redirect.
    pub fn is_redirect(&self) -> bool {
        self.redirect.is_some()
    }

    /// Provider's human-readable status message.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Provider's reference for this payment.
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn redirect(&self) -> Option<&Redirect> {
        self.redirect.as_ref()
    }

    /// The provider's reply as parsed, for diagnostics and audit trails.
    pub fn raw(&self) -> &serde_json::Value {
        &self.raw
    }
}

impl From<RawResponse> for GatewayResponse {
    fn from(raw: RawResponse) -> Self {
        Self {
            success: raw.success,
            message: raw.message,
            reference: raw.reference,
            redirect: raw.redirect,
            raw: raw.payload,
        }
    }
}

/// A stored payment source created from a card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSource {
    /// Provider token for future charges.
    pub reference: String,
    /// Masked human-readable label, safe to display.
    pub description: String,
}
