//! Gateway operations and the provider capability matrix.

use serde::{Deserialize, Serialize};

use super::transaction::TransactionKind;

/// Everything a provider integration can be asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Authorize,
    Capture,
    CompleteAuthorize,
    CompletePurchase,
    Purchase,
    Refund,
    CreatePaymentSource,
    Webhooks,
    PartialRefund,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Authorize => write!(f, "authorize"),
            Operation::Capture => write!(f, "capture"),
            Operation::CompleteAuthorize => write!(f, "completeAuthorize"),
            Operation::CompletePurchase => write!(f, "completePurchase"),
            Operation::Purchase => write!(f, "purchase"),
            Operation::Refund => write!(f, "refund"),
            Operation::CreatePaymentSource => write!(f, "createPaymentSource"),
            Operation::Webhooks => write!(f, "webhooks"),
            Operation::PartialRefund => write!(f, "partialRefund"),
        }
    }
}

impl From<TransactionKind> for Operation {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Authorize => Operation::Authorize,
            TransactionKind::Capture => Operation::Capture,
            TransactionKind::Purchase => Operation::Purchase,
            TransactionKind::Refund => Operation::Refund,
            TransactionKind::CompleteAuthorize => Operation::CompleteAuthorize,
            TransactionKind::CompletePurchase => Operation::CompletePurchase,
        }
    }
}

/// What a provider integration supports.
///
/// Reported once by the provider client and cached by the adapter.
/// Every dispatch checks its flag before any network traffic, so an
/// unsupported operation fails with zero provider calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub authorize: bool,
    pub capture: bool,
    pub complete_authorize: bool,
    pub complete_purchase: bool,
    pub purchase: bool,
    pub refund: bool,
    pub create_payment_source: bool,
    pub webhooks: bool,
    pub partial_refund: bool,
}

impl Capabilities {
    pub fn supports(&self, operation: Operation) -> bool {
        match operation {
            Operation::Authorize => self.authorize,
            Operation::Capture => self.capture,
            Operation::CompleteAuthorize => self.complete_authorize,
            Operation::CompletePurchase => self.complete_purchase,
            Operation::Purchase => self.purchase,
            Operation::Refund => self.refund,
            Operation::CreatePaymentSource => self.create_payment_source,
            Operation::Webhooks => self.webhooks,
            Operation::PartialRefund => self.partial_refund,
        }
    }
}
