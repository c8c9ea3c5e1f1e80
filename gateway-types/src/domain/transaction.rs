//! Payment transaction domain model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::money::Currency;
use super::order::OrderId;

/// Unique identifier for a Transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Creates a new random TransactionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a TransactionId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Returns the UUID value.
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TransactionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// The kind of payment operation a transaction records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// Reserve funds without moving them.
    Authorize,
    /// Settle a previously authorized amount.
    Capture,
    /// Authorize and settle in one step.
    Purchase,
    /// Return settled funds to the buyer.
    Refund,
    /// Finish an authorization after an offsite redirect.
    CompleteAuthorize,
    /// Finish a purchase after an offsite redirect.
    CompletePurchase,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Authorize => write!(f, "AUTHORIZE"),
            TransactionKind::Capture => write!(f, "CAPTURE"),
            TransactionKind::Purchase => write!(f, "PURCHASE"),
            TransactionKind::Refund => write!(f, "REFUND"),
            TransactionKind::CompleteAuthorize => write!(f, "COMPLETE_AUTHORIZE"),
            TransactionKind::CompletePurchase => write!(f, "COMPLETE_PURCHASE"),
        }
    }
}

/// A payment transaction to be dispatched to a provider.
///
/// Transactions are read-only to the gateway layer: the host's payment
/// engine creates them and records outcomes. The `hash` doubles as an
/// opaque external reference and an idempotency token, so it must be
/// stable for the life of the transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,
    /// The order being paid
    pub order_id: OrderId,
    /// Amount in major currency units
    pub amount: Decimal,
    /// Currency of the amount
    pub currency: Currency,
    /// Operation this transaction records
    pub kind: TransactionKind,
    /// Stable opaque reference derived from the id
    pub hash: String,
    /// Provider reference from a prior transaction (required for
    /// capture and refund)
    pub reference: Option<String>,
    /// When the transaction was created
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Creates a new transaction for an order.
    pub fn new(order_id: OrderId, kind: TransactionKind, amount: Decimal, currency: Currency) -> Self {
        let id = TransactionId::new();
        Self {
            hash: derive_hash(&id),
            id,
            order_id,
            amount,
            currency,
            kind,
            reference: None,
            created_at: Utc::now(),
        }
    }

    /// Creates a follow-up transaction on the same order, carrying the
    /// parent's provider reference forward. Used for captures of an
    /// authorization and refunds of a settled payment.
    pub fn child(&self, kind: TransactionKind) -> Self {
        let id = TransactionId::new();
        Self {
            hash: derive_hash(&id),
            id,
            order_id: self.order_id,
            amount: self.amount,
            currency: self.currency,
            kind,
            reference: self.reference.clone(),
            created_at: Utc::now(),
        }
    }

    /// Sets the provider reference on this transaction.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Reconstructs a transaction from stored fields.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: TransactionId,
        order_id: OrderId,
        amount: Decimal,
        currency: Currency,
        kind: TransactionKind,
        hash: String,
        reference: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            order_id,
            amount,
            currency,
            kind,
            hash,
            reference,
            created_at,
        }
    }
}

/// Derives the stable opaque reference for a transaction id.
///
/// First half of the SHA-256 of the id, hex-encoded: 32 characters,
/// short enough for every provider's reference field.
fn derive_hash(id: &TransactionId) -> String {
    let digest = Sha256::digest(id.as_uuid().as_bytes());
    hex::encode(&digest[..16])
}
