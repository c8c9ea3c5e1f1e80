//! Error types for the gateway adapter layer.

use crate::domain::{Operation, OrderId, TransactionId};

/// Transport-level failures raised by provider clients.
///
/// These describe problems reaching or understanding the provider, not
/// payment outcomes. A declined payment is a normal response, never a
/// `TransportError`.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

/// Failures raised by the order store port.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Order store backend error: {0}")]
    Backend(String),
}

/// Failures raised by the URL resolver port.
#[derive(Debug, thiserror::Error)]
pub enum UrlError {
    #[error("Invalid URL: {0}")]
    Invalid(String),
}

/// Errors surfaced by gateway operations.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("The payment provider does not support {0}")]
    UnsupportedOperation(Operation),

    #[error("The payment request was cancelled before transmission")]
    RequestCancelled,

    #[error("Payment failed: {0}")]
    PaymentFailure(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    #[error("Transaction {0} has no provider reference to act on")]
    MissingReference(TransactionId),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Url(#[from] UrlError),

    #[error("Gateway configuration error: {0}")]
    Configuration(String),
}
