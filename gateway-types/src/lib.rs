//! # Gateway Types
//!
//! Domain types and port traits for the payment gateway adapter layer.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Order, Transaction, Card, ItemBag)
//! - `ports/` - Trait definitions that provider adapters and hosts implement
//! - `request`/`response` - The generic payload and normalized response contracts
//! - `error/` - Transport, store, and gateway error types

pub mod domain;
pub mod error;
pub mod ports;
pub mod request;
pub mod response;

// Re-export commonly used types
pub use domain::{
    Address, Adjustment, AdjustmentKind, Capabilities, Card, Currency, ItemBag, ItemBagEntry,
    LineItem, Operation, Order, OrderId, PaymentForm, Transaction, TransactionId, TransactionKind,
};
pub use error::{GatewayError, StoreError, TransportError, UrlError};
pub use ports::{OrderStore, Provider, ProviderClient, ProviderRequest, UrlResolver};
pub use request::{PaymentRequest, RequestData};
pub use response::{GatewayResponse, PaymentSource, RawResponse, Redirect, RedirectMethod};
