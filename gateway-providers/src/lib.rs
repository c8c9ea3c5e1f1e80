//! # Gateway Providers
//!
//! Concrete provider integrations for the gateway adapter layer.
//!
//! Two wire dialects are covered:
//! - `rest` - JSON-over-HTTP direct-card providers (buyer's card details
//!   travel with the request)
//! - `offsite` - form-encoded redirect providers (buyer pays on the
//!   provider's pages, the host completes the flow on return)
//!
//! Each module ships a [`gateway_types::Provider`] strategy plus the
//! client and call-object types behind it. Hosts pick one, hand it to a
//! `GatewayAdapter`, and never touch the wire types directly.

pub mod offsite;
pub mod rest;

#[cfg(test)]
mod rest_tests;

pub use offsite::{OffsiteClient, OffsiteProvider, OffsiteRequest, OffsiteSettings};
pub use rest::{RestClient, RestProvider, RestRequest, RestSettings};
