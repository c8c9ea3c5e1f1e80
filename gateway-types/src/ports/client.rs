//! Provider client and request ports.
//!
//! These are the transport-side contracts. A provider client turns the
//! generic payload into a concrete call object; the call object owns
//! the wire encoding and the network exchange.

use crate::domain::{Capabilities, Operation};
use crate::error::{GatewayError, TransportError};
use crate::request::{PaymentRequest, RequestData};
use crate::response::RawResponse;

/// One prepared provider call, ready to transmit.
///
/// The dispatcher may mutate it (a capture overwrites the transaction
/// reference with the prior provider reference) and may transmit a
/// substituted body via [`send_data`](ProviderRequest::send_data)
/// instead of the one it prepared.
#[async_trait::async_trait]
pub trait ProviderRequest: Send + Sync {
    /// The wire-level body this request would transmit as prepared.
    fn data(&self) -> RequestData;

    /// Transmits the prepared body.
    async fn send(&self) -> Result<RawResponse, TransportError>;

    /// Transmits `data` verbatim in place of the prepared body.
    /// Replacement is wholesale; nothing from the prepared body is
    /// merged in.
    async fn send_data(&self, data: RequestData) -> Result<RawResponse, TransportError>;

    /// Overwrites the provider reference this request acts on.
    fn set_transaction_reference(&mut self, reference: &str);
}

/// A connected provider integration.
pub trait ProviderClient: Send + Sync {
    /// What this provider supports. Called once per adapter and cached.
    fn capabilities(&self) -> Capabilities;

    /// Builds the call object for one operation from the generic
    /// payload. No network traffic happens here.
    fn request(
        &self,
        operation: Operation,
        payload: &PaymentRequest,
    ) -> Result<Box<dyn ProviderRequest>, GatewayError>;
}
