//! Provider strategy port.

use std::sync::Arc;

use crate::domain::{Operation, PaymentForm};
use crate::error::GatewayError;
use crate::request::PaymentRequest;
use crate::response::GatewayResponse;

use super::client::ProviderRequest;
use super::ProviderClient;

/// One provider integration's policy, injected into the adapter.
///
/// The adapter owns the pipeline; a `Provider` supplies the client and
/// gets two narrow windows to specialize a dispatch: the generic
/// payload before the call object exists, and the call object before
/// the pre-send hook fires. Most integrations override only
/// [`create_client`](Provider::create_client) and
/// [`populate_request`](Provider::populate_request).
pub trait Provider: Send + Sync + 'static {
    /// Short stable name, used in logs.
    fn name(&self) -> &'static str;

    /// Builds the connected client for this provider. Called once per
    /// adapter; failures surface as configuration errors.
    fn create_client(&self) -> Result<Arc<dyn ProviderClient>, GatewayError>;

    /// Adds provider-specific fields to the generic payload. The form
    /// is present for operations initiated with buyer input.
    fn populate_request(&self, _request: &mut PaymentRequest, _form: Option<&PaymentForm>) {}

    /// Last look at the prepared call object before hooks and
    /// transmission.
    fn prepare_request(
        &self,
        _operation: Operation,
        _request: &mut dyn ProviderRequest,
    ) -> Result<(), GatewayError> {
        Ok(())
    }

    /// Pulls the stored-card token out of a create-payment-source
    /// response. The default treats an unsuccessful response as a
    /// payment failure carrying the provider's message.
    fn extract_card_reference(&self, response: &GatewayResponse) -> Result<String, GatewayError> {
        if !response.is_successful() {
            return Err(GatewayError::PaymentFailure(
                response
                    .message()
                    .unwrap_or("Payment source could not be created")
                    .to_string(),
            ));
        }
        response
            .reference()
            .map(str::to_owned)
            .ok_or_else(|| {
                GatewayError::PaymentFailure(
                    "Provider response did not include a payment source reference".to_string(),
                )
            })
    }
}
