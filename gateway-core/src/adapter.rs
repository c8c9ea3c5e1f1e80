//! The payment dispatch pipeline.
//!
//! Orchestrates one provider integration through the ports in
//! `gateway-types`. Contains NO transport logic - the provider client
//! owns the wire.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use gateway_types::{
    Capabilities, Card, Currency, GatewayError, GatewayResponse, Operation, OrderStore,
    PaymentForm, PaymentRequest, PaymentSource, Provider, ProviderClient, ProviderRequest,
    RawResponse, Transaction, TransactionId, TransactionKind, TransportError, UrlResolver,
};

use crate::hooks::HookBus;
use crate::item_bag::item_bag_for_order;
use crate::request::{base_request, normalize_client_ip, populate_order_fields};

/// Adapter between the host's payment engine and one provider.
///
/// Generic over `P: Provider` - the provider strategy is injected at
/// compile time. The order store and URL resolver are the host's; the
/// provider client is created lazily on first dispatch and reused,
/// as is the capability matrix read from it.
///
/// Every operation runs the same pipeline: capability check, payload
/// construction, provider-specific preparation, pre-send hook,
/// transmission, normalization. An unsupported or vetoed dispatch
/// fails before any network traffic.
pub struct GatewayAdapter<P: Provider> {
    provider: P,
    store: Arc<dyn OrderStore>,
    urls: Arc<dyn UrlResolver>,
    hooks: HookBus,
    client: OnceCell<Arc<dyn ProviderClient>>,
    capabilities: OnceCell<Capabilities>,
    send_cart_info: bool,
}

impl<P: Provider> GatewayAdapter<P> {
    /// Creates an adapter for one provider. Cart detail is sent by
    /// default; see [`with_cart_info`](Self::with_cart_info).
    pub fn new(provider: P, store: Arc<dyn OrderStore>, urls: Arc<dyn UrlResolver>) -> Self {
        Self {
            provider,
            store,
            urls,
            hooks: HookBus::new(),
            client: OnceCell::new(),
            capabilities: OnceCell::new(),
            send_cart_info: true,
        }
    }

    /// Controls whether payloads carry an item bag.
    pub fn with_cart_info(mut self, send_cart_info: bool) -> Self {
        self.send_cart_info = send_cart_info;
        self
    }

    /// Returns the provider strategy.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The hook lists for this adapter. Register listeners before
    /// dispatching.
    pub fn hooks_mut(&mut self) -> &mut HookBus {
        &mut self.hooks
    }

    /// What the provider supports, read once and cached.
    pub fn capabilities(&self) -> Result<Capabilities, GatewayError> {
        self.capabilities
            .get_or_try_init(|| Ok(self.client()?.capabilities()))
            .copied()
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Payment Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Reserves funds against the buyer's payment method.
    #[instrument(skip_all, fields(provider = self.provider.name(), hash = %transaction.hash))]
    pub async fn authorize(
        &self,
        transaction: &Transaction,
        form: &PaymentForm,
    ) -> Result<GatewayResponse, GatewayError> {
        self.dispatch(TransactionKind::Authorize, transaction, Some(form))
            .await
    }

    /// Settles a previously authorized amount.
    #[instrument(skip_all, fields(provider = self.provider.name(), hash = %transaction.hash))]
    pub async fn capture(&self, transaction: &Transaction) -> Result<GatewayResponse, GatewayError> {
        self.dispatch(TransactionKind::Capture, transaction, None)
            .await
    }

    /// Authorizes and settles in one step.
    #[instrument(skip_all, fields(provider = self.provider.name(), hash = %transaction.hash))]
    pub async fn purchase(
        &self,
        transaction: &Transaction,
        form: &PaymentForm,
    ) -> Result<GatewayResponse, GatewayError> {
        self.dispatch(TransactionKind::Purchase, transaction, Some(form))
            .await
    }

    /// Returns settled funds to the buyer.
    #[instrument(skip_all, fields(provider = self.provider.name(), hash = %transaction.hash))]
    pub async fn refund(&self, transaction: &Transaction) -> Result<GatewayResponse, GatewayError> {
        self.dispatch(TransactionKind::Refund, transaction, None)
            .await
    }

    /// Finishes an authorization after the buyer returns from an
    /// offsite flow.
    #[instrument(skip_all, fields(provider = self.provider.name(), hash = %transaction.hash))]
    pub async fn complete_authorize(
        &self,
        transaction: &Transaction,
    ) -> Result<GatewayResponse, GatewayError> {
        self.dispatch(TransactionKind::CompleteAuthorize, transaction, None)
            .await
    }

    /// Finishes a purchase after the buyer returns from an offsite
    /// flow.
    #[instrument(skip_all, fields(provider = self.provider.name(), hash = %transaction.hash))]
    pub async fn complete_purchase(
        &self,
        transaction: &Transaction,
    ) -> Result<GatewayResponse, GatewayError> {
        self.dispatch(TransactionKind::CompletePurchase, transaction, None)
            .await
    }

    /// Stores the submitted card with the provider for later charges.
    ///
    /// Runs outside the transaction pipeline: no order, no pre-send
    /// hook. The transmit hook still applies. A provider response that
    /// is not successful becomes a payment failure carrying the
    /// provider's message.
    #[instrument(skip_all, fields(provider = self.provider.name()))]
    pub async fn create_payment_source(
        &self,
        form: &PaymentForm,
        currency: Currency,
    ) -> Result<PaymentSource, GatewayError> {
        self.ensure_supported(Operation::CreatePaymentSource)?;

        let mut payload = PaymentRequest::new(Decimal::ZERO, currency, TransactionId::new());
        payload.description = Some(form.summary());
        payload.client_ip = form.client_ip.clone().map(normalize_client_ip);
        payload.card = Some(Card::build(form, None));
        self.provider.populate_request(&mut payload, Some(form));

        let mut request = self
            .client()?
            .request(Operation::CreatePaymentSource, &payload)?;
        self.provider
            .prepare_request(Operation::CreatePaymentSource, request.as_mut())?;

        let raw = self.transmit(request.as_ref()).await?;
        let response = GatewayResponse::from(raw);
        let reference = self.provider.extract_card_reference(&response)?;

        debug!(reference = %reference, "payment source created");
        Ok(PaymentSource {
            reference,
            description: form.summary(),
        })
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Pipeline
    // ─────────────────────────────────────────────────────────────────────────────

    async fn dispatch(
        &self,
        kind: TransactionKind,
        transaction: &Transaction,
        form: Option<&PaymentForm>,
    ) -> Result<GatewayResponse, GatewayError> {
        let operation = Operation::from(kind);
        self.ensure_supported(operation)?;
        debug!(operation = %operation, "dispatching payment request");

        // Capture and refund act on a prior provider reference; fail
        // before building anything if the transaction has none.
        let reference = if matches!(kind, TransactionKind::Capture | TransactionKind::Refund) {
            Some(
                transaction
                    .reference
                    .as_deref()
                    .ok_or(GatewayError::MissingReference(transaction.id))?,
            )
        } else {
            None
        };

        let payload = self.build_payment_request(kind, transaction, form).await?;

        let mut request = self.client()?.request(operation, &payload)?;
        if let Some(reference) = reference {
            request.set_transaction_reference(reference);
        }
        self.provider.prepare_request(operation, request.as_mut())?;

        if !self.hooks.fire_before_send(kind, transaction, request.as_ref()) {
            return Err(GatewayError::RequestCancelled);
        }

        let raw = self.transmit(request.as_ref()).await?;
        let response = GatewayResponse::from(raw);
        debug!(success = response.is_successful(), "provider responded");
        Ok(response)
    }

    /// Assembles the generic payload for one operation.
    ///
    /// Capture and refund act on money the provider already holds, so
    /// they are built from the transaction alone. Everything else
    /// resolves the order and carries card and cart detail.
    async fn build_payment_request(
        &self,
        kind: TransactionKind,
        transaction: &Transaction,
        form: Option<&PaymentForm>,
    ) -> Result<PaymentRequest, GatewayError> {
        let webhooks = self.capabilities()?.webhooks;
        let mut request = base_request(transaction, webhooks, self.urls.as_ref())?;

        if let Some(form) = form {
            request.client_ip = form.client_ip.clone().map(normalize_client_ip);
        }

        if !matches!(kind, TransactionKind::Capture | TransactionKind::Refund) {
            let order = self
                .store
                .get_order(transaction.order_id)
                .await?
                .ok_or(GatewayError::OrderNotFound(transaction.order_id))?;
            populate_order_fields(&mut request, &order);

            if let Some(form) = form {
                request.card = Some(Card::build(form, Some(&order)));
            }

            if self.send_cart_info {
                let bag = item_bag_for_order(&order);
                request.items = Some(self.hooks.fire_item_bag(&order, bag));
            }
        }

        self.provider.populate_request(&mut request, form);
        Ok(request)
    }

    /// Sends a prepared request, giving transmit listeners the chance
    /// to substitute the body.
    async fn transmit(&self, request: &dyn ProviderRequest) -> Result<RawResponse, TransportError> {
        match self.hooks.fire_transmit(request.data()) {
            Some(replacement) => request.send_data(replacement).await,
            None => request.send().await,
        }
    }

    fn ensure_supported(&self, operation: Operation) -> Result<(), GatewayError> {
        if !self.capabilities()?.supports(operation) {
            return Err(GatewayError::UnsupportedOperation(operation));
        }
        Ok(())
    }

    fn client(&self) -> Result<&Arc<dyn ProviderClient>, GatewayError> {
        self.client.get_or_try_init(|| self.provider.create_client())
    }
}
