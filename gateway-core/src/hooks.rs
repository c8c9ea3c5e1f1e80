//! Extension hooks on the dispatch pipeline.
//!
//! Three interception points, each a typed listener list owned by the
//! adapter instance. Listeners run synchronously in registration
//! order, on the dispatching task; there is no global registry and no
//! concurrent delivery.

use gateway_types::{ItemBag, Order, ProviderRequest, RequestData, Transaction, TransactionKind};

/// The item bag built for an order, open for replacement.
///
/// Listeners may rewrite or empty the bag before it goes onto the
/// payload. This hook cannot abort the dispatch.
pub struct ItemBagEvent<'a> {
    pub order: &'a Order,
    pub bag: ItemBag,
}

/// A prepared provider request about to be transmitted.
///
/// Listeners can inspect the call object and veto the dispatch.
/// A vetoed dispatch fails with a cancellation error before any
/// network traffic. `kind` is the operation being dispatched, which
/// is authoritative over whatever the transaction record says.
pub struct BeforeSendEvent<'a> {
    pub kind: TransactionKind,
    pub transaction: &'a Transaction,
    pub request: &'a dyn ProviderRequest,
    valid: bool,
}

impl BeforeSendEvent<'_> {
    /// Vetoes the dispatch.
    pub fn cancel(&mut self) {
        self.valid = false;
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// The wire-level body about to be transmitted.
///
/// A listener may substitute the whole body; the replacement is sent
/// verbatim, never merged with the prepared one. With several
/// listeners the last replacement wins.
pub struct TransmitEvent {
    data: RequestData,
    replacement: Option<RequestData>,
}

impl TransmitEvent {
    /// The body as the provider client prepared it.
    pub fn data(&self) -> &RequestData {
        &self.data
    }

    /// The replacement set by an earlier listener, if any.
    pub fn replacement(&self) -> Option<&RequestData> {
        self.replacement.as_ref()
    }

    /// Substitutes the outgoing body wholesale.
    pub fn replace(&mut self, data: RequestData) {
        self.replacement = Some(data);
    }
}

type ItemBagListener = Box<dyn Fn(&mut ItemBagEvent<'_>) + Send + Sync>;
type BeforeSendListener = Box<dyn Fn(&mut BeforeSendEvent<'_>) + Send + Sync>;
type TransmitListener = Box<dyn Fn(&mut TransmitEvent) + Send + Sync>;

/// The adapter's listener lists.
///
/// Register hooks before dispatching; the bus is owned by one adapter
/// and shared with nothing else.
#[derive(Default)]
pub struct HookBus {
    item_bag: Vec<ItemBagListener>,
    before_send: Vec<BeforeSendListener>,
    transmit: Vec<TransmitListener>,
}

impl HookBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs after the item bag is built, before it joins the payload.
    pub fn on_item_bag<F>(&mut self, listener: F)
    where
        F: Fn(&mut ItemBagEvent<'_>) + Send + Sync + 'static,
    {
        self.item_bag.push(Box::new(listener));
    }

    /// Runs after the provider request is prepared, before
    /// transmission. May veto.
    pub fn on_before_send<F>(&mut self, listener: F)
    where
        F: Fn(&mut BeforeSendEvent<'_>) + Send + Sync + 'static,
    {
        self.before_send.push(Box::new(listener));
    }

    /// Runs at transmission time. May substitute the outgoing body.
    pub fn on_transmit<F>(&mut self, listener: F)
    where
        F: Fn(&mut TransmitEvent) + Send + Sync + 'static,
    {
        self.transmit.push(Box::new(listener));
    }

    pub(crate) fn fire_item_bag(&self, order: &Order, bag: ItemBag) -> ItemBag {
        let mut event = ItemBagEvent { order, bag };
        for listener in &self.item_bag {
            listener(&mut event);
        }
        event.bag
    }

    pub(crate) fn fire_before_send(
        &self,
        kind: TransactionKind,
        transaction: &Transaction,
        request: &dyn ProviderRequest,
    ) -> bool {
        let mut event = BeforeSendEvent {
            kind,
            transaction,
            request,
            valid: true,
        };
        for listener in &self.before_send {
            listener(&mut event);
        }
        event.is_valid()
    }

    pub(crate) fn fire_transmit(&self, data: RequestData) -> Option<RequestData> {
        let mut event = TransmitEvent {
            data,
            replacement: None,
        };
        for listener in &self.transmit {
            listener(&mut event);
        }
        event.replacement
    }
}
