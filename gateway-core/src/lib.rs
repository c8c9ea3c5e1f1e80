//! # Gateway Core
//!
//! The dispatch pipeline of the payment gateway adapter layer.
//!
//! ## Architecture
//!
//! - `adapter/` - The dispatcher, generic over a provider strategy
//! - `item_bag/` - Builds provider-facing cart contents from orders
//! - `request/` - Generic payload construction shared by operations
//! - `hooks/` - Typed extension points on the pipeline
//! - `urls/` - Stock URL resolver for single-origin hosts
//!
//! The adapter is generic over `P: Provider`, with the order store and
//! URL resolver injected as trait objects, so hosts wire their own
//! implementations without touching the pipeline.

pub mod adapter;
pub mod hooks;
pub mod item_bag;
pub mod request;
pub mod urls;


pub use adapter::GatewayAdapter;
pub use hooks::{BeforeSendEvent, HookBus, ItemBagEvent, TransmitEvent};
pub use item_bag::{item_bag_for_order, reconciles};
pub use request::{CANCEL_PAYMENT_ROUTE, COMPLETE_PAYMENT_ROUTE, NOTIFY_ROUTE};
pub use urls::SiteUrls;
