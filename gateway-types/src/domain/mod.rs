//! Domain models for the gateway adapter layer.

pub mod card;
pub mod item_bag;
pub mod money;
pub mod operation;
pub mod order;
pub mod transaction;

pub use card::{Card, PaymentForm};
pub use item_bag::{ItemBag, ItemBagEntry};
pub use money::Currency;
pub use operation::{Capabilities, Operation};
pub use order::{Address, Adjustment, AdjustmentKind, LineItem, Order, OrderId};
pub use transaction::{Transaction, TransactionId, TransactionKind};
