//! Order store port.

use crate::domain::{Order, OrderId};
use crate::error::StoreError;

/// Read-only access to the host's orders.
///
/// The gateway looks orders up when building payment requests; it
/// never writes them back.
#[async_trait::async_trait]
pub trait OrderStore: Send + Sync {
    /// Gets an order by ID. Absent orders are `Ok(None)`, not errors.
    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, StoreError>;
}
