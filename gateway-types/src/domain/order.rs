//! Order, line item, and adjustment domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::money::Currency;

/// Unique identifier for an Order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Creates a new random OrderId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an OrderId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Returns the UUID value.
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for OrderId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A postal address attached to an order.
///
/// Every field is optional; hosts fill in whatever their checkout
/// collected. Name fields participate in the cardholder-name fallback
/// when a payment card is assembled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
}

/// A purchasable line on an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// Line number within the order.
    pub id: u64,
    pub quantity: u32,
    /// Unit price in major currency units, unrounded.
    pub sale_price: Decimal,
    /// Description snapshotted at the time the line was added.
    pub description: Option<String>,
    /// Description of the underlying purchasable, used when the
    /// snapshot is absent.
    pub purchasable_description: Option<String>,
}

impl LineItem {
    pub fn new(id: u64, quantity: u32, sale_price: Decimal) -> Self {
        Self {
            id,
            quantity,
            sale_price,
            description: None,
            purchasable_description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_purchasable_description(mut self, description: impl Into<String>) -> Self {
        self.purchasable_description = Some(description.into());
        self
    }

    /// Line subtotal: quantity times the unrounded unit price.
    pub fn subtotal(&self) -> Decimal {
        Decimal::from(self.quantity) * self.sale_price
    }
}

/// The category of an order adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentKind {
    Tax,
    Discount,
    Shipping,
}

impl std::fmt::Display for AdjustmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdjustmentKind::Tax => write!(f, "Tax"),
            AdjustmentKind::Discount => write!(f, "Discount"),
            AdjustmentKind::Shipping => write!(f, "Shipping"),
        }
    }
}

/// A price adjustment applied to an order.
///
/// `included` adjustments are already folded into line-item prices and
/// must not be restated as separate cart rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Adjustment {
    pub kind: AdjustmentKind,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Signed amount in major currency units; discounts are negative.
    pub amount: Decimal,
    pub included: bool,
}

impl Adjustment {
    pub fn new(kind: AdjustmentKind, amount: Decimal) -> Self {
        Self {
            kind,
            name: None,
            description: None,
            amount,
            included: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn included(mut self) -> Self {
        self.included = true;
        self
    }
}

/// An order as seen by the gateway layer.
///
/// Read-only here: the gateway builds payment requests from orders but
/// never mutates them. `total_price` is the host's authoritative total;
/// the item bag builder checks itself against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Human-facing order reference, e.g. a short alphanumeric number.
    pub number: String,
    pub email: Option<String>,
    pub currency: Currency,
    pub total_price: Decimal,
    pub line_items: Vec<LineItem>,
    pub adjustments: Vec<Adjustment>,
    pub billing_address: Option<Address>,
    pub shipping_address: Option<Address>,
}

impl Order {
    pub fn new(number: impl Into<String>, currency: Currency, total_price: Decimal) -> Self {
        Self {
            id: OrderId::new(),
            number: number.into(),
            email: None,
            currency,
            total_price,
            line_items: Vec::new(),
            adjustments: Vec::new(),
            billing_address: None,
            shipping_address: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_line_items(mut self, line_items: Vec<LineItem>) -> Self {
        self.line_items = line_items;
        self
    }

    pub fn with_adjustments(mut self, adjustments: Vec<Adjustment>) -> Self {
        self.adjustments = adjustments;
        self
    }

    pub fn with_billing_address(mut self, address: Address) -> Self {
        self.billing_address = Some(address);
        self
    }

    pub fn with_shipping_address(mut self, address: Address) -> Self {
        self.shipping_address = Some(address);
        self
    }
}
