//! Provider-facing cart contents.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of cart detail sent to a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemBagEntry {
    pub name: String,
    pub description: String,
    pub quantity: u32,
    /// Unit price in major currency units, unrounded.
    pub price: Decimal,
}

/// An ordered list of cart rows attached to a payment request.
///
/// Entry order follows the order's line items, adjustments after.
/// Providers that display cart detail expect the bag total to match
/// the charged amount at minor-unit precision.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemBag {
    entries: Vec<ItemBagEntry>,
}

impl ItemBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ItemBagEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ItemBagEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of quantity times unit price over all entries, unrounded.
    pub fn total(&self) -> Decimal {
        self.entries
            .iter()
            .map(|e| Decimal::from(e.quantity) * e.price)
            .sum()
    }
}

impl From<Vec<ItemBagEntry>> for ItemBag {
    fn from(entries: Vec<ItemBagEntry>) -> Self {
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_total_sums_quantity_times_price() {
        let bag = ItemBag::from(vec![
            ItemBagEntry {
                name: "Widget".into(),
                description: "Widget".into(),
                quantity: 2,
                price: dec!(19.99),
            },
            ItemBagEntry {
                name: "Shipping".into(),
                description: "Shipping".into(),
                quantity: 1,
                price: dec!(4.95),
            },
        ]);

        assert_eq!(bag.total(), dec!(44.93));
    }

    #[test]
    fn test_empty_bag_total_is_zero() {
        assert_eq!(ItemBag::new().total(), Decimal::ZERO);
    }
}
