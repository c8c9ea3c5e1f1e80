//! Builds provider-facing cart contents from an order.

use tracing::warn;

use gateway_types::{ItemBag, ItemBagEntry, Order};

/// Builds the item bag for an order.
///
/// Line items come first, in order, then non-included adjustments.
/// Rows that round to zero at the order currency's precision are
/// omitted; prices on the emitted rows stay unrounded so the bag total
/// reproduces the order total exactly.
///
/// When the finished bag disagrees with the order total at minor-unit
/// precision a diagnostic is logged and the bag is returned anyway;
/// callers that need strictness can check [`reconciles`].
pub fn item_bag_for_order(order: &Order) -> ItemBag {
    let currency = order.currency;
    let mut bag = ItemBag::new();

    let mut emitted_items = 0u32;
    for item in &order.line_items {
        if currency.round(item.sale_price).is_zero() {
            continue;
        }
        emitted_items += 1;

        let label = item
            .description
            .clone()
            .or_else(|| item.purchasable_description.clone())
            .unwrap_or_else(|| format!("Item {}", item.id));
        let label = if label.trim().is_empty() {
            format!("Item {}", emitted_items)
        } else {
            label
        };

        bag.push(ItemBagEntry {
            description: label.clone(),
            name: label,
            quantity: item.quantity,
            price: item.sale_price,
        });
    }

    let mut emitted_adjustments = 0u32;
    for adjustment in &order.adjustments {
        // Included adjustments are already inside line-item prices.
        if adjustment.included {
            continue;
        }
        if currency.round(adjustment.amount).is_zero() {
            continue;
        }
        emitted_adjustments += 1;

        let name = adjustment
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("{} {}", adjustment.kind, emitted_adjustments));
        let description = adjustment
            .description
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| name.clone());

        bag.push(ItemBagEntry {
            name,
            description,
            quantity: 1,
            price: adjustment.amount,
        });
    }

    if !reconciles(order, &bag) {
        warn!(
            order = %order.number,
            bag_total = %currency.round(bag.total()),
            order_total = %currency.round(order.total_price),
            "item bag total does not match the order total"
        );
    }

    bag
}

/// Whether a bag's total matches the order total once both are rounded
/// to the order currency's minor unit.
pub fn reconciles(order: &Order, bag: &ItemBag) -> bool {
    let currency = order.currency;
    currency.round(bag.total()) == currency.round(order.total_price)
}
