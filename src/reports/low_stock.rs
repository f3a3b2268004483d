//! Low-stock detection across both stock lists.

use crate::model::{GroceryItem, InventoryItem};

/// Items at or below the low-stock threshold, grouped by source list.
#[derive(Debug)]
pub struct LowStockReport<'a> {
    /// Finished goods running low, least stock first.
    pub inventory: Vec<&'a InventoryItem>,
    /// Grocery supplies running low, least stock first.
    pub grocery: Vec<&'a GroceryItem>,
}

impl LowStockReport<'_> {
    /// The headline count shown on the dashboard tile.
    pub fn total_count(&self) -> usize {
        self.inventory.len() + self.grocery.len()
    }
}

/// Find every item whose stock level is at or below `threshold`.
///
/// The comparison is inclusive: an item sitting exactly on the threshold is
/// already low. Items with unparseable quantities were read in as zero and
/// therefore always appear here.
pub fn low_stock<'a>(
    inventory: &'a [InventoryItem],
    grocery: &'a [GroceryItem],
    threshold: f64,
) -> LowStockReport<'a> {
    let mut low_inventory: Vec<_> = inventory
        .iter()
        .filter(|item| item.stock <= threshold)
        .collect();
    low_inventory.sort_by(|a, b| a.stock.total_cmp(&b.stock));

    let mut low_grocery: Vec<_> = grocery
        .iter()
        .filter(|item| item.quantity <= threshold)
        .collect();
    low_grocery.sort_by(|a, b| a.quantity.total_cmp(&b.quantity));

    LowStockReport {
        inventory: low_inventory,
        grocery: low_grocery,
    }
}
