//! Income aggregation.
//!
//! Only fulfilled orders in the history count as income. Open orders and
//! income-typed ledger entries are deliberately excluded so revenue is never
//! double counted against the order that produced it.

use crate::model::OrderRecord;

use super::windows::Window;

/// Total revenue from fulfilled orders within a window.
pub fn income_total(history: &[OrderRecord], window: Window) -> f64 {
    history
        .iter()
        .filter(|order| window.contains(order.effective_date()))
        .map(|order| order.total)
        .sum()
}
