//! Expense aggregation.
//!
//! Expenses are the sum of two sources: expense-typed ledger entries and
//! grocery purchase costs. The sources are additive with no deduplication,
//! so a grocery run recorded in both places counts twice. Operators are
//! expected to log a purchase in one place or the other.

use crate::model::{GroceryItem, Transaction, TransactionKind};

use super::windows::Window;

/// Total spending within a window, across the ledger and grocery purchases.
pub fn expense_total(
    transactions: &[Transaction],
    grocery: &[GroceryItem],
    window: Window,
) -> f64 {
    let ledger: f64 = transactions
        .iter()
        .filter(|transaction| transaction.kind == TransactionKind::Expense)
        .filter(|transaction| window.contains(transaction.effective_date()))
        .map(|transaction| transaction.amount)
        .sum();

    let purchases: f64 = grocery
        .iter()
        .filter(|item| window.contains(item.purchase_date))
        .map(|item| item.cost)
        .sum();

    ledger + purchases
}
