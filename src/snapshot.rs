//! The in-memory snapshot of business data the dashboard aggregates over.
//!
//! The snapshot is the document produced by the backend's export endpoint:
//! one JSON object holding every collection. It is ingested whole, held
//! immutably, and replaced wholesale on refresh. Aggregation functions take
//! `&Snapshot` and never mutate it, so any number of reporting passes can
//! run against the same snapshot and agree with each other.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    model::{GroceryItem, GroceryUsage, InventoryItem, Order, OrderRecord, Settings, Transaction},
};

/// A read-only snapshot of every collection the dashboard reports on.
#[derive(Debug, Default, Deserialize)]
pub struct Snapshot {
    /// Orders still being worked.
    #[serde(default)]
    pub orders: Vec<Order>,
    /// Completed orders; the system of record for lifetime revenue.
    #[serde(default, alias = "orderHistory")]
    pub order_history: Vec<OrderRecord>,
    /// Manual ledger entries.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    /// Raw grocery stock and purchase costs.
    #[serde(default)]
    pub grocery: Vec<GroceryItem>,
    /// Grocery consumption records.
    #[serde(default, alias = "groceryUsage")]
    pub grocery_usage: Vec<GroceryUsage>,
    /// Finished-goods inventory.
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
    /// Operator settings.
    #[serde(default)]
    pub settings: Settings,
    /// Ingestion-time tally of records with unusable dates.
    #[serde(skip)]
    pub quality: DataQuality,
}

/// Counts of records whose date fields could not be parsed.
///
/// These records still count toward lifetime totals but are invisible to
/// every date-scoped window. The counts are surfaced on the dashboard as a
/// data-quality hint rather than treated as errors.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct DataQuality {
    /// History records with neither a delivery nor a creation date.
    pub undated_orders: usize,
    /// Transactions with no usable date.
    pub undated_transactions: usize,
    /// Grocery purchases with no usable purchase date.
    pub undated_grocery: usize,
}

impl DataQuality {
    /// Total records missing from date-scoped aggregates.
    pub fn total(&self) -> usize {
        self.undated_orders + self.undated_transactions + self.undated_grocery
    }
}

impl Snapshot {
    /// Parse a snapshot from export JSON and tally its data quality.
    pub fn from_json(raw: &str) -> Result<Self, Error> {
        let mut snapshot: Snapshot =
            serde_json::from_str(raw).map_err(|error| Error::SnapshotParse(error.to_string()))?;
        snapshot.quality = snapshot.tally_quality();
        Ok(snapshot)
    }

    /// Read and parse a snapshot from an export file on disk.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let raw = fs::read_to_string(path).map_err(|error| Error::SnapshotRead {
            path: path.to_owned(),
            reason: error.to_string(),
        })?;

        let snapshot = Self::from_json(&raw)?;
        tracing::info!(
            orders = snapshot.orders.len(),
            order_history = snapshot.order_history.len(),
            transactions = snapshot.transactions.len(),
            grocery = snapshot.grocery.len(),
            inventory = snapshot.inventory.len(),
            undated = snapshot.quality.total(),
            "loaded snapshot from {}",
            path.display()
        );

        Ok(snapshot)
    }

    fn tally_quality(&self) -> DataQuality {
        DataQuality {
            undated_orders: self
                .order_history
                .iter()
                .filter(|order| order.effective_date().is_none())
                .count(),
            undated_transactions: self
                .transactions
                .iter()
                .filter(|transaction| transaction.effective_date().is_none())
                .count(),
            undated_grocery: self
                .grocery
                .iter()
                .filter(|item| item.purchase_date.is_none())
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Snapshot;

    #[test]
    fn parses_a_mixed_convention_export() {
        let snapshot = Snapshot::from_json(
            r#"{
                "orders": [
                    {"id": "o1", "customerName": "Dana", "total": 25, "status": "pending",
                     "createdAt": "2024-01-15T10:00:00Z"}
                ],
                "order_history": [
                    {"id": "h1", "customer_name": "Ravi", "total": "50",
                     "delivered_at": "2024-01-14T20:00:00-06:00"}
                ],
                "transactions": [
                    {"id": "t1", "type": "expense", "category": "packaging",
                     "amount": 15, "date": "2024-01-14"}
                ],
                "grocery": [
                    {"id": "g1", "item_name": "Beeswax", "quantity": 2,
                     "purchase_date": "2024-01-14", "cost": 30}
                ],
                "inventory": [
                    {"id": "i1", "name": "Candle", "stock": 12, "sellingPrice": 8}
                ],
                "settings": {"lowStockThreshold": 4}
            }"#,
        )
        .unwrap();

        assert_eq!(snapshot.orders.len(), 1);
        assert_eq!(snapshot.order_history[0].total, 50.0);
        assert_eq!(snapshot.inventory[0].selling_price, 8.0);
        assert_eq!(snapshot.settings.low_stock_threshold, 4.0);
        assert_eq!(snapshot.quality.total(), 0);
    }

    #[test]
    fn missing_collections_become_empty() {
        let snapshot = Snapshot::from_json("{}").unwrap();
        assert!(snapshot.orders.is_empty());
        assert!(snapshot.order_history.is_empty());
        assert_eq!(snapshot.settings.low_stock_threshold, 5.0);
    }

    #[test]
    fn undated_records_are_tallied() {
        let snapshot = Snapshot::from_json(
            r#"{
                "order_history": [
                    {"id": "h1", "total": 50, "delivered_at": "2024-01-14"},
                    {"id": "h2", "total": 70, "delivered_at": "not a date"}
                ],
                "transactions": [{"id": "t1", "type": "expense", "amount": 5}],
                "grocery": [{"id": "g1", "item_name": "Flour", "cost": 9}]
            }"#,
        )
        .unwrap();

        assert_eq!(snapshot.quality.undated_orders, 1);
        assert_eq!(snapshot.quality.undated_transactions, 1);
        assert_eq!(snapshot.quality.undated_grocery, 1);
        assert_eq!(snapshot.quality.total(), 3);
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(Snapshot::from_json("not json").is_err());
    }
}
