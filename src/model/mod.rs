//! Canonical record types for the exported business data.
//!
//! The REST backend is inconsistent about field naming (snake_case rows from
//! the Python API, camelCase objects created in the browser), so every field
//! that appears under both spellings carries a serde alias. Normalization
//! happens here, once, at the ingestion boundary; nothing downstream ever
//! branches on a field-naming variant.

mod event_date;
mod fields;

pub use event_date::EventDate;

use serde::Deserialize;

use fields::{lenient_event_date, lenient_f64, lenient_items};

/// The default restock threshold applied when settings are absent.
pub const DEFAULT_LOW_STOCK_THRESHOLD: f64 = 5.0;

/// Lifecycle state of an active order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Newly created, not yet started.
    #[default]
    Pending,
    /// Being prepared.
    Processing,
    /// Ready for pickup or delivery.
    Ready,
    /// Handed over to the customer.
    Delivered,
    /// Finished and archived.
    Completed,
    /// Called off; kept for the record.
    Cancelled,
    /// A status value this version does not know about.
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Whether the order has reached a terminal, revenue-bearing state.
    pub fn is_fulfilled(self) -> bool {
        matches!(self, Self::Delivered | Self::Completed)
    }
}

/// A line item on an order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderItem {
    /// Item name as entered at order time.
    #[serde(default, alias = "item_name")]
    pub name: String,
    /// Units ordered. Zero or missing is read as one unit downstream.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub quantity: f64,
    /// Unit price.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: f64,
}

/// An order still in the active set.
///
/// Active orders never contribute income; they only feed order counts, the
/// deliveries tile, and item popularity.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Order {
    /// Backend-assigned identifier.
    #[serde(default)]
    pub id: String,
    /// Who the order is for.
    #[serde(default, alias = "customerName")]
    pub customer_name: String,
    /// Line items.
    #[serde(default, deserialize_with = "lenient_items")]
    pub items: Vec<OrderItem>,
    /// Order total after discount.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total: f64,
    /// Current lifecycle state.
    #[serde(default)]
    pub status: OrderStatus,
    /// Promised delivery date, if one was set.
    #[serde(default, deserialize_with = "lenient_event_date")]
    pub deadline: Option<EventDate>,
    /// When the order was created.
    #[serde(default, alias = "createdAt", deserialize_with = "lenient_event_date")]
    pub created_at: Option<EventDate>,
}

/// An immutable copy of a completed order.
///
/// This collection is the system of record for lifetime revenue. Records are
/// appended when an order is fulfilled and only ever removed by an explicit
/// delete on the backend.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderRecord {
    /// Backend-assigned identifier.
    #[serde(default)]
    pub id: String,
    /// Who the order was for.
    #[serde(default, alias = "customerName")]
    pub customer_name: String,
    /// Line items as delivered.
    #[serde(default, deserialize_with = "lenient_items")]
    pub items: Vec<OrderItem>,
    /// Order total after discount.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total: f64,
    /// When the order was handed over.
    #[serde(default, alias = "deliveredAt", deserialize_with = "lenient_event_date")]
    pub delivered_at: Option<EventDate>,
    /// When the order was created.
    #[serde(default, alias = "createdAt", deserialize_with = "lenient_event_date")]
    pub created_at: Option<EventDate>,
}

impl OrderRecord {
    /// The date this order counts for reporting: when it was delivered,
    /// falling back to when it was created. Never falls back to "now".
    pub fn effective_date(&self) -> Option<EventDate> {
        self.delivered_at.or(self.created_at)
    }
}

/// Direction of a manual ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Manual income not derived from orders.
    Income,
    /// An expense entry.
    Expense,
    /// A kind this version does not know about.
    #[default]
    #[serde(other)]
    Unknown,
}

/// A manually entered ledger transaction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Transaction {
    /// Backend-assigned identifier.
    #[serde(default)]
    pub id: String,
    /// Whether this entry is income or an expense.
    #[serde(default, rename = "type")]
    pub kind: TransactionKind,
    /// Free-form category, e.g. "ingredients".
    #[serde(default)]
    pub category: String,
    /// Amount; always non-negative in well-formed data.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub amount: f64,
    /// Operator note.
    #[serde(default)]
    pub description: String,
    /// The date the operator recorded for the entry.
    #[serde(default, deserialize_with = "lenient_event_date")]
    pub date: Option<EventDate>,
    /// When the row was written.
    #[serde(default, alias = "createdAt", deserialize_with = "lenient_event_date")]
    pub created_at: Option<EventDate>,
}

impl Transaction {
    /// The date this transaction counts for reporting.
    pub fn effective_date(&self) -> Option<EventDate> {
        self.date.or(self.created_at)
    }
}

/// A raw grocery purchase held in stock.
///
/// Its cost at purchase date is an expense event; its quantity feeds the
/// low-stock union alongside finished-goods inventory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroceryItem {
    /// Backend-assigned identifier.
    #[serde(default)]
    pub id: String,
    /// Item name.
    #[serde(default, alias = "itemName")]
    pub item_name: String,
    /// Category, e.g. "produce".
    #[serde(default)]
    pub category: String,
    /// Quantity on hand. Missing data is read as zero, which conservatively
    /// flags the item as low stock.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub quantity: f64,
    /// Unit of measure.
    #[serde(default)]
    pub unit: String,
    /// When the purchase was made.
    #[serde(default, alias = "purchaseDate", deserialize_with = "lenient_event_date")]
    pub purchase_date: Option<EventDate>,
    /// Best-before date, if tracked.
    #[serde(default, alias = "expiryDate", deserialize_with = "lenient_event_date")]
    pub expiry_date: Option<EventDate>,
    /// What the purchase cost.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cost: f64,
    /// Where it was bought.
    #[serde(default)]
    pub supplier: String,
}

/// A record of grocery stock being consumed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroceryUsage {
    /// The grocery item that was used.
    #[serde(default, alias = "groceryId")]
    pub grocery_id: String,
    /// How much was used.
    #[serde(default, alias = "quantityUsed", deserialize_with = "lenient_f64")]
    pub quantity_used: f64,
    /// When it was used.
    #[serde(default, alias = "usedDate", deserialize_with = "lenient_event_date")]
    pub used_date: Option<EventDate>,
    /// Who used it.
    #[serde(default, alias = "usedBy")]
    pub used_by: String,
    /// What it was used for.
    #[serde(default)]
    pub purpose: String,
}

/// A finished-goods inventory item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InventoryItem {
    /// Backend-assigned identifier.
    #[serde(default)]
    pub id: String,
    /// Item name.
    #[serde(default)]
    pub name: String,
    /// Category.
    #[serde(default)]
    pub category: String,
    /// Units in stock. Missing data is read as zero and flagged as low.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub stock: f64,
    /// Unit of measure.
    #[serde(default)]
    pub unit: String,
    /// Cost to produce or acquire one unit.
    #[serde(default, alias = "costPrice", deserialize_with = "lenient_f64")]
    pub cost_price: f64,
    /// Price one unit sells for.
    #[serde(default, alias = "sellingPrice", deserialize_with = "lenient_f64")]
    pub selling_price: f64,
}

/// Operator-tunable settings carried in the snapshot.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Settings {
    /// Quantity at or below which an item counts as low stock. Shared by
    /// the inventory and grocery collections.
    #[serde(default = "default_threshold", alias = "lowStockThreshold")]
    pub low_stock_threshold: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

fn default_threshold() -> f64 {
    DEFAULT_LOW_STOCK_THRESHOLD
}
