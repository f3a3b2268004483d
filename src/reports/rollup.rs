//! Grouped rollups for the breakdown panels.

use std::collections::HashMap;

use time::OffsetDateTime;
use time_tz::Tz;

use crate::model::{GroceryItem, GroceryUsage, Order, OrderRecord};

/// Lifetime units sold for one product.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSales {
    /// Product name, or "Unknown" for unnamed line items.
    pub name: String,
    /// Units sold across open orders and history.
    pub sold: u64,
}

/// Grocery consumption grouped by stated purpose.
#[derive(Debug, Clone, PartialEq)]
pub struct PurposeUsage {
    /// The purpose label, or "N/A" where none was recorded.
    pub purpose: String,
    /// Units consumed for this purpose.
    pub quantity_used: f64,
    /// How many usage records contributed.
    pub records: usize,
}

/// Grocery spending grouped by category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpend {
    /// The category label, or "Uncategorized" where none was recorded.
    pub category: String,
    /// Purchases in this category.
    pub items: usize,
    /// Total cost of those purchases.
    pub total_cost: f64,
}

/// One customer's order history rolled up for the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerActivity {
    /// Customer name, or "Unknown customer" where none was recorded.
    pub name: String,
    /// Fulfilled orders for this customer.
    pub orders: usize,
    /// Lifetime spend across those orders.
    pub total_spent: f64,
    /// When the most recent order happened, if any of them carried a date.
    pub last_order: Option<OffsetDateTime>,
}

/// Customers grouped from the order history, most recently seen first.
///
/// Customers whose orders all lack dates sort to the back rather than
/// disappearing; their spend is still real.
pub fn recent_customers(
    history: &[OrderRecord],
    timezone: &'static Tz,
    limit: usize,
) -> Vec<CustomerActivity> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut customers: Vec<CustomerActivity> = Vec::new();

    for order in history {
        let name = if order.customer_name.is_empty() {
            "Unknown customer"
        } else {
            &order.customer_name
        };
        let instant = order.effective_date().map(|event| event.instant(timezone));

        match index.get(name) {
            Some(&position) => {
                let customer = &mut customers[position];
                customer.orders += 1;
                customer.total_spent += order.total;
                if instant > customer.last_order {
                    customer.last_order = instant;
                }
            }
            None => {
                index.insert(name, customers.len());
                customers.push(CustomerActivity {
                    name: name.to_owned(),
                    orders: 1,
                    total_spent: order.total,
                    last_order: instant,
                });
            }
        }
    }

    customers.sort_by_key(|customer| std::cmp::Reverse(customer.last_order));
    customers.truncate(limit);
    customers
}

/// The most-sold products across open orders and the order history.
///
/// A line item with a quantity below one still counts as a single sale, so
/// sloppily entered orders do not vanish from the ranking. Ties keep their
/// first-seen order.
pub fn most_used_items(orders: &[Order], history: &[OrderRecord], limit: usize) -> Vec<ItemSales> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut sales: Vec<ItemSales> = Vec::new();

    let line_items = orders
        .iter()
        .flat_map(|order| &order.items)
        .chain(history.iter().flat_map(|order| &order.items));

    for item in line_items {
        let name = if item.name.is_empty() { "Unknown" } else { &item.name };
        let sold = if item.quantity >= 1.0 { item.quantity as u64 } else { 1 };

        match index.get(name) {
            Some(&position) => sales[position].sold += sold,
            None => {
                index.insert(name, sales.len());
                sales.push(ItemSales {
                    name: name.to_owned(),
                    sold,
                });
            }
        }
    }

    sales.sort_by(|a, b| b.sold.cmp(&a.sold));
    sales.truncate(limit);
    sales
}

/// Grocery consumption totals per purpose, largest first.
pub fn usage_by_purpose(usage: &[GroceryUsage]) -> Vec<PurposeUsage> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<PurposeUsage> = Vec::new();

    for record in usage {
        let purpose = if record.purpose.is_empty() { "N/A" } else { &record.purpose };

        match index.get(purpose) {
            Some(&position) => {
                totals[position].quantity_used += record.quantity_used;
                totals[position].records += 1;
            }
            None => {
                index.insert(purpose, totals.len());
                totals.push(PurposeUsage {
                    purpose: purpose.to_owned(),
                    quantity_used: record.quantity_used,
                    records: 1,
                });
            }
        }
    }

    totals.sort_by(|a, b| b.quantity_used.total_cmp(&a.quantity_used));
    totals
}

/// Grocery spending totals per category, most expensive first.
pub fn category_breakdown(grocery: &[GroceryItem]) -> Vec<CategorySpend> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<CategorySpend> = Vec::new();

    for item in grocery {
        let category = if item.category.is_empty() { "Uncategorized" } else { &item.category };

        match index.get(category) {
            Some(&position) => {
                totals[position].items += 1;
                totals[position].total_cost += item.cost;
            }
            None => {
                index.insert(category, totals.len());
                totals.push(CategorySpend {
                    category: category.to_owned(),
                    items: 1,
                    total_cost: item.cost,
                });
            }
        }
    }

    totals.sort_by(|a, b| b.total_cost.total_cmp(&a.total_cost));
    totals
}
