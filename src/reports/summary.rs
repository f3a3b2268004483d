//! The headline figures for the dashboard and the stats API.

use serde::Serialize;

use crate::snapshot::{DataQuality, Snapshot};

use super::{
    expenses::expense_total,
    income::income_total,
    low_stock::low_stock,
    profit::{margin, profit},
    windows::{ReportWindows, Window},
};

/// Income, expenses, and profit for one reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodTotals {
    /// Revenue from fulfilled orders.
    pub income: f64,
    /// Ledger expenses plus grocery purchase costs.
    pub expenses: f64,
    /// Income minus expenses.
    pub profit: f64,
}

impl PeriodTotals {
    fn for_window(snapshot: &Snapshot, window: Window) -> Self {
        let income = income_total(&snapshot.order_history, window);
        let expenses = expense_total(&snapshot.transactions, &snapshot.grocery, window);

        Self {
            income,
            expenses,
            profit: profit(income, expenses),
        }
    }
}

/// The full set of headline figures for one clock reading.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FinancialSummary {
    /// Totals for today's calendar day.
    pub today: PeriodTotals,
    /// Totals since the start of the week.
    pub this_week: PeriodTotals,
    /// Totals since the start of the month.
    pub this_month: PeriodTotals,
    /// Lifetime totals over every record, dated or not.
    pub all_time: PeriodTotals,
    /// Lifetime profit as a percentage of lifetime income.
    pub margin_percent: f64,
    /// Orders created today, open and fulfilled alike.
    pub today_orders: usize,
    /// Open orders not yet delivered or completed.
    pub pending_orders: usize,
    /// Fulfilled orders in the history.
    pub completed_orders: usize,
    /// Items at or below the low-stock threshold.
    pub low_stock_count: usize,
    /// Records excluded from date-scoped windows for lack of a usable date.
    pub undated_records: DataQuality,
}

/// Compute every headline figure from one snapshot and one set of windows.
pub fn financial_summary(snapshot: &Snapshot, windows: &ReportWindows) -> FinancialSummary {
    let today = PeriodTotals::for_window(snapshot, windows.today_window());
    let this_week = PeriodTotals::for_window(snapshot, windows.week_window());
    let this_month = PeriodTotals::for_window(snapshot, windows.month_window());
    let all_time = PeriodTotals::for_window(snapshot, windows.all_time());

    let today_window = windows.today_window();
    let today_orders = snapshot
        .orders
        .iter()
        .filter(|order| today_window.contains(order.created_at))
        .count()
        + snapshot
            .order_history
            .iter()
            .filter(|order| today_window.contains(order.created_at))
            .count();

    let pending_orders = snapshot
        .orders
        .iter()
        .filter(|order| !order.status.is_fulfilled())
        .count();

    let stock = low_stock(
        &snapshot.inventory,
        &snapshot.grocery,
        snapshot.settings.low_stock_threshold,
    );

    FinancialSummary {
        today,
        this_week,
        this_month,
        all_time,
        margin_percent: margin(all_time.income, all_time.profit),
        today_orders,
        pending_orders,
        completed_orders: snapshot.order_history.len(),
        low_stock_count: stock.total_count(),
        undated_records: snapshot.quality,
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::financial_summary;
    use crate::{
        model::{
            EventDate, GroceryItem, InventoryItem, Order, OrderRecord, OrderStatus, Transaction,
            TransactionKind,
        },
        reports::windows::ReportWindows,
        snapshot::Snapshot,
    };

    const NOW: time::OffsetDateTime = datetime!(2024-01-15 20:00 UTC);

    fn windows() -> ReportWindows {
        ReportWindows::resolve(NOW, "America/Chicago").unwrap()
    }

    fn delivered(total: f64, date: &str) -> OrderRecord {
        OrderRecord {
            total,
            delivered_at: EventDate::parse(date),
            ..OrderRecord::default()
        }
    }

    #[test]
    fn a_busy_day_adds_up() {
        let snapshot = Snapshot {
            order_history: vec![
                delivered(50.0, "2024-01-15T10:00:00-06:00"),
                delivered(70.0, "2024-01-15T13:00:00-06:00"),
                delivered(30.0, "2024-01-14T10:00:00-06:00"),
            ],
            transactions: vec![Transaction {
                kind: TransactionKind::Expense,
                amount: 15.0,
                date: EventDate::parse("2024-01-15"),
                ..Transaction::default()
            }],
            grocery: vec![GroceryItem {
                cost: 30.0,
                purchase_date: EventDate::parse("2024-01-15"),
                ..GroceryItem::default()
            }],
            ..Snapshot::default()
        };

        let summary = financial_summary(&snapshot, &windows());

        assert_eq!(summary.today.income, 120.0);
        assert_eq!(summary.today.expenses, 45.0);
        assert_eq!(summary.today.profit, 75.0);
        // Yesterday's delivery only shows up in the wider windows.
        assert_eq!(summary.this_week.income, 150.0);
        assert_eq!(summary.all_time.income, 150.0);
        assert_eq!(summary.completed_orders, 3);
    }

    #[test]
    fn an_empty_snapshot_reports_flat_zeroes() {
        let summary = financial_summary(&Snapshot::default(), &windows());

        assert_eq!(summary.all_time.income, 0.0);
        assert_eq!(summary.all_time.profit, 0.0);
        assert_eq!(summary.margin_percent, 0.0);
        assert_eq!(summary.low_stock_count, 0);
    }

    #[test]
    fn daily_totals_partition_the_dated_records() {
        let snapshot = Snapshot {
            order_history: vec![
                delivered(10.0, "2024-01-13T10:00:00-06:00"),
                delivered(20.0, "2024-01-14T10:00:00-06:00"),
                delivered(40.0, "2024-01-15T10:00:00-06:00"),
                // Undated revenue sits outside every day window but still
                // counts toward the lifetime figure.
                OrderRecord {
                    total: 5.0,
                    ..OrderRecord::default()
                },
            ],
            ..Snapshot::default()
        };
        let windows = windows();

        let by_day: f64 = (0..7)
            .map(|offset| {
                let date = windows.today - time::Duration::days(offset);
                crate::reports::income_total(&snapshot.order_history, windows.day_window(date))
            })
            .sum();

        let summary = financial_summary(&snapshot, &windows);
        assert_eq!(by_day, 70.0);
        assert_eq!(summary.all_time.income, 75.0);
    }

    #[test]
    fn the_same_inputs_give_the_same_summary() {
        let snapshot = Snapshot {
            order_history: vec![delivered(50.0, "2024-01-15T10:00:00-06:00")],
            ..Snapshot::default()
        };

        let first = financial_summary(&snapshot, &windows());
        let second = financial_summary(&snapshot, &windows());
        assert_eq!(first.all_time, second.all_time);
        assert_eq!(first.today_orders, second.today_orders);
    }

    #[test]
    fn order_counts_track_status_and_creation_day() {
        let snapshot = Snapshot {
            orders: vec![
                Order {
                    status: OrderStatus::Pending,
                    created_at: EventDate::parse("2024-01-15T09:00:00-06:00"),
                    ..Order::default()
                },
                Order {
                    status: OrderStatus::Delivered,
                    created_at: EventDate::parse("2024-01-10T09:00:00-06:00"),
                    ..Order::default()
                },
            ],
            order_history: vec![OrderRecord {
                total: 25.0,
                created_at: EventDate::parse("2024-01-15T11:00:00-06:00"),
                ..OrderRecord::default()
            }],
            ..Snapshot::default()
        };

        let summary = financial_summary(&snapshot, &windows());

        assert_eq!(summary.today_orders, 2);
        assert_eq!(summary.pending_orders, 1);
        assert_eq!(summary.completed_orders, 1);
    }

    #[test]
    fn low_stock_feeds_the_headline_count() {
        let snapshot = Snapshot {
            inventory: vec![
                InventoryItem {
                    stock: 2.0,
                    ..InventoryItem::default()
                },
                InventoryItem {
                    stock: 20.0,
                    ..InventoryItem::default()
                },
            ],
            grocery: vec![GroceryItem {
                quantity: 1.0,
                ..GroceryItem::default()
            }],
            ..Snapshot::default()
        };

        let summary = financial_summary(&snapshot, &windows());
        assert_eq!(summary.low_stock_count, 2);
    }
}
