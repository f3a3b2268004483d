//! The htmx breakdown panels behind each dashboard stat tile.

use maud::{Markup, html};
use time::OffsetDateTime;
use time_tz::Tz;

use crate::{
    html::{
        CARD_LABEL_STYLE, CARD_STYLE, CARD_VALUE_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, format_currency, format_day,
    },
    model::{EventDate, GroceryItem, OrderRecord, Transaction, TransactionKind},
    reports::{
        DailyAmount, ReportWindows, category_breakdown, daily_ledger, daily_series, expense_total,
        income_total, low_stock, margin, most_used_items, profit, usage_by_purpose,
    },
    snapshot::Snapshot,
};

const TREND_DAYS: u16 = 7;
const RECENT_ORDERS: usize = 10;
const RECENT_TRANSACTIONS: usize = 5;
const RECENT_PURCHASES: usize = 5;
const POPULAR_ITEMS: usize = 5;

pub(super) fn income_breakdown_view(snapshot: &Snapshot, windows: &ReportWindows) -> Markup {
    let daily: Vec<_> = daily_series(TREND_DAYS, windows.today, |date| {
        income_total(&snapshot.order_history, windows.day_window(date))
    })
    .collect();

    let popular = most_used_items(&snapshot.orders, &snapshot.order_history, POPULAR_ITEMS);
    let recent = recent_orders(&snapshot.order_history, windows.timezone());

    html! {
        section {
            h3 class="text-xl font-semibold mb-4" { "Income Breakdown" }

            div class="grid grid-cols-2 sm:grid-cols-4 gap-4" {
                (figure_card("Today", income_total(&snapshot.order_history, windows.today_window())))
                (figure_card("This Week", income_total(&snapshot.order_history, windows.week_window())))
                (figure_card("This Month", income_total(&snapshot.order_history, windows.month_window())))
                (figure_card("All Time", income_total(&snapshot.order_history, windows.all_time())))
            }

            (daily_table("Daily Income", &daily))

            @if !popular.is_empty() {
                h4 class="font-semibold mt-6 mb-2" { "Popular Items" }
                table class="w-full text-sm text-left" {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            th class=(TABLE_CELL_STYLE) { "Item" }
                            th class=(TABLE_CELL_STYLE) { "Sold" }
                        }
                    }
                    tbody {
                        @for item in &popular {
                            tr class=(TABLE_ROW_STYLE) {
                                td class=(TABLE_CELL_STYLE) { (item.name) }
                                td class=(TABLE_CELL_STYLE) { (item.sold) }
                            }
                        }
                    }
                }
            }

            h4 class="font-semibold mt-6 mb-2" { "Recent Orders" }
            @if recent.is_empty() {
                p class=(CARD_LABEL_STYLE) { "No completed orders yet." }
            } @else {
                table class="w-full text-sm text-left" {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            th class=(TABLE_CELL_STYLE) { "Customer" }
                            th class=(TABLE_CELL_STYLE) { "Date" }
                            th class=(TABLE_CELL_STYLE) { "Total" }
                        }
                    }
                    tbody {
                        @for order in &recent {
                            tr class=(TABLE_ROW_STYLE) {
                                td class=(TABLE_CELL_STYLE) { (customer_label(&order.customer_name)) }
                                td class=(TABLE_CELL_STYLE) { (event_label(order.effective_date(), windows.timezone())) }
                                td class=(TABLE_CELL_STYLE) { (format_currency(order.total)) }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub(super) fn expenses_breakdown_view(snapshot: &Snapshot, windows: &ReportWindows) -> Markup {
    let daily: Vec<_> = daily_series(TREND_DAYS, windows.today, |date| {
        expense_total(&snapshot.transactions, &snapshot.grocery, windows.day_window(date))
    })
    .collect();

    let categories = category_breakdown(&snapshot.grocery);
    let transactions = recent_expense_transactions(&snapshot.transactions, windows.timezone());
    let purchases = recent_purchases(&snapshot.grocery, windows.timezone());

    html! {
        section {
            h3 class="text-xl font-semibold mb-4" { "Expenses Breakdown" }

            div class="grid grid-cols-2 sm:grid-cols-4 gap-4" {
                (figure_card("Today", expense_total(&snapshot.transactions, &snapshot.grocery, windows.today_window())))
                (figure_card("This Week", expense_total(&snapshot.transactions, &snapshot.grocery, windows.week_window())))
                (figure_card("This Month", expense_total(&snapshot.transactions, &snapshot.grocery, windows.month_window())))
                (figure_card("All Time", expense_total(&snapshot.transactions, &snapshot.grocery, windows.all_time())))
            }

            (daily_table("Daily Expenses", &daily))

            @if !categories.is_empty() {
                h4 class="font-semibold mt-6 mb-2" { "Grocery Spend by Category" }
                table class="w-full text-sm text-left" {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            th class=(TABLE_CELL_STYLE) { "Category" }
                            th class=(TABLE_CELL_STYLE) { "Purchases" }
                            th class=(TABLE_CELL_STYLE) { "Total Cost" }
                        }
                    }
                    tbody {
                        @for category in &categories {
                            tr class=(TABLE_ROW_STYLE) {
                                td class=(TABLE_CELL_STYLE) { (category.category) }
                                td class=(TABLE_CELL_STYLE) { (category.items) }
                                td class=(TABLE_CELL_STYLE) { (format_currency(category.total_cost)) }
                            }
                        }
                    }
                }
            }

            h4 class="font-semibold mt-6 mb-2" { "Recent Transactions" }
            @if transactions.is_empty() {
                p class=(CARD_LABEL_STYLE) { "No expense transactions yet." }
            } @else {
                table class="w-full text-sm text-left" {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            th class=(TABLE_CELL_STYLE) { "Category" }
                            th class=(TABLE_CELL_STYLE) { "Date" }
                            th class=(TABLE_CELL_STYLE) { "Amount" }
                        }
                    }
                    tbody {
                        @for transaction in &transactions {
                            tr class=(TABLE_ROW_STYLE) {
                                td class=(TABLE_CELL_STYLE) { (category_label(&transaction.category)) }
                                td class=(TABLE_CELL_STYLE) { (event_label(transaction.effective_date(), windows.timezone())) }
                                td class=(TABLE_CELL_STYLE) { (format_currency(transaction.amount)) }
                            }
                        }
                    }
                }
            }

            h4 class="font-semibold mt-6 mb-2" { "Recent Grocery Purchases" }
            @if purchases.is_empty() {
                p class=(CARD_LABEL_STYLE) { "No grocery purchases yet." }
            } @else {
                table class="w-full text-sm text-left" {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            th class=(TABLE_CELL_STYLE) { "Item" }
                            th class=(TABLE_CELL_STYLE) { "Purchased" }
                            th class=(TABLE_CELL_STYLE) { "Cost" }
                        }
                    }
                    tbody {
                        @for item in &purchases {
                            tr class=(TABLE_ROW_STYLE) {
                                td class=(TABLE_CELL_STYLE) { (item.item_name) }
                                td class=(TABLE_CELL_STYLE) { (event_label(item.purchase_date, windows.timezone())) }
                                td class=(TABLE_CELL_STYLE) { (format_currency(item.cost)) }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub(super) fn profit_breakdown_view(snapshot: &Snapshot, windows: &ReportWindows) -> Markup {
    let period = |window| {
        let income = income_total(&snapshot.order_history, window);
        let expenses = expense_total(&snapshot.transactions, &snapshot.grocery, window);
        profit(income, expenses)
    };

    let all_time_income = income_total(&snapshot.order_history, windows.all_time());
    let all_time_profit = period(windows.all_time());

    let ledger: Vec<_> = daily_ledger(
        TREND_DAYS,
        windows.today,
        |date| income_total(&snapshot.order_history, windows.day_window(date)),
        |date| expense_total(&snapshot.transactions, &snapshot.grocery, windows.day_window(date)),
    )
    .collect();

    html! {
        section {
            h3 class="text-xl font-semibold mb-4" { "Profit Breakdown" }

            div class="grid grid-cols-2 sm:grid-cols-4 gap-4" {
                (figure_card("Today", period(windows.today_window())))
                (figure_card("This Week", period(windows.week_window())))
                (figure_card("This Month", period(windows.month_window())))
                (figure_card("All Time", all_time_profit))
            }

            div class={(CARD_STYLE) " mt-4"} {
                p class=(CARD_LABEL_STYLE) { "All-Time Margin" }
                p class=(CARD_VALUE_STYLE) {
                    (format!("{:.1}%", margin(all_time_income, all_time_profit)))
                }
            }

            h4 class="font-semibold mt-6 mb-2" { "Daily Profit" }
            table class="w-full text-sm text-left" {
                thead class=(TABLE_HEADER_STYLE) {
                    tr {
                        th class=(TABLE_CELL_STYLE) { "Day" }
                        th class=(TABLE_CELL_STYLE) { "Income" }
                        th class=(TABLE_CELL_STYLE) { "Expenses" }
                        th class=(TABLE_CELL_STYLE) { "Profit" }
                    }
                }
                tbody {
                    @for day in &ledger {
                        tr class=(TABLE_ROW_STYLE) {
                            td class=(TABLE_CELL_STYLE) { (format_day(day.date)) }
                            td class=(TABLE_CELL_STYLE) { (format_currency(day.income)) }
                            td class=(TABLE_CELL_STYLE) { (format_currency(day.expenses)) }
                            td class=(TABLE_CELL_STYLE) { (format_currency(day.profit)) }
                        }
                    }
                }
            }
        }
    }
}

pub(super) fn low_stock_breakdown_view(snapshot: &Snapshot) -> Markup {
    let threshold = snapshot.settings.low_stock_threshold;
    let report = low_stock(&snapshot.inventory, &snapshot.grocery, threshold);
    let usage = usage_by_purpose(&snapshot.grocery_usage);

    html! {
        section {
            h3 class="text-xl font-semibold mb-4" { "Low Stock" }
            p class={(CARD_LABEL_STYLE) " mb-4"} {
                "Items at or below the threshold of " (threshold) " units."
            }

            h4 class="font-semibold mt-2 mb-2" { "Inventory" }
            @if report.inventory.is_empty() {
                p class=(CARD_LABEL_STYLE) { "All inventory items are sufficiently stocked." }
            } @else {
                table class="w-full text-sm text-left" {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            th class=(TABLE_CELL_STYLE) { "Item" }
                            th class=(TABLE_CELL_STYLE) { "Stock" }
                            th class=(TABLE_CELL_STYLE) { "Unit" }
                        }
                    }
                    tbody {
                        @for item in &report.inventory {
                            tr class=(TABLE_ROW_STYLE) {
                                td class=(TABLE_CELL_STYLE) { (item.name) }
                                td class=(TABLE_CELL_STYLE) { (item.stock) }
                                td class=(TABLE_CELL_STYLE) { (item.unit) }
                            }
                        }
                    }
                }
            }

            h4 class="font-semibold mt-6 mb-2" { "Grocery Supplies" }
            @if report.grocery.is_empty() {
                p class=(CARD_LABEL_STYLE) { "All grocery supplies are sufficiently stocked." }
            } @else {
                table class="w-full text-sm text-left" {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            th class=(TABLE_CELL_STYLE) { "Item" }
                            th class=(TABLE_CELL_STYLE) { "Quantity" }
                            th class=(TABLE_CELL_STYLE) { "Unit" }
                        }
                    }
                    tbody {
                        @for item in &report.grocery {
                            tr class=(TABLE_ROW_STYLE) {
                                td class=(TABLE_CELL_STYLE) { (item.item_name) }
                                td class=(TABLE_CELL_STYLE) { (item.quantity) }
                                td class=(TABLE_CELL_STYLE) { (item.unit) }
                            }
                        }
                    }
                }
            }

            @if !usage.is_empty() {
                h4 class="font-semibold mt-6 mb-2" { "Usage by Purpose" }
                table class="w-full text-sm text-left" {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            th class=(TABLE_CELL_STYLE) { "Purpose" }
                            th class=(TABLE_CELL_STYLE) { "Used" }
                            th class=(TABLE_CELL_STYLE) { "Records" }
                        }
                    }
                    tbody {
                        @for entry in &usage {
                            tr class=(TABLE_ROW_STYLE) {
                                td class=(TABLE_CELL_STYLE) { (entry.purpose) }
                                td class=(TABLE_CELL_STYLE) { (entry.quantity_used) }
                                td class=(TABLE_CELL_STYLE) { (entry.records) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn figure_card(label: &str, amount: f64) -> Markup {
    html! {
        div class=(CARD_STYLE) {
            p class=(CARD_LABEL_STYLE) { (label) }
            p class=(CARD_VALUE_STYLE) { (format_currency(amount)) }
        }
    }
}

fn daily_table(heading: &str, daily: &[DailyAmount]) -> Markup {
    html! {
        h4 class="font-semibold mt-6 mb-2" { (heading) }
        table class="w-full text-sm text-left" {
            thead class=(TABLE_HEADER_STYLE) {
                tr {
                    th class=(TABLE_CELL_STYLE) { "Day" }
                    th class=(TABLE_CELL_STYLE) { "Amount" }
                }
            }
            tbody {
                @for day in daily {
                    tr class=(TABLE_ROW_STYLE) {
                        td class=(TABLE_CELL_STYLE) { (format_day(day.date)) }
                        td class=(TABLE_CELL_STYLE) { (format_currency(day.amount)) }
                    }
                }
            }
        }
    }
}

fn customer_label(name: &str) -> &str {
    if name.is_empty() { "Unknown customer" } else { name }
}

fn category_label(category: &str) -> &str {
    if category.is_empty() { "Uncategorized" } else { category }
}

fn event_label(event: Option<EventDate>, timezone: &'static Tz) -> String {
    match event {
        Some(event) => format_day(event.calendar_date(timezone)),
        None => "No date".to_owned(),
    }
}

// Sorting descending on Reverse(Option) leaves undated records at the back,
// since None is the minimum.

fn recent_orders<'a>(history: &'a [OrderRecord], timezone: &'static Tz) -> Vec<&'a OrderRecord> {
    most_recent(history, RECENT_ORDERS, |order| {
        order.effective_date().map(|event| event.instant(timezone))
    })
}

fn recent_expense_transactions<'a>(
    transactions: &'a [Transaction],
    timezone: &'static Tz,
) -> Vec<&'a Transaction> {
    let expenses: Vec<_> = transactions
        .iter()
        .filter(|transaction| transaction.kind == TransactionKind::Expense)
        .collect();

    let mut sorted = expenses;
    sorted.sort_by_key(|transaction| {
        std::cmp::Reverse(
            transaction
                .effective_date()
                .map(|event| event.instant(timezone)),
        )
    });
    sorted.truncate(RECENT_TRANSACTIONS);
    sorted
}

fn recent_purchases<'a>(grocery: &'a [GroceryItem], timezone: &'static Tz) -> Vec<&'a GroceryItem> {
    most_recent(grocery, RECENT_PURCHASES, |item| {
        item.purchase_date.map(|event| event.instant(timezone))
    })
}

fn most_recent<T, K>(records: &[T], limit: usize, instant_of: K) -> Vec<&T>
where
    K: Fn(&T) -> Option<OffsetDateTime>,
{
    let mut sorted: Vec<_> = records.iter().collect();
    sorted.sort_by_key(|record| std::cmp::Reverse(instant_of(record)));
    sorted.truncate(limit);
    sorted
}
