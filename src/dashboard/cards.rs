//! Card components for the dashboard's headline figures.

use maud::{Markup, html};

use crate::{
    endpoints,
    html::{CARD_LABEL_STYLE, CARD_STYLE, CARD_VALUE_STYLE, format_currency},
    reports::{FinancialSummary, PeriodTotals},
};

/// The clickable stat tiles at the top of the dashboard.
///
/// Each tile fetches its breakdown panel into `#breakdown-panel` via htmx.
pub(super) fn stat_tiles(summary: &FinancialSummary) -> Markup {
    html! {
        div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4 w-full" {
            (stat_tile(
                "Today's Income",
                &format_currency(summary.today.income),
                endpoints::INCOME_BREAKDOWN,
            ))
            (stat_tile(
                "Today's Expenses",
                &format_currency(summary.today.expenses),
                endpoints::EXPENSES_BREAKDOWN,
            ))
            (stat_tile(
                "Today's Profit",
                &format_currency(summary.today.profit),
                endpoints::PROFIT_BREAKDOWN,
            ))
            (stat_tile(
                "Low Stock Items",
                &summary.low_stock_count.to_string(),
                endpoints::LOW_STOCK_BREAKDOWN,
            ))
        }
    }
}

fn stat_tile(label: &str, value: &str, breakdown_endpoint: &str) -> Markup {
    html! {
        button
            class={(CARD_STYLE) " text-left cursor-pointer hover:border-blue-500"}
            hx-get=(breakdown_endpoint)
            hx-target="#breakdown-panel"
            hx-swap="innerHTML"
        {
            p class=(CARD_LABEL_STYLE) { (label) }
            p class=(CARD_VALUE_STYLE) { (value) }
        }
    }
}

/// The wider period summary cards below the stat tiles.
pub(super) fn period_cards(summary: &FinancialSummary) -> Markup {
    html! {
        div class="grid grid-cols-1 sm:grid-cols-3 gap-4 w-full mt-4" {
            (period_card("This Week", &summary.this_week))
            (period_card("This Month", &summary.this_month))
            (all_time_card(summary))
        }
    }
}

pub(super) fn period_card(label: &str, totals: &PeriodTotals) -> Markup {
    html! {
        div class=(CARD_STYLE) {
            p class="font-semibold mb-2" { (label) }
            (figure_row("Income", totals.income))
            (figure_row("Expenses", totals.expenses))
            (figure_row("Profit", totals.profit))
        }
    }
}

fn all_time_card(summary: &FinancialSummary) -> Markup {
    html! {
        div class=(CARD_STYLE) {
            p class="font-semibold mb-2" { "All Time" }
            (figure_row("Income", summary.all_time.income))
            (figure_row("Expenses", summary.all_time.expenses))
            (figure_row("Profit", summary.all_time.profit))
            div class="flex justify-between text-sm mt-1" {
                span class=(CARD_LABEL_STYLE) { "Margin" }
                span { (format!("{:.1}%", summary.margin_percent)) }
            }
        }
    }
}

fn figure_row(label: &str, amount: f64) -> Markup {
    let amount_style = if amount < 0.0 { "text-red-600 dark:text-red-400" } else { "" };

    html! {
        div class="flex justify-between text-sm" {
            span class=(CARD_LABEL_STYLE) { (label) }
            span class=(amount_style) { (format_currency(amount)) }
        }
    }
}

/// The order and data-quality counters shown beside the period cards.
pub(super) fn counter_cards(summary: &FinancialSummary) -> Markup {
    html! {
        div class="grid grid-cols-2 sm:grid-cols-4 gap-4 w-full mt-4" {
            (counter_card("Orders Today", summary.today_orders))
            (counter_card("Pending Orders", summary.pending_orders))
            (counter_card("Completed Orders", summary.completed_orders))
            @if summary.undated_records.total() > 0 {
                (counter_card("Undated Records", summary.undated_records.total()))
            }
        }
    }
}

fn counter_card(label: &str, count: usize) -> Markup {
    html! {
        div class=(CARD_STYLE) {
            p class=(CARD_LABEL_STYLE) { (label) }
            p class=(CARD_VALUE_STYLE) { (count) }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::{counter_cards, stat_tiles};
    use crate::{
        endpoints,
        reports::{FinancialSummary, PeriodTotals},
        snapshot::DataQuality,
    };

    fn summary() -> FinancialSummary {
        let zero = PeriodTotals {
            income: 0.0,
            expenses: 0.0,
            profit: 0.0,
        };
        FinancialSummary {
            today: PeriodTotals {
                income: 120.0,
                expenses: 45.0,
                profit: 75.0,
            },
            this_week: zero,
            this_month: zero,
            all_time: zero,
            margin_percent: 0.0,
            today_orders: 2,
            pending_orders: 1,
            completed_orders: 3,
            low_stock_count: 4,
            undated_records: DataQuality::default(),
        }
    }

    #[test]
    fn every_tile_points_at_the_breakdown_panel() {
        let html = Html::parse_fragment(&stat_tiles(&summary()).into_string());
        let selector = Selector::parse("button[hx-target='#breakdown-panel']").unwrap();

        let endpoints: Vec<_> = html
            .select(&selector)
            .map(|tile| tile.value().attr("hx-get").unwrap())
            .collect();

        assert_eq!(
            endpoints,
            [
                endpoints::INCOME_BREAKDOWN,
                endpoints::EXPENSES_BREAKDOWN,
                endpoints::PROFIT_BREAKDOWN,
                endpoints::LOW_STOCK_BREAKDOWN,
            ]
        );
    }

    #[test]
    fn tiles_show_formatted_figures() {
        let rendered = stat_tiles(&summary()).into_string();
        assert!(rendered.contains("$120.00"));
        assert!(rendered.contains("$45.00"));
        assert!(rendered.contains("$75.00"));
    }

    #[test]
    fn the_undated_counter_is_hidden_when_clean() {
        let rendered = counter_cards(&summary()).into_string();
        assert!(!rendered.contains("Undated Records"));
    }
}
