//! Dashboard module
//!
//! Provides an overview page with the headline financial figures, plus
//! htmx-driven breakdown panels, a JSON stats endpoint, and a snapshot
//! refresh endpoint.

mod breakdown;
mod cards;
mod handlers;

pub use handlers::{
    get_dashboard_page, get_expenses_breakdown, get_income_breakdown, get_low_stock_breakdown,
    get_profit_breakdown, get_stats, post_refresh,
};
