//! Pure aggregation over a [`Snapshot`](crate::snapshot::Snapshot).
//!
//! Every function in this module tree is a pure fold: it takes borrowed
//! snapshot data plus an explicit [`Window`](windows::Window) and returns a
//! value. Time and timezone enter exactly once, through
//! [`ReportWindows::resolve`](windows::ReportWindows::resolve), so totals are
//! reproducible for a fixed snapshot and clock reading.

pub mod expenses;
pub mod income;
pub mod low_stock;
pub mod profit;
pub mod rollup;
pub mod series;
pub mod summary;
pub mod windows;

pub use expenses::expense_total;
pub use income::income_total;
pub use low_stock::{LowStockReport, low_stock};
pub use profit::{margin, profit};
pub use rollup::{
    CategorySpend, CustomerActivity, ItemSales, PurposeUsage, category_breakdown, most_used_items,
    recent_customers, usage_by_purpose,
};
pub use series::{DailyAmount, DailyLedger, daily_ledger, daily_series};
pub use summary::{FinancialSummary, PeriodTotals, financial_summary};
pub use windows::{ReportWindows, Window};
