//! Daily time series for the trend charts.

use time::{Date, Duration};

/// One day's figure in a trend series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyAmount {
    /// The local calendar date.
    pub date: Date,
    /// The day's total.
    pub amount: f64,
}

/// One day's income, spending, and net in the profit trend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyLedger {
    /// The local calendar date.
    pub date: Date,
    /// Revenue on this day.
    pub income: f64,
    /// Spending on this day.
    pub expenses: f64,
    /// Income minus expenses for this day alone.
    pub profit: f64,
}

/// A series of daily totals ending on `today`, oldest day first.
///
/// Each day's figure comes from `amount_for`, which is expected to evaluate
/// a single calendar-day window. `days` of zero yields an empty series.
pub fn daily_series<F>(days: u16, today: Date, amount_for: F) -> impl Iterator<Item = DailyAmount>
where
    F: Fn(Date) -> f64,
{
    (0..i64::from(days)).rev().map(move |offset| {
        let date = today - Duration::days(offset);
        DailyAmount {
            date,
            amount: amount_for(date),
        }
    })
}

/// A series of daily income, expense, and profit figures, oldest day first.
pub fn daily_ledger<I, E>(
    days: u16,
    today: Date,
    income_for: I,
    expenses_for: E,
) -> impl Iterator<Item = DailyLedger>
where
    I: Fn(Date) -> f64,
    E: Fn(Date) -> f64,
{
    (0..i64::from(days)).rev().map(move |offset| {
        let date = today - Duration::days(offset);
        let income = income_for(date);
        let expenses = expenses_for(date);
        DailyLedger {
            date,
            income,
            expenses,
            profit: income - expenses,
        }
    })
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{daily_ledger, daily_series};

    #[test]
    fn runs_oldest_to_newest_ending_today() {
        let today = date!(2024-01-15);
        let dates: Vec<_> = daily_series(7, today, |_| 0.0).map(|day| day.date).collect();

        assert_eq!(dates.len(), 7);
        assert_eq!(dates[0], date!(2024-01-09));
        assert_eq!(dates[6], today);
    }

    #[test]
    fn crosses_month_boundaries() {
        let dates: Vec<_> = daily_series(3, date!(2024-03-01), |_| 0.0)
            .map(|day| day.date)
            .collect();

        assert_eq!(dates, [date!(2024-02-28), date!(2024-02-29), date!(2024-03-01)]);
    }

    #[test]
    fn applies_the_amount_function_per_day() {
        let today = date!(2024-01-15);
        let amounts: Vec<_> = daily_series(3, today, |date| {
            if date == today { 50.0 } else { 0.0 }
        })
        .map(|day| day.amount)
        .collect();

        assert_eq!(amounts, [0.0, 0.0, 50.0]);
    }

    #[test]
    fn ledger_profit_is_per_day() {
        let today = date!(2024-01-15);
        let ledger: Vec<_> = daily_ledger(2, today, |_| 40.0, |_| 15.0).collect();

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger[1].date, today);
        assert_eq!(ledger[1].profit, 25.0);
    }

    #[test]
    fn zero_days_is_an_empty_series() {
        assert_eq!(daily_series(0, date!(2024-01-15), |_| 1.0).count(), 0);
    }
}
