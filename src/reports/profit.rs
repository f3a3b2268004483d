//! Profit and margin arithmetic.

/// Net profit for a window.
pub fn profit(income: f64, expenses: f64) -> f64 {
    income - expenses
}

/// Profit as a percentage of income.
///
/// Returns zero when there is no income rather than dividing by it, so a
/// brand-new ledger shows a flat 0% instead of NaN.
pub fn margin(income: f64, profit: f64) -> f64 {
    if income > 0.0 { profit / income * 100.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::{margin, profit};

    #[test]
    fn profit_is_income_minus_expenses() {
        assert_eq!(profit(120.0, 45.0), 75.0);
        assert_eq!(profit(20.0, 45.0), -25.0);
    }

    #[test]
    fn margin_of_an_empty_ledger_is_zero() {
        assert_eq!(margin(0.0, 0.0), 0.0);
        assert_eq!(margin(0.0, -50.0), 0.0);
    }

    #[test]
    fn margin_can_be_negative() {
        assert_eq!(margin(100.0, -25.0), -25.0);
        assert_eq!(margin(200.0, 50.0), 25.0);
    }
}
