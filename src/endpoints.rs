//! The API endpoint URIs.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The dashboard overview page.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The income breakdown panel.
pub const INCOME_BREAKDOWN: &str = "/dashboard/breakdown/income";
/// The expenses breakdown panel.
pub const EXPENSES_BREAKDOWN: &str = "/dashboard/breakdown/expenses";
/// The profit breakdown panel.
pub const PROFIT_BREAKDOWN: &str = "/dashboard/breakdown/profit";
/// The low-stock breakdown panel.
pub const LOW_STOCK_BREAKDOWN: &str = "/dashboard/breakdown/low-stock";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The headline figures as JSON.
pub const STATS_API: &str = "/api/stats";
/// The route to re-read the snapshot file.
pub const REFRESH_API: &str = "/api/refresh";

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::DASHBOARD_VIEW);
        assert_endpoint_is_valid_uri(endpoints::INCOME_BREAKDOWN);
        assert_endpoint_is_valid_uri(endpoints::EXPENSES_BREAKDOWN);
        assert_endpoint_is_valid_uri(endpoints::PROFIT_BREAKDOWN);
        assert_endpoint_is_valid_uri(endpoints::LOW_STOCK_BREAKDOWN);
        assert_endpoint_is_valid_uri(endpoints::STATIC);

        assert_endpoint_is_valid_uri(endpoints::STATS_API);
        assert_endpoint_is_valid_uri(endpoints::REFRESH_API);
    }
}
