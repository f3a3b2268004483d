//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    dashboard::{
        get_dashboard_page, get_expenses_breakdown, get_income_breakdown, get_low_stock_breakdown,
        get_profit_breakdown, get_stats, post_refresh,
    },
    endpoints,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::INCOME_BREAKDOWN, get(get_income_breakdown))
        .route(endpoints::EXPENSES_BREAKDOWN, get(get_expenses_breakdown))
        .route(endpoints::PROFIT_BREAKDOWN, get(get_profit_breakdown))
        .route(endpoints::LOW_STOCK_BREAKDOWN, get(get_low_stock_breakdown))
        .route(endpoints::STATS_API, get(get_stats))
        .route(endpoints::REFRESH_API, post(post_refresh))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}
