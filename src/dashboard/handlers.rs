//! Dashboard HTTP handlers and view rendering.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::Response,
};
use maud::{Markup, html};
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    dashboard::{
        breakdown::{
            expenses_breakdown_view, income_breakdown_view, low_stock_breakdown_view,
            profit_breakdown_view,
        },
        cards::{counter_cards, period_cards, stat_tiles},
    },
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, CARD_LABEL_STYLE, CARD_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency, format_day,
        render,
    },
    model::Order,
    reports::{
        CustomerActivity, FinancialSummary, ReportWindows, financial_summary, low_stock,
        recent_customers,
    },
    snapshot::Snapshot,
    timezone,
};

const UPCOMING_DELIVERIES: usize = 5;
const STOCK_ALERTS: usize = 5;
const RECENT_CUSTOMERS: usize = 5;

/// Display the overview page with the headline financial figures.
pub async fn get_dashboard_page(State(state): State<AppState>) -> Result<Response, Error> {
    let windows = ReportWindows::resolve(OffsetDateTime::now_utc(), state.timezone())?;

    let content = state.read_snapshot(|snapshot| dashboard_view(snapshot, &windows))?;

    Ok(render(StatusCode::OK, base("Dashboard", &content)))
}

/// The income breakdown panel, fetched into the dashboard by htmx.
pub async fn get_income_breakdown(State(state): State<AppState>) -> Response {
    breakdown_panel(&state, income_breakdown_view)
}

/// The expenses breakdown panel.
pub async fn get_expenses_breakdown(State(state): State<AppState>) -> Response {
    breakdown_panel(&state, expenses_breakdown_view)
}

/// The profit breakdown panel.
pub async fn get_profit_breakdown(State(state): State<AppState>) -> Response {
    breakdown_panel(&state, profit_breakdown_view)
}

/// The low-stock breakdown panel.
pub async fn get_low_stock_breakdown(State(state): State<AppState>) -> Response {
    let result = state.read_snapshot(|snapshot| low_stock_breakdown_view(snapshot));

    match result {
        Ok(markup) => render(StatusCode::OK, markup),
        Err(error) => error.into_alert_response(),
    }
}

/// The headline figures as JSON for external consumers.
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<FinancialSummary>, Error> {
    let windows = ReportWindows::resolve(OffsetDateTime::now_utc(), state.timezone())?;
    let summary = state.read_snapshot(|snapshot| financial_summary(snapshot, &windows))?;

    Ok(Json(summary))
}

/// Re-read the snapshot file and return the refreshed dashboard content.
///
/// Served as a response to an htmx POST, so failures come back as alert
/// fragments rather than full pages.
pub async fn post_refresh(State(state): State<AppState>) -> Response {
    let windows = match ReportWindows::resolve(OffsetDateTime::now_utc(), state.timezone()) {
        Ok(windows) => windows,
        Err(error) => return error.into_alert_response(),
    };

    if let Err(error) = state.reload() {
        return error.into_alert_response();
    }

    match state.read_snapshot(|snapshot| dashboard_view(snapshot, &windows)) {
        Ok(markup) => render(StatusCode::OK, markup),
        Err(error) => error.into_alert_response(),
    }
}

fn breakdown_panel(
    state: &AppState,
    view: impl Fn(&Snapshot, &ReportWindows) -> Markup,
) -> Response {
    let windows = match ReportWindows::resolve(OffsetDateTime::now_utc(), state.timezone()) {
        Ok(windows) => windows,
        Err(error) => return error.into_alert_response(),
    };

    match state.read_snapshot(|snapshot| view(snapshot, &windows)) {
        Ok(markup) => render(StatusCode::OK, markup),
        Err(error) => error.into_alert_response(),
    }
}

fn dashboard_view(snapshot: &Snapshot, windows: &ReportWindows) -> Markup {
    let summary = financial_summary(snapshot, windows);
    let deliveries = upcoming_deliveries(&snapshot.orders, windows);
    let customers = recent_customers(
        &snapshot.order_history,
        windows.timezone(),
        RECENT_CUSTOMERS,
    );

    html! {
        main id="dashboard" class=(PAGE_CONTAINER_STYLE) {
            div class="flex justify-between items-center w-full mb-4" {
                h2 class="text-2xl font-bold" { "Dashboard" }
                button
                    class=(BUTTON_PRIMARY_STYLE)
                    hx-post=(endpoints::REFRESH_API)
                    hx-target="#dashboard"
                    hx-swap="outerHTML"
                {
                    "Refresh"
                }
            }

            (stat_tiles(&summary))
            (period_cards(&summary))
            (counter_cards(&summary))

            div id="breakdown-panel" class="w-full mt-6" {}

            (upcoming_deliveries_view(&deliveries, windows))
            (recent_customers_view(&customers, windows))
            (stock_alerts_view(snapshot))
        }
    }
}

/// Customers from the order history, most recently seen first.
fn recent_customers_view(customers: &[CustomerActivity], windows: &ReportWindows) -> Markup {
    html! {
        section class="w-full mt-6" {
            h3 class="text-xl font-semibold mb-2" { "Recent Customers" }
            @if customers.is_empty() {
                p class=(CARD_LABEL_STYLE) { "No completed orders yet." }
            } @else {
                table class="w-full text-sm text-left" {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            th class=(TABLE_CELL_STYLE) { "Customer" }
                            th class=(TABLE_CELL_STYLE) { "Orders" }
                            th class=(TABLE_CELL_STYLE) { "Total Spent" }
                            th class=(TABLE_CELL_STYLE) { "Last Order" }
                        }
                    }
                    tbody {
                        @for customer in customers {
                            tr class=(TABLE_ROW_STYLE) {
                                td class=(TABLE_CELL_STYLE) { (customer.name) }
                                td class=(TABLE_CELL_STYLE) { (customer.orders) }
                                td class=(TABLE_CELL_STYLE) { (format_currency(customer.total_spent)) }
                                td class=(TABLE_CELL_STYLE) {
                                    @match customer.last_order {
                                        Some(instant) => {
                                            (format_day(timezone::local_date(windows.timezone(), instant)))
                                        }
                                        None => { "No date" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// The five scarcest inventory items under the low-stock threshold.
fn stock_alerts_view(snapshot: &Snapshot) -> Markup {
    let report = low_stock(
        &snapshot.inventory,
        &snapshot.grocery,
        snapshot.settings.low_stock_threshold,
    );
    let alerts: Vec<_> = report.inventory.iter().take(STOCK_ALERTS).collect();

    html! {
        section class="w-full mt-6" {
            h3 class="text-xl font-semibold mb-2" { "Stock Alerts" }
            @if alerts.is_empty() {
                p class=(CARD_LABEL_STYLE) { "All inventory items are sufficiently stocked." }
            } @else {
                div class="flex flex-col gap-2" {
                    @for item in alerts {
                        div class={(CARD_STYLE) " flex justify-between"} {
                            span { (item.name) }
                            span class="text-red-600 dark:text-red-400" {
                                (item.stock) " " (item.unit) " left"
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Open orders with a deadline, soonest first.
fn upcoming_deliveries<'a>(orders: &'a [Order], windows: &ReportWindows) -> Vec<&'a Order> {
    let timezone = windows.timezone();

    let mut upcoming: Vec<_> = orders
        .iter()
        .filter(|order| !order.status.is_fulfilled())
        .filter(|order| order.deadline.is_some())
        .collect();
    upcoming.sort_by_key(|order| order.deadline.map(|deadline| deadline.instant(timezone)));
    upcoming.truncate(UPCOMING_DELIVERIES);
    upcoming
}

fn upcoming_deliveries_view(deliveries: &[&Order], windows: &ReportWindows) -> Markup {
    html! {
        section class="w-full mt-6" {
            h3 class="text-xl font-semibold mb-2" { "Upcoming Deliveries" }
            @if deliveries.is_empty() {
                p class=(CARD_LABEL_STYLE) { "No deliveries scheduled." }
            } @else {
                div class="flex flex-col gap-2" {
                    @for order in deliveries {
                        div class={(CARD_STYLE) " flex justify-between"} {
                            span {
                                (if order.customer_name.is_empty() { "Unknown customer" } else { order.customer_name.as_str() })
                            }
                            span class=(CARD_LABEL_STYLE) {
                                @if let Some(deadline) = order.deadline {
                                    (format_day(deadline.calendar_date(windows.timezone())))
                                }
                            }
                            span { (format_currency(order.total)) }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        extract::State,
        http::{Response, StatusCode},
    };
    use scraper::{Html, Selector};

    use crate::{AppState, endpoints, snapshot::Snapshot};

    use super::{
        get_dashboard_page, get_income_breakdown, get_low_stock_breakdown, get_stats, post_refresh,
    };

    fn test_state(json: &str) -> AppState {
        AppState::with_snapshot(Snapshot::from_json(json).unwrap(), "Etc/UTC")
    }

    async fn parse_html(response: Response<Body>) -> Html {
        let body = response.into_body();
        let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        let text = String::from_utf8_lossy(&body).to_string();

        Html::parse_document(&text)
    }

    #[track_caller]
    fn assert_valid_html(html: &Html) {
        assert!(
            html.errors.is_empty(),
            "Got HTML parsing errors: {:?}",
            html.errors
        );
    }

    #[tokio::test]
    async fn dashboard_page_loads_successfully() {
        let state = test_state(
            r#"{
                "order_history": [
                    {"id": "h1", "total": 50, "delivered_at": "2024-01-15T10:00:00Z"}
                ],
                "inventory": [{"id": "i1", "name": "Candle", "stock": 2}]
            }"#,
        );

        let response = get_dashboard_page(State(state)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html(response).await;
        assert_valid_html(&html);

        let tiles = Selector::parse("button[hx-target='#breakdown-panel']").unwrap();
        assert_eq!(html.select(&tiles).count(), 4);

        let panel = Selector::parse("#breakdown-panel").unwrap();
        assert!(html.select(&panel).next().is_some());

        // The low-stock candle appears in the stock alerts list.
        assert!(html.html().contains("Candle"));
    }

    #[tokio::test]
    async fn dashboard_page_handles_an_empty_snapshot() {
        let response = get_dashboard_page(State(test_state("{}"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html(response).await;
        assert_valid_html(&html);
    }

    #[tokio::test]
    async fn dashboard_page_rejects_a_bad_timezone() {
        let state = AppState::with_snapshot(Snapshot::default(), "Mars/Olympus");
        let error = get_dashboard_page(State(state)).await.unwrap_err();

        assert_eq!(error, crate::Error::InvalidTimezone("Mars/Olympus".to_owned()));
    }

    #[tokio::test]
    async fn dashboard_page_lists_upcoming_deliveries() {
        let state = test_state(
            r#"{
                "orders": [
                    {"id": "o1", "customerName": "Dana", "total": 25, "status": "pending",
                     "deadline": "2099-06-02"},
                    {"id": "o2", "customerName": "Ravi", "total": 40, "status": "delivered",
                     "deadline": "2099-06-01"}
                ]
            }"#,
        );

        let response = get_dashboard_page(State(state)).await.unwrap();
        let html = parse_html(response).await;

        let body = html.html();
        assert!(body.contains("Dana"));
        // Delivered orders are no longer upcoming.
        assert!(!body.contains("Ravi"));
    }

    #[tokio::test]
    async fn dashboard_page_lists_recent_customers() {
        let state = test_state(
            r#"{
                "order_history": [
                    {"id": "h1", "customerName": "Ravi", "total": 40,
                     "delivered_at": "2024-01-10T09:00:00Z"},
                    {"id": "h2", "customerName": "Dana", "total": 25,
                     "delivered_at": "2024-01-15T10:00:00Z"}
                ]
            }"#,
        );

        let response = get_dashboard_page(State(state)).await.unwrap();
        let html = parse_html(response).await;

        let body = html.html();
        let dana = body.find("Dana").unwrap();
        let ravi = body.find("Ravi").unwrap();
        // The most recently seen customer is listed first.
        assert!(dana < ravi);
    }

    #[tokio::test]
    async fn income_breakdown_renders_as_a_fragment() {
        let state = test_state(
            r#"{
                "order_history": [
                    {"id": "h1", "customer_name": "Dana", "total": 50,
                     "delivered_at": "2024-01-15T10:00:00Z"}
                ]
            }"#,
        );

        let response = get_income_breakdown(State(state)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html(response).await;
        let heading = Selector::parse("h3").unwrap();
        let text: String = html.select(&heading).next().unwrap().text().collect();
        assert_eq!(text, "Income Breakdown");
    }

    #[tokio::test]
    async fn low_stock_breakdown_uses_the_configured_threshold() {
        let state = test_state(
            r#"{
                "inventory": [
                    {"id": "i1", "name": "Candle", "stock": 3},
                    {"id": "i2", "name": "Soap", "stock": 4}
                ],
                "settings": {"low_stock_threshold": 3}
            }"#,
        );

        let response = get_low_stock_breakdown(State(state)).await;
        let html = parse_html(response).await;

        let body = html.html();
        assert!(body.contains("Candle"));
        assert!(!body.contains("Soap"));
    }

    #[tokio::test]
    async fn stats_endpoint_returns_the_summary() {
        let state = test_state(
            r#"{
                "order_history": [
                    {"id": "h1", "total": 50, "delivered_at": "2024-01-15T10:00:00Z"}
                ]
            }"#,
        );

        let summary = get_stats(State(state)).await.unwrap().0;

        assert_eq!(summary.all_time.income, 50.0);
        assert_eq!(summary.completed_orders, 1);
    }

    #[tokio::test]
    async fn refresh_with_no_backing_file_returns_an_alert() {
        let response = post_refresh(State(test_state("{}"))).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let html = parse_html(response).await;
        let alert = Selector::parse("div[role='alert']").unwrap();
        assert!(html.select(&alert).next().is_some());
    }

    #[tokio::test]
    async fn refresh_endpoint_is_wired_to_the_dashboard() {
        let state = test_state("{}");
        let response = get_dashboard_page(State(state)).await.unwrap();
        let html = parse_html(response).await;

        let refresh = Selector::parse(&format!("button[hx-post='{}']", endpoints::REFRESH_API)).unwrap();
        assert!(html.select(&refresh).next().is_some());
    }
}
