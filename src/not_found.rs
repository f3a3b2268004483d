//! The 404 page served for unknown routes.

use axum::{http::StatusCode, response::Response};

use crate::html::{error_view, render};

/// The fallback handler for routes that do not exist.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

pub(crate) fn get_404_not_found_response() -> Response {
    render(
        StatusCode::NOT_FOUND,
        error_view(
            "Not Found",
            "404",
            "Sorry, that page does not exist.",
            "Head back to the dashboard to find what you were looking for.",
        ),
    )
}
