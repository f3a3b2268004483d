//! Stallkeeper is a web dashboard for a small home-goods business.
//!
//! It ingests a JSON export of the shop's records and serves HTML pages
//! summarising income, spending, profit, and stock levels, with every
//! figure computed in the shop's business timezone.

#![warn(missing_docs)]

use std::{net::SocketAddr, path::PathBuf, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod dashboard;
mod endpoints;
mod html;
pub mod model;
mod not_found;
pub mod reports;
mod routing;
pub mod snapshot;
mod state;
mod timezone;

pub use reports::{FinancialSummary, ReportWindows, financial_summary};
pub use routing::build_router;
pub use state::AppState;

use crate::{
    alert::error_alert,
    html::{error_view, render},
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The configured timezone is not a canonical IANA name.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// The snapshot file could not be read from disk.
    #[error("could not read snapshot file {path}: {reason}")]
    SnapshotRead {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying IO error, as a string for comparability.
        reason: String,
    },

    /// The snapshot file was not valid export JSON.
    #[error("could not parse snapshot: {0}")]
    SnapshotParse(String),

    /// The snapshot lock was poisoned by a panicking thread.
    #[error("could not acquire the snapshot lock")]
    SnapshotLock,

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A struct could not be serialized as JSON.
    #[error("could not serialize as JSON: {0}")]
    JsonSerialization(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezone(timezone) => render(
                StatusCode::INTERNAL_SERVER_ERROR,
                error_view(
                    "Internal Server Error",
                    "500",
                    "Invalid Timezone Settings",
                    &format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                        ensure the timezone has been set to a valid, canonical timezone string"
                    ),
                ),
            ),
            Error::SnapshotRead { path, reason } => {
                tracing::error!("could not read snapshot {}: {reason}", path.display());
                render(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_view(
                        "Internal Server Error",
                        "500",
                        "Snapshot Unavailable",
                        "The data export could not be read. Check the snapshot path and try again.",
                    ),
                )
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_view(
                        "Internal Server Error",
                        "500",
                        "Sorry, something went wrong.",
                        "Try again later or check the server logs",
                    ),
                )
            }
        }
    }
}

impl Error {
    /// Render the error as an alert partial for requests made by htmx.
    ///
    /// Full-page error responses would replace a panel with an entire
    /// document, so partial handlers return an alert fragment instead.
    fn into_alert_response(self) -> Response {
        match self {
            Error::InvalidTimezone(timezone) => render(
                StatusCode::INTERNAL_SERVER_ERROR,
                error_alert(
                    "Invalid Timezone Settings",
                    &format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                        ensure the timezone has been set to a valid, canonical timezone string"
                    ),
                ),
            ),
            Error::SnapshotRead { path, reason } => {
                tracing::error!("could not read snapshot {}: {reason}", path.display());
                render(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_alert(
                        "Refresh failed",
                        "The data export could not be re-read. The dashboard is still showing the previous snapshot.",
                    ),
                )
            }
            Error::SnapshotParse(reason) => {
                tracing::error!("could not parse snapshot: {reason}");
                render(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_alert(
                        "Refresh failed",
                        "The data export could not be parsed. The dashboard is still showing the previous snapshot.",
                    ),
                )
            }
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_alert(
                        "Something went wrong",
                        "An unexpected error occurred, check the server logs for more details.",
                    ),
                )
            }
        }
    }
}
