//! Alert fragments for displaying error messages inside htmx swap targets.

use maud::{Markup, html};

/// Render an error alert fragment.
pub fn error_alert(message: &str, details: &str) -> Markup {
    html! {
        div
            class="w-full p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
                dark:bg-gray-800 dark:text-red-400"
            role="alert"
        {
            p class="font-medium" { (message) }
            @if !details.is_empty() {
                p { (details) }
            }
        }
    }
}
