//! Alerts for telling users that an action failed.
//!
//! Alerts are rendered as HTML fragments that HTMX swaps into the
//! `#alert-container` element defined in [crate::html::base].

use axum::response::Html;
use maud::{Markup, html};

/// An alert message to display to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// An alert for an action that failed.
    Error { message: String, details: String },
}

impl Alert {
    /// Render the alert as an HTML fragment.
    pub fn into_html(self) -> Html<String> {
        Html(self.into_markup().into_string())
    }

    fn into_markup(self) -> Markup {
        let (container_style, message, details) = match self {
            Alert::Error { message, details } => (
                "flex flex-col gap-1 p-4 mb-4 text-sm text-red-800 rounded-lg \
                bg-red-50 dark:bg-gray-800 dark:text-red-400",
                message,
                details,
            ),
        };

        html!(
            div
                role="alert"
                class=(container_style)
                hx-swap-oob="true"
                id="alert-container"
            {
                p class="font-medium" { (message) }

                @if !details.is_empty() {
                    span { (details) }
                }

                button
                    type="button"
                    class="self-end underline"
                    onclick="this.closest('[role=alert]').classList.add('hidden')"
                {
                    "Dismiss"
                }
            }
        )
    }
}
