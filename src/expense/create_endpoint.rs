//! The endpoint for adding an expense.
use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    expense::{ExpenseFilter, NewExpense, create_expense, expenses_page::expenses_url},
    timezone::today_in,
};

/// The state needed for creating an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The raw add expense form.
///
/// The amount is kept as text so that a non-numeric amount is declined the
/// same way as any other invalid expense instead of being rejected by the
/// form extractor.
#[derive(Debug, Default, Deserialize)]
pub struct CreateExpenseForm {
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub note: String,
    /// The filter to show once the expense has been added.
    #[serde(default)]
    pub filter: ExpenseFilter,
}

/// A route handler for adding an expense dated today.
///
/// Invalid expenses are not saved and no message is shown, the expenses page
/// is reloaded either way.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    Form(form): Form<CreateExpenseForm>,
) -> Response {
    let redirect = (HxRedirect(expenses_url(form.filter)), StatusCode::SEE_OTHER);

    let new_expense = match parse_new_expense(&form) {
        Ok(new_expense) => new_expense,
        Err(error) => {
            tracing::debug!("Declined to create expense from {form:?}: {error}");
            return redirect.into_response();
        }
    };

    let today = match today_in(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_expense(new_expense, today, &connection) {
        Ok(()) => redirect.into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating an expense: {error}");
            error.into_alert_response()
        }
    }
}

fn parse_new_expense(form: &CreateExpenseForm) -> Result<NewExpense, String> {
    let amount = form
        .amount
        .trim()
        .parse::<f64>()
        .map_err(|error| format!("could not parse amount {:?}: {error}", form.amount))?;

    NewExpense::new(amount, &form.category, &form.note).map_err(|error| error.to_string())
}
