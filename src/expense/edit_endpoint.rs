//! The endpoint for saving changes to an expense.
use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    database_id::ExpenseId,
    expense::{
        ExpenseUpdate,
        expenses_page::{FilterQuery, expenses_url},
        update_expense,
    },
};

/// The state needed for updating an expense.
#[derive(Debug, Clone)]
pub struct EditExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EditExpenseForm {
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub note: String,
}

/// A route handler for overwriting the amount, category and note of an expense.
///
/// The new values are saved as given, apart from trimming whitespace. Saving
/// an expense that no longer exists changes nothing.
pub async fn edit_expense_endpoint(
    Path(expense_id): Path<ExpenseId>,
    State(state): State<EditExpenseState>,
    Query(query): Query<FilterQuery>,
    Form(form): Form<EditExpenseForm>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let update = ExpenseUpdate::new(form.amount, &form.category, &form.note);

    match update_expense(expense_id, update, &connection) {
        Ok(rows_affected) => {
            if rows_affected == 0 {
                tracing::warn!("Tried to update expense {expense_id}, but it does not exist");
            }

            (
                HxRedirect(expenses_url(query.filter)),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating expense {expense_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}
