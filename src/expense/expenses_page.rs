//! The expenses page: filter controls, totals, chart, add form, the list of
//! expenses and the edit dialog.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    AppState, Error,
    database_id::ExpenseId,
    endpoints,
    expense::{
        CategoryTotal, Expense, ExpenseFilter, ExpenseSummary,
        chart::{category_chart_scripts, category_chart_view},
        form::{ExpenseFormDefaults, expense_form_fields},
        get_expense, list_expenses,
    },
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CATEGORY_BADGE_STYLE,
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, format_currency,
    },
    timezone::today_in,
};

/// The max number of graphemes to display in the note column before
/// truncating and displaying ellipses.
const MAX_NOTE_GRAPHEMES: usize = 32;

/// The query parameters for the expenses page.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ExpensesQuery {
    /// Which expenses to show. Defaults to all expenses.
    #[serde(default)]
    pub filter: ExpenseFilter,
    /// The ID of the expense to show in the edit dialog, if any.
    pub edit: Option<ExpenseId>,
}

/// The query parameters for the endpoints that redirect back to the expenses page.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    pub filter: ExpenseFilter,
}

/// The URL of the expenses page showing `filter`.
pub fn expenses_url(filter: ExpenseFilter) -> String {
    format!(
        "{}?filter={}",
        endpoints::EXPENSES_VIEW,
        filter.as_query_value()
    )
}

/// The URL of the expenses page showing `filter` with the edit dialog open for `expense_id`.
pub fn edit_expense_url(filter: ExpenseFilter, expense_id: ExpenseId) -> String {
    format!("{}&edit={expense_id}", expenses_url(filter))
}

fn expense_endpoint_url(filter: ExpenseFilter, expense_id: ExpenseId) -> String {
    format!(
        "{}?filter={}",
        endpoints::format_endpoint(endpoints::EXPENSE, expense_id),
        filter.as_query_value()
    )
}

/// The state needed for the expenses page.
#[derive(Debug, Clone)]
pub struct ExpensesPageState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for ExpensesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the expenses matching the filter in `query`, along with their totals.
///
/// The expenses are listed once and every total on the page is derived from
/// that one list.
pub async fn get_expenses_page(
    State(state): State<ExpensesPageState>,
    Query(query): Query<ExpensesQuery>,
) -> Result<Response, Error> {
    let today = today_in(&state.local_timezone)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expenses = list_expenses(query.filter, today, &connection)?;
    let summary = ExpenseSummary::new(query.filter, expenses);

    let editing = match query.edit {
        Some(expense_id) => match get_expense(expense_id, &connection) {
            Ok(expense) => Some(expense),
            Err(Error::NotFound) => {
                tracing::warn!("Tried to edit expense {expense_id}, but it does not exist");
                None
            }
            Err(error) => return Err(error),
        },
        None => None,
    };

    Ok(expenses_view(&summary, editing.as_ref()).into_response())
}

fn expenses_view(summary: &ExpenseSummary, editing: Option<&Expense>) -> Markup {
    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-4xl space-y-6"
            {
                h1 class="text-2xl font-bold" { "Expenses" }

                (filter_links_view(summary.filter))

                section class="grid grid-cols-1 md:grid-cols-2 gap-4"
                {
                    (total_view(summary.total))
                    (category_totals_view(&summary.category_totals))
                }

                (category_chart_view(&summary.category_totals))

                (add_expense_form_view(summary.filter))

                (expense_list_view(summary.filter, &summary.expenses))
            }
        }

        @if let Some(expense) = editing {
            (edit_expense_dialog_view(summary.filter, expense))
        }
    );

    base(
        "Expenses",
        &category_chart_scripts(&summary.category_totals),
        &content,
    )
}

fn filter_links_view(active_filter: ExpenseFilter) -> Markup {
    const ACTIVE_STYLE: &str = "px-4 py-2 text-sm font-medium rounded bg-blue-600 text-white";
    const INACTIVE_STYLE: &str = "px-4 py-2 text-sm font-medium rounded text-gray-900 \
        bg-white border border-gray-200 hover:bg-gray-100 dark:bg-gray-800 \
        dark:text-white dark:border-gray-600 dark:hover:bg-gray-700";

    html!(
        nav id="filters" class="flex gap-2" aria-label="Filter expenses"
        {
            @for filter in ExpenseFilter::ALL {
                @let is_active = filter == active_filter;

                a
                    href=(expenses_url(filter))
                    class=(if is_active { ACTIVE_STYLE } else { INACTIVE_STYLE })
                    aria-current=[is_active.then_some("page")]
                {
                    (filter.label())
                }
            }
        }
    )
}

fn total_view(total: f64) -> Markup {
    html!(
        div id="total" class="p-4 rounded bg-white dark:bg-gray-800 shadow"
        {
            h2 class="text-sm font-medium text-gray-500 dark:text-gray-400" { "Total Spent" }
            p class="text-3xl font-bold" { (format_currency(total)) }
        }
    )
}

fn category_totals_view(category_totals: &[CategoryTotal]) -> Markup {
    html!(
        div id="category-totals" class="p-4 rounded bg-white dark:bg-gray-800 shadow"
        {
            h2 class="mb-2 text-sm font-medium text-gray-500 dark:text-gray-400"
            {
                "Totals by Category"
            }

            @if category_totals.is_empty() {
                p class="text-gray-500 dark:text-gray-400" { "No expenses yet." }
            } @else {
                ul class="space-y-1"
                {
                    @for category_total in category_totals {
                        li class="flex justify-between"
                        {
                            span { (category_total.category) }
                            span class="font-medium" { (format_currency(category_total.total)) }
                        }
                    }
                }
            }
        }
    )
}

fn add_expense_form_view(filter: ExpenseFilter) -> Markup {
    html!(
        section class="p-4 rounded bg-white dark:bg-gray-800 shadow"
        {
            h2 class="mb-4 text-lg font-semibold" { "Add Expense" }

            form
                id="add-expense-form"
                hx-post=(endpoints::EXPENSES_API)
                hx-target-error="#alert-container"
                class="grid grid-cols-1 md:grid-cols-4 gap-4 items-end"
            {
                (expense_form_fields(&ExpenseFormDefaults {
                    id_prefix: "add",
                    amount: None,
                    category: None,
                    note: None,
                    autofocus_amount: false,
                }))

                input type="hidden" name="filter" value=(filter.as_query_value());

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Expense" }
            }
        }
    )
}

fn expense_list_view(filter: ExpenseFilter, expenses: &[Expense]) -> Markup {
    html!(
        section id="expenses" class="relative overflow-x-auto shadow-md rounded"
        {
            @if expenses.is_empty() {
                p class="p-4 text-center text-gray-500 dark:text-gray-400 bg-white dark:bg-gray-800"
                {
                    "No expenses yet."
                }
            } @else {
                table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Note" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                        }
                    }

                    tbody
                    {
                        @for expense in expenses {
                            (expense_row_view(filter, expense))
                        }
                    }
                }
            }
        }
    )
}

fn expense_row_view(filter: ExpenseFilter, expense: &Expense) -> Markup {
    let (note, full_note) = format_note(expense.note.as_deref().unwrap_or_default());

    html!(
        tr class=(TABLE_ROW_STYLE) data-expense-id=(expense.id)
        {
            td class={(TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white"}
            {
                (format_currency(expense.amount))
            }

            td class=(TABLE_CELL_STYLE)
            {
                span class=(CATEGORY_BADGE_STYLE) { (expense.category) }
            }

            td class=(TABLE_CELL_STYLE) title=[full_note] { (note) }

            td class=(TABLE_CELL_STYLE) { (expense.date) }

            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-4"
                {
                    a href=(edit_expense_url(filter, expense.id)) class=(LINK_STYLE)
                    {
                        "Edit"
                    }

                    button
                        hx-delete=(expense_endpoint_url(filter, expense.id))
                        hx-confirm={
                            "Are you sure you want to delete this "
                            (format_currency(expense.amount)) " "
                            (expense.category) " expense?"
                        }
                        hx-target-error="#alert-container"
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Delete"
                    }
                }
            }
        }
    )
}

fn edit_expense_dialog_view(filter: ExpenseFilter, expense: &Expense) -> Markup {
    html!(
        div
            id="edit-expense-dialog"
            role="dialog"
            aria-modal="true"
            aria-labelledby="edit-expense-title"
            class="fixed inset-0 z-50 flex items-center justify-center bg-gray-900/50"
        {
            div class="w-full max-w-md p-6 space-y-4 rounded bg-white dark:bg-gray-800 text-gray-900 dark:text-white shadow"
            {
                h2 id="edit-expense-title" class="text-lg font-semibold" { "Edit Expense" }

                form
                    id="edit-expense-form"
                    hx-put=(expense_endpoint_url(filter, expense.id))
                    hx-target-error="#alert-container"
                    class="space-y-4"
                {
                    (expense_form_fields(&ExpenseFormDefaults {
                        id_prefix: "edit",
                        amount: Some(expense.amount),
                        category: Some(&expense.category),
                        note: expense.note.as_deref(),
                        autofocus_amount: true,
                    }))

                    div class="flex gap-4"
                    {
                        a href=(expenses_url(filter)) class=(BUTTON_SECONDARY_STYLE) { "Cancel" }
                        button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save" }
                    }
                }
            }
        }
    )
}

fn format_note(note: &str) -> (String, Option<&str>) {
    let note_length = note.graphemes(true).count();

    if note_length <= MAX_NOTE_GRAPHEMES {
        (note.to_owned(), None)
    } else {
        let truncated: String = note.graphemes(true).take(MAX_NOTE_GRAPHEMES - 3).collect();
        (truncated + "...", Some(note))
    }
}
