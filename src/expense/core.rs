//! Defines the core data models and database queries for expenses.

use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, database_id::ExpenseId, expense::ExpenseFilter};

// ============================================================================
// MODELS
// ============================================================================

/// An amount of money spent on something.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense, assigned by the database.
    pub id: ExpenseId,
    /// How much money was spent.
    pub amount: f64,
    /// A free-text label for grouping expenses, e.g. "Food", "Books", "Rent".
    pub category: String,
    /// An optional description of the expense.
    pub note: Option<String>,
    /// The day the expense was recorded.
    pub date: Date,
}

/// A validated expense that has not been saved yet.
///
/// Use [NewExpense::new] to create one, then save it with [create_expense].
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    amount: f64,
    category: String,
    note: Option<String>,
}

impl NewExpense {
    /// Validate the fields for a new expense.
    ///
    /// `category` and `note` are trimmed, and a note that is empty after
    /// trimming is stored as no note.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidAmount] if `amount` is not a finite number greater than zero,
    /// - or [Error::EmptyCategory] if `category` is empty or only whitespace.
    pub fn new(amount: f64, category: &str, note: &str) -> Result<Self, Error> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::InvalidAmount(amount));
        }

        let category = category.trim();

        if category.is_empty() {
            return Err(Error::EmptyCategory);
        }

        Ok(Self {
            amount,
            category: category.to_owned(),
            note: normalize_note(note),
        })
    }
}

/// The editable fields of an expense.
///
/// Unlike [NewExpense], the amount and category are not validated.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseUpdate {
    amount: f64,
    category: String,
    note: Option<String>,
}

impl ExpenseUpdate {
    /// Create an update, trimming `category` and `note`.
    pub fn new(amount: f64, category: &str, note: &str) -> Self {
        Self {
            amount,
            category: category.trim().to_owned(),
            note: normalize_note(note),
        }
    }
}

fn normalize_note(note: &str) -> Option<String> {
    let note = note.trim();

    if note.is_empty() {
        None
    } else {
        Some(note.to_owned())
    }
}

type RowsAffected = usize;

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the expenses table in the database if it does not exist.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                note TEXT,
                date TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Save `new_expense` to the database, dated `today`.
///
/// The new expense is not returned, call [list_expenses] to see it.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn create_expense(
    new_expense: NewExpense,
    today: Date,
    connection: &Connection,
) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO expenses (amount, category, note, date) VALUES (?1, ?2, ?3, ?4)",
        params![
            new_expense.amount,
            new_expense.category,
            new_expense.note,
            today
        ],
    )?;

    Ok(())
}

/// Retrieve an expense from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare("SELECT id, amount, category, note, date FROM expenses WHERE id = :id")?
        .query_row(&[(":id", &id)], map_expense_row)?;

    Ok(expense)
}

/// Retrieve the expenses that match `filter`, newest first.
///
/// `today` is the date that [ExpenseFilter::ThisWeek] and
/// [ExpenseFilter::ThisMonth] are relative to. Expenses are ordered by
/// descending ID, i.e. the order they were added in, not by date.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn list_expenses(
    filter: ExpenseFilter,
    today: Date,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    let base_query = "SELECT id, amount, category, note, date FROM expenses";

    let expenses = match filter.start_date(today) {
        Some(start_date) => connection
            .prepare(&format!(
                "{base_query} WHERE date >= :start_date ORDER BY id DESC"
            ))?
            .query_map(&[(":start_date", &start_date)], map_expense_row)?
            .collect::<Result<Vec<_>, _>>()?,
        None => connection
            .prepare(&format!("{base_query} ORDER BY id DESC"))?
            .query_map([], map_expense_row)?
            .collect::<Result<Vec<_>, _>>()?,
    };

    Ok(expenses)
}

/// Overwrite the amount, category and note of the expense with `id`.
///
/// The date of the expense is never changed. Updating an expense that does
/// not exist affects zero rows and is not an error.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn update_expense(
    id: ExpenseId,
    update: ExpenseUpdate,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "UPDATE expenses SET amount = ?1, category = ?2, note = ?3 WHERE id = ?4",
            params![update.amount, update.category, update.note, id],
        )
        .map_err(Error::from)
}

/// Delete the expense with `id`.
///
/// Deleting an expense that does not exist affects zero rows and is not an error.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM expenses WHERE id = :id", &[(":id", &id)])
        .map_err(Error::from)
}

/// Get the total number of expenses in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
#[cfg(test)]
pub fn count_expenses(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM expenses;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Map a database row to an Expense.
pub fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let category = row.get(2)?;
    let note = row.get(3)?;
    let date = row.get(4)?;

    Ok(Expense {
        id,
        amount,
        category,
        note,
        date,
    })
}

// ============================================================================
// TESTS
// ============================================================================


#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        expense::{
            Expense, ExpenseFilter, ExpenseUpdate, NewExpense, count_expenses, create_expense,
            delete_expense, get_expense, list_expenses, update_expense,
        },
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn must_create(amount: f64, category: &str, note: &str, today: time::Date, conn: &Connection) {
        create_expense(
            NewExpense::new(amount, category, note).expect("Could not validate test expense"),
            today,
            conn,
        )
        .expect("Could not create expense");
    }

    #[test]
    fn create_then_list_includes_new_expense() {
        let conn = get_test_connection();
        let today = date!(2024 - 06 - 15);

        must_create(12.5, "Food", "lunch", today, &conn);

        let got = list_expenses(ExpenseFilter::All, today, &conn).unwrap();
        assert_eq!(
            got,
            vec![Expense {
                id: 1,
                amount: 12.5,
                category: "Food".to_owned(),
                note: Some("lunch".to_owned()),
                date: today,
            }]
        );
    }

    #[test]
    fn list_is_ordered_by_id_descending() {
        let conn = get_test_connection();
        let today = date!(2024 - 06 - 15);
        must_create(1.0, "A", "", today, &conn);
        // Inserted later but dated earlier.
        conn.execute(
            "INSERT INTO expenses (amount, category, note, date) VALUES (2.0, 'B', NULL, '2024-01-01')",
            (),
        )
        .unwrap();
        must_create(3.0, "C", "", today, &conn);

        let got = list_expenses(ExpenseFilter::All, today, &conn).unwrap();

        let ids = got.iter().map(|expense| expense.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn week_filter_starts_on_sunday() {
        let conn = get_test_connection();
        let today = date!(2024 - 06 - 15);
        must_create(1.0, "Before", "", date!(2024 - 06 - 08), &conn);
        must_create(2.0, "Start", "", date!(2024 - 06 - 09), &conn);
        must_create(3.0, "Today", "", today, &conn);

        let got = list_expenses(ExpenseFilter::ThisWeek, today, &conn).unwrap();

        let categories = got
            .iter()
            .map(|expense| expense.category.as_str())
            .collect::<Vec<_>>();
        assert_eq!(categories, vec!["Today", "Start"]);
    }

    #[test]
    fn month_filter_starts_on_first_of_month() {
        let conn = get_test_connection();
        let today = date!(2024 - 06 - 15);
        must_create(1.0, "May", "", date!(2024 - 05 - 31), &conn);
        must_create(2.0, "June 1st", "", date!(2024 - 06 - 01), &conn);
        must_create(3.0, "Today", "", today, &conn);

        let got = list_expenses(ExpenseFilter::ThisMonth, today, &conn).unwrap();

        let categories = got
            .iter()
            .map(|expense| expense.category.as_str())
            .collect::<Vec<_>>();
        assert_eq!(categories, vec!["Today", "June 1st"]);
    }

    #[test]
    fn update_changes_editable_fields_only() {
        let conn = get_test_connection();
        let created_on = date!(2024 - 06 - 10);
        must_create(12.5, "Food", "lunch", created_on, &conn);

        let rows_affected =
            update_expense(1, ExpenseUpdate::new(20.0, " Books ", ""), &conn).unwrap();

        assert_eq!(rows_affected, 1);
        assert_eq!(
            get_expense(1, &conn),
            Ok(Expense {
                id: 1,
                amount: 20.0,
                category: "Books".to_owned(),
                note: None,
                date: created_on,
            })
        );
    }

    #[test]
    fn update_does_not_validate() {
        let conn = get_test_connection();
        must_create(12.5, "Food", "", date!(2024 - 06 - 10), &conn);

        update_expense(1, ExpenseUpdate::new(-1.0, "", ""), &conn).unwrap();

        let got = get_expense(1, &conn).unwrap();
        assert_eq!(got.amount, -1.0);
        assert_eq!(got.category, "");
    }

    #[test]
    fn update_missing_expense_is_a_no_op() {
        let conn = get_test_connection();
        let today = date!(2024 - 06 - 10);
        must_create(12.5, "Food", "", today, &conn);
        let want = list_expenses(ExpenseFilter::All, today, &conn).unwrap();

        let rows_affected =
            update_expense(42, ExpenseUpdate::new(1.0, "Other", ""), &conn).unwrap();

        assert_eq!(rows_affected, 0);
        assert_eq!(list_expenses(ExpenseFilter::All, today, &conn).unwrap(), want);
    }

    #[test]
    fn delete_removes_only_matching_expense() {
        let conn = get_test_connection();
        let today = date!(2024 - 06 - 10);
        must_create(1.0, "A", "", today, &conn);
        must_create(2.0, "B", "", today, &conn);

        let rows_affected = delete_expense(1, &conn).unwrap();

        assert_eq!(rows_affected, 1);
        assert_eq!(count_expenses(&conn), Ok(1));
        assert_eq!(get_expense(1, &conn), Err(Error::NotFound));
        assert!(get_expense(2, &conn).is_ok());
    }

    #[test]
    fn delete_missing_expense_is_a_no_op() {
        let conn = get_test_connection();
        must_create(1.0, "A", "", date!(2024 - 06 - 10), &conn);

        let rows_affected = delete_expense(42, &conn).unwrap();

        assert_eq!(rows_affected, 0);
        assert_eq!(count_expenses(&conn), Ok(1));
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let conn = get_test_connection();
        let today = date!(2024 - 06 - 10);
        must_create(1.0, "A", "", today, &conn);
        must_create(2.0, "B", "", today, &conn);
        delete_expense(2, &conn).unwrap();

        must_create(3.0, "C", "", today, &conn);

        let got = list_expenses(ExpenseFilter::All, today, &conn).unwrap();
        assert_eq!(got[0].id, 3);
    }

    #[test]
    fn get_missing_expense_returns_not_found() {
        let conn = get_test_connection();

        assert_eq!(get_expense(1, &conn), Err(Error::NotFound));
    }
}
