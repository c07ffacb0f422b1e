//! Recording, listing, summarizing and editing expenses.

mod aggregation;
mod chart;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod expenses_page;
mod filter;
mod form;

pub use aggregation::{CategoryTotal, ExpenseSummary};
pub use core::{
    Expense, ExpenseUpdate, NewExpense, create_expense, create_expense_table, delete_expense,
    get_expense, list_expenses, update_expense,
};
pub use create_endpoint::create_expense_endpoint;
pub use delete_endpoint::delete_expense_endpoint;
pub use edit_endpoint::edit_expense_endpoint;
pub use expenses_page::get_expenses_page;
pub use filter::ExpenseFilter;

#[cfg(test)]
pub use core::count_expenses;
