//! Totals derived from a set of expenses.

use std::collections::HashMap;

use crate::expense::{Expense, ExpenseFilter};

/// The sum of the amounts of all expenses sharing a category label.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// The sum of the amounts of `expenses`.
pub fn total(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|expense| expense.amount).sum()
}

/// Sum the amounts of `expenses` per category.
///
/// Categories are listed in the order they first appear in `expenses` and are
/// compared exactly, so "Food" and "food" are two different categories.
pub fn category_totals(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for expense in expenses {
        match positions.get(expense.category.as_str()) {
            Some(&position) => totals[position].total += expense.amount,
            None => {
                positions.insert(&expense.category, totals.len());
                totals.push(CategoryTotal {
                    category: expense.category.clone(),
                    total: expense.amount,
                });
            }
        }
    }

    totals
}

/// Everything the expenses page shows for one filter.
///
/// The expenses and their totals are built together from a single list, so
/// they always describe the same set of expenses.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseSummary {
    pub filter: ExpenseFilter,
    pub expenses: Vec<Expense>,
    pub total: f64,
    pub category_totals: Vec<CategoryTotal>,
}

impl ExpenseSummary {
    pub fn new(filter: ExpenseFilter, expenses: Vec<Expense>) -> Self {
        let total = total(&expenses);
        let category_totals = category_totals(&expenses);

        Self {
            filter,
            expenses,
            total,
            category_totals,
        }
    }
}
