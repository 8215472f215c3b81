//! Derived view
//!
//! Turns a [`ViewState`] into display rows: newest first, dates as
//! `MM/DD/YYYY`, total with two decimals.

use serde::Serialize;

use crate::model::{Category, Expense};
use crate::state::ViewState;

/// One rendered table row
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExpenseRow {
    pub id: String,
    pub date: String,
    pub category: String,
    pub amount: String,
    pub description: String,
}

impl From<&Expense> for ExpenseRow {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense.id.to_string(),
            date: expense.date.to_display_string(),
            category: expense.category.to_string(),
            amount: format_amount(expense.amount),
            description: expense.description.clone(),
        }
    }
}

/// Rows plus the formatted running total
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExpenseView {
    pub rows: Vec<ExpenseRow>,
    pub total: String,
}

impl ExpenseView {
    pub fn from_state(state: &ViewState) -> Self {
        Self {
            rows: sorted_by_date(state.expenses())
                .into_iter()
                .map(ExpenseRow::from)
                .collect(),
            total: format_total(state.total()),
        }
    }
}

/// Sum of one category, used as chart data
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
}

/// Most recent first; equal dates keep insertion order
pub fn sorted_by_date(expenses: &[Expense]) -> Vec<&Expense> {
    let mut sorted: Vec<&Expense> = expenses.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// Shortest decimal form of an amount (`12.5`, `40`)
pub fn format_amount(amount: f64) -> String {
    amount.to_string()
}

/// Total with exactly two decimals
pub fn format_total(total: f64) -> String {
    // Round half away from zero on the cent, then avoid printing "-0.00"
    let rounded = (total * 100.0).round() / 100.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:.2}", rounded)
}

/// Per-category sums in form order, skipping empty categories
pub fn category_breakdown(expenses: &[Expense]) -> Vec<CategoryTotal> {
    Category::all()
        .iter()
        .filter_map(|category| {
            let mut matching = expenses.iter().filter(|e| e.category == *category).peekable();
            matching.peek()?;
            Some(CategoryTotal {
                category: *category,
                total: matching.map(|e| e.amount).sum(),
            })
        })
        .collect()
}
