//! View state container
//!
//! Client-side mirror of the store's expense list plus the entry form.
//! All changes go through [`ViewState::apply`]; the running total is
//! recomputed from the full list on every list change.

use crate::model::{Expense, ExpenseId};

use super::form::{FormField, FormFields};

/// A state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Full fetch completed
    Loaded(Vec<Expense>),
    /// Store acknowledged a new record
    Created(Expense),
    /// Store acknowledged a single delete
    Deleted(ExpenseId),
    /// Store acknowledged delete-all
    Cleared,
    /// User changed one form input
    FieldEdited(FormField, String),
    /// Form cleared after a successful submit
    FormReset,
}

/// Expense list, cached total and form inputs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    expenses: Vec<Expense>,
    total: f64,
    form: FormFields,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a transition
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Loaded(expenses) => {
                self.expenses = expenses;
                self.recompute_total();
            }
            Action::Created(expense) => {
                // A full fetch may already have delivered this record
                if !self.contains(&expense.id) {
                    self.expenses.push(expense);
                    self.recompute_total();
                }
            }
            Action::Deleted(id) => {
                self.expenses.retain(|e| e.id != id);
                self.recompute_total();
            }
            Action::Cleared => {
                self.expenses.clear();
                self.recompute_total();
            }
            Action::FieldEdited(field, value) => self.form.edit(field, value),
            Action::FormReset => self.form.reset(),
        }
    }

    /// Records in insertion order
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn form(&self) -> &FormFields {
        &self.form
    }

    pub fn contains(&self, id: &ExpenseId) -> bool {
        self.expenses.iter().any(|e| &e.id == id)
    }

    fn recompute_total(&mut self) {
        self.total = self.expenses.iter().map(|e| e.amount).sum();
    }
}
