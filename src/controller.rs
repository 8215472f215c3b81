//! Expense Manager Controller
//!
//! Maps user events onto the [`ViewState`] and orchestrates calls to the
//! [`ExpenseStore`]. Local state changes only after the store acknowledged
//! the request, so a failed call leaves the list, the total and the form
//! exactly as they were and moves the controller into [`Phase::Error`].
//!
//! # Phases
//!
//! ```text
//! Idle ──edit──▶ Editing ──submit──▶ Submitting ──ok──▶ Idle
//!                                         │
//!                                         └──err──▶ Error ──edit/action/dismiss──▶ ...
//! ```
//!
//! Actions take `&self`; the state lock is never held across an `.await`,
//! and results are applied as deltas (append, remove, clear) to whatever
//! the list is when the response arrives. A full fetch that resolves after
//! a mutation was applied is dropped. Each action runs inside an
//! `expense_action` span carrying its `action_id`.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{Instrument, Span};
use uuid::Uuid;

use crate::model::{Expense, ExpenseId};
use crate::remote::{ExpenseStore, RemoteError};
use crate::state::{Action, FormError, FormField, FormFields, ViewState};
use crate::view::{category_breakdown, CategoryTotal, ExpenseView};

/// User-initiated operations that can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Load,
    Submit,
    Delete,
    ClearAll,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Load => write!(f, "load"),
            ActionKind::Submit => write!(f, "submit"),
            ActionKind::Delete => write!(f, "delete"),
            ActionKind::ClearAll => write!(f, "clear all"),
        }
    }
}

/// The last failed action, kept for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionFailure {
    pub action: ActionKind,
    pub message: String,
}

impl fmt::Display for ActionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.action, self.message)
    }
}

/// Controller phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Editing,
    Submitting,
    Error(ActionFailure),
}

/// Errors returned by controller actions
#[derive(Error, Debug)]
pub enum ActionError {
    #[error("Form error: {0}")]
    Form(#[from] FormError),

    #[error("Store error: {0}")]
    Remote(#[from] RemoteError),

    #[error("A submission is already in progress")]
    Busy,
}

#[derive(Debug, Default)]
struct Inner {
    state: ViewState,
    editing: bool,
    submitting: bool,
    error: Option<ActionFailure>,
    /// Acknowledged creates, deletes and clears so far
    mutations: u64,
}

/// Owns the view state for one mounted expense manager
pub struct ExpenseManager<S> {
    store: S,
    inner: Mutex<Inner>,
}

impl<S: ExpenseStore> ExpenseManager<S> {
    /// Create a manager with an empty list
    pub fn new(store: S) -> Self {
        Self {
            store,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Create a manager and populate it with a full fetch
    ///
    /// A failed fetch leaves the list empty and the manager in the
    /// `Error` phase.
    pub async fn mount(store: S) -> Self {
        let manager = Self::new(store);
        if let Err(e) = manager.load().await {
            tracing::warn!(error = %e, "Initial expense fetch failed");
        }
        manager
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replace the list with the store's current records
    ///
    /// A reply that arrives after a create, delete or clear-all was applied
    /// is discarded, since it may predate that change.
    pub async fn load(&self) -> Result<usize, ActionError> {
        async {
            let generation = self.begin_action();

            match self.store.list_expenses().await {
                Ok(expenses) => {
                    let mut inner = self.lock();
                    if inner.mutations != generation {
                        let count = inner.state.expenses().len();
                        tracing::debug!(
                            fetched = expenses.len(),
                            kept = count,
                            "Discarding stale expense list"
                        );
                        return Ok(count);
                    }
                    let count = expenses.len();
                    inner.state.apply(Action::Loaded(expenses));
                    tracing::info!(count, "Loaded expenses");
                    Ok(count)
                }
                Err(e) => Err(self.fail(ActionKind::Load, e.into())),
            }
        }
        .instrument(action_span(ActionKind::Load))
        .await
    }

    /// Replace one form field
    pub fn edit_field(&self, field: FormField, value: impl Into<String>) {
        let mut inner = self.lock();
        inner.error = None;
        inner.editing = true;
        inner.state.apply(Action::FieldEdited(field, value.into()));
    }

    /// Create an expense from the form
    ///
    /// On success the record is appended and all four fields are cleared.
    pub async fn submit(&self) -> Result<Expense, ActionError> {
        async {
            let draft = {
                let mut inner = self.lock();
                if inner.submitting {
                    tracing::warn!("Submit rejected, another submission in flight");
                    return Err(ActionError::Busy);
                }
                inner.error = None;
                let parsed = inner.state.form().to_draft();
                match parsed {
                    Ok(draft) => {
                        inner.submitting = true;
                        draft
                    }
                    Err(e) => {
                        drop(inner);
                        return Err(self.fail(ActionKind::Submit, e.into()));
                    }
                }
            };

            tracing::debug!(date = %draft.date, category = %draft.category, amount = draft.amount, "Submitting expense");

            let mut in_flight = SubmitGuard::new(&self.inner);
            let result = self.store.create_expense(&draft).await;
            in_flight.disarm();

            let mut inner = self.lock();
            inner.submitting = false;
            match result {
                Ok(expense) => {
                    inner.mutations += 1;
                    inner.state.apply(Action::Created(expense.clone()));
                    inner.state.apply(Action::FormReset);
                    inner.editing = false;
                    tracing::info!(
                        expense_id = %expense.id,
                        total = inner.state.total(),
                        "Created expense"
                    );
                    Ok(expense)
                }
                Err(e) => {
                    drop(inner);
                    Err(self.fail(ActionKind::Submit, e.into()))
                }
            }
        }
        .instrument(action_span(ActionKind::Submit))
        .await
    }

    /// Delete one expense
    ///
    /// Once the store acknowledges, the row with a matching id is removed;
    /// an id not in the list leaves it unchanged.
    pub async fn delete(&self, id: &ExpenseId) -> Result<(), ActionError> {
        async {
            self.begin_action();

            match self.store.delete_expense(id).await {
                Ok(()) => {
                    let mut inner = self.lock();
                    inner.mutations += 1;
                    let known = inner.state.contains(id);
                    inner.state.apply(Action::Deleted(id.clone()));
                    if known {
                        tracing::info!(expense_id = %id, total = inner.state.total(), "Deleted expense");
                    } else {
                        tracing::debug!(expense_id = %id, "Deleted expense not in local list");
                    }
                    Ok(())
                }
                Err(e) => Err(self.fail(ActionKind::Delete, e.into())),
            }
        }
        .instrument(action_span(ActionKind::Delete))
        .await
    }

    /// Delete every expense
    pub async fn clear_all(&self) -> Result<(), ActionError> {
        async {
            self.begin_action();

            match self.store.delete_all_expenses().await {
                Ok(()) => {
                    let mut inner = self.lock();
                    inner.mutations += 1;
                    inner.state.apply(Action::Cleared);
                    tracing::info!("Cleared all expenses");
                    Ok(())
                }
                Err(e) => Err(self.fail(ActionKind::ClearAll, e.into())),
            }
        }
        .instrument(action_span(ActionKind::ClearAll))
        .await
    }

    /// Leave the `Error` phase without another action
    pub fn dismiss_error(&self) {
        self.lock().error = None;
    }

    pub fn phase(&self) -> Phase {
        let inner = self.lock();
        if let Some(failure) = &inner.error {
            Phase::Error(failure.clone())
        } else if inner.submitting {
            Phase::Submitting
        } else if inner.editing {
            Phase::Editing
        } else {
            Phase::Idle
        }
    }

    /// Copy of the current view state
    pub fn snapshot(&self) -> ViewState {
        self.lock().state.clone()
    }

    pub fn form(&self) -> FormFields {
        self.lock().state.form().clone()
    }

    pub fn total(&self) -> f64 {
        self.lock().state.total()
    }

    /// Sorted, formatted rows and total
    pub fn view(&self) -> ExpenseView {
        ExpenseView::from_state(&self.lock().state)
    }

    /// Per-category chart data
    pub fn breakdown(&self) -> Vec<CategoryTotal> {
        category_breakdown(self.lock().state.expenses())
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        lock_inner(&self.inner)
    }

    /// Clear the last error and return the current mutation count
    fn begin_action(&self) -> u64 {
        let mut inner = self.lock();
        inner.error = None;
        inner.mutations
    }

    fn fail(&self, action: ActionKind, err: ActionError) -> ActionError {
        tracing::error!(%action, error = %err, "Expense action failed");
        self.lock().error = Some(ActionFailure {
            action,
            message: err.to_string(),
        });
        err
    }
}

/// Span wrapping one controller action, tagged with a fresh action id
fn action_span(action: ActionKind) -> Span {
    tracing::info_span!("expense_action", action_id = %Uuid::new_v4(), %action)
}

fn lock_inner(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears the submitting flag if a submit future is dropped mid-request
struct SubmitGuard<'a> {
    inner: &'a Mutex<Inner>,
    armed: bool,
}

impl<'a> SubmitGuard<'a> {
    fn new(inner: &'a Mutex<Inner>) -> Self {
        Self { inner, armed: true }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            tracing::debug!("Submit cancelled before the store replied");
            lock_inner(self.inner).submitting = false;
        }
    }
}
