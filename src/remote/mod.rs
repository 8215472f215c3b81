//! Remote Store Adapter
//!
//! The expense service is the record of truth. This module wraps its four
//! operations behind the [`ExpenseStore`] trait so the controller can be
//! driven by the REST client or by any other implementation.

mod client;
mod error;

pub use client::{RestExpenseStore, StoreConfig};
pub use error::{RemoteError, RemoteResult};

use async_trait::async_trait;
use std::sync::Arc;

use crate::model::{Expense, ExpenseDraft, ExpenseId};

/// Operations offered by an expense store
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Fetch every record
    async fn list_expenses(&self) -> RemoteResult<Vec<Expense>>;

    /// Create a record, returning it with its store-assigned identifier
    async fn create_expense(&self, draft: &ExpenseDraft) -> RemoteResult<Expense>;

    /// Delete one record; the response body is ignored
    async fn delete_expense(&self, id: &ExpenseId) -> RemoteResult<()>;

    /// Delete every record
    async fn delete_all_expenses(&self) -> RemoteResult<()>;
}

#[async_trait]
impl<T: ExpenseStore + ?Sized> ExpenseStore for Arc<T> {
    async fn list_expenses(&self) -> RemoteResult<Vec<Expense>> {
        (**self).list_expenses().await
    }

    async fn create_expense(&self, draft: &ExpenseDraft) -> RemoteResult<Expense> {
        (**self).create_expense(draft).await
    }

    async fn delete_expense(&self, id: &ExpenseId) -> RemoteResult<()> {
        (**self).delete_expense(id).await
    }

    async fn delete_all_expenses(&self) -> RemoteResult<()> {
        (**self).delete_all_expenses().await
    }
}
