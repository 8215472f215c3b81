//! Expense data model
//!
//! - **types**: Expense records, drafts and their field types
//! - **error**: Parse errors for dates and categories

pub mod error;
pub mod types;

pub use error::{ParseError, ParseResult};
pub use types::{Category, Expense, ExpenseDate, ExpenseDraft, ExpenseId, DEFAULT_DESCRIPTION};
