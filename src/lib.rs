//! # Expense Manager
//!
//! Client for an expense-tracking REST service: records expenses through a
//! form model, keeps a local mirror of the store's list, and renders it
//! newest first with a running total.
//!
//! ## Modules
//!
//! - [`model`]: Expense records and their field types
//! - [`remote`]: The `ExpenseStore` trait and its REST client
//! - [`state`]: View state container and entry form
//! - [`view`]: Sorted rows, totals, chart data and renderers
//! - [`controller`]: `ExpenseManager`, which ties them together
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use expense_manager::{ExpenseManager, FormField, RestExpenseStore, StoreConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = RestExpenseStore::new(StoreConfig::new("http://localhost:8080"))?;
//!     let manager = ExpenseManager::mount(store).await;
//!
//!     manager.edit_field(FormField::Date, "2024-03-01");
//!     manager.edit_field(FormField::Category, "Gas");
//!     manager.edit_field(FormField::Amount, "12.5");
//!     manager.submit().await?;
//!
//!     println!("Total: ${}", manager.view().total);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod controller;
pub mod model;
pub mod remote;
pub mod state;
pub mod view;

pub use config::{Config, ConfigError, DisplayConfig, LoggingConfig, RemoteConfig};

pub use controller::{ActionError, ActionFailure, ActionKind, ExpenseManager, Phase};

pub use model::{Category, Expense, ExpenseDate, ExpenseDraft, ExpenseId, ParseError};

pub use remote::{ExpenseStore, RemoteError, RemoteResult, RestExpenseStore, StoreConfig};

pub use state::{Action, FormError, FormField, FormFields, ViewState};

pub use view::{CategoryTotal, ExpenseRow, ExpenseView, OutputFormat, RenderError};
