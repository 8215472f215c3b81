//! View State
//!
//! Explicit state container owned by the controller, with pure
//! transitions that can be tested without a store or a renderer.

pub mod form;
pub mod view_state;

pub use form::{FormError, FormField, FormFields, MAX_DESCRIPTION_CHARS};
pub use view_state::{Action, ViewState};
