//! Expense entry form
//!
//! Four independent text fields. Edits store the raw input; the widget
//! constraints (required fields, date format, enumerated category,
//! non-negative amount) are checked when the form is turned into a draft.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::{Category, ExpenseDate, ExpenseDraft};

/// Maximum description length accepted by the form
pub const MAX_DESCRIPTION_CHARS: usize = 100;

/// One of the four form inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Date,
    Category,
    Amount,
    Description,
}

impl FormField {
    pub fn all() -> &'static [FormField] {
        &[
            FormField::Date,
            FormField::Category,
            FormField::Amount,
            FormField::Description,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Date => "date",
            FormField::Category => "category",
            FormField::Amount => "amount",
            FormField::Description => "description",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(FormField::Date),
            "category" | "type" => Ok(FormField::Category),
            "amount" => Ok(FormField::Amount),
            "description" | "desc" => Ok(FormField::Description),
            _ => Err(FormError::UnknownField(s.to_string())),
        }
    }
}

/// Form constraint violations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("Field {0} is required")]
    Missing(FormField),

    #[error("Invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Unknown category {0:?}")]
    UnknownCategory(String),

    #[error("Invalid amount {0:?}, expected a non-negative number")]
    InvalidAmount(String),

    #[error("Unknown form field {0:?}")]
    UnknownField(String),
}

/// Current values of the entry form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub date: String,
    pub category: String,
    pub amount: String,
    pub description: String,
}

impl FormFields {
    /// Replace exactly one field's value
    pub fn edit(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Date => self.date = value,
            FormField::Category => self.category = value,
            FormField::Amount => self.amount = value,
            FormField::Description => {
                self.description = value.chars().take(MAX_DESCRIPTION_CHARS).collect()
            }
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Date => &self.date,
            FormField::Category => &self.category,
            FormField::Amount => &self.amount,
            FormField::Description => &self.description,
        }
    }

    pub fn is_empty(&self) -> bool {
        FormField::all().iter().all(|f| self.get(*f).is_empty())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Validate the fields and build a create request
    pub fn to_draft(&self) -> Result<ExpenseDraft, FormError> {
        let date = required(&self.date, FormField::Date)?;
        // The date input only produces YYYY-MM-DD
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map(ExpenseDate::new)
            .map_err(|_| FormError::InvalidDate(date.to_string()))?;

        let category = required(&self.category, FormField::Category)?;
        let category = category
            .parse::<Category>()
            .map_err(|_| FormError::UnknownCategory(category.to_string()))?;

        let amount = parse_amount(required(&self.amount, FormField::Amount)?)?;

        Ok(ExpenseDraft::new(date, category, amount).description(self.description.as_str()))
    }
}

fn required(value: &str, field: FormField) -> Result<&str, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FormError::Missing(field))
    } else {
        Ok(trimmed)
    }
}

fn parse_amount(raw: &str) -> Result<f64, FormError> {
    match raw.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(amount),
        _ => Err(FormError::InvalidAmount(raw.to_string())),
    }
}
