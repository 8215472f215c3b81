//! Core data types for expense records
//!
//! This module defines the values exchanged with the expense store:
//! - `Expense`: A persisted expense record
//! - `ExpenseDraft`: The body sent when creating a record
//! - `ExpenseId`, `ExpenseDate`, `Category`: Field types

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::error::{ParseError, ParseResult};

/// Description stored when the user leaves the field empty
pub const DEFAULT_DESCRIPTION: &str = "N/A";

/// Identifier assigned by the remote store on creation
///
/// Opaque to the client. Numeric identifiers are kept in their decimal
/// string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExpenseId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ExpenseId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for ExpenseId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(id) => Self(id),
            RawId::Number(id) => Self(id.to_string()),
        })
    }
}

/// Calendar date of an expense
///
/// The store may echo the date back either as `YYYY-MM-DD` or as a full
/// timestamp. A timestamp at exactly midnight UTC is a serialized calendar
/// date and keeps its UTC day; any other timestamp is read in the local
/// time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpenseDate(NaiveDate);

impl ExpenseDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build from year, month and day; `None` if the date does not exist
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parse a wire or form value
    pub fn parse(input: &str) -> ParseResult<Self> {
        let s = input.trim();

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self(date));
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            let utc = dt.with_timezone(&Utc);
            if utc.time() == NaiveTime::MIN {
                return Ok(Self(utc.date_naive()));
            }
            return Ok(Self(dt.with_timezone(&Local).date_naive()));
        }

        // Timestamp without offset: already local
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(Self(dt.date()));
        }

        Err(ParseError::InvalidDate(input.to_string()))
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    /// Render as `MM/DD/YYYY`
    pub fn to_display_string(&self) -> String {
        self.0.format("%m/%d/%Y").to_string()
    }
}

impl fmt::Display for ExpenseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for ExpenseDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ExpenseDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ExpenseDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Expense type, as offered by the entry form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Rent,
    Utilities,
    Groceries,
    Gas,
    Phone,
    Loans,
    Insurance,
    Entertainment,
    Other,
}

impl Category {
    /// Get all categories in form order
    pub fn all() -> &'static [Category] {
        &[
            Category::Rent,
            Category::Utilities,
            Category::Groceries,
            Category::Gas,
            Category::Phone,
            Category::Loans,
            Category::Insurance,
            Category::Entertainment,
            Category::Other,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Rent => "Rent",
            Category::Utilities => "Utilities",
            Category::Groceries => "Groceries",
            Category::Gas => "Gas",
            Category::Phone => "Phone",
            Category::Loans => "Loans",
            Category::Insurance => "Insurance",
            Category::Entertainment => "Entertainment",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::all()
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseError::UnknownCategory(s.to_string()))
    }
}

/// A persisted expense record
///
/// Records are never edited in place: the store creates them and the
/// client either keeps or drops them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    #[serde(rename = "_id")]
    pub id: ExpenseId,
    pub date: ExpenseDate,
    #[serde(rename = "type")]
    pub category: Category,
    pub amount: f64,
    #[serde(
        default = "default_description",
        deserialize_with = "description_or_default"
    )]
    pub description: String,
}

impl Expense {
    pub fn new(id: impl Into<ExpenseId>, date: ExpenseDate, category: Category, amount: f64) -> Self {
        Self {
            id: id.into(),
            date,
            category,
            amount,
            description: default_description(),
        }
    }

    /// Builder method: set description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = normalize_description(description.into());
        self
    }
}

/// Body of a create request
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExpenseDraft {
    pub date: ExpenseDate,
    #[serde(rename = "type")]
    pub category: Category,
    pub amount: f64,
    pub description: String,
}

impl ExpenseDraft {
    pub fn new(date: ExpenseDate, category: Category, amount: f64) -> Self {
        Self {
            date,
            category,
            amount,
            description: default_description(),
        }
    }

    /// Builder method: set description (blank becomes "N/A")
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = normalize_description(description.into());
        self
    }
}

fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}

fn normalize_description(description: String) -> String {
    if description.trim().is_empty() {
        default_description()
    } else {
        description
    }
}

fn description_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(normalize_description(raw.unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> ExpenseDate {
        ExpenseDate::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(ExpenseDate::parse("2024-03-01").unwrap(), date(2024, 3, 1));
        assert_eq!(ExpenseDate::parse(" 2024-03-01 ").unwrap(), date(2024, 3, 1));
    }

    #[test]
    fn test_parse_midnight_utc_keeps_calendar_day() {
        let parsed = ExpenseDate::parse("2024-03-01T00:00:00.000Z").unwrap();
        assert_eq!(parsed, date(2024, 3, 1));
    }

    #[test]
    fn test_parse_timestamp_uses_local_zone() {
        let raw = "2024-03-01T15:30:00+00:00";
        let expected = DateTime::parse_from_rfc3339(raw)
            .unwrap()
            .with_timezone(&Local)
            .date_naive();
        assert_eq!(ExpenseDate::parse(raw).unwrap().naive(), expected);
    }

    #[test]
    fn test_parse_invalid_date() {
        assert!(matches!(
            ExpenseDate::parse("03/01/2024"),
            Err(ParseError::InvalidDate(_))
        ));
        assert!(ExpenseDate::parse("2024-02-30").is_err());
        assert!(ExpenseDate::parse("").is_err());
    }

    #[test]
    fn test_display_format() {
        assert_eq!(date(2024, 3, 1).to_display_string(), "03/01/2024");
        assert_eq!(date(2024, 3, 1).to_string(), "2024-03-01");
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("Gas".parse::<Category>().unwrap(), Category::Gas);
        assert_eq!("groceries".parse::<Category>().unwrap(), Category::Groceries);
        assert!(matches!(
            "Travel".parse::<Category>(),
            Err(ParseError::UnknownCategory(_))
        ));
        assert_eq!(Category::all().len(), 9);
    }

    #[test]
    fn test_expense_from_wire() {
        let expense: Expense = serde_json::from_value(json!({
            "_id": "65f0a1",
            "date": "2024-03-01T00:00:00.000Z",
            "type": "Gas",
            "amount": 12.5,
            "description": "fill up",
            "__v": 0
        }))
        .unwrap();

        assert_eq!(expense.id.as_str(), "65f0a1");
        assert_eq!(expense.date, date(2024, 3, 1));
        assert_eq!(expense.category, Category::Gas);
        assert_eq!(expense.amount, 12.5);
        assert_eq!(expense.description, "fill up");
    }

    #[test]
    fn test_missing_or_blank_description_defaults() {
        let missing: Expense = serde_json::from_value(json!({
            "_id": "a", "date": "2024-01-02", "type": "Rent", "amount": 900
        }))
        .unwrap();
        assert_eq!(missing.description, DEFAULT_DESCRIPTION);

        let null: Expense = serde_json::from_value(json!({
            "_id": "b", "date": "2024-01-02", "type": "Rent", "amount": 900,
            "description": null
        }))
        .unwrap();
        assert_eq!(null.description, DEFAULT_DESCRIPTION);

        let blank: Expense = serde_json::from_value(json!({
            "_id": "c", "date": "2024-01-02", "type": "Rent", "amount": 900,
            "description": "   "
        }))
        .unwrap();
        assert_eq!(blank.description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn test_numeric_id_kept_as_text() {
        let expense: Expense = serde_json::from_value(json!({
            "_id": 42, "date": "2024-01-02", "type": "Rent", "amount": 900
        }))
        .unwrap();
        assert_eq!(expense.id, ExpenseId::new("42"));

        let bad: Result<Expense, _> = serde_json::from_value(json!({
            "_id": true, "date": "2024-01-02", "type": "Rent", "amount": 900
        }));
        assert!(bad.is_err());
    }

    #[test]
    fn test_unknown_category_rejected() {
        let result: Result<Expense, _> = serde_json::from_value(json!({
            "_id": "a", "date": "2024-01-02", "type": "Travel", "amount": 1
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_draft_wire_shape() {
        let draft = ExpenseDraft::new(date(2024, 3, 1), Category::Gas, 12.5).description("");
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            value,
            json!({
                "date": "2024-03-01",
                "type": "Gas",
                "amount": 12.5,
                "description": "N/A"
            })
        );
    }
}
