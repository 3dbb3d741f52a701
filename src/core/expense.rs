//! The expense record.
//!
//! An expense has no identity of its own: two rows with the same values are
//! indistinguishable, and the log is append-only.

use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// One logged transaction.
///
/// # Examples
///
/// ```
/// use expense_log::core::Expense;
///
/// let expense = Expense::new(12.5, "Food", "2024-01-01", "Lunch");
/// assert_eq!(expense.category, "Food");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Amount spent.
    pub amount: f64,

    /// Free-form category label.
    pub category: String,

    /// Date as entered, conventionally `YYYY-MM-DD` but not checked.
    pub date: String,

    /// Optional description; empty when not given.
    pub description: String,
}

impl Expense {
    /// Creates a new expense record.
    #[must_use]
    pub fn new(
        amount: f64,
        category: impl Into<String>,
        date: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            category: category.into(),
            date: date.into(),
            description: description.into(),
        }
    }

    /// Builds an expense from its text fields, parsing the amount.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidAmount`] if the amount does not parse.
    pub fn from_text(
        amount: &str,
        category: &str,
        date: &str,
        description: &str,
    ) -> Result<Self, StorageError> {
        Ok(Self::new(parse_amount(amount)?, category, date, description))
    }
}

/// Parses user-entered amount text as a number.
///
/// Surrounding whitespace is ignored and single underscores between digits
/// are accepted as separators (`1_000`). Infinities are accepted. `NaN` is
/// rejected because `SQLite` stores it as NULL.
///
/// # Errors
///
/// Returns [`StorageError::InvalidAmount`] carrying the original text.
pub fn parse_amount(input: &str) -> Result<f64, StorageError> {
    let invalid = || StorageError::InvalidAmount {
        input: input.to_string(),
    };

    strip_digit_separators(input.trim())
        .ok_or_else(invalid)?
        .parse::<f64>()
        .ok()
        .filter(|value| !value.is_nan())
        .ok_or_else(invalid)
}

/// Removes `_` separators, or returns `None` if one is not between two digits.
fn strip_digit_separators(text: &str) -> Option<Cow<'_, str>> {
    if !text.contains('_') {
        return Some(Cow::Borrowed(text));
    }

    let bytes = text.as_bytes();
    let well_placed = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'_'
            || (i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
    });

    well_placed.then(|| Cow::Owned(text.replace('_', "")))
}
