//! Core domain models for expense-log.
//!
//! The expense record and the raw form input that produces it. These are
//! pure domain types with no I/O dependencies.

pub mod expense;
pub mod form;

pub use expense::{Expense, parse_amount};
pub use form::{ExpenseForm, ValidatedForm};
