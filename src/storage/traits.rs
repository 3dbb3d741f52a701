//! Storage trait definition.
//!
//! The presentation shell depends on this trait rather than on the `SQLite`
//! implementation, which keeps it testable against a recording double.

use crate::core::Expense;
use crate::error::Result;
use serde::Serialize;
use std::path::PathBuf;

/// Trait for persistent expense storage.
///
/// A storage value is open from construction until [`Storage::close`].
/// Every operation on a closed storage fails with
/// [`StorageError::Closed`](crate::error::StorageError::Closed).
pub trait Storage {
    /// Initializes storage (creates schema, runs migrations).
    ///
    /// Idempotent: safe to call any number of times on the same file.
    ///
    /// # Errors
    ///
    /// Returns an error if schema creation or migration fails.
    fn init(&mut self) -> Result<()>;

    /// Inserts one expense and commits it before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the row cannot be written.
    fn insert(&mut self, expense: &Expense) -> Result<()>;

    /// Inserts one expense from its text fields.
    ///
    /// The amount is parsed here; emptiness is not re-checked.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount does not parse or the write fails.
    fn insert_raw(
        &mut self,
        amount: &str,
        category: &str,
        date: &str,
        description: &str,
    ) -> Result<Expense> {
        let expense = Expense::from_text(amount, category, date, description)?;
        self.insert(&expense)?;
        Ok(expense)
    }

    /// Returns every stored expense in native retrieval order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn query_all(&self) -> Result<Vec<Expense>>;

    /// Returns the number of stored expenses.
    ///
    /// # Errors
    ///
    /// Returns an error if the count query fails.
    fn count(&self) -> Result<usize>;

    /// Gets storage statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if statistics cannot be gathered.
    fn stats(&self) -> Result<StorageStats>;

    /// Releases the underlying handle. Valid exactly once.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage is already closed or the handle
    /// cannot be released cleanly.
    fn close(&mut self) -> Result<()>;

    /// Returns true until [`Storage::close`] succeeds.
    fn is_open(&self) -> bool;
}

/// Storage statistics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StorageStats {
    /// Number of stored expenses.
    pub expense_count: usize,
    /// Schema version.
    pub schema_version: u32,
    /// Database file path (None for in-memory).
    pub db_path: Option<PathBuf>,
    /// Database file size in bytes (if applicable).
    pub db_size: Option<u64>,
}
