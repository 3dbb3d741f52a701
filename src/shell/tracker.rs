//! The add-expense flow and list refresh.

use crate::core::{Expense, ExpenseForm};
use crate::error::{Error, Result};
use crate::storage::Storage;
use tracing::debug;

/// Result of pressing "Add".
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    /// The expense was stored and the list refreshed.
    Added(Expense),
    /// A required field was empty; nothing was written.
    Invalid,
    /// Parsing or storage failed; carries the error text.
    Failed(String),
}

/// Form state plus the injected storage it writes to.
///
/// The list is refreshed once at construction and after every successful
/// add. [`ExpenseTracker::shutdown`] closes the storage.
pub struct ExpenseTracker<S: Storage> {
    storage: S,
    form: ExpenseForm,
    status: String,
    expenses: Vec<Expense>,
    lines: Vec<String>,
}

impl<S: Storage> ExpenseTracker<S> {
    /// Creates a tracker over `storage` and loads the current list.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial list cannot be read.
    pub fn new(storage: S) -> Result<Self> {
        let mut tracker = Self {
            storage,
            form: ExpenseForm::default(),
            status: String::new(),
            expenses: Vec::new(),
            lines: Vec::new(),
        };
        tracker.refresh()?;
        Ok(tracker)
    }

    /// Current form fields.
    #[must_use]
    pub const fn form(&self) -> &ExpenseForm {
        &self.form
    }

    /// Replaces all four form fields.
    pub fn set_form(&mut self, form: ExpenseForm) {
        self.form = form;
    }

    /// Last status message.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Expenses as of the last refresh, in retrieval order.
    #[must_use]
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Rendered list lines, one per stored expense.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The underlying storage.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Runs the add flow on the current form fields.
    ///
    /// Validation and storage failures are absorbed into the returned
    /// outcome and the status message.
    pub fn submit(&mut self) -> AddOutcome {
        let valid = match self.form.validate() {
            Ok(valid) => valid,
            Err(e) => {
                debug!("add rejected by validation");
                self.status = e.to_string();
                return AddOutcome::Invalid;
            }
        };

        let expense = match self.storage.insert_raw(
            &valid.amount,
            &valid.category,
            &valid.date,
            &valid.description,
        ) {
            Ok(expense) => expense,
            Err(e) => return self.fail(&e),
        };

        self.status = format!(
            "Expense Added: {} ({}, {}, {})",
            valid.amount, valid.category, valid.date, valid.description
        );
        self.form.clear();

        match self.refresh() {
            Ok(()) => AddOutcome::Added(expense),
            Err(e) => self.fail(&e),
        }
    }

    /// Re-reads every expense and re-renders the list.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage read fails.
    pub fn refresh(&mut self) -> Result<()> {
        self.expenses = self.storage.query_all()?;
        self.lines = render_list(&self.expenses);
        Ok(())
    }

    /// Closes the storage, consuming the tracker.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be closed.
    pub fn shutdown(mut self) -> Result<()> {
        self.storage.close()
    }

    fn fail(&mut self, err: &Error) -> AddOutcome {
        debug!(error = %err, "add failed");
        let text = error_text(err);
        self.status = format!("Error: {text}");
        AddOutcome::Failed(text)
    }
}

/// Formats one list line: amount to two decimals, then the text fields.
#[must_use]
pub fn render_line(expense: &Expense) -> String {
    format!(
        "{:.2} | {} | {} | {}",
        expense.amount, expense.category, expense.date, expense.description
    )
}

/// Formats every expense, preserving order.
#[must_use]
pub fn render_list(expenses: &[Expense]) -> Vec<String> {
    expenses.iter().map(render_line).collect()
}

fn error_text(err: &Error) -> String {
    match err {
        Error::Storage(inner) => inner.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::storage::{SqliteStorage, StorageStats};
    use proptest::prelude::*;

    /// In-memory double that records inserts and can be told to fail.
    #[derive(Default)]
    struct RecordingStorage {
        rows: Vec<Expense>,
        insert_calls: usize,
        fail_inserts: bool,
        closed: bool,
    }

    impl Storage for RecordingStorage {
        fn init(&mut self) -> Result<()> {
            Ok(())
        }

        fn insert(&mut self, expense: &Expense) -> Result<()> {
            self.insert_calls += 1;
            if self.fail_inserts {
                return Err(StorageError::Database("database is locked".to_string()).into());
            }
            self.rows.push(expense.clone());
            Ok(())
        }

        fn query_all(&self) -> Result<Vec<Expense>> {
            Ok(self.rows.clone())
        }

        fn count(&self) -> Result<usize> {
            Ok(self.rows.len())
        }

        fn stats(&self) -> Result<StorageStats> {
            Ok(StorageStats {
                expense_count: self.rows.len(),
                ..StorageStats::default()
            })
        }

        fn close(&mut self) -> Result<()> {
            if self.closed {
                return Err(StorageError::Closed.into());
            }
            self.closed = true;
            Ok(())
        }

        fn is_open(&self) -> bool {
            !self.closed
        }
    }

    fn tracker() -> ExpenseTracker<RecordingStorage> {
        ExpenseTracker::new(RecordingStorage::default()).unwrap()
    }

    #[test]
    fn test_add_success() {
        let mut tracker = tracker();
        tracker.set_form(ExpenseForm::new("12.50", "Food", "2024-01-01", "Lunch"));

        let outcome = tracker.submit();

        assert_eq!(
            outcome,
            AddOutcome::Added(Expense::new(12.5, "Food", "2024-01-01", "Lunch"))
        );
        assert_eq!(tracker.status(), "Expense Added: 12.50 (Food, 2024-01-01, Lunch)");
        assert!(tracker.form().is_empty());
        assert_eq!(tracker.lines(), ["12.50 | Food | 2024-01-01 | Lunch"]);
    }

    #[test]
    fn test_status_echoes_trimmed_text() {
        let mut tracker = tracker();
        tracker.set_form(ExpenseForm::new(" 7 ", "Bus ", " 2024-05-05", ""));
        tracker.submit();
        assert_eq!(tracker.status(), "Expense Added: 7 (Bus, 2024-05-05, )");
        assert_eq!(tracker.lines(), ["7.00 | Bus | 2024-05-05 | "]);
    }

    #[test]
    fn test_validation_gate_skips_insert() {
        let mut tracker = tracker();
        tracker.set_form(ExpenseForm::new("", "Food", "2024-01-01", ""));

        let outcome = tracker.submit();

        assert_eq!(outcome, AddOutcome::Invalid);
        assert_eq!(tracker.status(), "Amount, Category and Date required.");
        assert_eq!(tracker.storage().insert_calls, 0);
        assert_eq!(tracker.form().category, "Food");
    }

    #[test]
    fn test_parse_failure_contained() {
        let mut tracker = tracker();
        tracker.set_form(ExpenseForm::new("abc", "Food", "2024-01-01", ""));

        let outcome = tracker.submit();

        match outcome {
            AddOutcome::Failed(message) => {
                assert!(message.contains("abc"));
                assert_eq!(tracker.status(), format!("Error: {message}"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(tracker.storage().count().unwrap(), 0);
        assert_eq!(tracker.form().amount, "abc");
    }

    #[test]
    fn test_storage_failure_keeps_fields_and_list() {
        let storage = RecordingStorage {
            rows: vec![Expense::new(1.0, "Tea", "2024-01-01", "")],
            fail_inserts: true,
            ..RecordingStorage::default()
        };
        let mut tracker = ExpenseTracker::new(storage).unwrap();
        tracker.set_form(ExpenseForm::new("2", "Cake", "2024-01-02", "slice"));

        let outcome = tracker.submit();

        assert_eq!(
            outcome,
            AddOutcome::Failed("database error: database is locked".to_string())
        );
        assert_eq!(tracker.status(), "Error: database error: database is locked");
        assert_eq!(tracker.form(), &ExpenseForm::new("2", "Cake", "2024-01-02", "slice"));
        assert_eq!(tracker.lines(), ["1.00 | Tea | 2024-01-01 | "]);
    }

    #[test]
    fn test_initial_refresh_loads_list() {
        let storage = RecordingStorage {
            rows: vec![
                Expense::new(9.5, "Gas", "2024-02-01", ""),
                Expense::new(3.0, "Snacks", "2024-02-02", "chips"),
            ],
            ..RecordingStorage::default()
        };
        let tracker = ExpenseTracker::new(storage).unwrap();
        assert_eq!(
            tracker.lines(),
            ["9.50 | Gas | 2024-02-01 | ", "3.00 | Snacks | 2024-02-02 | chips"]
        );
    }

    #[test]
    fn test_render_list_format() {
        let rows = vec![
            Expense::new(9.5, "Gas", "2024-02-01", ""),
            Expense::new(3.0, "Snacks", "2024-02-02", "chips"),
        ];
        assert_eq!(
            render_list(&rows),
            vec![
                "9.50 | Gas | 2024-02-01 | ".to_string(),
                "3.00 | Snacks | 2024-02-02 | chips".to_string(),
            ]
        );
    }

    #[test]
    fn test_render_line_rounds() {
        assert_eq!(render_line(&Expense::new(0.5, "a", "b", "")), "0.50 | a | b | ");
        assert_eq!(render_line(&Expense::new(1234.5678, "a", "b", "c")), "1234.57 | a | b | c");
        assert_eq!(render_line(&Expense::new(-2.0, "a", "b", "c")), "-2.00 | a | b | c");
    }

    #[test]
    fn test_refresh_keeps_records_and_lines_aligned() {
        let mut tracker = tracker();
        tracker.set_form(ExpenseForm::new("9.5", "Gas", "2024-02-01", ""));
        tracker.submit();
        tracker.set_form(ExpenseForm::new("3", "Snacks", "2024-02-02", "chips"));
        tracker.submit();

        assert_eq!(
            tracker.expenses(),
            [
                Expense::new(9.5, "Gas", "2024-02-01", ""),
                Expense::new(3.0, "Snacks", "2024-02-02", "chips"),
            ]
        );
        assert_eq!(render_list(tracker.expenses()), tracker.lines());
    }

    #[test]
    fn test_shutdown_closes_storage() {
        let tracker = tracker();
        assert!(tracker.shutdown().is_ok());
    }

    #[test]
    fn test_with_sqlite_storage() {
        let mut storage = SqliteStorage::in_memory().unwrap();
        storage.init().unwrap();
        let mut tracker = ExpenseTracker::new(storage).unwrap();

        tracker.set_form(ExpenseForm::new("9.5", "Gas", "2024-02-01", ""));
        assert!(matches!(tracker.submit(), AddOutcome::Added(_)));
        tracker.set_form(ExpenseForm::new("3", "Snacks", "2024-02-02", "chips"));
        assert!(matches!(tracker.submit(), AddOutcome::Added(_)));

        assert_eq!(
            tracker.lines(),
            ["9.50 | Gas | 2024-02-01 | ", "3.00 | Snacks | 2024-02-02 | chips"]
        );
        tracker.shutdown().unwrap();
    }

    proptest! {
        #[test]
        fn prop_render_line_has_two_decimals(
            amount in -1.0e6f64..1.0e6,
            category in "[A-Za-z]{1,8}",
        ) {
            let line = render_line(&Expense::new(amount, category.clone(), "2024-01-01", ""));
            let (number, rest) = line.split_once(" | ").unwrap();
            let (_, decimals) = number.split_once('.').unwrap();
            prop_assert_eq!(decimals.len(), 2);
            prop_assert_eq!(rest, format!("{category} | 2024-01-01 | "));
        }
    }
}
