//! Storage layer for expense-log.
//!
//! Persists expenses in a single-file `SQLite` database. The schema is
//! versioned through a `schema_info` table and brought up to date by
//! additive migrations when the file is opened.

pub mod schema;
pub mod sqlite;
pub mod traits;

pub use schema::{CURRENT_SCHEMA_VERSION, EXPENSE_COLUMNS};
pub use sqlite::SqliteStorage;
pub use traits::{Storage, StorageStats};

/// Default database path, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "expenses.db";
