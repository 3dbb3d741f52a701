//! `SQLite` storage implementation.
//!
//! One connection is held from [`SqliteStorage::open`] until
//! [`Storage::close`]. Inserts run in autocommit mode, so each row is on disk
//! when the call returns.

// SQLite stores all integers as i64. Row counts are never negative.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use crate::core::Expense;
use crate::error::{IoError, Result, StorageError};
use crate::storage::schema::{
    COUNT_EXPENSES_SQL, CURRENT_SCHEMA_VERSION, EXPENSE_COLUMNS, EXPENSES_TABLE, GET_VERSION_SQL,
    INSERT_EXPENSE_SQL, SCHEMA_INFO_SQL, SELECT_EXPENSES_SQL, SET_VERSION_SQL, SchemaChange,
    TABLE_EXISTS_SQL, get_migrations_from,
};
use crate::storage::traits::{Storage, StorageStats};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// SQLite-based expense storage.
///
/// # Examples
///
/// ```no_run
/// use expense_log::storage::{SqliteStorage, Storage};
///
/// let mut storage = SqliteStorage::initialize("expenses.db").unwrap();
/// storage.insert_raw("12.50", "Food", "2024-01-01", "Lunch").unwrap();
/// storage.close().unwrap();
/// ```
pub struct SqliteStorage {
    /// `SQLite` connection; `None` once closed.
    conn: Option<Connection>,
    /// Path to the database file (None for in-memory).
    path: Option<PathBuf>,
    /// Columns found by the last `init` when they differ from the expected layout.
    unexpected_columns: Option<Vec<String>>,
}

impl SqliteStorage {
    /// Opens or creates a `SQLite` database at the given path.
    ///
    /// Missing parent directories are created. The schema is not touched;
    /// call [`Storage::init`] or use [`SqliteStorage::initialize`].
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or database cannot be created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| IoError::DirectoryFailed {
                path: parent.display().to_string(),
                reason: e.to_string(),
            })?;
        }

        let conn = Connection::open(&path).map_err(StorageError::from)?;
        debug!(path = %path.display(), "opened expense database");

        Ok(Self {
            conn: Some(conn),
            path: Some(path),
            unexpected_columns: None,
        })
    }

    /// Opens the database at `path` and brings its schema up to date.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or migrated.
    pub fn initialize<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut storage = Self::open(path)?;
        storage.init()?;
        Ok(storage)
    }

    /// Creates an in-memory `SQLite` database.
    ///
    /// Useful for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        Ok(Self {
            conn: Some(conn),
            path: None,
            unexpected_columns: None,
        })
    }

    /// Returns the database path (None for in-memory).
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns the recorded schema version, 0 if none is recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage is closed or the query fails.
    pub fn schema_version(&self) -> Result<u32> {
        Ok(read_version(self.conn()?)?.unwrap_or(0))
    }

    /// Returns the column names of the expense table, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage is closed or the query fails.
    pub fn columns(&self) -> Result<Vec<String>> {
        Ok(table_columns(self.conn()?, EXPENSES_TABLE)?)
    }

    fn conn(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or_else(|| StorageError::Closed.into())
    }

    fn conn_mut(&mut self) -> Result<&mut Connection> {
        self.conn.as_mut().ok_or_else(|| StorageError::Closed.into())
    }
}

impl Storage for SqliteStorage {
    fn init(&mut self) -> Result<()> {
        let conn = self.conn_mut()?;
        let tx = conn.transaction().map_err(StorageError::from)?;

        tx.execute_batch(SCHEMA_INFO_SQL).map_err(StorageError::from)?;
        let current = read_version(&tx)?.unwrap_or(0);

        if current > CURRENT_SCHEMA_VERSION {
            warn!(
                found = current,
                supported = CURRENT_SCHEMA_VERSION,
                "database schema is newer than this build"
            );
        }

        for migration in get_migrations_from(current) {
            if change_applied(&tx, &migration.change).map_err(StorageError::from)? {
                debug!(
                    to_version = migration.to_version,
                    step = migration.description,
                    "migration already present"
                );
                continue;
            }
            tx.execute_batch(&migration.change.sql())
                .map_err(|e| StorageError::Migration(format!("{}: {e}", migration.description)))?;
            info!(
                to_version = migration.to_version,
                step = migration.description,
                "applied migration"
            );
        }

        if current < CURRENT_SCHEMA_VERSION {
            tx.execute(SET_VERSION_SQL, params![CURRENT_SCHEMA_VERSION.to_string()])
                .map_err(StorageError::from)?;
        }

        let found = table_columns(&tx, EXPENSES_TABLE).map_err(StorageError::from)?;
        tx.commit().map_err(StorageError::from)?;

        // Inserts are positional, so they are refused until the layout matches.
        self.unexpected_columns = if found == EXPENSE_COLUMNS {
            None
        } else {
            warn!(
                found = ?found,
                expected = ?EXPENSE_COLUMNS,
                "expense table has unexpected columns; inserts will fail"
            );
            Some(found)
        };
        Ok(())
    }

    fn insert(&mut self, expense: &Expense) -> Result<()> {
        let conn = self.conn()?;
        if let Some(found) = &self.unexpected_columns {
            return Err(StorageError::SchemaMismatch {
                found: found.clone(),
            }
            .into());
        }

        conn.execute(
            INSERT_EXPENSE_SQL,
            params![
                expense.amount,
                expense.category,
                expense.date,
                expense.description
            ],
        )
        .map_err(StorageError::from)?;
        debug!(
            amount = expense.amount,
            category = %expense.category,
            "inserted expense"
        );
        Ok(())
    }

    fn query_all(&self) -> Result<Vec<Expense>> {
        let mut stmt = self
            .conn()?
            .prepare(SELECT_EXPENSES_SQL)
            .map_err(StorageError::from)?;

        // Rows written before the date/description columns existed hold NULL there.
        let expenses = stmt
            .query_map([], |row| {
                Ok(Expense {
                    amount: row.get(0)?,
                    category: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    date: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    description: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                })
            })
            .map_err(StorageError::from)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StorageError::from)?;

        Ok(expenses)
    }

    fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn()?
            .query_row(COUNT_EXPENSES_SQL, [], |row| row.get(0))
            .map_err(StorageError::from)?;
        Ok(count as usize)
    }

    fn stats(&self) -> Result<StorageStats> {
        let expense_count = self.count()?;
        let schema_version = self.schema_version()?;
        let db_size = self
            .path()
            .and_then(|p| std::fs::metadata(p).ok())
            .map(|m| m.len());

        Ok(StorageStats {
            expense_count,
            schema_version,
            db_path: self.path().map(Path::to_path_buf),
            db_size,
        })
    }

    fn close(&mut self) -> Result<()> {
        let conn = self.conn.take().ok_or(StorageError::Closed)?;
        conn.close().map_err(|(_, e)| StorageError::from(e))?;
        debug!("closed expense database");
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.conn.is_some()
    }
}

/// Reads the recorded schema version, if the version table has one.
fn read_version(conn: &Connection) -> Result<Option<u32>> {
    if !table_exists(conn, "schema_info").map_err(StorageError::from)? {
        return Ok(None);
    }

    let version: Option<String> = conn
        .query_row(GET_VERSION_SQL, [], |row| row.get(0))
        .optional()
        .map_err(StorageError::from)?;

    Ok(version.and_then(|v| v.parse().ok()))
}

fn table_exists(conn: &Connection, table: &str) -> rusqlite::Result<bool> {
    let count: i64 = conn.query_row(TABLE_EXISTS_SQL, params![table], |row| row.get(0))?;
    Ok(count > 0)
}

/// Column names of `table` in declaration order; empty if the table is missing.
fn table_columns(conn: &Connection, table: &str) -> rusqlite::Result<Vec<String>> {
    // Table names come from schema constants, never from input.
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(columns)
}

/// Checks whether a migration's change is already reflected in the database.
fn change_applied(conn: &Connection, change: &SchemaChange) -> rusqlite::Result<bool> {
    match change {
        SchemaChange::CreateTable { table, .. } => table_exists(conn, table),
        SchemaChange::AddColumn { table, column, .. } => {
            Ok(table_columns(conn, table)?.iter().any(|c| c == column))
        }
    }
}
