//! # expense-log
//!
//! A single-screen personal expense logger. A form collects amount,
//! category, date, and description; each valid entry is appended to a local
//! `SQLite` file and the full list is redisplayed.
//!
//! ## Layout
//!
//! - [`storage`]: the `expenses` table, its versioned migrations, insert and
//!   full-table read
//! - [`shell`]: the add flow, its validation gate, and list rendering
//! - [`cli`]: argument parsing, output formats, and the interactive form

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]

pub mod cli;
pub mod core;
pub mod error;
pub mod shell;
pub mod storage;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export core domain types
pub use core::{Expense, ExpenseForm};

// Re-export storage types
pub use storage::{DEFAULT_DB_PATH, SqliteStorage, Storage};

// Re-export shell types
pub use shell::{AddOutcome, ExpenseTracker, render_line, render_list};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
