//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// expense-log: a personal expense logger backed by a local `SQLite` file.
///
/// Without a subcommand, opens the interactive add form.
#[derive(Parser, Debug)]
#[command(name = "expense-log")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the expense database file.
    ///
    /// Defaults to `expenses.db` in the current directory.
    #[arg(short, long, env = "EXPENSE_LOG_DB", global = true)]
    pub db_path: Option<PathBuf>,

    /// Enable verbose (debug) logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Add one expense, then print the refreshed list.
    Add {
        /// Amount spent.
        #[arg(short, long, default_value = "", allow_hyphen_values = true)]
        amount: String,

        /// Category label.
        #[arg(short, long, default_value = "")]
        category: String,

        /// Date, conventionally YYYY-MM-DD.
        #[arg(short = 't', long, default_value = "")]
        date: String,

        /// Optional description.
        #[arg(short = 'm', long, default_value = "")]
        description: String,
    },

    /// List all expenses.
    #[command(name = "list", alias = "ls")]
    List,

    /// Show database status.
    Status,

    /// Open the interactive add form (the default).
    Form,
}

impl Cli {
    /// Returns the database path, using the default if not specified.
    #[must_use]
    pub fn get_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(crate::storage::DEFAULT_DB_PATH))
    }

    /// Returns the subcommand, treating a missing one as [`Commands::Form`].
    #[must_use]
    pub fn command(&self) -> &Commands {
        self.command.as_ref().unwrap_or(&Commands::Form)
    }
}
