//! CLI command implementations.
//!
//! Every command opens (and migrates) the database, does its work through
//! the presentation shell or the storage trait, and closes the database
//! before returning.

use crate::cli::output::{OutputFormat, format_add_result, format_expense_list, format_status};
use crate::cli::parser::{Cli, Commands};
use crate::core::ExpenseForm;
use crate::error::{CommandError, Result};
use crate::shell::{AddOutcome, ExpenseTracker, run_form};
use crate::storage::{SqliteStorage, Storage};
use std::io;
use std::path::Path;

/// Executes the CLI command.
///
/// # Returns
///
/// Result with output string on success. The interactive form writes to
/// stdout directly and returns an empty string.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the command fails.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);
    let db_path = cli.get_db_path();

    match cli.command() {
        Commands::Add {
            amount,
            category,
            date,
            description,
        } => cmd_add(
            &db_path,
            ExpenseForm::new(amount, category, date, description),
            format,
        ),
        Commands::List => cmd_list(&db_path, format),
        Commands::Status => cmd_status(&db_path, format),
        Commands::Form => cmd_form(&db_path),
    }
}

// ==================== Command Implementations ====================

fn cmd_add(db_path: &Path, form: ExpenseForm, format: OutputFormat) -> Result<String> {
    let storage = SqliteStorage::initialize(db_path)?;
    let mut tracker = ExpenseTracker::new(storage)?;
    tracker.set_form(form);

    let result: Result<String> = match tracker.submit() {
        AddOutcome::Added(_) => Ok(format_add_result(
            tracker.status(),
            tracker.expenses(),
            format,
        )),
        AddOutcome::Invalid => Err(CommandError::Rejected(tracker.status().to_string()).into()),
        AddOutcome::Failed(text) => Err(CommandError::Rejected(text).into()),
    };

    let closed = tracker.shutdown();
    let output = result?;
    closed?;
    Ok(output)
}

fn cmd_list(db_path: &Path, format: OutputFormat) -> Result<String> {
    let mut storage = SqliteStorage::initialize(db_path)?;
    let expenses = storage.query_all()?;
    storage.close()?;
    Ok(format_expense_list(&expenses, format))
}

fn cmd_status(db_path: &Path, format: OutputFormat) -> Result<String> {
    let mut storage = SqliteStorage::initialize(db_path)?;
    let stats = storage.stats()?;
    storage.close()?;
    Ok(format_status(&stats, format))
}

fn cmd_form(db_path: &Path) -> Result<String> {
    let storage = SqliteStorage::initialize(db_path)?;
    let tracker = ExpenseTracker::new(storage)?;
    run_form(tracker, io::stdin().lock(), io::stdout().lock())?;
    Ok(String::new())
}
