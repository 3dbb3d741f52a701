//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::core::Expense;
use crate::error::Error;
use crate::shell::render_list;
use crate::storage::StorageStats;
use serde::Serialize;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Formats the expense list.
#[must_use]
pub fn format_expense_list(expenses: &[Expense], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_expense_list_text(expenses),
        OutputFormat::Json => format_json(&expenses),
    }
}

fn format_expense_list_text(expenses: &[Expense]) -> String {
    if expenses.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let mut output = String::new();
    for line in render_list(expenses) {
        output.push_str(&line);
        output.push('\n');
    }
    output
}

/// Formats the result of an add: the status line, then the list.
#[must_use]
pub fn format_add_result(status: &str, expenses: &[Expense], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(output, "{status}");
            output.push_str(&format_expense_list_text(expenses));
            output
        }
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct AddOutput<'a> {
                status: &'a str,
                expenses: &'a [Expense],
            }
            format_json(&AddOutput { status, expenses })
        }
    }
}

/// Formats a status response.
#[must_use]
pub fn format_status(stats: &StorageStats, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_status_text(stats),
        OutputFormat::Json => format_json(stats),
    }
}

fn format_status_text(stats: &StorageStats) -> String {
    let mut output = String::new();
    output.push_str("Expense Log Status\n");
    output.push_str("==================\n\n");
    if let Some(ref path) = stats.db_path {
        let _ = writeln!(output, "  Database:  {}", path.display());
    }
    let _ = writeln!(output, "  Expenses:  {}", stats.expense_count);
    let _ = writeln!(output, "  Schema:    v{}", stats.schema_version);
    if let Some(size) = stats.db_size {
        let _ = writeln!(output, "  DB size:   {size} bytes");
    }
    output
}

/// Formats an error for display.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct ErrorOutput {
                error: String,
            }
            format_json(&ErrorOutput {
                error: error.to_string(),
            })
        }
    }
}

/// Formats a value as JSON.
fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}
