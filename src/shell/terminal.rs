//! Line-based terminal rendition of the add form.
//!
//! Reads fields from any `BufRead` and writes prompts, status, and the list
//! to any `Write`, so the loop runs the same against a terminal or a test
//! buffer.

use crate::core::ExpenseForm;
use crate::error::Result;
use crate::shell::tracker::{AddOutcome, ExpenseTracker};
use crate::storage::Storage;
use std::io::{BufRead, Write};

/// Form title.
pub const FORM_TITLE: &str = "Add Expense";

/// List heading.
pub const LIST_TITLE: &str = "Expenses List";

/// Answer that empties a field instead of keeping its default.
pub const CLEAR_ANSWER: &str = "-";

/// Runs the form until input ends, then shuts the tracker down.
///
/// The list is shown once up front and again after every successful add.
/// Fields from a failed submit are offered as defaults on the next round.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails, or if the
/// storage cannot be closed.
pub fn run_form<S, R, W>(mut tracker: ExpenseTracker<S>, mut input: R, mut output: W) -> Result<()>
where
    S: Storage,
    R: BufRead,
    W: Write,
{
    let result = form_loop(&mut tracker, &mut input, &mut output);
    let closed = tracker.shutdown();
    result.and(closed)
}

fn form_loop<S, R, W>(tracker: &mut ExpenseTracker<S>, input: &mut R, output: &mut W) -> Result<()>
where
    S: Storage,
    R: BufRead,
    W: Write,
{
    write_list(output, tracker.lines())?;

    loop {
        writeln!(output)?;
        writeln!(
            output,
            "{FORM_TITLE} (Ctrl-D to quit, '{CLEAR_ANSWER}' clears a field)"
        )?;

        let current = tracker.form().clone();
        let Some(amount) = prompt(input, output, "Amount", &current.amount)? else {
            break;
        };
        let Some(category) = prompt(input, output, "Category", &current.category)? else {
            break;
        };
        let Some(date) = prompt(input, output, "Date (YYYY-MM-DD)", &current.date)? else {
            break;
        };
        let Some(description) =
            prompt(input, output, "Description", &current.description)?
        else {
            break;
        };

        tracker.set_form(ExpenseForm::new(amount, category, date, description));
        let outcome = tracker.submit();
        writeln!(output, "{}", tracker.status())?;

        if matches!(outcome, AddOutcome::Added(_)) {
            write_list(output, tracker.lines())?;
        }
    }

    writeln!(output)?;
    output.flush()?;
    Ok(())
}

/// Prompts for one field. `None` means input ended.
///
/// An empty answer keeps `current` when there is one; [`CLEAR_ANSWER`]
/// empties the field.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    current: &str,
) -> Result<Option<String>> {
    if current.is_empty() {
        write!(output, "{label}: ")?;
    } else {
        write!(output, "{label} [{current}]: ")?;
    }
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    let answer = line.trim_end_matches(['\n', '\r']);
    match answer {
        "" => Ok(Some(current.to_string())),
        CLEAR_ANSWER => Ok(Some(String::new())),
        _ => Ok(Some(answer.to_string())),
    }
}

fn write_list<W: Write>(output: &mut W, lines: &[String]) -> Result<()> {
    writeln!(output)?;
    writeln!(output, "{LIST_TITLE}")?;
    for line in lines {
        writeln!(output, "{line}")?;
    }
    Ok(())
}
