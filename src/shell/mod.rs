//! Presentation shell.
//!
//! Collects the four form fields, gates them on presence, hands them to the
//! injected storage, and re-renders the expense list.

pub mod terminal;
pub mod tracker;

pub use terminal::run_form;
pub use tracker::{AddOutcome, ExpenseTracker, render_line, render_list};
