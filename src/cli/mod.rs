//! CLI layer for expense-log.
//!
//! Provides the command-line interface using clap: one-shot `add`, `list`,
//! and `status` commands plus the interactive form.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
