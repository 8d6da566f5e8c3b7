//! Line-oriented shell acting as the view layer over [`BudgetManager`](crate::core::budget_manager::BudgetManager).

pub mod output;
mod shell;
pub mod shell_context;

pub use shell::{parse_command_line, run_cli, run_script, ParseError};
pub use shell_context::{CliMode, CommandError, LoopControl, ShellContext};

use thiserror::Error;

use crate::errors::BudgetError;

/// Failures that end the shell session.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Budget(#[from] BudgetError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}
