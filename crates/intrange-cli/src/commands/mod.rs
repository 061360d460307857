use std::fmt::Write;
use std::process::ExitCode;

use owo_colors::OwoColorize;

pub(crate) use check::check;
pub(crate) use combine::{Operation, combine};
pub(crate) use expand::expand;
pub(crate) use normalize::normalize;

use crate::printer::Printer;

mod check;
mod combine;
mod expand;
mod normalize;

#[derive(Copy, Clone)]
pub(crate) enum ExitStatus {
    /// The command succeeded.
    Success,

    /// The command failed due to an error in the user input.
    Failure,

    /// The command failed with an unexpected error.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => Self::from(0),
            ExitStatus::Failure => Self::from(1),
            ExitStatus::Error => Self::from(2),
        }
    }
}

/// Report an error in the user input and return [`ExitStatus::Failure`].
pub(crate) fn user_error(
    err: &impl std::fmt::Display,
    printer: Printer,
) -> anyhow::Result<ExitStatus> {
    writeln!(printer.stderr(), "{}: {err}", "error".red().bold())?;
    Ok(ExitStatus::Failure)
}
