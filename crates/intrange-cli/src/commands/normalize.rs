use std::fmt::Write;

use intrange::{IntervalSet, RangeConfig};

use crate::commands::{ExitStatus, user_error};
use crate::printer::Printer;

/// Print the canonical text of the union of all `texts`.
pub(crate) fn normalize(
    texts: &[String],
    config: &RangeConfig,
    printer: Printer,
) -> anyhow::Result<ExitStatus> {
    let mut union = IntervalSet::with_config(config.clone());
    for text in texts {
        match IntervalSet::parse(text, config) {
            Ok(set) => union.update(&set),
            Err(err) => return user_error(&err, printer),
        }
    }

    writeln!(printer.stdout(), "{union}")?;
    Ok(ExitStatus::Success)
}
