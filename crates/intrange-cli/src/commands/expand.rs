use std::fmt::Write;

use tracing::debug;

use intrange::{IntervalSet, RangeConfig};

use crate::commands::{ExitStatus, user_error};
use crate::printer::Printer;

/// Print every integer covered by `text`, one per line.
pub(crate) fn expand(
    text: &str,
    config: &RangeConfig,
    printer: Printer,
) -> anyhow::Result<ExitStatus> {
    let set = match IntervalSet::parse(text, config) {
        Ok(set) => set,
        Err(err) => return user_error(&err, printer),
    };
    debug!(
        "Expanding {} integers in {} intervals",
        set.len(),
        set.intervals().len()
    );

    let mut stdout = printer.stdout();
    for value in &set {
        writeln!(stdout, "{value}")?;
    }
    Ok(ExitStatus::Success)
}
