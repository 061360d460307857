use std::fmt::Write;

use tracing::debug;

use intrange::{IntervalSet, RangeConfig};

use crate::commands::{ExitStatus, user_error};
use crate::printer::Printer;

/// A binary set operation, folded over the operands from left to right.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Operation {
    Union,
    Intersection,
    Difference,
    SymmetricDifference,
}

impl Operation {
    fn apply(self, left: &mut IntervalSet, right: &IntervalSet) {
        match self {
            Self::Union => left.update(right),
            Self::Intersection => left.intersection_update(right),
            Self::Difference => left.difference_update(right),
            Self::SymmetricDifference => left.symmetric_difference_update(right),
        }
    }
}

pub(crate) fn combine(
    operation: Operation,
    left: &str,
    right: &[String],
    config: &RangeConfig,
    printer: Printer,
) -> anyhow::Result<ExitStatus> {
    let mut result = match IntervalSet::parse(left, config) {
        Ok(set) => set,
        Err(err) => return user_error(&err, printer),
    };
    for text in right {
        let operand = match IntervalSet::parse(text, config) {
            Ok(set) => set,
            Err(err) => return user_error(&err, printer),
        };
        operation.apply(&mut result, &operand);
        debug!("{operation:?} with `{text}`: `{result}`");
    }

    writeln!(printer.stdout(), "{result}")?;
    Ok(ExitStatus::Success)
}
