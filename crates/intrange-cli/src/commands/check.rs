use std::fmt::Write;

use intrange::RangeConfig;
use intrange_domain::{Bounded, Domain, PortSet, ProtocolSet, VlanSet};

use crate::cli::DomainKind;
use crate::commands::{ExitStatus, user_error};
use crate::printer::Printer;

/// Validate `text` against a domain and print its canonical form.
pub(crate) fn check(
    domain: DomainKind,
    text: &str,
    names: bool,
    config: &RangeConfig,
    printer: Printer,
) -> anyhow::Result<ExitStatus> {
    let rendered = match domain {
        DomainKind::Port => PortSet::parse(text, config).map(|set| render(&set, names, config)),
        DomainKind::Vlan => VlanSet::parse(text, config).map(|set| render(&set, names, config)),
        DomainKind::Protocol => {
            ProtocolSet::parse(text, config).map(|set| render(&set, names, config))
        }
    };

    match rendered {
        Ok(rendered) => {
            writeln!(printer.stdout(), "{rendered}")?;
            Ok(ExitStatus::Success)
        }
        Err(err) => user_error(&err, printer),
    }
}

fn render<D: Domain>(set: &Bounded<D>, names: bool, config: &RangeConfig) -> String {
    if names && D::NAMED {
        set.names().join(config.splitter())
    } else {
        set.to_string()
    }
}
