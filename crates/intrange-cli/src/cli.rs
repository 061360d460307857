use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::settings::EnvVars;

#[derive(Parser)]
#[command(name = "intrange", author, version, about)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    #[command(flatten)]
    pub(crate) global_args: GlobalArgs,
}

#[derive(Debug, Args)]
pub(crate) struct GlobalArgs {
    /// The delimiter between items [default: `,`].
    #[arg(global = true, long, value_name = "DELIMITER")]
    pub(crate) splitter: Option<String>,

    /// The delimiter between the bounds of a range [default: `-`].
    #[arg(global = true, long, value_name = "DELIMITER")]
    pub(crate) range_splitter: Option<String>,

    /// Drop malformed items instead of failing.
    #[arg(global = true, long)]
    pub(crate) lenient: bool,

    /// Read range settings from the given TOML file instead of `intrange.toml`.
    #[arg(global = true, long, env = EnvVars::INTRANGE_CONFIG, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    /// Do not print any output.
    #[arg(global = true, long, short, conflicts_with = "verbose")]
    pub(crate) quiet: bool,

    /// Use verbose output.
    #[arg(global = true, action = clap::ArgAction::Count, long, short, conflicts_with = "quiet")]
    pub(crate) verbose: u8,

    /// Control colors in output.
    #[arg(
        global = true,
        long,
        value_enum,
        default_value = "auto",
        value_name = "COLOR_CHOICE"
    )]
    pub(crate) color: ColorChoice,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
pub(crate) enum ColorChoice {
    /// Enables colored output only when the output is going to a terminal or TTY with support.
    Auto,

    /// Enables colored output regardless of the detected environment.
    Always,

    /// Disables colored output.
    Never,
}

impl From<ColorChoice> for anstream::ColorChoice {
    fn from(value: ColorChoice) -> Self {
        match value {
            ColorChoice::Auto => Self::Auto,
            ColorChoice::Always => Self::Always,
            ColorChoice::Never => Self::Never,
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Print the canonical form of the union of the given range texts.
    Normalize(NormalizeArgs),
    /// Print every integer covered by a range text, one per line.
    Expand(ExpandArgs),
    /// Print the integers in any of the given range texts.
    Union(CombineArgs),
    /// Print the integers in all of the given range texts.
    Intersection(CombineArgs),
    /// Print the integers in the first range text but in none of the others.
    Difference(CombineArgs),
    /// Print the integers in an odd number of the given range texts.
    SymmetricDifference(CombineArgs),
    /// Validate a range text against a domain, such as ports or VLAN IDs.
    Check(CheckArgs),
}

#[derive(Args)]
pub(crate) struct NormalizeArgs {
    /// The range texts to normalize, e.g. `3-5,1,3-5`.
    #[arg(required = true)]
    pub(crate) text: Vec<String>,
}

#[derive(Args)]
pub(crate) struct ExpandArgs {
    /// The range text to expand.
    pub(crate) text: String,
}

#[derive(Args)]
pub(crate) struct CombineArgs {
    /// The left-most operand.
    pub(crate) left: String,

    /// The remaining operands, applied from left to right.
    #[arg(required = true)]
    pub(crate) right: Vec<String>,
}

#[derive(Args)]
pub(crate) struct CheckArgs {
    /// The domain to validate against.
    #[arg(value_enum)]
    pub(crate) domain: DomainKind,

    /// The range text to validate.
    pub(crate) text: String,

    /// Print each value by name where one is known (e.g., `tcp` for protocol 6).
    #[arg(long)]
    pub(crate) names: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub(crate) enum DomainKind {
    /// TCP and UDP ports, 1-65535.
    Port,
    /// IEEE 802.1Q VLAN IDs, 1-4094.
    Vlan,
    /// IP protocol numbers, 0-255, or their IANA keywords.
    Protocol,
}
