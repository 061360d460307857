use std::process::ExitCode;

use anstream::eprintln;
use clap::Parser;
use owo_colors::OwoColorize;

use crate::cli::{Cli, Commands};
use crate::commands::{ExitStatus, Operation};
use crate::printer::Printer;

mod cli;
mod commands;
mod logging;
mod printer;
mod settings;

fn run() -> anyhow::Result<ExitStatus> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };
    let globals = &cli.global_args;

    anstream::ColorChoice::write_global(globals.color.into());

    // Configure the `tracing` crate, which controls internal logging.
    logging::setup_logging(match globals.verbose {
        0 => logging::Level::Default,
        1 => logging::Level::Verbose,
        _ => logging::Level::ExtraVerbose,
    })?;

    // Configure the `Printer`, which controls user-facing output in the CLI.
    let printer = if globals.quiet {
        Printer::Quiet
    } else if globals.verbose > 0 {
        Printer::Verbose
    } else {
        Printer::Default
    };

    // Bad delimiters or a malformed settings file are user errors, like malformed range text.
    let config = match settings::resolve(globals) {
        Ok(config) => config,
        Err(err) => {
            print_error_chain(&anyhow::Error::new(err));
            return Ok(ExitStatus::Failure);
        }
    };

    match cli.command {
        Commands::Normalize(args) => commands::normalize(&args.text, &config, printer),
        Commands::Expand(args) => commands::expand(&args.text, &config, printer),
        Commands::Union(args) => {
            commands::combine(Operation::Union, &args.left, &args.right, &config, printer)
        }
        Commands::Intersection(args) => commands::combine(
            Operation::Intersection,
            &args.left,
            &args.right,
            &config,
            printer,
        ),
        Commands::Difference(args) => commands::combine(
            Operation::Difference,
            &args.left,
            &args.right,
            &config,
            printer,
        ),
        Commands::SymmetricDifference(args) => commands::combine(
            Operation::SymmetricDifference,
            &args.left,
            &args.right,
            &config,
            printer,
        ),
        Commands::Check(args) => {
            commands::check(args.domain, &args.text, args.names, &config, printer)
        }
    }
}

#[allow(clippy::print_stderr)]
fn print_error_chain(err: &anyhow::Error) {
    let mut causes = err.chain();
    if let Some(err) = causes.next() {
        eprintln!("{}: {}", "error".red().bold(), err);
    }
    for err in causes {
        eprintln!("  {}: {}", "Caused by".red().bold(), err);
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code.into(),
        Err(err) => {
            print_error_chain(&err);
            ExitStatus::Error.into()
        }
    }
}
