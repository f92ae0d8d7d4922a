#![forbid(unsafe_code)]

//! `tsl`: inspect and normalize translation catalogs.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tsl_catalog::{ParseOptions, WriteOptions};

/// Check, inspect and reformat Qt Linguist translation catalogs.
#[derive(Parser, Debug)]
#[command(name = "tsl", version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `TSL_LOG`
    /// takes precedence when set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse and lint a catalog
    Check {
        #[command(flatten)]
        input: Input,
        /// Exit non-zero when any warning is found
        #[arg(long, env = "TSL_DENY_WARNINGS")]
        deny_warnings: bool,
    },
    /// Print translation coverage
    Stats {
        #[command(flatten)]
        input: Input,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve one message the way the runtime does
    Lookup {
        #[command(flatten)]
        input: Input,
        /// Context name (omit for the default context)
        #[arg(long, short, default_value = "")]
        context: String,
        /// Source text to resolve
        source: String,
        /// Values for the placeholders, in order
        args: Vec<String>,
    },
    /// Re-serialize a catalog in canonical layout
    Fmt {
        #[command(flatten)]
        input: Input,
        /// Write here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Drop `<location>` elements
        #[arg(long)]
        no_locations: bool,
        /// Drop obsolete messages
        #[arg(long)]
        drop_obsolete: bool,
    },
}

/// Catalog file plus parser settings shared by every subcommand.
#[derive(Args, Debug)]
struct Input {
    /// Path to the `.ts` catalog
    file: PathBuf,
    /// Keep surrounding whitespace in source texts and context names
    #[arg(long)]
    no_trim: bool,
    /// Ignore messages marked obsolete
    #[arg(long)]
    skip_obsolete: bool,
}

impl Input {
    fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            trim_keys: !self.no_trim,
            skip_obsolete: self.skip_obsolete,
        }
    }
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env("TSL_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let status = match cli.command {
        Command::Check {
            input,
            deny_warnings,
        } => commands::check(&input.file, &input.parse_options(), deny_warnings, &mut out),
        Command::Stats { input, json } => {
            commands::stats(&input.file, &input.parse_options(), json, &mut out)
        }
        Command::Lookup {
            input,
            context,
            source,
            args,
        } => commands::lookup(
            &input.file,
            &input.parse_options(),
            &context,
            &source,
            &args,
            &mut out,
        ),
        Command::Fmt {
            input,
            output,
            no_locations,
            drop_obsolete,
        } => {
            let options = WriteOptions {
                locations: !no_locations,
                obsolete: !drop_obsolete,
            };
            commands::fmt(
                &input.file,
                &input.parse_options(),
                &options,
                output.as_deref(),
                &mut out,
            )
        }
    }?;
    Ok(ExitCode::from(status))
}
