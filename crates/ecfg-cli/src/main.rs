//! # ecfg CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ecfg_cli::check::{run_check, CheckArgs};
use ecfg_cli::types::{run_types, TypesArgs};

/// Type checking and conversion of easyconfig parameter values.
#[derive(Parser, Debug)]
#[command(name = "ecfg", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Registry configuration file adjusting the parameter types.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check (and optionally convert) the parameters of an easyconfig document.
    Check(CheckArgs),

    /// List the parameter type registry.
    Types(TypesArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = ecfg_cli::build_registry(cli.config.as_deref()).and_then(|registry| {
        match &cli.command {
            Commands::Check(args) => run_check(args, &registry),
            Commands::Types(args) => run_types(args, &registry),
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
