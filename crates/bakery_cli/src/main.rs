//! Bakery CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Storage error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bakery_core::CatalogError;

mod commands;
mod config;
mod shell;

use commands::{Cli, Commands};
use config::BakeryConfig;

/// Script-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const STORAGE_ERROR: u8 = 3;
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = BakeryConfig::load(cli.config.as_deref())?.with_cli_overrides(&cli);

    match cli.command {
        Some(Commands::Shell(args)) => commands::shell::execute(args, &config),
        Some(Commands::List(args)) => commands::list::execute(args, &config),
        Some(Commands::Search(args)) => commands::search::execute(args, &config),
        None => commands::shell::execute(Default::default(), &config),
    }
}

/// Log to stderr so listings on stdout stay clean. `RUST_LOG` wins over
/// the verbosity flags.
fn init_logging(verbose: bool, quiet: bool) {
    let default_filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn,bakery=info,bakery_core=info,bakery_store=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // a subscriber may already be installed; keep it
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .ok();
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    for cause in e.chain() {
        if let Some(catalog_error) = cause.downcast_ref::<CatalogError>() {
            return match catalog_error {
                CatalogError::UnsupportedFormat(_) => ExitCodes::INVALID_ARGS,
                _ => ExitCodes::STORAGE_ERROR,
            };
        }
        if cause.downcast_ref::<toml::de::Error>().is_some() {
            return ExitCodes::INVALID_ARGS;
        }
    }

    let msg = e.to_string().to_lowercase();
    if msg.contains("config") || msg.contains("argument") {
        ExitCodes::INVALID_ARGS
    } else {
        ExitCodes::GENERAL_ERROR
    }
}
