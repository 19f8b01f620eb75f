//! Shell command - Run the interactive menu.

use std::io;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use crate::config::BakeryConfig;
use crate::shell::input::TerminalInput;
use crate::shell::menu::Palette;
use crate::shell::Shell;

#[derive(Args, Debug, Default)]
pub struct ShellArgs {
    /// Load the catalog file before showing the menu
    #[arg(long)]
    pub load: bool,
}

pub fn execute(args: ShellArgs, config: &BakeryConfig) -> Result<()> {
    let catalog = super::open_catalog(config)?;
    let input = TerminalInput::new().context("Failed to open the terminal for input")?;
    let mut shell = Shell::new(catalog, input, io::stdout(), Palette::new(config.color));

    if args.load || config.autoload {
        debug!("Loading catalog from {:?} on start", config.data_file);
        shell.load();
    }

    shell.run();
    Ok(())
}
