//! CLI command definitions.
//!
//! Without a subcommand the interactive shell starts. `list` and `search`
//! run a single query against the stored catalog and exit.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use bakery_core::CatalogStore;
use bakery_store::serializer_for;

use crate::config::BakeryConfig;

pub mod list;
pub mod search;
pub mod shell;

/// Bakery - baked goods inventory manager
#[derive(Parser)]
#[command(name = "bakery")]
#[command(version, about = "Bakery - baked goods and ingredients inventory manager")]
#[command(long_about = r#"
Bakery keeps a catalog of baked goods, their ingredients and allergens,
and saves it to a JSON or YAML file between runs.

COMMANDS:
  shell   → Interactive menu (default)
  list    → Print the stored catalog, optionally filtered
  search  → Search the stored catalog by name, ingredient or allergen

CONFIGURATION:
  bakery.toml in the working directory, or --config PATH:
    data_file = "bakedgoods.json"
    format    = "json"        # or "yaml"
    color     = true
    autoload  = false

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Storage error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (defaults to ./bakery.toml when present)
    #[arg(long, global = true, env = "BAKERY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Catalog file to load from and save to
    #[arg(short, long, global = true, env = "BAKERY_FILE")]
    pub file: Option<PathBuf>,

    /// Catalog file format (json or yaml)
    #[arg(long, global = true, env = "BAKERY_FORMAT")]
    pub format: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive menu
    Shell(shell::ShellArgs),

    /// List the stored baked goods
    List(list::ListArgs),

    /// Search the stored baked goods
    Search(search::SearchArgs),
}

/// Build a catalog backed by the configured file, without loading it.
pub fn open_catalog(config: &BakeryConfig) -> Result<CatalogStore> {
    let serializer = serializer_for(&config.data_file, config.store_format()?)
        .with_context(|| format!("Cannot use catalog file {:?}", config.data_file))?;
    Ok(CatalogStore::new(serializer))
}

/// Build and load the configured catalog.
pub fn load_catalog(config: &BakeryConfig) -> Result<CatalogStore> {
    let mut catalog = open_catalog(config)?;
    catalog
        .load()
        .with_context(|| format!("Failed to load catalog from {:?}", config.data_file))?;
    Ok(catalog)
}
