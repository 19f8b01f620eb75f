//! Application configuration.
//!
//! Values come from `bakery.toml`, then command-line flags and their
//! environment variables override them.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use bakery_store::StoreFormat;

use crate::commands::Cli;

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "bakery.toml";

/// Catalog file used when neither the config nor the CLI names one.
pub const DEFAULT_DATA_FILE: &str = "bakedgoods.json";

/// Settings for a bakery session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BakeryConfig {
    /// Catalog file to load from and save to
    pub data_file: PathBuf,
    /// Encoding of the catalog file; inferred from the extension when unset
    pub format: Option<String>,
    /// Whether menu output uses ANSI colors
    pub color: bool,
    /// Whether the shell loads the catalog on start
    pub autoload: bool,
}

impl Default for BakeryConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            format: None,
            color: true,
            autoload: false,
        }
    }
}

impl BakeryConfig {
    /// Load the config file.
    ///
    /// A missing `bakery.toml` in the working directory means defaults; a
    /// missing file that was asked for explicitly is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !path.exists() {
            if required {
                anyhow::bail!("Config file not found: {:?}", path);
            }
            debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        debug!("Reading config from {:?}", path);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        Self::from_toml_str(&content).with_context(|| format!("Invalid config file {:?}", path))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply command-line overrides.
    pub fn with_cli_overrides(mut self, cli: &Cli) -> Self {
        if let Some(file) = &cli.file {
            self.data_file = file.clone();
        }
        if let Some(format) = &cli.format {
            self.format = Some(format.clone());
        }
        if cli.no_color {
            self.color = false;
        }
        self
    }

    /// The explicitly configured catalog format, if any.
    pub fn store_format(&self) -> Result<Option<StoreFormat>> {
        self.format
            .as_deref()
            .map(|name| name.parse::<StoreFormat>())
            .transpose()
            .context("Invalid catalog format option")
    }
}
