//! Error types for the catalog.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised while loading or storing the catalog.
///
/// Positional lookups and filters never fail; they report "not found"
/// through `Option`, `bool` or a sentinel message instead.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid catalog format in file {path}: {message}")]
    InvalidFormat { path: PathBuf, message: String },

    #[error("Invalid catalog record: {0}")]
    InvalidRecord(String),

    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
