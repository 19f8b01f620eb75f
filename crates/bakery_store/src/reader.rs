//! Catalog file reading.

use std::fs;
use std::path::Path;

use tracing::debug;

use bakery_core::{BakedGood, CatalogError, CatalogResult};

use crate::format::StoreFormat;

/// Reader for catalog files.
pub struct CatalogReader;

impl CatalogReader {
    /// Read and decode the catalog stored at `path`.
    pub fn read(path: impl AsRef<Path>, format: StoreFormat) -> CatalogResult<Vec<BakedGood>> {
        let path = path.as_ref();
        debug!("Reading {} catalog from {:?}", format, path);

        if !path.exists() {
            return Err(CatalogError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        format
            .decode(&content)
            .map_err(|message| CatalogError::InvalidFormat {
                path: path.to_path_buf(),
                message,
            })
    }
}
