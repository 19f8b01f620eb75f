//! Catalog file writing.

use std::fs;
use std::path::Path;

use tracing::debug;

use bakery_core::{BakedGood, CatalogError, CatalogResult};

use crate::format::StoreFormat;

/// Writer for catalog files.
pub struct CatalogWriter;

impl CatalogWriter {
    /// Encode `goods` and overwrite the file at `path` with it.
    pub fn write(path: impl AsRef<Path>, format: StoreFormat, goods: &[BakedGood]) -> CatalogResult<()> {
        let path = path.as_ref();
        debug!("Writing {} baked goods as {} to {:?}", goods.len(), format, path);

        let content = format.encode(goods).map_err(CatalogError::Serialization)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }
}
