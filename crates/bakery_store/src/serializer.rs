//! File-backed implementations of the catalog persistence contract.

use std::path::{Path, PathBuf};

use bakery_core::{BakedGood, CatalogResult, Serializer};

use crate::format::StoreFormat;
use crate::reader::CatalogReader;
use crate::writer::CatalogWriter;

/// Stores the catalog in a single file using one [`StoreFormat`].
#[derive(Debug, Clone)]
pub struct FileSerializer {
    path: PathBuf,
    format: StoreFormat,
}

impl FileSerializer {
    pub fn new(path: impl Into<PathBuf>, format: StoreFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// JSON codec for `path`.
    pub fn json(path: impl Into<PathBuf>) -> Self {
        Self::new(path, StoreFormat::Json)
    }

    /// YAML codec for `path`.
    pub fn yaml(path: impl Into<PathBuf>) -> Self {
        Self::new(path, StoreFormat::Yaml)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> StoreFormat {
        self.format
    }
}

impl Serializer for FileSerializer {
    fn describe(&self) -> String {
        format!("{} ({})", self.path.display(), self.format)
    }

    fn read(&self) -> CatalogResult<Vec<BakedGood>> {
        CatalogReader::read(&self.path, self.format)
    }

    fn write(&self, goods: &[BakedGood]) -> CatalogResult<()> {
        CatalogWriter::write(&self.path, self.format, goods)
    }
}

/// Build the serializer for `path`.
///
/// An explicit `format` wins; otherwise it is inferred from the extension.
pub fn serializer_for(
    path: impl AsRef<Path>,
    format: Option<StoreFormat>,
) -> CatalogResult<Box<dyn Serializer>> {
    let path = path.as_ref();
    let format = match format {
        Some(format) => format,
        None => StoreFormat::from_path(path)?,
    };
    Ok(Box::new(FileSerializer::new(path, format)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializer_for_infers_format() {
        let serializer = serializer_for("bakedgoods.yml", None).unwrap();
        assert_eq!(serializer.describe(), "bakedgoods.yml (yaml)");
    }

    #[test]
    fn test_serializer_for_explicit_format_wins() {
        let serializer = serializer_for("catalog.dat", Some(StoreFormat::Json)).unwrap();
        assert_eq!(serializer.describe(), "catalog.dat (json)");

        assert!(serializer_for("catalog.dat", None).is_err());
    }
}
