//! Persistence contract between the catalog and its codecs.

use crate::error::CatalogResult;
use crate::models::BakedGood;

/// Reads and writes the whole catalog as one unit.
///
/// `read` must rebuild every baked good including its ingredients and
/// allergen sets. `write` overwrites the target completely.
#[cfg_attr(test, mockall::automock)]
pub trait Serializer {
    /// Human-readable description of the storage target, used in logs.
    fn describe(&self) -> String;

    fn read(&self) -> CatalogResult<Vec<BakedGood>>;

    fn write(&self, goods: &[BakedGood]) -> CatalogResult<()>;
}

/// Serializer that holds nothing and stores nothing.
///
/// Useful for a catalog that is only ever kept in memory.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSerializer;

impl Serializer for NullSerializer {
    fn describe(&self) -> String {
        "in-memory".to_string()
    }

    fn read(&self) -> CatalogResult<Vec<BakedGood>> {
        Ok(Vec::new())
    }

    fn write(&self, _goods: &[BakedGood]) -> CatalogResult<()> {
        Ok(())
    }
}
