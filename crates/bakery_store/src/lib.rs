//! # bakery_store
//!
//! File persistence for the bakery catalog.
//!
//! The whole catalog is written and read as one document. Two encodings are
//! supported:
//!
//! - **JSON**: pretty-printed, the default (`bakedgoods.json`)
//! - **YAML**: selected with `--format yaml` or a `.yaml`/`.yml` file name
//!
//! ## Example
//!
//! ```rust,no_run
//! use bakery_core::{BakedGood, CatalogStore};
//! use bakery_store::serializer_for;
//!
//! let serializer = serializer_for("bakedgoods.yaml", None).unwrap();
//! let mut catalog = CatalogStore::new(serializer);
//! catalog.add(BakedGood::new(1, "Lemon Cake", "Zesty", 12.99, "Cake", false));
//! catalog.store().unwrap();
//!
//! catalog.load().unwrap();
//! assert_eq!(catalog.number_of_baked_goods(), 1);
//! ```

pub mod format;
pub mod reader;
pub mod serializer;
pub mod writer;

pub use format::StoreFormat;
pub use reader::CatalogReader;
pub use serializer::{serializer_for, FileSerializer};
pub use writer::CatalogWriter;
