//! # bakery_core
//!
//! In-memory catalog of baked goods and their ingredients.
//!
//! ## Features
//!
//! - **Catalog**: ordered, position-addressed baked goods with CRUD, filters and searches
//! - **Ingredients**: per-product ingredient registry with never-reused ids and allergen sets
//! - **Persistence contract**: the [`Serializer`] trait implemented by the codecs in `bakery_store`
//!
//! ## Example
//!
//! ```rust
//! use bakery_core::{BakedGood, CatalogStore, Ingredient};
//!
//! let mut catalog = CatalogStore::in_memory();
//! catalog.add(BakedGood::new(1, "Sourdough", "Artisanal loaf", 5.99, "Bread", false));
//!
//! let id = catalog
//!     .add_ingredient(0, Ingredient::new("Flour", 4.0, "Strong white").with_allergen("Gluten"))
//!     .unwrap();
//! assert_eq!(id, 0);
//!
//! println!("{}", catalog.list_baked_goods_by_allergen("Gluten"));
//! ```

pub mod catalog;
pub mod error;
pub mod models;
pub mod persistence;
pub mod utils;

pub use catalog::CatalogStore;
pub use error::{CatalogError, CatalogResult};
pub use models::{BakedGood, Ingredient};
pub use persistence::{NullSerializer, Serializer};
