//! The baked goods catalog.
//!
//! Records are addressed by their position in the catalog. Positions are
//! recomputed every time a listing is rendered, and deleting a record
//! shifts every later record down by one, so callers should re-list before
//! addressing a record by position.

use std::collections::BTreeSet;
use std::fmt;

use tracing::{debug, info, warn};

use crate::error::CatalogResult;
use crate::models::{BakedGood, Ingredient};
use crate::persistence::{NullSerializer, Serializer};
use crate::utils::is_valid_list_index;

pub const NO_BAKED_GOODS: &str = "No baked goods stored";
pub const NO_PRODUCTS: &str = "No products stored";
pub const NO_REFRIGERATED: &str = "No refrigerated baked goods found";
pub const NO_NON_REFRIGERATED: &str = "No non-refrigerated baked goods found";

/// Owns the ordered sequence of baked goods and the codec used to persist it.
pub struct CatalogStore {
    baked_goods: Vec<BakedGood>,
    serializer: Box<dyn Serializer>,
}

impl CatalogStore {
    /// Create an empty catalog persisted through `serializer`.
    pub fn new(serializer: Box<dyn Serializer>) -> Self {
        Self {
            baked_goods: Vec::new(),
            serializer,
        }
    }

    /// Create an empty catalog that is never persisted.
    pub fn in_memory() -> Self {
        Self::new(Box::new(NullSerializer))
    }

    // ---------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------

    /// Replace the whole catalog with what the serializer reads.
    ///
    /// On failure the current contents are left as they were.
    pub fn load(&mut self) -> CatalogResult<()> {
        let mut goods = self.serializer.read()?;
        for good in &mut goods {
            good.sync_ingredient_counter()?;
        }
        info!(
            "Loaded {} baked goods from {}",
            goods.len(),
            self.serializer.describe()
        );
        self.baked_goods = goods;
        Ok(())
    }

    /// Write the whole catalog through the serializer.
    pub fn store(&self) -> CatalogResult<()> {
        self.serializer.write(&self.baked_goods)?;
        info!(
            "Stored {} baked goods to {}",
            self.baked_goods.len(),
            self.serializer.describe()
        );
        Ok(())
    }

    // ---------------------------------------------------------------------
    // CRUD by position
    // ---------------------------------------------------------------------

    /// Append a baked good. Always succeeds.
    pub fn add(&mut self, baked_good: BakedGood) -> bool {
        debug!("Adding baked good: {}", baked_good.product_name);
        self.baked_goods.push(baked_good);
        true
    }

    pub fn is_valid_index(&self, index: usize) -> bool {
        is_valid_list_index(index, &self.baked_goods)
    }

    pub fn find_baked_good(&self, index: usize) -> Option<&BakedGood> {
        self.baked_goods.get(index)
    }

    /// Remove and return the record at `index`.
    pub fn delete_baked_good(&mut self, index: usize) -> Option<BakedGood> {
        if self.is_valid_index(index) {
            let removed = self.baked_goods.remove(index);
            debug!("Deleted baked good at {}: {}", index, removed.product_name);
            Some(removed)
        } else {
            warn!("No baked good at position {}", index);
            None
        }
    }

    /// Overwrite the product fields of the record at `index` in place.
    ///
    /// Ingredients of the existing record are kept as they are.
    pub fn update_baked_good(&mut self, index: usize, updated: Option<&BakedGood>) -> bool {
        match (self.baked_goods.get_mut(index), updated) {
            (Some(existing), Some(updated)) => {
                existing.overwrite_details(updated);
                debug!("Updated baked good at {}", index);
                true
            }
            _ => false,
        }
    }

    pub fn baked_goods(&self) -> &[BakedGood] {
        &self.baked_goods
    }

    // ---------------------------------------------------------------------
    // Ingredients of the record at a position
    // ---------------------------------------------------------------------

    /// Add an ingredient to the record at `index`, returning its new id.
    pub fn add_ingredient(&mut self, index: usize, ingredient: Ingredient) -> Option<u32> {
        self.baked_goods
            .get_mut(index)
            .and_then(|good| good.add_ingredient(ingredient))
    }

    pub fn update_ingredient(&mut self, index: usize, id: u32, updated: &Ingredient) -> bool {
        self.baked_goods
            .get_mut(index)
            .is_some_and(|good| good.update_ingredient(id, updated))
    }

    pub fn update_ingredient_quantity(&mut self, index: usize, id: u32, quantity: f64) -> bool {
        match self.baked_goods.get_mut(index).and_then(|g| g.ingredient_mut(id)) {
            Some(ingredient) => {
                ingredient.ingredient_quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn set_ingredient_allergens(
        &mut self,
        index: usize,
        id: u32,
        allergens: BTreeSet<String>,
    ) -> bool {
        match self.baked_goods.get_mut(index).and_then(|g| g.ingredient_mut(id)) {
            Some(ingredient) => {
                ingredient.allergens = allergens;
                true
            }
            None => false,
        }
    }

    pub fn delete_ingredient(&mut self, index: usize, id: u32) -> bool {
        self.baked_goods
            .get_mut(index)
            .is_some_and(|good| good.delete_ingredient(id))
    }

    // ---------------------------------------------------------------------
    // Counting
    // ---------------------------------------------------------------------

    pub fn number_of_baked_goods(&self) -> usize {
        self.baked_goods.len()
    }

    pub fn number_of_baked_goods_by_category(&self, category: &str) -> usize {
        self.count_where(|g| g.is_in_category(category))
    }

    pub fn number_of_refrigerated_baked_goods(&self) -> usize {
        self.count_where(|g| g.refrigerated)
    }

    pub fn number_of_non_refrigerated_baked_goods(&self) -> usize {
        self.count_where(|g| !g.refrigerated)
    }

    fn count_where(&self, predicate: impl Fn(&BakedGood) -> bool) -> usize {
        self.baked_goods.iter().filter(|g| predicate(g)).count()
    }

    // ---------------------------------------------------------------------
    // Listing and searching
    // ---------------------------------------------------------------------

    pub fn list_all_baked_goods(&self) -> String {
        if self.baked_goods.is_empty() {
            NO_BAKED_GOODS.to_string()
        } else {
            format_listing(self.baked_goods.iter().enumerate())
        }
    }

    pub fn list_baked_goods_by_category(&self, category: &str) -> String {
        if self.baked_goods.is_empty() {
            return NO_PRODUCTS.to_string();
        }

        let matches = self.positions_where(|g| g.is_in_category(category));
        if matches.is_empty() {
            format!("No products with category: {}", category)
        } else {
            format!(
                "{} baked goods with category {}: {}",
                matches.len(),
                category,
                format_listing(matches)
            )
        }
    }

    pub fn list_refrigerated_baked_goods(&self) -> String {
        self.list_where(|g| g.refrigerated, || NO_REFRIGERATED.to_string())
    }

    pub fn list_non_refrigerated_baked_goods(&self) -> String {
        self.list_where(|g| !g.refrigerated, || NO_NON_REFRIGERATED.to_string())
    }

    /// Baked goods priced within `min..=max`.
    pub fn list_baked_goods_by_price_range(&self, min: f64, max: f64) -> String {
        self.list_where(
            |g| min <= g.product_price && g.product_price <= max,
            || format!("No baked goods found in the price range: {:.2} - {:.2}", min, max),
        )
    }

    /// Baked goods with at least one ingredient carrying `allergen`.
    pub fn list_baked_goods_by_allergen(&self, allergen: &str) -> String {
        if self.baked_goods.is_empty() {
            return NO_BAKED_GOODS.to_string();
        }
        self.list_where(
            |g| g.contains_allergen(allergen),
            || format!("No baked goods found with allergen: {}", allergen),
        )
    }

    /// Same result as [`Self::list_baked_goods_by_allergen`]; kept as the
    /// entry point for the search menu.
    pub fn search_baked_goods_by_allergen(&self, allergen: &str) -> String {
        self.list_baked_goods_by_allergen(allergen)
    }

    /// Case-insensitive substring search on product names.
    pub fn search_by_product_name(&self, search: &str) -> String {
        if self.baked_goods.is_empty() {
            return NO_BAKED_GOODS.to_string();
        }
        let needle = search.to_lowercase();
        self.list_where(
            |g| g.product_name.to_lowercase().contains(&needle),
            || format!("No baked goods found matching: {}", search),
        )
    }

    /// Case-insensitive substring search on ingredient names across the
    /// whole catalog.
    pub fn search_by_ingredient_name(&self, search: &str) -> String {
        if self.baked_goods.is_empty() {
            return NO_BAKED_GOODS.to_string();
        }
        let needle = search.to_lowercase();

        let hits: Vec<String> = self
            .baked_goods
            .iter()
            .enumerate()
            .flat_map(|(pos, good)| {
                good.ingredients()
                    .iter()
                    .filter(|i| i.ingredient_name.to_lowercase().contains(&needle))
                    .map(move |i| format!("{}: {} -> {}", pos, good.product_name, i.summary()))
            })
            .collect();

        if hits.is_empty() {
            format!("No ingredients found matching: {}", search)
        } else {
            hits.join("\n")
        }
    }

    fn positions_where(&self, predicate: impl Fn(&BakedGood) -> bool) -> Vec<(usize, &BakedGood)> {
        self.baked_goods
            .iter()
            .enumerate()
            .filter(|(_, g)| predicate(g))
            .collect()
    }

    fn list_where(
        &self,
        predicate: impl Fn(&BakedGood) -> bool,
        empty: impl FnOnce() -> String,
    ) -> String {
        let matches = self.positions_where(predicate);
        if matches.is_empty() {
            empty()
        } else {
            format_listing(matches)
        }
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogStore")
            .field("baked_goods", &self.baked_goods.len())
            .field("serializer", &self.serializer.describe())
            .finish()
    }
}

/// Render `<position>: <record>` lines.
fn format_listing<'a>(records: impl IntoIterator<Item = (usize, &'a BakedGood)>) -> String {
    records
        .into_iter()
        .map(|(pos, good)| format!("{}: {}", pos, good))
        .collect::<Vec<_>>()
        .join("\n")
}
