//! Data models for the catalog.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CatalogError, CatalogResult};

/// Sentinel rendered when a baked good has no ingredients.
pub const NO_INGREDIENTS: &str = "NO INGREDIENTS ADDED";

/// A component of a baked good.
///
/// The id is scoped to the owning [`BakedGood`] and is assigned when the
/// ingredient is added to it; whatever id the value carries beforehand is
/// overwritten.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Ingredient {
    pub ingredient_id: u32,
    pub ingredient_name: String,
    pub ingredient_quantity: f64,
    pub ingredient_description: String,
    #[serde(default)]
    pub allergens: BTreeSet<String>,
}

impl Ingredient {
    /// Create an ingredient with no allergens.
    pub fn new(
        name: impl Into<String>,
        quantity: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            ingredient_id: 0,
            ingredient_name: name.into(),
            ingredient_quantity: quantity,
            ingredient_description: description.into(),
            allergens: BTreeSet::new(),
        }
    }

    /// Add an allergen label.
    pub fn with_allergen(mut self, allergen: impl Into<String>) -> Self {
        self.allergens.insert(allergen.into());
        self
    }

    /// Replace the allergen set.
    pub fn with_allergens<I, S>(mut self, allergens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allergens = allergens.into_iter().map(Into::into).collect();
        self
    }

    /// Exact, case-sensitive allergen lookup.
    pub fn has_allergen(&self, allergen: &str) -> bool {
        self.allergens.contains(allergen)
    }

    /// Single-line rendering used by ingredient search results.
    pub fn summary(&self) -> String {
        let mut line = format!(
            "#{} {} (qty {})",
            self.ingredient_id, self.ingredient_name, self.ingredient_quantity
        );
        if !self.allergens.is_empty() {
            line.push_str(&format!(" [{}]", self.allergens_joined()));
        }
        line
    }

    fn allergens_joined(&self) -> String {
        self.allergens
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Ingredient ID: {}", self.ingredient_id)?;
        writeln!(f, "Ingredient Name: {}", self.ingredient_name)?;
        writeln!(f, "Ingredient Quantity: {}", self.ingredient_quantity)?;
        writeln!(f, "Ingredient Description: {}", self.ingredient_description)?;
        write!(f, "Allergens: {}", self.allergens_joined())
    }
}

/// A sellable product in the catalog.
///
/// Owns its ingredients exclusively. Ingredient ids come from a private
/// counter that only ever increases, so an id is never handed out twice
/// within one baked good, not even after the ingredient holding it is
/// deleted. The counter is persisted with the record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BakedGood {
    pub product_id: i32,
    pub product_name: String,
    pub product_desc: String,
    pub product_price: f64,
    pub product_category: String,
    #[serde(default)]
    pub refrigerated: bool,
    #[serde(default)]
    ingredients: Vec<Ingredient>,
    #[serde(default)]
    next_ingredient_id: u32,
}

impl BakedGood {
    /// Create a baked good with no ingredients.
    pub fn new(
        product_id: i32,
        product_name: impl Into<String>,
        product_desc: impl Into<String>,
        product_price: f64,
        product_category: impl Into<String>,
        refrigerated: bool,
    ) -> Self {
        Self {
            product_id,
            product_name: product_name.into(),
            product_desc: product_desc.into(),
            product_price,
            product_category: product_category.into(),
            refrigerated,
            ingredients: Vec::new(),
            next_ingredient_id: 0,
        }
    }

    /// Overwrite every product field from `other`, keeping this record's
    /// ingredients and id counter.
    pub(crate) fn overwrite_details(&mut self, other: &BakedGood) {
        self.product_id = other.product_id;
        self.product_name = other.product_name.clone();
        self.product_desc = other.product_desc.clone();
        self.product_price = other.product_price;
        self.product_category = other.product_category.clone();
        self.refrigerated = other.refrigerated;
    }

    /// Case-insensitive exact category match.
    pub fn is_in_category(&self, category: &str) -> bool {
        self.product_category.to_lowercase() == category.to_lowercase()
    }

    /// Whether any ingredient carries `allergen` (exact, case-sensitive).
    pub fn contains_allergen(&self, allergen: &str) -> bool {
        self.ingredients.iter().any(|i| i.has_allergen(allergen))
    }

    // ---------------------------------------------------------------------
    // Ingredients
    // ---------------------------------------------------------------------

    /// Add an ingredient, assigning it the next id. Returns that id, or
    /// `None` once the id space is exhausted.
    pub fn add_ingredient(&mut self, mut ingredient: Ingredient) -> Option<u32> {
        let id = self.next_ingredient_id;
        let Some(next) = id.checked_add(1) else {
            warn!("No ingredient ids left for {}", self.product_name);
            return None;
        };
        self.next_ingredient_id = next;
        ingredient.ingredient_id = id;
        debug!("Adding ingredient {} to {}", id, self.product_name);
        self.ingredients.push(ingredient);
        Some(id)
    }

    pub fn number_of_ingredients(&self) -> usize {
        self.ingredients.len()
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    /// Find an ingredient by id.
    pub fn find_ingredient(&self, id: u32) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.ingredient_id == id)
    }

    /// Remove the ingredient with `id`. Returns `true` if one was removed.
    pub fn delete_ingredient(&mut self, id: u32) -> bool {
        match self.ingredients.iter().position(|i| i.ingredient_id == id) {
            Some(pos) => {
                self.ingredients.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Overwrite name, quantity, description and allergens of the ingredient
    /// with `id`. The id itself never changes.
    pub fn update_ingredient(&mut self, id: u32, updated: &Ingredient) -> bool {
        match self.ingredient_mut(id) {
            Some(existing) => {
                existing.ingredient_name = updated.ingredient_name.clone();
                existing.ingredient_quantity = updated.ingredient_quantity;
                existing.ingredient_description = updated.ingredient_description.clone();
                existing.allergens = updated.allergens.clone();
                true
            }
            None => false,
        }
    }

    pub(crate) fn ingredient_mut(&mut self, id: u32) -> Option<&mut Ingredient> {
        self.ingredients.iter_mut().find(|i| i.ingredient_id == id)
    }

    /// Tab-indented listing of every ingredient.
    pub fn list_ingredients(&self) -> String {
        if self.ingredients.is_empty() {
            return NO_INGREDIENTS.to_string();
        }

        self.ingredients
            .iter()
            .map(|ingredient| {
                ingredient
                    .to_string()
                    .lines()
                    .map(|line| format!("\t{}", line))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Raise the id counter above every stored id.
    ///
    /// Files written by hand may omit the counter; without this a later
    /// `add_ingredient` could hand out an id that is already taken.
    pub(crate) fn sync_ingredient_counter(&mut self) -> CatalogResult<()> {
        let Some(max) = self.ingredients.iter().map(|i| i.ingredient_id).max() else {
            return Ok(());
        };
        if self.next_ingredient_id <= max {
            self.next_ingredient_id = max.checked_add(1).ok_or_else(|| {
                CatalogError::InvalidRecord(format!(
                    "ingredient id {} of {} leaves no room for further ids",
                    max, self.product_name
                ))
            })?;
        }
        Ok(())
    }
}

impl fmt::Display for BakedGood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Product ID: {}", self.product_id)?;
        writeln!(f, "Product Name: {}", self.product_name)?;
        writeln!(f, "Product Description: {}", self.product_desc)?;
        writeln!(f, "Product Price: {:.2}", self.product_price)?;
        writeln!(f, "Product Category: {}", self.product_category)?;
        writeln!(
            f,
            "Refrigerated: {}",
            if self.refrigerated { "Yes" } else { "No" }
        )?;
        writeln!(f, "Ingredients:")?;
        write!(f, "{}", self.list_ingredients())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn muffin() -> BakedGood {
        BakedGood::new(1, "Blueberry Muffin", "Fluffy muffin", 3.50, "Bun", false)
    }

    #[test]
    fn test_ingredient_ids_are_never_reused() {
        let mut good = muffin();

        assert_eq!(good.add_ingredient(Ingredient::new("Flour", 2.0, "Plain")), Some(0));
        assert!(good.delete_ingredient(0));
        assert_eq!(good.add_ingredient(Ingredient::new("Sugar", 1.0, "Caster")), Some(1));
        assert_eq!(good.add_ingredient(Ingredient::new("Eggs", 3.0, "Free range")), Some(2));

        let ids: Vec<u32> = good.ingredients().iter().map(|i| i.ingredient_id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_add_ingredient_overrides_caller_id() {
        let mut good = muffin();
        let mut ingredient = Ingredient::new("Flour", 2.0, "Plain");
        ingredient.ingredient_id = 42;

        let id = good.add_ingredient(ingredient);

        assert_eq!(id, Some(0));
        assert!(good.find_ingredient(42).is_none());
        assert_eq!(good.find_ingredient(0).unwrap().ingredient_name, "Flour");
    }

    #[test]
    fn test_delete_missing_ingredient() {
        let mut good = muffin();
        good.add_ingredient(Ingredient::new("Flour", 2.0, "Plain"));

        assert!(!good.delete_ingredient(7));
        assert_eq!(good.number_of_ingredients(), 1);
    }

    #[test]
    fn test_update_ingredient_keeps_id() {
        let mut good = muffin();
        let id = good
            .add_ingredient(Ingredient::new("Flour", 2.0, "Plain").with_allergens(["Gluten", "Dairy"]))
            .unwrap();

        let mut updated = Ingredient::new("Spelt Flour", 2.5, "Wholegrain");
        updated.ingredient_id = 99;
        assert!(good.update_ingredient(id, &updated));

        let stored = good.find_ingredient(id).unwrap();
        assert_eq!(stored.ingredient_id, id);
        assert_eq!(stored.ingredient_name, "Spelt Flour");
        assert_eq!(stored.ingredient_quantity, 2.5);
        assert!(stored.allergens.is_empty());
        assert!(!good.contains_allergen("Gluten"));

        assert!(!good.update_ingredient(99, &updated));
    }

    #[test]
    fn test_allergen_match_is_case_sensitive() {
        let mut good = muffin();
        good.add_ingredient(Ingredient::new("Flour", 2.0, "Plain").with_allergen("Gluten"));

        assert!(good.contains_allergen("Gluten"));
        assert!(!good.contains_allergen("gluten"));
    }

    #[test]
    fn test_category_match_ignores_case() {
        let good = muffin();
        assert!(good.is_in_category("bun"));
        assert!(good.is_in_category("BUN"));
        assert!(!good.is_in_category("Buns"));
    }

    #[test]
    fn test_list_ingredients() {
        let mut good = muffin();
        assert_eq!(good.list_ingredients(), NO_INGREDIENTS);

        good.add_ingredient(Ingredient::new("Flour", 2.0, "Plain").with_allergens(["Gluten", "Dairy"]));
        let listing = good.list_ingredients();

        assert!(listing.lines().all(|line| line.starts_with('\t')));
        assert!(listing.contains("\tIngredient Name: Flour"));
        assert!(listing.contains("\tAllergens: Dairy, Gluten"));
    }

    #[test]
    fn test_display_embeds_ingredients() {
        let good = muffin();
        let text = good.to_string();

        assert!(text.contains("Product Name: Blueberry Muffin"));
        assert!(text.contains("Product Price: 3.50"));
        assert!(text.contains("Refrigerated: No"));
        assert!(text.ends_with(NO_INGREDIENTS));
    }

    #[test]
    fn test_sync_ingredient_counter() {
        let mut good = muffin();
        good.add_ingredient(Ingredient::new("Flour", 2.0, "Plain"));
        good.add_ingredient(Ingredient::new("Sugar", 1.0, "Caster"));
        good.next_ingredient_id = 0;

        good.sync_ingredient_counter().unwrap();

        assert_eq!(good.add_ingredient(Ingredient::new("Eggs", 3.0, "Large")), Some(2));
    }

    #[test]
    fn test_sync_ingredient_counter_rejects_largest_id() {
        let mut good = muffin();
        good.add_ingredient(Ingredient::new("Flour", 2.0, "Plain"));
        good.ingredients[0].ingredient_id = u32::MAX;

        let err = good.sync_ingredient_counter().unwrap_err();

        assert!(matches!(err, CatalogError::InvalidRecord(_)));
    }

    #[test]
    fn test_add_ingredient_when_ids_exhausted() {
        let mut good = muffin();
        good.next_ingredient_id = u32::MAX;

        assert_eq!(good.add_ingredient(Ingredient::new("Flour", 2.0, "Plain")), None);
        assert_eq!(good.number_of_ingredients(), 0);
        assert_eq!(good.next_ingredient_id, u32::MAX);
    }

    #[test]
    fn test_ingredient_summary() {
        let ingredient = Ingredient::new("Flour", 2.0, "Plain").with_allergen("Gluten");
        assert_eq!(ingredient.summary(), "#0 Flour (qty 2) [Gluten]");
    }
}
