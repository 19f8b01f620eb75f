//! Interactive menu shell.
//!
//! The shell owns the catalog for the whole session and hands it to each
//! menu handler through `&mut self`. Baked goods are picked by their current
//! position (the full list is printed first); ingredients are picked by id.

pub mod input;
pub mod menu;

use std::fmt::Display;
use std::io::Write;

use tracing::{info, warn};

use bakery_core::utils::{parse_allergens, valid_range};
use bakery_core::{BakedGood, CatalogStore, Ingredient};

use input::InputSource;
use menu::{Palette, LIST_MENU_MAX, MAIN_MENU_MAX};

const PROMPT: &str = " ==>> ";

/// Menu-driven session over one catalog.
pub struct Shell<I: InputSource, W: Write> {
    catalog: CatalogStore,
    input: I,
    out: W,
    palette: Palette,
    finished: bool,
}

impl<I: InputSource, W: Write> Shell<I, W> {
    pub fn new(catalog: CatalogStore, input: I, out: W, palette: Palette) -> Self {
        Self {
            catalog,
            input,
            out,
            palette,
            finished: false,
        }
    }

    /// Run the menu until the user exits or input ends.
    pub fn run(&mut self) {
        info!("Starting the Bakery App");

        while !self.finished {
            let menu = menu::main_menu(&self.palette);
            self.say(menu);
            let Some(option) = self.read_int(PROMPT) else {
                break;
            };
            if !valid_range(option, 0, MAIN_MENU_MAX) {
                self.say(format!("Invalid option entered: {}", option));
                continue;
            }

            match option {
                0 => self.finished = true,
                1 => self.add_baked_good(),
                2 => self.delete_baked_good(),
                3 => self.update_baked_good(),
                4 => self.list_baked_goods(),
                5 => self.add_ingredient(),
                6 => self.update_ingredient_quantity(),
                7 => self.delete_ingredient(),
                8 => self.mark_ingredient_allergens(),
                9 => self.search_baked_goods(),
                10 => self.search_ingredients(),
                11 => self.search_by_allergen(),
                12 => self.load(),
                13 => self.save(),
                _ => unreachable!("menu option {} outside checked range", option),
            }
        }

        let bye = self.palette.danger("Exiting the Bakery App. Goodbye!");
        self.say(bye);
        info!("Exiting the Bakery App");
    }

    // ---------------------------------------------------------------------
    // Baked goods
    // ---------------------------------------------------------------------

    fn add_baked_good(&mut self) {
        let Some(good) = self.read_baked_good() else {
            return;
        };

        if self.catalog.add(good) {
            let msg = self.palette.success("Added Successfully");
            self.say(msg);
        } else {
            self.say("Add Failed");
        }
    }

    fn delete_baked_good(&mut self) {
        let Some(index) = self.choose_baked_good("Enter the index of the baked good to delete: ") else {
            return;
        };

        match self.catalog.delete_baked_good(index) {
            Some(removed) => {
                let msg = format!("Delete Successful! Deleted baked good: {}", removed.product_name);
                self.say(self.palette.success(&msg));
            }
            None => {
                warn!("Delete of position {} failed", index);
                self.say("Delete NOT Successful");
            }
        }
    }

    fn update_baked_good(&mut self) {
        let Some(index) = self.choose_baked_good("Enter the index of the baked good to update: ") else {
            return;
        };
        let Some(updated) = self.read_baked_good() else {
            return;
        };

        if self.catalog.update_baked_good(index, Some(&updated)) {
            self.say(self.palette.success("Update Successful"));
        } else {
            self.say("Update Failed");
        }
    }

    fn read_baked_good(&mut self) -> Option<BakedGood> {
        let product_id = self.read_i32("Enter the product ID: ")?;
        let name = self.read_text("Enter the name of the product: ")?;
        let desc = self.read_text("Enter the description of the product: ")?;
        let price = self.read_double("Enter the price of the product: ")?;
        let category = self.read_text("Enter the category of the product (e.g. Cake, Bun, Bread): ")?;
        let refrigerated = self.read_yes_no("Is the baked good refrigerated? (yes/no): ")?;

        Some(BakedGood::new(product_id, name, desc, price, category, refrigerated))
    }

    fn list_baked_goods(&mut self) {
        if self.catalog.number_of_baked_goods() == 0 {
            self.say("Option Invalid - No baked goods stored");
            return;
        }

        let menu = menu::list_menu(&self.palette);
        self.say(menu);
        let Some(option) = self.read_int(PROMPT) else {
            return;
        };
        if !valid_range(option, 1, LIST_MENU_MAX) {
            self.say(format!("Invalid option entered: {}", option));
            return;
        }

        let listing = match option {
            1 => self.catalog.list_all_baked_goods(),
            2 => {
                let Some(category) = self.read_text("Enter the category to filter by: ") else {
                    return;
                };
                self.catalog.list_baked_goods_by_category(&category)
            }
            3 => {
                let Some(min) = self.read_double("Enter the minimum price: ") else {
                    return;
                };
                let Some(max) = self.read_double("Enter the maximum price: ") else {
                    return;
                };
                self.catalog.list_baked_goods_by_price_range(min, max)
            }
            4 => self.catalog.list_refrigerated_baked_goods(),
            5 => self.catalog.list_non_refrigerated_baked_goods(),
            6 => {
                let Some(allergen) = self.read_text("Enter the allergen to filter by: ") else {
                    return;
                };
                self.catalog.list_baked_goods_by_allergen(&allergen)
            }
            _ => unreachable!("list option {} outside checked range", option),
        };
        self.say(listing);
    }

    // ---------------------------------------------------------------------
    // Ingredients
    // ---------------------------------------------------------------------

    fn add_ingredient(&mut self) {
        let Some(index) = self.choose_baked_good("Enter the index of the baked good: ") else {
            return;
        };
        let Some(name) = self.read_text("\tEnter the ingredient name: ") else {
            return;
        };
        let Some(quantity) = self.read_double("\tEnter the quantity: ") else {
            return;
        };
        let Some(description) = self.read_text("\tEnter the ingredient description: ") else {
            return;
        };
        let Some(allergens) = self.read_text("\tEnter the allergens (comma-separated): ") else {
            return;
        };

        let ingredient = Ingredient::new(name, quantity, description)
            .with_allergens(parse_allergens(&allergens));

        match self.catalog.add_ingredient(index, ingredient) {
            Some(id) => {
                let msg = format!("Add Successful! Ingredient ID: {}", id);
                self.say(self.palette.success(&msg));
            }
            None => self.say("Add NOT Successful"),
        }
    }

    fn update_ingredient_quantity(&mut self) {
        let Some((index, id)) = self.choose_ingredient() else {
            return;
        };
        let Some(quantity) = self.read_double("Enter new quantity: ") else {
            return;
        };

        if self.catalog.update_ingredient_quantity(index, id, quantity) {
            self.say(self.palette.success("Ingredient quantity updated successfully"));
        } else {
            self.say("Failed to update ingredient quantity");
        }
    }

    fn delete_ingredient(&mut self) {
        let Some((index, id)) = self.choose_ingredient() else {
            return;
        };

        if self.catalog.delete_ingredient(index, id) {
            self.say(self.palette.success("Delete Successful!"));
        } else {
            self.say("Delete NOT Successful");
        }
    }

    /// Clear the allergens of an ingredient that has some, or set them on
    /// one that has none.
    fn mark_ingredient_allergens(&mut self) {
        let Some((index, id)) = self.choose_ingredient() else {
            return;
        };
        let has_allergens = self
            .catalog
            .find_baked_good(index)
            .and_then(|good| good.find_ingredient(id))
            .is_some_and(|ingredient| !ingredient.allergens.is_empty());

        if has_allergens {
            let Some(clear) = self.read_yes_no(
                "The ingredient currently has allergens. Mark it as allergen-free? (Y/N): ",
            ) else {
                return;
            };
            if clear && self.catalog.set_ingredient_allergens(index, id, Default::default()) {
                self.say("Ingredient marked as allergen-free.");
            } else {
                self.say("No changes made to allergens.");
            }
            return;
        }

        let Some(mark) = self.read_yes_no(
            "The ingredient currently has no allergens. Mark it with allergens? (Y/N): ",
        ) else {
            return;
        };
        if !mark {
            self.say("No changes made to allergens.");
            return;
        }

        let Some(line) = self.read_text("Enter the allergens (comma-separated): ") else {
            return;
        };
        let allergens = parse_allergens(&line);
        if allergens.is_empty() {
            self.say("No changes made to allergens.");
            return;
        }

        let joined = allergens.iter().cloned().collect::<Vec<_>>().join(", ");
        if self.catalog.set_ingredient_allergens(index, id, allergens) {
            self.say(format!("Allergens set: {}.", joined));
        }
    }

    // ---------------------------------------------------------------------
    // Searching
    // ---------------------------------------------------------------------

    fn search_baked_goods(&mut self) {
        let Some(name) = self.read_text("Enter the name to search by: ") else {
            return;
        };
        let result = self.catalog.search_by_product_name(&name);
        self.say(result);
    }

    fn search_ingredients(&mut self) {
        let Some(name) = self.read_text("Enter the ingredient name to search by: ") else {
            return;
        };
        let result = self.catalog.search_by_ingredient_name(&name);
        self.say(result);
    }

    fn search_by_allergen(&mut self) {
        let Some(allergen) = self.read_text("Enter the allergen to search by: ") else {
            return;
        };
        let result = self.catalog.search_baked_goods_by_allergen(&allergen);
        self.say(result);
    }

    // ---------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------

    /// Load the catalog, reporting failures without leaving the shell.
    pub fn load(&mut self) {
        match self.catalog.load() {
            Ok(()) => {
                let msg = format!(
                    "Products loaded successfully ({} baked goods).",
                    self.catalog.number_of_baked_goods()
                );
                self.say(self.palette.success(&msg));
            }
            Err(e) => {
                warn!("Load failed: {}", e);
                self.say(self.palette.danger(&format!("Error reading from file: {}", e)));
            }
        }
    }

    fn save(&mut self) {
        match self.catalog.store() {
            Ok(()) => self.say(self.palette.success("Baked goods saved successfully.")),
            Err(e) => {
                warn!("Save failed: {}", e);
                self.say(self.palette.danger(&format!("Error writing to file: {}", e)));
            }
        }
    }

    // ---------------------------------------------------------------------
    // Selection helpers
    // ---------------------------------------------------------------------

    /// Show every baked good and ask for a position.
    fn choose_baked_good(&mut self, prompt: &str) -> Option<usize> {
        let listing = self.catalog.list_all_baked_goods();
        self.say(listing);
        if self.catalog.number_of_baked_goods() == 0 {
            return None;
        }

        let raw = self.read_int(prompt)?;
        match usize::try_from(raw) {
            Ok(index) if self.catalog.is_valid_index(index) => Some(index),
            _ => {
                self.say(format!("There is no baked good at index {}", raw));
                None
            }
        }
    }

    /// Pick a baked good, then one of its ingredients by id.
    fn choose_ingredient(&mut self) -> Option<(usize, u32)> {
        let index = self.choose_baked_good("Enter the index of the baked good: ")?;
        let good = self.catalog.find_baked_good(index)?;

        if good.number_of_ingredients() == 0 {
            self.say("No ingredients available for the chosen baked good.");
            return None;
        }
        let listing = good.list_ingredients();
        self.say(listing);

        let raw = self.read_int("Enter the ID of the ingredient: ")?;
        let found = u32::try_from(raw)
            .ok()
            .filter(|id| self.catalog.find_baked_good(index).and_then(|g| g.find_ingredient(*id)).is_some());
        if found.is_none() {
            self.say(format!("Ingredient with ID {} not found.", raw));
        }
        found.map(|id| (index, id))
    }

    // ---------------------------------------------------------------------
    // Input and output
    // ---------------------------------------------------------------------

    fn say(&mut self, message: impl Display) {
        if let Err(e) = writeln!(self.out, "{}", message) {
            warn!("Failed to write output: {}", e);
        }
    }

    fn read_raw(&mut self, prompt: &str) -> Option<String> {
        if let Err(e) = self.out.flush() {
            warn!("Failed to flush output: {}", e);
        }
        match self.input.read_line(prompt) {
            Some(line) => Some(line.trim().to_string()),
            None => {
                self.finished = true;
                None
            }
        }
    }

    fn read_text(&mut self, prompt: &str) -> Option<String> {
        self.read_raw(prompt)
    }

    fn read_int(&mut self, prompt: &str) -> Option<i64> {
        self.read_parsed(prompt, "Please enter a whole number.")
    }

    fn read_i32(&mut self, prompt: &str) -> Option<i32> {
        self.read_parsed(prompt, "Please enter a whole number.")
    }

    fn read_double(&mut self, prompt: &str) -> Option<f64> {
        loop {
            let value: f64 = self.read_parsed(prompt, "Please enter a number.")?;
            if value.is_finite() {
                return Some(value);
            }
            self.say(format!("Invalid input '{}'. Please enter a finite number.", value));
        }
    }

    fn read_parsed<T: std::str::FromStr>(&mut self, prompt: &str, hint: &str) -> Option<T> {
        loop {
            let line = self.read_raw(prompt)?;
            match line.parse() {
                Ok(value) => return Some(value),
                Err(_) => self.say(format!("Invalid input '{}'. {}", line, hint)),
            }
        }
    }

    /// Accepts y/yes/n/no in any case.
    fn read_yes_no(&mut self, prompt: &str) -> Option<bool> {
        loop {
            let line = self.read_raw(prompt)?;
            match line.to_lowercase().as_str() {
                "y" | "yes" => return Some(true),
                "n" | "no" => return Some(false),
                _ => self.say("Please answer yes or no."),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::input::ScriptedInput;
    use super::*;
    use bakery_store::FileSerializer;
    use tempfile::tempdir;

    fn run(catalog: CatalogStore, lines: &[&str]) -> (CatalogStore, String) {
        let mut out = Vec::new();
        let catalog = {
            let mut shell = Shell::new(
                catalog,
                ScriptedInput::new(lines.iter().copied()),
                &mut out,
                Palette::new(false),
            );
            shell.run();
            shell.catalog
        };
        (catalog, String::from_utf8(out).unwrap())
    }

    fn with_muffin() -> CatalogStore {
        let mut catalog = CatalogStore::in_memory();
        let mut muffin = BakedGood::new(1, "Blueberry Muffin", "Fluffy", 3.50, "Bun", false);
        muffin.add_ingredient(Ingredient::new("Flour", 2.0, "Plain").with_allergens(["Gluten", "Dairy"]));
        catalog.add(muffin);
        catalog
    }

    #[test]
    fn test_add_baked_good() {
        let (catalog, out) = run(
            CatalogStore::in_memory(),
            &["1", "7", "Lemon Cake", "Zesty", "abc", "12.99", "Cake", "maybe", "no", "0"],
        );

        assert!(out.contains("Invalid input 'abc'"));
        assert!(out.contains("Please answer yes or no."));
        assert!(out.contains("Added Successfully"));
        let good = catalog.find_baked_good(0).unwrap();
        assert_eq!(good.product_name, "Lemon Cake");
        assert_eq!(good.product_price, 12.99);
        assert!(!good.refrigerated);
    }

    #[test]
    fn test_non_finite_numbers_are_reprompted() {
        let (catalog, out) = run(
            CatalogStore::in_memory(),
            &["1", "7", "Lemon Cake", "Zesty", "inf", "NaN", "12.99", "Cake", "no", "0"],
        );

        assert!(out.contains("Invalid input 'inf'. Please enter a finite number."));
        assert!(out.contains("Invalid input 'NaN'. Please enter a finite number."));
        assert_eq!(catalog.find_baked_good(0).unwrap().product_price, 12.99);
    }

    #[test]
    fn test_invalid_menu_option() {
        let (_, out) = run(CatalogStore::in_memory(), &["42", "0"]);
        assert!(out.contains("Invalid option entered: 42"));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn test_end_of_input_exits() {
        let (_, out) = run(CatalogStore::in_memory(), &["1", "5"]);
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn test_delete_by_position() {
        let mut catalog = with_muffin();
        catalog.add(BakedGood::new(2, "Sourdough", "Loaf", 5.99, "Bread", false));

        let (catalog, out) = run(catalog, &["2", "0", "0"]);

        assert!(out.contains("Deleted baked good: Blueberry Muffin"));
        assert_eq!(catalog.number_of_baked_goods(), 1);
        assert_eq!(catalog.find_baked_good(0).unwrap().product_name, "Sourdough");
    }

    #[test]
    fn test_delete_rejects_bad_position() {
        let (catalog, out) = run(with_muffin(), &["2", "-1", "2", "3", "0"]);

        assert!(out.contains("There is no baked good at index -1"));
        assert!(out.contains("There is no baked good at index 3"));
        assert_eq!(catalog.number_of_baked_goods(), 1);
    }

    #[test]
    fn test_update_keeps_ingredients() {
        let (catalog, out) = run(
            with_muffin(),
            &["3", "0", "9", "Cinnamon Bun", "Gooey", "8.99", "Bun", "yes", "0"],
        );

        assert!(out.contains("Update Successful"));
        let good = catalog.find_baked_good(0).unwrap();
        assert_eq!(good.product_id, 9);
        assert!(good.refrigerated);
        assert_eq!(good.number_of_ingredients(), 1);
    }

    #[test]
    fn test_list_menu() {
        let (_, out) = run(with_muffin(), &["4", "3", "1", "5", "4", "4", "4", "7", "0"]);

        assert!(out.contains("0: Product ID: 1"));
        assert!(out.contains("No refrigerated baked goods found"));
        assert!(out.contains("Invalid option entered: 7"));
    }

    #[test]
    fn test_list_on_empty_catalog() {
        let (_, out) = run(CatalogStore::in_memory(), &["4", "0"]);
        assert!(out.contains("Option Invalid - No baked goods stored"));
    }

    #[test]
    fn test_ingredient_workflow() {
        let (catalog, out) = run(
            with_muffin(),
            &[
                // add an ingredient
                "5", "0", "Sugar", "1.5", "Caster", "  ,  ",
                // change its quantity
                "6", "0", "1", "2.25",
                // delete the original ingredient
                "7", "0", "0",
                // unknown ingredient id
                "7", "0", "0",
                "0",
            ],
        );

        assert!(out.contains("Add Successful! Ingredient ID: 1"));
        assert!(out.contains("Ingredient quantity updated successfully"));
        assert!(out.contains("Ingredient with ID 0 not found."));

        let good = catalog.find_baked_good(0).unwrap();
        assert_eq!(good.number_of_ingredients(), 1);
        let sugar = good.find_ingredient(1).unwrap();
        assert_eq!(sugar.ingredient_quantity, 2.25);
        assert!(sugar.allergens.is_empty());
    }

    #[test]
    fn test_mark_allergens_toggle() {
        let (catalog, out) = run(
            with_muffin(),
            &[
                // clear existing allergens
                "8", "0", "0", "y",
                // then set new ones
                "8", "0", "0", "Y", "Sesame, Gluten",
                "0",
            ],
        );

        assert!(out.contains("Ingredient marked as allergen-free."));
        assert!(out.contains("Allergens set: Gluten, Sesame."));
        let good = catalog.find_baked_good(0).unwrap();
        assert!(good.contains_allergen("Sesame"));
        assert!(!good.contains_allergen("Dairy"));
    }

    #[test]
    fn test_searches() {
        let (_, out) = run(with_muffin(), &["9", "muffin", "10", "FLOUR", "11", "Nuts", "0"]);

        assert!(out.contains("0: Product ID: 1"));
        assert!(out.contains("0: Blueberry Muffin -> #0 Flour"));
        assert!(out.contains("No baked goods found with allergen: Nuts"));
    }

    #[test]
    fn test_save_and_load() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("bakedgoods.json");

        let mut catalog = CatalogStore::new(Box::new(FileSerializer::json(&path)));
        catalog.add(BakedGood::new(1, "Scone", "Plain", 2.0, "Bun", false));
        let (_, out) = run(catalog, &["13", "0"]);
        assert!(out.contains("Baked goods saved successfully."));

        let fresh = CatalogStore::new(Box::new(FileSerializer::json(&path)));
        let (catalog, out) = run(fresh, &["12", "0"]);
        assert!(out.contains("Products loaded successfully (1 baked goods)."));
        assert_eq!(catalog.find_baked_good(0).unwrap().product_name, "Scone");
    }

    #[test]
    fn test_load_failure_is_reported() {
        let temp = tempdir().unwrap();
        let catalog = CatalogStore::new(Box::new(FileSerializer::yaml(temp.path().join("missing.yaml"))));

        let (_, out) = run(catalog, &["12", "0"]);

        assert!(out.contains("Error reading from file: Catalog file not found"));
    }
}
