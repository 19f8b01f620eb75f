//! Integration tests for catalog persistence.

use std::fs;

use pretty_assertions::assert_eq;
use tempfile::tempdir;

use bakery_core::{BakedGood, CatalogError, CatalogStore, Ingredient, Serializer};
use bakery_store::{serializer_for, CatalogReader, FileSerializer, StoreFormat};

fn sample_catalog() -> Vec<BakedGood> {
    let mut carrot = BakedGood::new(3, "Carrot Cake", "Moist carrot cake with cream cheese frosting", 14.99, "Cake", true);
    carrot.add_ingredient(
        Ingredient::new("Cake Mix", 12.0, "Flour, Sugar, Carrots, Walnuts")
            .with_allergens(["Gluten", "Nuts", "Dairy"]),
    );
    let removed = carrot
        .add_ingredient(Ingredient::new("Frosting", 1.5, "Cream cheese").with_allergen("Dairy"))
        .unwrap();
    carrot.delete_ingredient(removed);

    let mut muffin = BakedGood::new(1, "Blueberry Muffin", "Fluffy muffin with blueberry filling", 3.50, "Bun", false);
    muffin.add_ingredient(
        Ingredient::new("Muffin Mix", 8.0, "Flour, Sugar, Milk, Butter, Eggs, Blueberries")
            .with_allergens(["Gluten", "Dairy"]),
    );

    // no ingredients at all
    let sourdough = BakedGood::new(2, "Sourdough Bread", "Artisanal sourdough bread", 5.99, "Bread", false);

    vec![carrot, muffin, sourdough]
}

fn round_trip(format: StoreFormat, file_name: &str, goods: Vec<BakedGood>) {
    let temp = tempdir().unwrap();
    let path = temp.path().join(file_name);

    let mut storing = CatalogStore::new(Box::new(FileSerializer::new(&path, format)));
    for good in goods.iter().cloned() {
        storing.add(good);
    }
    storing.store().unwrap();

    let mut loaded = CatalogStore::new(Box::new(FileSerializer::new(&path, format)));
    loaded.load().unwrap();

    assert_eq!(loaded.number_of_baked_goods(), storing.number_of_baked_goods());
    assert_eq!(loaded.baked_goods(), goods.as_slice());
}

/// JSON round trip keeps every field including nested ingredients.
#[test]
fn test_json_round_trip() {
    round_trip(StoreFormat::Json, "bakedgoods.json", sample_catalog());
}

/// YAML round trip keeps every field including nested ingredients.
#[test]
fn test_yaml_round_trip() {
    round_trip(StoreFormat::Yaml, "bakedgoods.yaml", sample_catalog());
}

/// Prices and quantities come back bit-for-bit, including values whose
/// shortest decimal form sits at the edge of f64 precision.
#[test]
fn test_json_round_trip_keeps_exact_floats() {
    let goods: Vec<BakedGood> = [2.2201838057111728e-13, 1.079907802215119e-66, 1.1362275116276523e-8]
        .into_iter()
        .enumerate()
        .map(|(n, price)| {
            let mut good = BakedGood::new(n as i32, "Wafer", "Thin", price, "Biscuit", false);
            good.add_ingredient(Ingredient::new("Sugar", price, "Icing"));
            good
        })
        .collect();

    round_trip(StoreFormat::Json, "bakedgoods.json", goods);
}

#[test]
fn test_empty_catalog_round_trip() {
    round_trip(StoreFormat::Json, "empty.json", Vec::new());
    round_trip(StoreFormat::Yaml, "empty.yaml", Vec::new());
}

/// Ingredient ids keep counting from where they stopped before saving.
#[test]
fn test_ingredient_ids_survive_reload() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("bakedgoods.json");

    let mut catalog = CatalogStore::new(serializer_for(&path, None).unwrap());
    for good in sample_catalog() {
        catalog.add(good);
    }
    catalog.store().unwrap();

    let mut reloaded = CatalogStore::new(serializer_for(&path, None).unwrap());
    reloaded.load().unwrap();

    // ids 0 and 1 were issued before the save; 1 was deleted
    let id = reloaded
        .add_ingredient(0, Ingredient::new("Cinnamon", 0.2, "Ground"))
        .unwrap();
    assert_eq!(id, 2);
}

#[test]
fn test_load_missing_file_keeps_catalog() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("nothing-here.yaml");

    let mut catalog = CatalogStore::new(serializer_for(&path, None).unwrap());
    catalog.add(BakedGood::new(1, "Scone", "Plain", 2.0, "Bun", false));

    let err = catalog.load().unwrap_err();

    assert!(matches!(err, CatalogError::NotFound(_)));
    assert_eq!(catalog.number_of_baked_goods(), 1);
}

#[test]
fn test_load_rejects_exhausted_ingredient_ids() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("bakedgoods.json");
    fs::write(
        &path,
        r#"[{
            "product_id": 1,
            "product_name": "Scone",
            "product_desc": "Plain",
            "product_price": 2.0,
            "product_category": "Bun",
            "ingredients": [{
                "ingredient_id": 4294967295,
                "ingredient_name": "Flour",
                "ingredient_quantity": 1.0,
                "ingredient_description": "Plain"
            }]
        }]"#,
    )
    .unwrap();

    let mut catalog = CatalogStore::new(serializer_for(&path, None).unwrap());
    catalog.add(BakedGood::new(2, "Sourdough", "Loaf", 5.99, "Bread", false));

    let err = catalog.load().unwrap_err();

    assert!(matches!(err, CatalogError::InvalidRecord(_)));
    assert_eq!(catalog.find_baked_good(0).unwrap().product_name, "Sourdough");
}

#[test]
fn test_store_refuses_non_finite_price() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("bakedgoods.json");

    let mut catalog = CatalogStore::new(Box::new(FileSerializer::json(&path)));
    catalog.add(BakedGood::new(1, "Scone", "Plain", "inf".parse().unwrap(), "Bun", false));

    assert!(matches!(catalog.store(), Err(CatalogError::Serialization(_))));
    assert!(!path.exists());
}

#[test]
fn test_load_wrong_encoding_fails() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("bakedgoods.json");
    FileSerializer::yaml(&path).write(&sample_catalog()).unwrap();

    let err = CatalogReader::read(&path, StoreFormat::Json).unwrap_err();
    assert!(matches!(err, CatalogError::InvalidFormat { .. }));
}

#[test]
fn test_json_file_layout() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("bakedgoods.json");

    let mut catalog = CatalogStore::new(Box::new(FileSerializer::json(&path)));
    catalog.add(sample_catalog().remove(1));
    catalog.store().unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let record = &value[0];
    assert_eq!(record["product_name"], "Blueberry Muffin");
    assert_eq!(record["refrigerated"], false);
    assert_eq!(record["ingredients"][0]["allergens"], serde_json::json!(["Dairy", "Gluten"]));
}
