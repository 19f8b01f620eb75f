//! Search command - Query the stored catalog.

use anyhow::Result;
use clap::{ArgGroup, Args};

use bakery_core::CatalogStore;

use crate::config::BakeryConfig;

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("query")
        .required(true)
        .args(["name", "ingredient", "allergen"])
))]
pub struct SearchArgs {
    /// Product name contains this text (case-insensitive)
    #[arg(short, long)]
    name: Option<String>,

    /// Ingredient name contains this text (case-insensitive)
    #[arg(short, long)]
    ingredient: Option<String>,

    /// Some ingredient carries exactly this allergen
    #[arg(short, long)]
    allergen: Option<String>,
}

pub fn execute(args: SearchArgs, config: &BakeryConfig) -> Result<()> {
    let catalog = super::load_catalog(config)?;
    println!("{}", render(&args, &catalog));
    Ok(())
}

fn render(args: &SearchArgs, catalog: &CatalogStore) -> String {
    if let Some(name) = &args.name {
        catalog.search_by_product_name(name)
    } else if let Some(ingredient) = &args.ingredient {
        catalog.search_by_ingredient_name(ingredient)
    } else if let Some(allergen) = &args.allergen {
        catalog.search_baked_goods_by_allergen(allergen)
    } else {
        catalog.list_all_baked_goods()
    }
}
