//! List command - Print the stored catalog.

use anyhow::Result;
use clap::{ArgGroup, Args};
use tracing::info;

use bakery_core::CatalogStore;

use crate::config::BakeryConfig;

#[derive(Args, Debug, Default)]
#[command(group(
    ArgGroup::new("filter")
        .args(["category", "refrigerated", "non_refrigerated", "min", "allergen"])
))]
pub struct ListArgs {
    /// Only baked goods in this category (case-insensitive)
    #[arg(short, long)]
    category: Option<String>,

    /// Only refrigerated baked goods
    #[arg(long)]
    refrigerated: bool,

    /// Only baked goods kept at room temperature
    #[arg(long)]
    non_refrigerated: bool,

    /// Lowest price, inclusive (requires --max)
    #[arg(long, requires = "max")]
    min: Option<f64>,

    /// Highest price, inclusive (requires --min)
    #[arg(long, requires = "min")]
    max: Option<f64>,

    /// Only baked goods with an ingredient carrying this allergen
    #[arg(short, long)]
    allergen: Option<String>,
}

pub fn execute(args: ListArgs, config: &BakeryConfig) -> Result<()> {
    let catalog = super::load_catalog(config)?;
    info!("Listing {} baked goods", catalog.number_of_baked_goods());

    println!("{}", render(&args, &catalog));
    Ok(())
}

fn render(args: &ListArgs, catalog: &CatalogStore) -> String {
    if let Some(category) = &args.category {
        catalog.list_baked_goods_by_category(category)
    } else if args.refrigerated {
        catalog.list_refrigerated_baked_goods()
    } else if args.non_refrigerated {
        catalog.list_non_refrigerated_baked_goods()
    } else if let (Some(min), Some(max)) = (args.min, args.max) {
        catalog.list_baked_goods_by_price_range(min, max)
    } else if let Some(allergen) = &args.allergen {
        catalog.list_baked_goods_by_allergen(allergen)
    } else {
        catalog.list_all_baked_goods()
    }
}
