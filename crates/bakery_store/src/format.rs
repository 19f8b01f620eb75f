//! Catalog file formats.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use bakery_core::{BakedGood, CatalogError, CatalogResult};

/// Text encodings the catalog can be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFormat {
    Json,
    Yaml,
}

impl StoreFormat {
    /// Infer the format from a file extension.
    pub fn from_path(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_default();

        ext.parse().map_err(|_| {
            CatalogError::UnsupportedFormat(format!(
                "cannot infer format from {:?}; use a .json, .yaml or .yml file",
                path
            ))
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }

    pub(crate) fn decode(&self, content: &str) -> Result<Vec<BakedGood>, String> {
        match self {
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        }
    }

    /// Encode `goods`. Non-finite prices and quantities are rejected since
    /// neither encoding reads them back as the same value.
    pub(crate) fn encode(&self, goods: &[BakedGood]) -> Result<String, String> {
        check_finite(goods)?;
        match self {
            Self::Json => serde_json::to_string_pretty(goods).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::to_string(goods).map_err(|e| e.to_string()),
        }
    }
}

fn check_finite(goods: &[BakedGood]) -> Result<(), String> {
    for good in goods {
        if !good.product_price.is_finite() {
            return Err(format!(
                "price of {} is not a finite number: {}",
                good.product_name, good.product_price
            ));
        }
        if let Some(ingredient) = good
            .ingredients()
            .iter()
            .find(|i| !i.ingredient_quantity.is_finite())
        {
            return Err(format!(
                "quantity of {} in {} is not a finite number: {}",
                ingredient.ingredient_name, good.product_name, ingredient.ingredient_quantity
            ));
        }
    }
    Ok(())
}

impl FromStr for StoreFormat {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(CatalogError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for StoreFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
