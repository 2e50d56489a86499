//! Default catalog of caffeinated substances.
//!
//! This module provides the built-in drinks and their caffeine content, plus
//! merging of user-defined substances from the config file.

use crate::config::CustomSubstance;
use crate::types::*;
use crate::{Error, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog_internal);

/// Built-in drinks: (name, caffeine mg per serving)
const DEFAULT_SUBSTANCES: &[(&str, f64)] = &[
    ("Espresso", 63.0),
    ("Double Espresso", 126.0),
    ("Americano", 96.0),
    ("Cappuccino", 63.0),
    ("Latte", 63.0),
    ("Mocha", 63.0),
    ("Flat White", 126.0),
    ("Cortado", 63.0),
    ("Macchiato", 63.0),
    ("Ristretto", 63.0),
    ("Affogato", 63.0),
    ("Iced Coffee", 90.0),
    ("Cold Brew", 155.0),
    ("Nitro Cold Brew", 215.0),
    ("Drip Coffee", 95.0),
    ("French Press", 107.0),
    ("Turkish Coffee", 50.0),
    ("Irish Coffee", 63.0),
    ("Vienna Coffee", 63.0),
    ("Red Eye", 159.0),
    ("Black Eye", 222.0),
    ("Decaf Coffee", 3.0),
    ("Instant Coffee", 62.0),
    ("Green Tea", 35.0),
    ("Black Tea", 47.0),
    ("Chai Latte", 50.0),
    ("Matcha Latte", 70.0),
    ("Yerba Mate", 85.0),
    ("Energy Drink (Red Bull)", 80.0),
    ("Monster Energy", 160.0),
    ("Cola", 34.0),
    ("Dark Chocolate (1 oz)", 24.0),
];

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog with the built-in substances
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns a
/// cached reference. This function is retained for testing and custom catalog creation.
pub fn build_default_catalog() -> Catalog {
    build_default_catalog_internal()
}

fn build_default_catalog_internal() -> Catalog {
    let substances = DEFAULT_SUBSTANCES
        .iter()
        .map(|&(name, mg)| (name.to_string(), Substance::new(name, mg)))
        .collect();

    Catalog { substances }
}

impl Catalog {
    /// Build a catalog from a list of substances
    ///
    /// Fails if two substances share a name.
    pub fn from_substances(list: impl IntoIterator<Item = Substance>) -> Result<Self> {
        let mut substances = HashMap::new();
        for substance in list {
            if substances.contains_key(&substance.name) {
                return Err(Error::CatalogValidation(format!(
                    "Duplicate substance '{}'",
                    substance.name
                )));
            }
            substances.insert(substance.name.clone(), substance);
        }
        Ok(Self { substances })
    }

    /// Default catalog extended with user-defined substances
    ///
    /// A custom entry may not shadow a built-in one.
    pub fn with_custom(custom: &[CustomSubstance]) -> Result<Self> {
        let builtin = build_default_catalog().substances.into_values();
        let extra = custom.iter().map(CustomSubstance::to_substance);
        let catalog = Self::from_substances(builtin.chain(extra))?;

        if !custom.is_empty() {
            tracing::debug!("Added {} custom substances to catalog", custom.len());
        }
        Ok(catalog)
    }

    pub fn get(&self, name: &str) -> Option<&Substance> {
        self.substances.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.substances.contains_key(name)
    }

    /// Caffeine content for a name, or `None` if the name is unknown
    pub fn caffeine_mg(&self, name: &str) -> Option<f64> {
        self.get(name).map(|s| s.caffeine_mg)
    }

    pub fn len(&self) -> usize {
        self.substances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.substances.is_empty()
    }

    /// All substances sorted by name
    pub fn sorted(&self) -> Vec<&Substance> {
        let mut list: Vec<_> = self.substances.values().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        list
    }

    /// Validate the catalog for consistency
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (key, substance) in &self.substances {
            if key.trim().is_empty() || substance.name.trim().is_empty() {
                errors.push("Substance has empty name".to_string());
            }
            if key != &substance.name {
                errors.push(format!(
                    "Substance key '{}' doesn't match substance.name '{}'",
                    key, substance.name
                ));
            }
            if !substance.caffeine_mg.is_finite() || substance.caffeine_mg < 0.0 {
                errors.push(format!(
                    "Substance '{}' has invalid caffeine content {}",
                    key, substance.caffeine_mg
                ));
            }
        }

        errors
    }
}
