//! # Inventory Configuration
//!
//! The initial product list and promotion assignments, supplied once at
//! startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BESTBUY_STORE_NAME="Downtown"                                      │
//! │                                                                         │
//! │  2. TOML Inventory File, first of:                                     │
//! │     explicit path → $BESTBUY_INVENTORY →                               │
//! │     ~/.config/bestbuy/inventory.toml (Linux)                           │
//! │     ~/Library/Application Support/com.bestbuy.store/inventory.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     The demo inventory: laptops, earbuds, phones, a license, shipping  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "Best Buy"
//!
//! [[promotions]]
//! name = "30% off!"
//! kind = "percentage_discount"
//! percent = 30.0
//!
//! [[products]]
//! name = "Windows License"
//! price_cents = 12500
//! kind = "non_stocked"
//! promotion = "30% off!"
//!
//! [[products]]
//! name = "Shipping"
//! price_cents = 1000
//! quantity = 250
//! kind = "limited"
//! maximum = 1
//! ```

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use bestbuy_core::{Money, Product, ProductKind, Promotion, Store};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{InventoryError, InventoryResult};

/// Env var naming the inventory file when no explicit path is given.
pub const INVENTORY_PATH_ENV: &str = "BESTBUY_INVENTORY";

/// Env var overriding `[store] name`.
pub const STORE_NAME_ENV: &str = "BESTBUY_STORE_NAME";

// =============================================================================
// Store Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Display name of the store.
    #[serde(default = "default_store_name")]
    pub name: String,
}

fn default_store_name() -> String {
    "Best Buy".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
        }
    }
}

// =============================================================================
// Promotion Entries
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionKind {
    PercentageDiscount,
    SecondItemHalfPrice,
    BuyTwoGetOneFree,
}

/// A `[[promotions]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionEntry {
    pub name: String,
    pub kind: PromotionKind,
    /// Required for `percentage_discount`, 0-100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
}

impl PromotionEntry {
    /// Builds the domain promotion this entry describes.
    pub fn to_promotion(&self) -> InventoryResult<Promotion> {
        let built = match self.kind {
            PromotionKind::PercentageDiscount => {
                let percent = self.percent.ok_or_else(|| {
                    InventoryError::InvalidConfig(format!(
                        "promotion '{}' is a percentage_discount without `percent`",
                        self.name
                    ))
                })?;
                Promotion::percentage(self.name.as_str(), percent)
            }
            PromotionKind::SecondItemHalfPrice => Promotion::second_item_half_price(self.name.as_str()),
            PromotionKind::BuyTwoGetOneFree => Promotion::buy_two_get_one_free(self.name.as_str()),
        };

        built.map_err(|source| InventoryError::InvalidEntry {
            name: self.name.clone(),
            source,
        })
    }
}

// =============================================================================
// Product Entries
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductEntryKind {
    #[default]
    Standard,
    NonStocked,
    Limited,
}

/// A `[[products]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductEntry {
    pub name: String,

    /// Unit price in cents.
    pub price_cents: i64,

    /// Initial stock. Ignored for `non_stocked`.
    #[serde(default)]
    pub quantity: i64,

    #[serde(default)]
    pub kind: ProductEntryKind,

    /// Per-order maximum, required for `limited`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i64>,

    /// Name of a declared `[[promotions]]` entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<String>,
}

impl ProductEntry {
    fn product_kind(&self) -> InventoryResult<ProductKind> {
        match (self.kind, self.maximum) {
            (ProductEntryKind::Limited, Some(maximum)) => Ok(ProductKind::Limited { maximum }),
            (ProductEntryKind::Limited, None) => Err(InventoryError::InvalidConfig(format!(
                "product '{}' is limited without `maximum`",
                self.name
            ))),
            (ProductEntryKind::Standard, _) => Ok(ProductKind::Standard),
            (ProductEntryKind::NonStocked, _) => Ok(ProductKind::NonStocked),
        }
    }

    /// Builds the domain product this entry describes, without its promotion.
    pub fn to_product(&self) -> InventoryResult<Product> {
        let kind = self.product_kind()?;
        if self.maximum.is_some() && !matches!(kind, ProductKind::Limited { .. }) {
            warn!(product = %self.name, "`maximum` ignored on a product that is not limited");
        }

        Product::with_kind(
            self.name.as_str(),
            Money::from_cents(self.price_cents),
            self.quantity,
            kind,
        )
        .map_err(|source| InventoryError::InvalidEntry {
            name: self.name.clone(),
            source,
        })
    }
}

// =============================================================================
// Main Inventory Configuration
// =============================================================================

/// Complete inventory configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub promotions: Vec<PromotionEntry>,

    #[serde(default)]
    pub products: Vec<ProductEntry>,
}

impl Default for InventoryConfig {
    /// The demo inventory.
    fn default() -> Self {
        let product = |name: &str, price_cents: i64, quantity: i64, promotion: Option<&str>| {
            ProductEntry {
                name: name.to_string(),
                price_cents,
                quantity,
                kind: ProductEntryKind::Standard,
                maximum: None,
                promotion: promotion.map(str::to_string),
            }
        };

        InventoryConfig {
            store: StoreSettings::default(),
            promotions: vec![
                PromotionEntry {
                    name: "Second Half price!".to_string(),
                    kind: PromotionKind::SecondItemHalfPrice,
                    percent: None,
                },
                PromotionEntry {
                    name: "Third One Free!".to_string(),
                    kind: PromotionKind::BuyTwoGetOneFree,
                    percent: None,
                },
                PromotionEntry {
                    name: "30% off!".to_string(),
                    kind: PromotionKind::PercentageDiscount,
                    percent: Some(30.0),
                },
            ],
            products: vec![
                product("MacBook Air M2", 145_000, 100, Some("Second Half price!")),
                product("Bose QuietComfort Earbuds", 25_000, 500, Some("Third One Free!")),
                product("Google Pixel 7", 50_000, 250, None),
                ProductEntry {
                    kind: ProductEntryKind::NonStocked,
                    ..product("Windows License", 12_500, 0, Some("30% off!"))
                },
                ProductEntry {
                    kind: ProductEntryKind::Limited,
                    maximum: Some(1),
                    ..product("Shipping", 1_000, 250, None)
                },
            ],
        }
    }
}

impl InventoryConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(contents: &str) -> InventoryResult<Self> {
        let config: InventoryConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Inventory file (explicit path, `$BESTBUY_INVENTORY`, platform dir)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> InventoryResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading inventory from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Inventory file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns the default inventory if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load inventory: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Writes the configuration as TOML.
    pub fn save(&self, config_path: Option<PathBuf>) -> InventoryResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(InventoryError::NoConfigPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Inventory saved");
        Ok(())
    }

    /// Checks cross-entry consistency. Per-entry domain rules (negative
    /// prices, empty names) are enforced when the store is built.
    pub fn validate(&self) -> InventoryResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(InventoryError::InvalidConfig(
                "store name must not be empty".into(),
            ));
        }

        let mut seen = HashSet::new();
        for promotion in &self.promotions {
            if !seen.insert(promotion.name.as_str()) {
                return Err(InventoryError::InvalidConfig(format!(
                    "duplicate promotion name '{}'",
                    promotion.name
                )));
            }
        }

        for product in &self.products {
            if let Some(name) = &product.promotion {
                if !seen.contains(name.as_str()) {
                    return Err(InventoryError::UnknownPromotion {
                        product: product.name.clone(),
                        promotion: name.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Builds the store: every product in file order, each with its
    /// assigned promotion attached.
    pub fn build_store(&self) -> InventoryResult<Store> {
        self.validate()?;

        let promotions: HashMap<&str, Promotion> = self
            .promotions
            .iter()
            .map(|entry| Ok((entry.name.as_str(), entry.to_promotion()?)))
            .collect::<InventoryResult<_>>()?;

        let mut store = Store::empty();
        for entry in &self.products {
            let mut product = entry.to_product()?;
            if let Some(name) = &entry.promotion {
                product.set_promotion(promotions.get(name.as_str()).cloned());
            }
            store.add_product(product);
        }

        info!(
            store = %self.store.name,
            products = store.len(),
            promotions = promotions.len(),
            total_quantity = store.total_quantity(),
            "Store built from inventory"
        );
        Ok(store)
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup(STORE_NAME_ENV) {
            debug!(store = %name, "Overriding store name from environment");
            self.store.name = name;
        }
    }

    /// Returns the default inventory file path.
    fn default_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(INVENTORY_PATH_ENV) {
            return Some(PathBuf::from(path));
        }

        directories::ProjectDirs::from("com", "bestbuy", "store")
            .map(|dirs| dirs.config_dir().join("inventory.toml"))
    }

    /// Reads and validates a specific file, without defaults or overrides.
    pub fn from_file(path: &Path) -> InventoryResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bestbuy_core::OrderLine;

    const SAMPLE: &str = r#"
[store]
name = "Corner Shop"

[[promotions]]
name = "Half"
kind = "second_item_half_price"

[[products]]
name = "Kettle"
price_cents = 2000
quantity = 4
promotion = "Half"

[[products]]
name = "Gift Wrap"
price_cents = 300
kind = "non_stocked"

[[products]]
name = "Delivery"
price_cents = 500
quantity = 10
kind = "limited"
maximum = 1
"#;

    #[test]
    fn test_default_config_builds() {
        let config = InventoryConfig::default();
        assert!(config.validate().is_ok());

        let store = config.build_store().unwrap();
        assert_eq!(store.len(), 5);
        assert_eq!(store.total_quantity(), 100 + 500 + 250 + 250);
        assert_eq!(
            store.find_by_name("MacBook Air M2").unwrap().promotion().unwrap().name(),
            "Second Half price!"
        );
        assert_eq!(store.find_by_name("Shipping").unwrap().maximum(), Some(1));
        assert!(!store.find_by_name("Windows License").unwrap().is_stocked());
    }

    #[test]
    fn test_parse_sample() {
        let config = InventoryConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.store.name, "Corner Shop");
        assert_eq!(config.products.len(), 3);
        assert_eq!(config.products[0].kind, ProductEntryKind::Standard);
        assert_eq!(config.products[2].maximum, Some(1));

        let mut store = config.build_store().unwrap();
        let kettle = store.find_by_name("Kettle").unwrap().id();
        let receipt = store.order(&[OrderLine::new(kettle, 2)]).unwrap();
        assert_eq!(receipt.discounted_total, Money::from_cents(3000));
    }

    #[test]
    fn test_example_file_matches_defaults() {
        let example = include_str!("../../../config/inventory.example.toml");
        let config = InventoryConfig::from_toml_str(example).unwrap();
        assert_eq!(config, InventoryConfig::default());
    }

    #[test]
    fn test_unknown_promotion_rejected() {
        let contents = r#"
[[products]]
name = "Kettle"
price_cents = 2000
quantity = 4
promotion = "Nope"
"#;
        assert!(matches!(
            InventoryConfig::from_toml_str(contents),
            Err(InventoryError::UnknownPromotion { .. })
        ));
    }

    #[test]
    fn test_duplicate_promotion_rejected() {
        let mut config = InventoryConfig::default();
        config.promotions.push(config.promotions[0].clone());
        assert!(matches!(
            config.validate(),
            Err(InventoryError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_limited_requires_maximum() {
        let contents = r#"
[[products]]
name = "Delivery"
price_cents = 500
quantity = 10
kind = "limited"
"#;
        let config = InventoryConfig::from_toml_str(contents).unwrap();
        assert!(matches!(
            config.build_store(),
            Err(InventoryError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_percentage_requires_percent() {
        let entry = PromotionEntry {
            name: "Sale".to_string(),
            kind: PromotionKind::PercentageDiscount,
            percent: None,
        };
        assert!(matches!(entry.to_promotion(), Err(InventoryError::InvalidConfig(_))));
    }

    #[test]
    fn test_invalid_product_surfaces_domain_error() {
        let contents = r#"
[[products]]
name = "Broken"
price_cents = -1
quantity = 1
"#;
        let config = InventoryConfig::from_toml_str(contents).unwrap();
        assert!(matches!(
            config.build_store(),
            Err(InventoryError::InvalidEntry { .. })
        ));
    }

    #[test]
    fn test_env_override() {
        let mut config = InventoryConfig::default();
        config.apply_overrides_from(|key| {
            (key == STORE_NAME_ENV).then(|| "Downtown".to_string())
        });
        assert_eq!(config.store.name, "Downtown");

        config.apply_overrides_from(|_| None);
        assert_eq!(config.store.name, "Downtown");
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("inventory.toml");

        let config = InventoryConfig::default();
        config.save(Some(path.clone())).unwrap();

        let loaded = InventoryConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = InventoryConfig::load(Some(dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.products.len(), InventoryConfig::default().products.len());
    }

    #[test]
    fn test_load_or_default_on_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.toml");
        std::fs::write(&path, "products = 12").unwrap();

        assert!(InventoryConfig::load(Some(path.clone())).is_err());
        let config = InventoryConfig::load_or_default(Some(path));
        assert_eq!(config.products.len(), 5);
    }
}
