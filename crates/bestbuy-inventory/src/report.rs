//! # Stock Report
//!
//! A snapshot of a store's active listing and total stock, renderable as a
//! numbered text listing or as JSON.
//!
//! ```text
//! Best Buy
//! ========
//! 1. MacBook Air M2, Price: $1450.00, Quantity: 100 | Promotion: Second Half price!
//! 2. Bose QuietComfort Earbuds, Price: $250.00, Quantity: 500 | Promotion: Third One Free!
//! ...
//! Total amount in store: 1100
//! ```

use bestbuy_core::{Product, Store};
use serde::Serialize;

/// Report over the active products of a store.
#[derive(Debug, Clone, Serialize)]
pub struct StockReport<'a> {
    pub store: &'a str,
    pub total_quantity: i64,
    pub products: Vec<&'a Product>,
}

impl<'a> StockReport<'a> {
    pub fn new(store_name: &'a str, store: &'a Store) -> Self {
        StockReport {
            store: store_name,
            total_quantity: store.total_quantity(),
            products: store.active_products(),
        }
    }

    /// Numbered listing followed by the total stock line.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(self.store);
        out.push('\n');
        out.push_str(&"=".repeat(self.store.chars().count()));
        out.push('\n');

        for (i, product) in self.products.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, product));
        }

        out.push_str(&format!("Total amount in store: {}\n", self.total_quantity));
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bestbuy_core::Money;

    fn store() -> Store {
        let mut hidden = Product::new("Old Phone", Money::from_major(99), 5).unwrap();
        hidden.deactivate();

        Store::new(vec![
            Product::new("Google Pixel 7", Money::from_major(500), 250).unwrap(),
            hidden,
            Product::non_stocked("Windows License", Money::from_major(125)).unwrap(),
        ])
    }

    #[test]
    fn test_render_text() {
        let store = store();
        let report = StockReport::new("Shop", &store);

        assert_eq!(
            report.render_text(),
            "Shop\n\
             ====\n\
             1. Google Pixel 7, Price: $500.00, Quantity: 250\n\
             2. Windows License, Price: $125.00 (Non-stocked item)\n\
             Total amount in store: 255\n"
        );
    }

    #[test]
    fn test_json_lists_active_products_only() {
        let store = store();
        let report = StockReport::new("Shop", &store);
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(value["store"], "Shop");
        assert_eq!(value["total_quantity"], 255);
        let products = value["products"].as_array().unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0]["name"], "Google Pixel 7");
        assert_eq!(products[1]["kind"], "non_stocked");
    }
}
