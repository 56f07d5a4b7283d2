//! # Store
//!
//! The store owns its products and runs orders against them.
//!
//! ## Order Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  order(lines)                                                           │
//! │                                                                         │
//! │  1. Pre-check every line          ──► ProductNotFound / OrderLimitExceeded
//! │     (limits apply to the units of a product summed over all lines;      │
//! │      nothing mutated on failure)                                        │
//! │                                                                         │
//! │  2. original_total = Σ price × qty   (before promotions and mutation)   │
//! │                                                                         │
//! │  3. for each line: product.purchase(qty)                                │
//! │        ├── Ok(cost)  → discounted_total += cost                         │
//! │        └── Err(e)    → stop; earlier lines STAY applied                 │
//! │                                                                         │
//! │  4. OrderReceipt { original_total, discounted_total, savings }          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Step 3 is not transactional. Callers that need all-or-nothing
//! semantics must check stock themselves (see `ShoppingList::add`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::Add;
use tracing::{debug, info, warn};

use crate::error::{CoreError, CoreResult, OrderError, ValidationError};
use crate::money::Money;
use crate::product::Product;
use crate::types::ProductId;
use crate::validation::validate_purchase_quantity;

// =============================================================================
// Order Lines and Receipts
// =============================================================================

/// One entry of a shopping list: which product, and how many.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: i64,
}

impl OrderLine {
    pub fn new(product_id: ProductId, quantity: i64) -> Self {
        OrderLine {
            product_id,
            quantity,
        }
    }
}

/// What one order line cost, frozen at purchase time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptLine {
    pub product_id: ProductId,
    /// Product name at time of purchase.
    pub name: String,
    pub quantity: i64,
    /// `price × quantity`, before promotions.
    pub list_total: Money,
    /// What was actually charged.
    pub charged: Money,
    /// Promotion applied to this line, if any.
    pub promotion: Option<String>,
}

/// The result of a successful order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderReceipt {
    pub lines: Vec<ReceiptLine>,
    /// Σ price × quantity, before promotions.
    pub original_total: Money,
    /// Σ of what each purchase actually cost.
    pub discounted_total: Money,
    pub placed_at: DateTime<Utc>,
}

impl OrderReceipt {
    /// `original_total - discounted_total`.
    pub fn savings(&self) -> Money {
        self.original_total - self.discounted_total
    }

    /// Savings are only worth showing when positive.
    pub fn has_savings(&self) -> bool {
        self.savings().is_positive()
    }

    pub fn total_units(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

// =============================================================================
// Store
// =============================================================================

/// An ordered collection of products.
///
/// Insertion order is preserved and the same product may appear more than
/// once; lookups by id act on the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Store {
    products: Vec<Product>,
}

impl Store {
    pub fn new(products: Vec<Product>) -> Self {
        Store { products }
    }

    pub fn empty() -> Self {
        Store::default()
    }

    // =========================================================================
    // Collection Management
    // =========================================================================

    pub fn add_product(&mut self, product: Product) {
        debug!(product = %product.name(), id = %product.id(), "Product added to store");
        self.products.push(product);
    }

    /// Removes every entry with this id and returns how many were removed.
    pub fn remove_product(&mut self, id: ProductId) -> usize {
        let before = self.products.len();
        self.products.retain(|p| p.id() != id);
        let removed = before - self.products.len();
        debug!(id = %id, removed, "Product removed from store");
        removed
    }

    /// All products, active and inactive, in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    pub fn product_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id() == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Sum of stock over every product. NonStocked products contribute 0.
    pub fn total_quantity(&self) -> i64 {
        self.products
            .iter()
            .map(Product::quantity)
            .fold(0, i64::saturating_add)
    }

    /// Active products in insertion order.
    pub fn active_products(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_active()).collect()
    }

    /// Listing lines for the active products.
    pub fn active_listing(&self) -> Vec<String> {
        self.active_products()
            .into_iter()
            .map(|p| p.to_string())
            .collect()
    }

    /// True when a product with exactly this name is present, active or not.
    pub fn contains(&self, name: &str) -> bool {
        self.products.iter().any(|p| p.name() == name)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name() == name)
    }

    /// Active products whose name contains `query`, ignoring case.
    ///
    /// ```rust
    /// use bestbuy_core::{Money, Product, Store};
    ///
    /// let store = Store::new(vec![
    ///     Product::new("Bose QuietComfort Earbuds", Money::from_major(250), 500).unwrap(),
    ///     Product::new("Nice Earbuds", Money::from_major(40), 200).unwrap(),
    ///     Product::new("Google Pixel 7", Money::from_major(500), 250).unwrap(),
    /// ]);
    /// assert_eq!(store.search_active("earbuds").len(), 2);
    /// ```
    pub fn search_active(&self, query: &str) -> Vec<&Product> {
        let query = query.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| p.is_active() && p.name().to_lowercase().contains(&query))
            .collect()
    }

    /// All products sorted by ascending unit price.
    pub fn products_by_price(&self) -> Vec<&Product> {
        let mut sorted: Vec<&Product> = self.products.iter().collect();
        sorted.sort_by(|a, b| a.cmp_by_price(b));
        sorted
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Prices and applies a shopping list.
    ///
    /// ## Errors
    /// - Pre-check failures (`ProductNotFound`, `OrderLimitExceeded`) leave the
    ///   store untouched.
    /// - Any purchase failure stops the order; lines before it remain applied
    ///   and are reported in `OrderError::completed` and `OrderError::charged`.
    pub fn order(&mut self, lines: &[OrderLine]) -> Result<OrderReceipt, OrderError> {
        info!(lines = lines.len(), "Placing order");

        let original_total = self.precheck(lines)?;

        let mut receipt_lines = Vec::with_capacity(lines.len());
        let mut discounted_total = Money::zero();

        for (index, line) in lines.iter().enumerate() {
            let fail = |source: CoreError, charged: Money| OrderError {
                line: index + 1,
                completed: index,
                charged,
                source,
            };

            let product = match self.product_mut(line.product_id) {
                Some(product) => product,
                None => {
                    let err = CoreError::ProductNotFound(line.product_id.to_string());
                    return Err(fail(err, discounted_total));
                }
            };

            match product.purchase(line.quantity) {
                Ok(charged) => {
                    discounted_total += charged;
                    receipt_lines.push(ReceiptLine {
                        product_id: line.product_id,
                        name: product.name().to_string(),
                        quantity: line.quantity,
                        list_total: product.list_price(line.quantity),
                        charged,
                        promotion: product.promotion().map(|p| p.name().to_string()),
                    });
                }
                Err(source) => {
                    warn!(
                        line = index + 1,
                        completed = index,
                        error = %source,
                        "Order stopped; earlier lines remain applied"
                    );
                    return Err(fail(source, discounted_total));
                }
            }
        }

        let receipt = OrderReceipt {
            lines: receipt_lines,
            original_total,
            discounted_total,
            placed_at: Utc::now(),
        };
        info!(
            original = %receipt.original_total,
            discounted = %receipt.discounted_total,
            savings = %receipt.savings(),
            "Order placed"
        );
        Ok(receipt)
    }

    /// Validates what can be validated without mutating, and returns the
    /// pre-promotion total.
    ///
    /// Limited maximums apply to the units of a product summed over every
    /// line. Lines with an invalid quantity are left for `purchase` to reject
    /// and do not count toward the total.
    fn precheck(&self, lines: &[OrderLine]) -> Result<Money, OrderError> {
        let mut original_total = Money::zero();
        let mut requested: HashMap<ProductId, i64> = HashMap::new();

        for (index, line) in lines.iter().enumerate() {
            let checked: CoreResult<Money> = self
                .product(line.product_id)
                .ok_or_else(|| CoreError::ProductNotFound(line.product_id.to_string()))
                .and_then(|product| {
                    if validate_purchase_quantity(line.quantity).is_err() {
                        return Ok(Money::zero());
                    }

                    let units = requested.entry(line.product_id).or_insert(0);
                    *units = units.saturating_add(line.quantity);
                    product.check_order_limit(*units)?;
                    Ok(product.list_price(line.quantity))
                })
                .and_then(|list_total| {
                    original_total.checked_add(list_total).ok_or_else(|| {
                        ValidationError::Overflow {
                            field: "order total".to_string(),
                        }
                        .into()
                    })
                });

            match checked {
                Ok(total) => original_total = total,
                Err(source) => {
                    warn!(line = index + 1, error = %source, "Order rejected before any purchase");
                    return Err(OrderError {
                        line: index + 1,
                        completed: 0,
                        charged: Money::zero(),
                        source,
                    });
                }
            }
        }

        Ok(original_total)
    }
}

/// Combines two stores into one holding both collections, in order.
impl Add for Store {
    type Output = Store;

    fn add(mut self, other: Store) -> Store {
        self.products.extend(other.products);
        self
    }
}

impl FromIterator<Product> for Store {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        Store::new(iter.into_iter().collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::promotion::Promotion;

    /// Stocks of 100, 50 and 0 at $10, $20 and $30.
    fn store_with_products() -> Store {
        Store::new(vec![
            Product::new("Product 1", Money::from_major(10), 100).unwrap(),
            Product::new("Product 2", Money::from_major(20), 50).unwrap(),
            Product::new("Product 3", Money::from_major(30), 0).unwrap(),
        ])
    }

    fn ids(store: &Store) -> Vec<ProductId> {
        store.products().iter().map(Product::id).collect()
    }

    #[test]
    fn test_add_product() {
        let mut store = store_with_products();
        let new_product = Product::new("Product 4", Money::from_major(40), 30).unwrap();
        let id = new_product.id();
        store.add_product(new_product);
        assert_eq!(store.len(), 4);
        assert_eq!(store.products()[3].id(), id);
    }

    #[test]
    fn test_remove_product() {
        let mut store = store_with_products();
        let first = ids(&store)[0];
        assert_eq!(store.remove_product(first), 1);
        assert!(store.product(first).is_none());
        assert_eq!(store.remove_product(first), 0);
    }

    #[test]
    fn test_remove_product_removes_duplicates() {
        let product = Product::new("Twin", Money::from_major(1), 1).unwrap();
        let id = product.id();
        let mut store = Store::new(vec![product.clone(), product]);
        assert_eq!(store.remove_product(id), 2);
        assert!(store.is_empty());
    }

    #[test]
    fn test_get_total_quantity() {
        let mut store = store_with_products();
        assert_eq!(store.total_quantity(), 150);

        store.add_product(Product::non_stocked("Windows License", Money::from_major(125)).unwrap());
        assert_eq!(store.total_quantity(), 150);
    }

    #[test]
    fn test_active_products() {
        let store = store_with_products();
        let active = store.active_products();
        assert_eq!(active.len(), 2);
        assert!(active.iter().all(|p| p.is_active()));
        assert_eq!(active[0].name(), "Product 1");
        assert_eq!(active[1].name(), "Product 2");
    }

    #[test]
    fn test_active_listing() {
        let store = store_with_products();
        assert_eq!(
            store.active_listing(),
            vec![
                "Product 1, Price: $10.00, Quantity: 100".to_string(),
                "Product 2, Price: $20.00, Quantity: 50".to_string(),
            ]
        );
    }

    #[test]
    fn test_contains_and_find() {
        let store = store_with_products();
        assert!(store.contains("Product 3"));
        assert!(!store.contains("product 3"));
        assert_eq!(store.find_by_name("Product 2").unwrap().quantity(), 50);
        assert!(store.find_by_name("Missing").is_none());
    }

    #[test]
    fn test_search_active_skips_inactive() {
        let store = store_with_products();
        let found = store.search_active("PRODUCT");
        assert_eq!(found.len(), 2);
        assert!(store.search_active("product 3").is_empty());
    }

    #[test]
    fn test_products_by_price() {
        let store = Store::new(vec![
            Product::new("B", Money::from_major(500), 1).unwrap(),
            Product::new("A", Money::from_major(40), 1).unwrap(),
            Product::new("C", Money::from_major(250), 1).unwrap(),
        ]);
        let names: Vec<&str> = store.products_by_price().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["A", "C", "B"]);
    }

    #[test]
    fn test_combine_stores() {
        let left = store_with_products();
        let right = Store::new(vec![Product::new("Extra", Money::from_major(5), 5).unwrap()]);
        let combined = left.clone() + right;
        assert_eq!(combined.len(), 4);
        assert_eq!(combined.products()[0], left.products()[0]);
        assert_eq!(combined.products()[3].name(), "Extra");
        assert_eq!(combined.total_quantity(), 155);
    }

    #[test]
    fn test_order() {
        let mut store = store_with_products();
        let ids = ids(&store);

        let receipt = store
            .order(&[OrderLine::new(ids[0], 10), OrderLine::new(ids[1], 5)])
            .unwrap();
        assert_eq!(receipt.discounted_total, Money::from_major(200));
        assert_eq!(receipt.original_total, Money::from_major(200));
        assert_eq!(receipt.savings(), Money::zero());
        assert!(!receipt.has_savings());
        assert_eq!(receipt.total_units(), 15);

        assert_eq!(store.product(ids[0]).unwrap().quantity(), 90);
        assert_eq!(store.product(ids[1]).unwrap().quantity(), 45);

        let err = store.order(&[OrderLine::new(ids[0], 200)]).unwrap_err();
        assert!(matches!(err.cause(), CoreError::InsufficientStock { .. }));
        assert_eq!(store.product(ids[0]).unwrap().quantity(), 90);
    }

    #[test]
    fn test_order_reports_savings() {
        let mut product = Product::new("MacBook Air M2", Money::from_major(1450), 100).unwrap();
        product.set_promotion(Some(Promotion::second_item_half_price("Second Half price!").unwrap()));
        let id = product.id();
        let mut store = Store::new(vec![product]);

        let receipt = store.order(&[OrderLine::new(id, 2)]).unwrap();
        assert_eq!(receipt.original_total, Money::from_major(2900));
        assert_eq!(receipt.discounted_total, Money::from_major(2175));
        assert_eq!(receipt.savings(), Money::from_major(725));
        assert!(receipt.has_savings());
        assert_eq!(receipt.lines[0].promotion.as_deref(), Some("Second Half price!"));
    }

    #[test]
    fn test_order_limit_precheck_mutates_nothing() {
        let mut store = store_with_products();
        let shipping = Product::limited("Shipping", Money::from_major(10), 250, 1).unwrap();
        let shipping_id = shipping.id();
        store.add_product(shipping);
        let first = ids(&store)[0];
        let before = store.clone();

        let err = store
            .order(&[OrderLine::new(first, 10), OrderLine::new(shipping_id, 2)])
            .unwrap_err();
        assert!(matches!(err.cause(), CoreError::OrderLimitExceeded { .. }));
        assert_eq!(err.line, 2);
        assert_eq!(err.completed, 0);
        assert!(!err.is_partial());
        assert_eq!(store, before);
    }

    #[test]
    fn test_order_limit_counts_units_across_lines() {
        let shipping = Product::limited("Shipping", Money::from_major(10), 250, 1).unwrap();
        let shipping_id = shipping.id();
        let mut store = Store::new(vec![shipping]);
        let before = store.clone();

        let err = store
            .order(&[OrderLine::new(shipping_id, 1), OrderLine::new(shipping_id, 1)])
            .unwrap_err();
        assert!(matches!(
            err.cause(),
            CoreError::OrderLimitExceeded {
                maximum: 1,
                requested: 2,
                ..
            }
        ));
        assert_eq!(err.line, 2);
        assert_eq!(err.completed, 0);
        assert_eq!(store, before);
        assert_eq!(store.product(shipping_id).unwrap().quantity(), 250);

        store.order(&[OrderLine::new(shipping_id, 1)]).unwrap();
        assert_eq!(store.product(shipping_id).unwrap().quantity(), 249);
    }

    #[test]
    fn test_invalid_quantity_fails_during_purchase() {
        let mut store = store_with_products();
        let ids = ids(&store);
        let err = store
            .order(&[OrderLine::new(ids[0], 1), OrderLine::new(ids[1], 0)])
            .unwrap_err();
        assert!(matches!(err.cause(), CoreError::InvalidArgument(_)));
        assert_eq!(err.completed, 1);
        assert_eq!(store.product(ids[0]).unwrap().quantity(), 99);
    }

    #[test]
    fn test_order_at_price_limit_does_not_overflow() {
        use crate::validation::{MAX_PRICE_CENTS, MAX_QUANTITY};

        assert!(Product::new("Big", Money::from_cents(i64::MAX / 2 + 1), 2).is_err());

        let big = Product::new("Big", Money::from_cents(MAX_PRICE_CENTS), MAX_QUANTITY).unwrap();
        let id = big.id();
        let mut store = Store::new(vec![big]);

        let receipt = store.order(&[OrderLine::new(id, MAX_QUANTITY)]).unwrap();
        assert_eq!(
            receipt.discounted_total,
            Money::from_cents(MAX_PRICE_CENTS * MAX_QUANTITY)
        );
        assert_eq!(store.total_quantity(), 0);
    }

    #[test]
    fn test_order_total_overflow_is_rejected_up_front() {
        use crate::validation::{MAX_PRICE_CENTS, MAX_QUANTITY};

        let license = Product::non_stocked("Site License", Money::from_cents(MAX_PRICE_CENTS)).unwrap();
        let id = license.id();
        let mut store = Store::new(vec![license]);

        let lines = vec![OrderLine::new(id, MAX_QUANTITY); 10];
        let err = store.order(&lines).unwrap_err();
        assert!(matches!(
            err.cause(),
            CoreError::InvalidArgument(ValidationError::Overflow { .. })
        ));
        assert_eq!(err.line, 10);
        assert_eq!(err.completed, 0);
    }

    #[test]
    fn test_unknown_product_precheck() {
        let mut store = store_with_products();
        let first = ids(&store)[0];
        let err = store
            .order(&[OrderLine::new(first, 1), OrderLine::new(ProductId::new(), 1)])
            .unwrap_err();
        assert!(matches!(err.cause(), CoreError::ProductNotFound(_)));
        assert_eq!(store.product(first).unwrap().quantity(), 100);
    }

    #[test]
    fn test_order_is_not_transactional() {
        let mut store = store_with_products();
        let ids = ids(&store);

        // line 3 fails: Product 3 has no stock and is inactive
        let err = store
            .order(&[
                OrderLine::new(ids[0], 10),
                OrderLine::new(ids[1], 5),
                OrderLine::new(ids[2], 1),
            ])
            .unwrap_err();
        assert!(matches!(err.cause(), CoreError::InactiveProduct { .. }));
        assert_eq!(err.line, 3);
        assert_eq!(err.completed, 2);
        assert_eq!(err.charged, Money::from_major(200));

        assert_eq!(store.product(ids[0]).unwrap().quantity(), 90);
        assert_eq!(store.product(ids[1]).unwrap().quantity(), 45);
    }

    #[test]
    fn test_order_depletes_and_deactivates() {
        let mut store = store_with_products();
        let second = ids(&store)[1];
        store.order(&[OrderLine::new(second, 50)]).unwrap();
        assert!(!store.product(second).unwrap().is_active());
        assert_eq!(store.active_products().len(), 1);
    }

    #[test]
    fn test_order_same_product_twice_draws_down_stock() {
        let mut store = store_with_products();
        let second = ids(&store)[1];
        let err = store
            .order(&[OrderLine::new(second, 30), OrderLine::new(second, 30)])
            .unwrap_err();
        assert!(matches!(
            err.cause(),
            CoreError::InsufficientStock {
                available: 20,
                requested: 30,
                ..
            }
        ));
        assert_eq!(store.product(second).unwrap().quantity(), 20);
    }

    #[test]
    fn test_empty_order() {
        let mut store = store_with_products();
        let receipt = store.order(&[]).unwrap();
        assert!(receipt.lines.is_empty());
        assert_eq!(receipt.discounted_total, Money::zero());
    }

    #[test]
    fn test_non_stocked_line() {
        let license = Product::non_stocked("Windows License", Money::from_major(125)).unwrap();
        let id = license.id();
        let mut store = Store::new(vec![license]);
        let receipt = store.order(&[OrderLine::new(id, 3)]).unwrap();
        assert_eq!(receipt.discounted_total, Money::from_major(375));
        assert_eq!(store.total_quantity(), 0);
    }

    #[test]
    fn test_receipt_serializes() {
        let mut store = store_with_products();
        let first = ids(&store)[0];
        let receipt = store.order(&[OrderLine::new(first, 1)]).unwrap();
        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["original_total"], 1000);
        assert_eq!(json["lines"][0]["name"], "Product 1");
    }
}
