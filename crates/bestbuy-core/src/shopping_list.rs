//! # Shopping List
//!
//! Stages order lines before they are handed to `Store::order`.
//!
//! ## Two Ways to Add
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  push(id, qty)      appends a raw line, no checks, duplicates kept     │
//! │                                                                         │
//! │  add(&product, qty) checks against the product as it is now and merges │
//! │                     repeat adds into one line:                         │
//! │                       qty <= 0                 → InvalidArgument       │
//! │                       staged > maximum         → OrderLimitExceeded    │
//! │                       inactive                 → InactiveProduct       │
//! │                       staged > stock           → InsufficientStock     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A list built only through `add` cannot fail the order's stock checks
//! unless the store changes between staging and ordering.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::product::Product;
use crate::store::OrderLine;
use crate::types::ProductId;
use crate::validation::validate_purchase_quantity;

/// An ordered list of order lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingList {
    lines: Vec<OrderLine>,
}

impl ShoppingList {
    pub fn new() -> Self {
        ShoppingList::default()
    }

    /// Appends a line as-is.
    pub fn push(&mut self, product_id: ProductId, quantity: i64) {
        self.lines.push(OrderLine::new(product_id, quantity));
    }

    /// Stages `quantity` more units of `product`, checked against its current
    /// state. Nothing is staged when an error is returned.
    ///
    /// ```rust
    /// use bestbuy_core::{CoreError, Money, Product, ShoppingList};
    ///
    /// let shipping = Product::limited("Shipping", Money::from_major(10), 250, 1).unwrap();
    /// let mut list = ShoppingList::new();
    /// list.add(&shipping, 1).unwrap();
    /// assert!(matches!(list.add(&shipping, 1), Err(CoreError::OrderLimitExceeded { .. })));
    /// assert_eq!(list.total_units(), 1);
    /// ```
    pub fn add(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        validate_purchase_quantity(quantity)?;

        let staged = self.staged_quantity(product.id()).saturating_add(quantity);
        product.check_order_limit(staged)?;

        if !product.is_active() {
            return Err(CoreError::InactiveProduct {
                name: product.name().to_string(),
            });
        }

        if product.is_stocked() && staged > product.quantity() {
            return Err(CoreError::InsufficientStock {
                name: product.name().to_string(),
                available: product.quantity(),
                requested: staged,
            });
        }

        self.merge_into_first(product.id(), staged);

        debug!(product = %product.name(), quantity, staged, "Staged in shopping list");
        Ok(())
    }

    /// Units of `product_id` already staged, across all lines.
    pub fn staged_quantity(&self, product_id: ProductId) -> i64 {
        self.lines
            .iter()
            .filter(|l| l.product_id == product_id)
            .map(|l| l.quantity)
            .fold(0, i64::saturating_add)
    }

    /// Collapses every line for `product_id` into its first line, holding
    /// `staged` units. Appends a line if there is none.
    fn merge_into_first(&mut self, product_id: ProductId, staged: i64) {
        let mut seen = false;
        self.lines.retain_mut(|line| {
            if line.product_id != product_id {
                return true;
            }
            if seen {
                return false;
            }
            seen = true;
            line.quantity = staged;
            true
        });

        if !seen {
            self.lines.push(OrderLine::new(product_id, staged));
        }
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total_units(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl FromIterator<OrderLine> for ShoppingList {
    fn from_iter<I: IntoIterator<Item = OrderLine>>(iter: I) -> Self {
        ShoppingList {
            lines: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
