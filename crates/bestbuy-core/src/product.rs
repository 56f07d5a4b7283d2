//! # Products
//!
//! A product owns its price, stock, active flag and optional promotion.
//!
//! ## Variants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ProductKind                                      │
//! │                                                                         │
//! │  Standard       stock is real, decremented on purchase                 │
//! │  NonStocked     stock always reads 0, purchase never checks or touches │
//! │                 it (licenses, services)                                │
//! │  Limited(max)   like Standard, but one purchase is capped at `max`     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! ```text
//!                 purchase / restock drives stock to 0
//!      ┌────────┐ ─────────────────────────────────────► ┌──────────┐
//!      │ Active │                                        │ Inactive │
//!      └────────┘ ◄───────────────────────────────────── └──────────┘
//!                 activate(), or restock to a positive quantity
//! ```
//!
//! Standard and Limited products created with zero stock start inactive.
//! NonStocked products start active regardless of their nominal zero stock.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::promotion::Promotion;
use crate::types::ProductId;
use crate::validation::{
    validate_order_limit, validate_price, validate_product_name, validate_purchase_quantity,
    validate_stock,
};

// =============================================================================
// Product Kind
// =============================================================================

/// The closed set of product variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductKind {
    /// Physical stock, decremented on purchase.
    #[default]
    Standard,
    /// No physical stock; purchases always succeed while active.
    NonStocked,
    /// Physical stock with a per-order purchase cap.
    Limited { maximum: i64 },
}

impl ProductKind {
    /// True when the product tracks real stock.
    pub fn is_stocked(&self) -> bool {
        !matches!(self, ProductKind::NonStocked)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product offered by the store.
///
/// Serializable for reports; construction always goes through the validating
/// constructors, so there is no `Deserialize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Money,
    quantity: i64,
    active: bool,
    #[serde(flatten)]
    kind: ProductKind,
    promotion: Option<Promotion>,
}

impl Product {
    /// Creates a Standard product.
    ///
    /// ## Errors
    /// `InvalidArgument` if the name is empty, the price is negative, or the
    /// quantity is negative.
    ///
    /// ```rust
    /// use bestbuy_core::money::Money;
    /// use bestbuy_core::product::Product;
    ///
    /// let product = Product::new("MacBook Air M2", Money::from_major(1450), 100).unwrap();
    /// assert!(product.is_active());
    ///
    /// let sold_out = Product::new("Nice Earbuds", Money::from_major(40), 0).unwrap();
    /// assert!(!sold_out.is_active());
    ///
    /// assert!(Product::new("", Money::from_major(10), 1).is_err());
    /// ```
    pub fn new(name: impl Into<String>, price: Money, quantity: i64) -> CoreResult<Self> {
        Self::build(name.into(), price, quantity, ProductKind::Standard)
    }

    /// Creates a NonStocked product (always active, stock always 0).
    pub fn non_stocked(name: impl Into<String>, price: Money) -> CoreResult<Self> {
        Self::build(name.into(), price, 0, ProductKind::NonStocked)
    }

    /// Creates a Limited product that allows at most `maximum` units per order.
    pub fn limited(
        name: impl Into<String>,
        price: Money,
        quantity: i64,
        maximum: i64,
    ) -> CoreResult<Self> {
        validate_order_limit(maximum)?;
        Self::build(name.into(), price, quantity, ProductKind::Limited { maximum })
    }

    /// Creates a product of any kind.
    pub fn with_kind(
        name: impl Into<String>,
        price: Money,
        quantity: i64,
        kind: ProductKind,
    ) -> CoreResult<Self> {
        match kind {
            ProductKind::Standard => Self::new(name, price, quantity),
            ProductKind::NonStocked => Self::non_stocked(name, price),
            ProductKind::Limited { maximum } => Self::limited(name, price, quantity, maximum),
        }
    }

    fn build(name: String, price: Money, quantity: i64, kind: ProductKind) -> CoreResult<Self> {
        validate_product_name(&name)?;
        validate_price(price)?;
        validate_stock(quantity)?;

        let active = !kind.is_stocked() || quantity > 0;
        Ok(Product {
            id: ProductId::new(),
            name,
            price,
            quantity: if kind.is_stocked() { quantity } else { 0 },
            active,
            kind,
            promotion: None,
        })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price before promotions.
    pub fn price(&self) -> Money {
        self.price
    }

    /// Current stock. NonStocked products always report 0.
    pub fn quantity(&self) -> i64 {
        match self.kind {
            ProductKind::NonStocked => 0,
            _ => self.quantity,
        }
    }

    pub fn kind(&self) -> ProductKind {
        self.kind
    }

    pub fn is_stocked(&self) -> bool {
        self.kind.is_stocked()
    }

    /// The per-order maximum of a Limited product.
    pub fn maximum(&self) -> Option<i64> {
        match self.kind {
            ProductKind::Limited { maximum } => Some(maximum),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn promotion(&self) -> Option<&Promotion> {
        self.promotion.as_ref()
    }

    /// Linear cost of `quantity` units, ignoring any promotion.
    pub fn list_price(&self, quantity: i64) -> Money {
        self.price.multiply_quantity(quantity)
    }

    /// Cost of `quantity` units with the attached promotion, if any.
    ///
    /// Does not check stock or mutate anything.
    pub fn quote(&self, quantity: i64) -> Money {
        match &self.promotion {
            Some(promotion) => promotion.apply(self.price, quantity),
            None => self.list_price(quantity),
        }
    }

    /// Orders products by unit price. Used for display sorting only.
    pub fn cmp_by_price(&self, other: &Product) -> Ordering {
        self.price.cmp(&other.price)
    }

    /// Fails with `OrderLimitExceeded` if `quantity` is above a Limited
    /// product's per-order maximum. Other kinds always pass.
    pub fn check_order_limit(&self, quantity: i64) -> CoreResult<()> {
        if let ProductKind::Limited { maximum } = self.kind {
            if quantity > maximum {
                return Err(CoreError::OrderLimitExceeded {
                    name: self.name.clone(),
                    maximum,
                    requested: quantity,
                });
            }
        }

        Ok(())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub fn activate(&mut self) {
        if !self.active {
            debug!(product = %self.name, "Product activated");
        }
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        if self.active {
            debug!(product = %self.name, "Product deactivated");
        }
        self.active = false;
    }

    /// Replaces the attached promotion. `None` removes it.
    pub fn set_promotion(&mut self, promotion: Option<Promotion>) {
        debug!(
            product = %self.name,
            promotion = promotion.as_ref().map(Promotion::name),
            "Promotion changed"
        );
        self.promotion = promotion;
    }

    pub fn clear_promotion(&mut self) {
        self.set_promotion(None);
    }

    /// Sets the stock level.
    ///
    /// Zero deactivates a stocked product; a positive level activates it.
    /// NonStocked products ignore the new level.
    ///
    /// ## Errors
    /// `InvalidArgument` if `quantity` is negative.
    pub fn restock(&mut self, quantity: i64) -> CoreResult<()> {
        validate_stock(quantity)?;

        if !self.is_stocked() {
            return Ok(());
        }

        debug!(product = %self.name, from = self.quantity, to = quantity, "Restocked");
        self.quantity = quantity;
        if quantity == 0 {
            self.deactivate();
        } else {
            self.activate();
        }

        Ok(())
    }

    /// Buys `quantity` units and returns what they cost.
    ///
    /// ## Check Order
    /// ```text
    /// purchase(q)
    ///   │
    ///   ├── q <= 0 ─────────────────────────► InvalidArgument
    ///   ├── Limited and q > maximum ────────► OrderLimitExceeded
    ///   ├── inactive ───────────────────────► InactiveProduct
    ///   ├── stocked and q > stock ──────────► InsufficientStock
    ///   │
    ///   └── cost = promotion(price, q) or price × q
    ///       stock -= q (stocked only), deactivate at 0
    /// ```
    ///
    /// Nothing is mutated when an error is returned.
    pub fn purchase(&mut self, quantity: i64) -> CoreResult<Money> {
        validate_purchase_quantity(quantity)?;
        self.check_order_limit(quantity)?;

        if !self.active {
            return Err(CoreError::InactiveProduct {
                name: self.name.clone(),
            });
        }

        if self.is_stocked() && quantity > self.quantity {
            return Err(CoreError::InsufficientStock {
                name: self.name.clone(),
                available: self.quantity,
                requested: quantity,
            });
        }

        let cost = self.quote(quantity);

        if self.is_stocked() {
            self.quantity -= quantity;
            if self.quantity == 0 {
                self.deactivate();
            }
        }

        debug!(product = %self.name, quantity, cost = %cost, remaining = self.quantity(), "Purchased");
        Ok(cost)
    }
}

/// The listing line shown for a product.
///
/// ```text
/// MacBook Air M2, Price: $1450.00, Quantity: 100 | Promotion: Second Half price!
/// Windows License, Price: $125.00 (Non-stocked item)
/// Shipping, Price: $10.00, Quantity: 250 (Max per order: 1)
/// ```
impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ProductKind::Standard => write!(
                f,
                "{}, Price: {}, Quantity: {}",
                self.name, self.price, self.quantity
            )?,
            ProductKind::NonStocked => {
                write!(f, "{}, Price: {} (Non-stocked item)", self.name, self.price)?
            }
            ProductKind::Limited { maximum } => write!(
                f,
                "{}, Price: {}, Quantity: {} (Max per order: {})",
                self.name, self.price, self.quantity, maximum
            )?,
        }

        if let Some(promotion) = &self.promotion {
            write!(f, " | Promotion: {}", promotion.name())?;
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
