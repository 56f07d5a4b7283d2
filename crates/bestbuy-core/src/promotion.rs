//! # Promotions
//!
//! Pricing strategies applied in place of `unit_price × quantity`.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PercentageDiscount(p)   total = price × q × (1 - p/100)               │
//! │                                                                         │
//! │  SecondItemHalfPrice     pairs = q / 2, leftover = q % 2               │
//! │                          total = pairs × 1.5 × price + leftover × price│
//! │                                                                         │
//! │  BuyTwoGetOneFree        groups = q / 3, remainder = q % 3             │
//! │                          total = groups × 2 × price + remainder × price│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Promotions are pure: the same `(unit_price, quantity)` always yields the
//! same total, and nothing is mutated.

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::DiscountRate;
use crate::validation::validate_promotion_name;

/// The closed set of pricing rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PromotionRule {
    /// A flat percentage off every unit.
    PercentageDiscount { rate: DiscountRate },
    /// Every second unit is half price.
    SecondItemHalfPrice,
    /// Every third unit is free.
    BuyTwoGetOneFree,
}

impl PromotionRule {
    /// Total cost of `quantity` units at `unit_price` under this rule.
    ///
    /// `quantity` is expected to be at least 1; the purchase path validates
    /// it before a promotion is consulted.
    pub fn apply(&self, unit_price: Money, quantity: i64) -> Money {
        match self {
            PromotionRule::PercentageDiscount { rate } => {
                unit_price.multiply_quantity(quantity).apply_discount(*rate)
            }
            PromotionRule::SecondItemHalfPrice => {
                let pairs = quantity / 2;
                let leftover = quantity % 2;
                unit_price.three_halves().multiply_quantity(pairs)
                    + unit_price.multiply_quantity(leftover)
            }
            PromotionRule::BuyTwoGetOneFree => {
                let groups = quantity / 3;
                let remainder = quantity % 3;
                unit_price.multiply_quantity(groups * 2 + remainder)
            }
        }
    }
}

/// A named promotion that can be attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Promotion {
    name: String,
    #[serde(flatten)]
    rule: PromotionRule,
}

impl Promotion {
    /// Creates a promotion from a name and a rule.
    pub fn new(name: impl Into<String>, rule: PromotionRule) -> CoreResult<Self> {
        let name = name.into();
        validate_promotion_name(&name)?;
        Ok(Promotion { name, rule })
    }

    /// Percentage off every unit, `percent` in 0-100.
    ///
    /// ```rust
    /// use bestbuy_core::money::Money;
    /// use bestbuy_core::promotion::Promotion;
    ///
    /// let promo = Promotion::percentage("30% off!", 30.0).unwrap();
    /// assert_eq!(promo.apply(Money::from_major(100), 2), Money::from_major(140));
    /// ```
    pub fn percentage(name: impl Into<String>, percent: f64) -> CoreResult<Self> {
        let rate = DiscountRate::from_percentage(percent)?;
        Self::new(name, PromotionRule::PercentageDiscount { rate })
    }

    pub fn second_item_half_price(name: impl Into<String>) -> CoreResult<Self> {
        Self::new(name, PromotionRule::SecondItemHalfPrice)
    }

    pub fn buy_two_get_one_free(name: impl Into<String>) -> CoreResult<Self> {
        Self::new(name, PromotionRule::BuyTwoGetOneFree)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rule(&self) -> PromotionRule {
        self.rule
    }

    /// Total cost of `quantity` units at `unit_price`.
    #[inline]
    pub fn apply(&self, unit_price: Money, quantity: i64) -> Money {
        self.rule.apply(unit_price, quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
