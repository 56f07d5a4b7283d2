//! # Shared Value Types
//!
//! Small value types used by promotions, products and orders.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreResult, ValidationError};
use crate::validation::validate_discount_bps;

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount rate in basis points.
///
/// 1 basis point = 0.01%, so 3000 bps = 30% off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a rate from basis points without range checks.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a rate from a percentage, rejecting values outside 0-100.
    ///
    /// ```rust
    /// use bestbuy_core::types::DiscountRate;
    ///
    /// assert_eq!(DiscountRate::from_percentage(12.5).unwrap().bps(), 1250);
    /// assert!(DiscountRate::from_percentage(101.0).is_err());
    /// assert!(DiscountRate::from_percentage(-1.0).is_err());
    /// ```
    pub fn from_percentage(pct: f64) -> CoreResult<Self> {
        let bps = (pct * 100.0).round();
        if !bps.is_finite() || bps < 0.0 {
            return Err(ValidationError::OutOfRange {
                field: "percent".to_string(),
                min: 0,
                max: 100,
            }
            .into());
        }
        // float-to-int casts saturate, so huge inputs still fail the range check
        let bps = bps as u32;
        validate_discount_bps(bps)?;
        Ok(DiscountRate(bps))
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Product Identity
// =============================================================================

/// Identity of a product inside a store.
///
/// Names are unique by convention only, so orders and removals go through
/// this id instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        ProductId(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_rate_from_percentage() {
        let rate = DiscountRate::from_percentage(30.0).unwrap();
        assert_eq!(rate.bps(), 3000);
        assert!((rate.percentage() - 30.0).abs() < 0.001);
    }

    #[test]
    fn test_discount_rate_bounds() {
        assert!(DiscountRate::from_percentage(0.0).is_ok());
        assert!(DiscountRate::from_percentage(100.0).is_ok());
        assert!(DiscountRate::from_percentage(100.5).is_err());
        assert!(DiscountRate::from_percentage(f64::NAN).is_err());
    }

    #[test]
    fn test_product_ids_are_unique() {
        assert_ne!(ProductId::new(), ProductId::new());
    }
}
