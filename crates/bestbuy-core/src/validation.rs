//! # Validation Module
//!
//! Input checks shared by product construction, restocking, purchasing and
//! promotion setup.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Points                                  │
//! │                                                                         │
//! │  Product::new / limited / non_stocked                                  │
//! │  ├── validate_product_name    (non-empty)                              │
//! │  ├── validate_price           (0 to MAX_PRICE_CENTS)                   │
//! │  ├── validate_stock           (0 to MAX_QUANTITY)                      │
//! │  └── validate_order_limit     (>= 1, Limited only)                     │
//! │                                                                         │
//! │  Product::restock           → validate_stock                           │
//! │  Product::purchase          → validate_purchase_quantity (1 to MAX)    │
//! │  Promotion constructors     → validate_promotion_name, discount bps    │
//! │                                                                         │
//! │  Every failure is raised synchronously as InvalidArgument.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bestbuy_core::validation::{validate_product_name, validate_purchase_quantity};
//!
//! validate_product_name("MacBook Air M2").unwrap();
//! assert!(validate_purchase_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Largest accepted unit price: $100,000,000.00.
pub const MAX_PRICE_CENTS: i64 = 10_000_000_000;

/// Largest accepted stock level or single purchase quantity.
///
/// `MAX_PRICE_CENTS * MAX_QUANTITY` stays below `i64::MAX`, so one line's
/// cost never overflows.
pub const MAX_QUANTITY: i64 = 100_000_000;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name: must contain something other than whitespace.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    Ok(())
}

/// Validates a promotion name.
pub fn validate_promotion_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "promotion name".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price. Zero is allowed (free items).
///
/// ```rust
/// use bestbuy_core::money::Money;
/// use bestbuy_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-100)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    if price.cents() > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a stock level, on construction or restock.
pub fn validate_stock(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: MAX_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a requested purchase quantity.
///
/// ## User Workflow
/// ```text
/// Shopping list line: (MacBook Air M2, 0)
///      │
///      ▼
/// validate_purchase_quantity(0) ← THIS FUNCTION
///      │
///      └── qty <= 0 → InvalidArgument("quantity must be positive")
/// ```
pub fn validate_purchase_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_QUANTITY,
        });
    }

    Ok(())
}

/// Validates the per-order maximum of a Limited product.
pub fn validate_order_limit(maximum: i64) -> ValidationResult<()> {
    if maximum <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "maximum".to_string(),
        });
    }

    Ok(())
}

/// Validates a discount in basis points: 0 to 10000 (0% to 100%).
pub fn validate_discount_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "discount_bps".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
