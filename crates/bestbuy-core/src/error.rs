//! # Error Types
//!
//! Domain error types for bestbuy-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bestbuy-core errors (this file)                                       │
//! │  ├── ValidationError  - Malformed construction / call parameters       │
//! │  ├── CoreError        - Purchase and lookup failures                   │
//! │  └── OrderError       - The CoreError that stopped an order + progress │
//! │                                                                         │
//! │  bestbuy-inventory errors (separate crate)                             │
//! │  └── InventoryError   - Config file loading and store construction     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → OrderError → caller renders text  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations raised by products and the store.
///
/// Every variant is raised at the point of violation and never coerced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Malformed construction or call parameters.
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// Purchase attempted on a deactivated product.
    #[error("Product {name} is not active")]
    InactiveProduct { name: String },

    /// Purchase quantity exceeds available stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Order line (qty: 200)
    ///      │
    ///      ▼
    /// Check stock: available=100
    ///      │
    ///      ▼
    /// InsufficientStock { name: "MacBook Air M2", available: 100, requested: 200 }
    /// ```
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Limited product requested above its per-order maximum.
    #[error("Cannot buy more than {maximum} of {name} in one order (requested {requested})")]
    OrderLimitExceeded {
        name: String,
        maximum: i64,
        requested: i64,
    },

    /// An order line references a product the store does not hold.
    #[error("Product not found: {0}")]
    ProductNotFound(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level input validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} cannot be negative")]
    MustNotBeNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// An accumulated amount no longer fits in 64 bits.
    #[error("{field} is too large")]
    Overflow { field: String },
}

// =============================================================================
// Order Error
// =============================================================================

/// An order that stopped before every line was applied.
///
/// Orders are not transactional: the `completed` lines before `line` stay
/// applied to the store, and `charged` is what they cost. A failure raised by
/// the pre-check always has `completed == 0`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Order failed at line {line} after {completed} applied line(s): {source}")]
pub struct OrderError {
    /// One-based position of the failing line in the shopping list.
    pub line: usize,
    /// Number of lines applied before the failure.
    pub completed: usize,
    /// Accumulated cost of the applied lines.
    pub charged: Money,
    /// The failure itself.
    #[source]
    pub source: CoreError,
}

impl OrderError {
    /// Returns the underlying domain error.
    pub fn cause(&self) -> &CoreError {
        &self.source
    }

    /// True when some lines were applied before the failure.
    pub fn is_partial(&self) -> bool {
        self.completed > 0
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
