//! # Money Module
//!
//! The `Money` type used for every price, line cost and order total.
//!
//! ## Integer Cents
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Prices are stored in cents, not floats.                                │
//! │                                                                         │
//! │    MacBook Air M2  $1450.00  →  Money(145000)                           │
//! │    Second item half price on 2 units:                                   │
//! │      145000 × 3 / 2 = 217500  →  $2175.00   (exact)                     │
//! │                                                                         │
//! │  Fractions of a cent only appear in promotion math, where they are      │
//! │  rounded half-up to the nearest cent at a single, explicit step.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bestbuy_core::money::Money;
//!
//! let price = Money::from_major(1450);        // $1450.00
//! let line = price.multiply_quantity(2);      // $2900.00
//! assert_eq!(line.cents(), 290_000);
//! assert_eq!(line.to_string(), "$2900.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::types::DiscountRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// Signed so that `savings` and refunds can be expressed, although prices
/// themselves are validated to be non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use bestbuy_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// ```rust
    /// use bestbuy_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(250).cents(), 25_000);
    /// ```
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major.saturating_mul(100))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion (truncated toward zero).
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion, always 0-99.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Linear cost of `qty` units at this unit price.
    ///
    /// Saturates at the `i64` bounds. Validated prices and quantities never
    /// get there.
    ///
    /// ```rust
    /// use bestbuy_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(1000);
    /// assert_eq!(unit_price.multiply_quantity(10).cents(), 10_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Sum of two amounts, or `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Removes a percentage from this amount.
    ///
    /// The removed amount is rounded half-up to the cent before it is
    /// subtracted.
    ///
    /// ```rust
    /// use bestbuy_core::money::Money;
    /// use bestbuy_core::types::DiscountRate;
    ///
    /// let subtotal = Money::from_major(100);
    /// let discounted = subtotal.apply_discount(DiscountRate::from_bps(1000)); // 10% off
    /// assert_eq!(discounted, Money::from_major(90));
    /// ```
    pub fn apply_discount(&self, rate: DiscountRate) -> Money {
        // i128 so large totals times 10000 cannot overflow
        let removed = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money(self.0 - removed as i64)
    }

    /// One and a half times this amount, rounded half-up to the cent.
    ///
    /// This is the price of a full-price item plus a half-price item.
    ///
    /// ```rust
    /// use bestbuy_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(100).three_halves(), Money::from_major(150));
    /// assert_eq!(Money::from_cents(99).three_halves().cents(), 149); // 148.5 → 149
    /// ```
    pub fn three_halves(&self) -> Money {
        let tripled = self.0 as i128 * 3;
        Money(((tripled + 1) / 2) as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders as `$1450.00`, with a leading minus for negative amounts.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
