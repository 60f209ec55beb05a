//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Inclusive GST on ₹1000.00 at 18%:                                      │
//! │    1000 × 18 / 118 = 152.5423728813...                                 │
//! │    Rounding this early and then halving it drifts SGST/CGST.            │
//! │                                                                         │
//! │  OUR SOLUTION: exact base-10 decimals, rounded once                     │
//! │    Carry 28 significant digits internally                              │
//! │    Round to 2 places only when a result leaves the core                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use hotelier_core::money::Money;
//!
//! let room = Money::from_cents(200_000); // ₹2000.00
//! let service = Money::from_cents(30_000); // ₹300.00
//! let total = room + service;
//! assert_eq!(total.to_string(), "2300.00");
//! ```

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use ts_rs::TS;

use crate::config::RoundingMode;
use crate::error::{CoreError, CoreResult};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value held as an exact decimal.
///
/// ## Design Decisions
/// - **Signed**: a negative due is an overpayment, not an error
/// - **Unrounded**: arithmetic keeps full precision; call [`Money::round`]
///   at the output boundary only
/// - **Serialized as a string**: `"800.00"` survives JSON without float drift
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  roomTokens[i].amount ──┐                                              │
/// │  serviceTokens[i].amount├──► grand_total ──┐                           │
/// │  foodTokens[i].amount ──┘                  ├──► due_amount ──► report  │
/// │  paymentTokens[i].amount ─► paid_total ────┘                           │
/// │                                                                         │
/// │  invoice.totalAmount ──► GST extraction ──► base / SGST / CGST         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(#[ts(type = "string")] Decimal);

impl Money {
    /// Zero money value.
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Wraps an exact decimal.
    #[inline]
    pub const fn from_decimal(value: Decimal) -> Self {
        Money(value)
    }

    /// Creates a Money value from paise/cents (two implied fractional digits).
    ///
    /// ## Example
    /// ```rust
    /// use hotelier_core::money::Money;
    ///
    /// let price = Money::from_cents(118_000);
    /// assert_eq!(price.to_string(), "1180.00");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Creates a Money value from whole currency units.
    #[inline]
    pub fn from_major(units: i64) -> Self {
        Money(Decimal::from(units))
    }

    /// Converts an API float, rejecting NaN and infinities.
    ///
    /// `field` names the source field in the error so the caller can tell
    /// which record was broken.
    pub fn try_from_f64(value: f64, field: &str) -> CoreResult<Self> {
        if !value.is_finite() {
            return Err(CoreError::invalid_input(
                field,
                format!("must be a finite number, got {}", value),
            ));
        }

        Decimal::from_f64(value)
            .map(Money)
            .ok_or_else(|| CoreError::invalid_input(field, format!("out of range: {}", value)))
    }

    /// Parses a numeric string such as `"2000"`, `" 12.50 "` or `"1e3"`.
    pub fn parse(text: &str, field: &str) -> CoreResult<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(CoreError::invalid_input(field, "empty string is not a number"));
        }

        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map(Money)
            .map_err(|_| CoreError::invalid_input(field, format!("not a number: {:?}", text)))
    }

    /// Returns the underlying decimal.
    #[inline]
    pub const fn decimal(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money::ZERO
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Addition that reports overflow instead of panicking.
    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Subtraction that reports overflow instead of panicking.
    #[inline]
    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Multiplies by a decimal factor (a rate, a quantity).
    #[inline]
    pub fn checked_mul(self, factor: Decimal) -> Option<Money> {
        self.0.checked_mul(factor).map(Money)
    }

    /// Divides by a decimal divisor; `None` on zero or overflow.
    #[inline]
    pub fn checked_div(self, divisor: Decimal) -> Option<Money> {
        self.0.checked_div(divisor).map(Money)
    }

    /// Splits the value into two equal halves (SGST/CGST).
    ///
    /// Division by two is exact in base 10 until the 28-digit limit, so the
    /// two halves of an unrounded amount are always identical.
    #[inline]
    pub fn half(&self) -> Money {
        Money(self.0 / Decimal::TWO)
    }

    /// Sums an iterator of amounts, naming `field` if the sum overflows.
    pub fn checked_sum<I>(amounts: I, field: &str) -> CoreResult<Money>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, |acc, amount| acc.checked_add(amount))
            .ok_or_else(|| CoreError::overflow(field))
    }

    /// Rounds to `scale` fractional digits with the given strategy.
    ///
    /// ## Example
    /// ```rust
    /// use hotelier_core::config::RoundingMode;
    /// use hotelier_core::money::Money;
    ///
    /// let half_paisa = Money::from_cents(1).half(); // 0.005
    /// assert_eq!(half_paisa.round(2, RoundingMode::HalfUp).to_string(), "0.01");
    /// assert_eq!(half_paisa.round(2, RoundingMode::HalfEven).to_string(), "0.00");
    /// ```
    pub fn round(&self, scale: u32, mode: RoundingMode) -> Money {
        let mut rounded = self.0.round_dp_with_strategy(scale, mode.strategy());
        // Keep trailing zeros so "90" serializes as "90.00".
        rounded.rescale(scale);
        Money(rounded)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal with two fractional digits, no currency symbol.
///
/// Currency and locale formatting belong to the presentation layer.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(precision) => write!(f, "{:.*}", precision, self.0),
            None => write!(f, "{:.2}", self.0),
        }
    }
}

impl FromStr for Money {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse(s, "amount")
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Money(value)
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
