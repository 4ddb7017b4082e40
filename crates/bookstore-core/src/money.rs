//! # Money
//!
//! Prices and cart totals are whole cents held in an `i64`. Decimal
//! amounts only exist on the wire, where a book reads `"price": 14.99`.
//!
//! ```text
//!   JSON 14.99 ──decimal::deserialize──► Money(1499)
//!                                          │  × 3
//!                                          ▼
//!   JSON 44.97 ◄──decimal::serialize──── Money(4497)
//! ```
//!
//! ```rust
//! use bookstore_core::money::Money;
//!
//! let line = Money::from_cents(1499).multiply_quantity(3);
//! assert_eq!(line.cents(), 4497);
//! assert_eq!(line.to_string(), "$44.97");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use ts_rs::TS;

/// An amount in cents.
///
/// Arithmetic saturates instead of overflowing.
///
/// Plain serde gives integer cents; fields on the wire use [`decimal`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Rounds to the nearest cent.
    ///
    /// ```rust
    /// use bookstore_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(14.99).cents(), 1499);
    /// assert_eq!(Money::from_decimal(0.1 + 0.2).cents(), 30);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        Money((amount * 100.0).round() as i64)
    }

    pub fn to_decimal(self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Price of `qty` copies, pinned at the `i64` bounds.
    #[inline]
    pub const fn multiply_quantity(self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

/// `$12.34`, or `-$5.50` below zero.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::default(), Add::add)
    }
}

/// Serde adapter for the decimal wire form.
///
/// ```rust,ignore
/// #[serde(with = "crate::money::decimal")]
/// pub price: Money,
/// ```
///
/// Whole numbers are accepted too (`15` reads as $15.00).
pub mod decimal {
    use super::Money;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.to_decimal())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        f64::deserialize(deserializer).map(Money::from_decimal)
    }
}
