//! # Money Module
//!
//! Provides the `Money` type for handling prices safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The backend sends prices in euros as JSON numbers:                     │
//! │    { "nom": "Menu Maxi", "prix": 8.9 }                                  │
//! │                                                                         │
//! │  8.9 has no exact binary representation, so sums drift.                 │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "8.9" is parsed digit by digit into 890 cents                        │
//! │    and never touches f64 arithmetic afterwards                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use fastfood_core::money::Money;
//!
//! let price = Money::parse_major("8.9").unwrap();
//! assert_eq!(price.cents(), 890);
//! assert_eq!(price.display_with("€"), "8.90€");
//! assert_eq!(Money::from_cents(500).display_with("€"), "5€");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Money Type
// =============================================================================

/// A price in the smallest currency unit (cents of a euro).
///
/// Serializes as a plain integer of cents. Backend payloads, which use major
/// units, go through [`major_units`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-euro part.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents part (always positive).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Parses a decimal amount expressed in major units ("5", "5.5", "-2.30").
    ///
    /// Digits beyond the second decimal are rounded half away from zero, so a
    /// backend float such as `0.30000000000000004` still lands on 30 cents.
    ///
    /// ## Errors
    /// - [`CoreError::InvalidPrice`] for empty input, exponents, stray
    ///   characters or values that overflow `i64` cents.
    pub fn parse_major(input: &str) -> CoreResult<Money> {
        let invalid = |reason: &str| CoreError::InvalidPrice {
            value: input.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected a decimal number"));
        }
        if !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected a decimal number"));
        }

        let whole: i64 = whole.parse().map_err(|_| invalid("amount too large"))?;

        let digits = fraction.as_bytes();
        let digit = |i: usize| digits.get(i).map_or(0, |b| i64::from(b - b'0'));
        let mut minor = digit(0) * 10 + digit(1);
        if digit(2) >= 5 {
            minor += 1;
        }

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| invalid("amount too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }

    /// Renders the amount followed by `symbol`, dropping the decimals when
    /// the amount is a whole number: `5€`, `5.50€`, `-0.30€`.
    pub fn display_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        if self.minor() == 0 {
            format!("{}{}{}", sign, self.major().abs(), symbol)
        } else {
            format!("{}{}.{:02}{}", sign, self.major().abs(), self.minor(), symbol)
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Two-decimal major units without symbol (`5.00`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Saturates at the `i64` bounds; a cart of absurd prices shows a capped
/// total instead of wrapping.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Wire Format (major units)
// =============================================================================

/// Serde adapter for prices expressed in major units on the wire.
///
/// Accepts JSON integers, floats and numeric strings; writes a two-decimal
/// string so the value round-trips without going through `f64`.
///
/// ```rust,ignore
/// #[serde(with = "crate::money::major_units")]
/// pub price: Money,
/// ```
pub mod major_units {
    use super::Money;
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&money.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(MajorUnitsVisitor)
    }

    struct MajorUnitsVisitor;

    impl<'de> Visitor<'de> for MajorUnitsVisitor {
        type Value = Money;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a price in major units")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
            v.checked_mul(100)
                .map(Money::from_cents)
                .ok_or_else(|| E::custom("price too large"))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
            let v = i64::try_from(v).map_err(|_| E::custom("price too large"))?;
            self.visit_i64(v)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
            if !v.is_finite() {
                return Err(E::custom("price must be finite"));
            }
            // f64's Display never uses exponent notation
            Money::parse_major(&v.to_string()).map_err(E::custom)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
            Money::parse_major(v).map_err(E::custom)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
