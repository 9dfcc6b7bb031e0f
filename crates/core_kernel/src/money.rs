//! Monetary rounding and percentage helpers
//!
//! All amounts are carried as `rust_decimal::Decimal` at full precision while
//! a computation is in flight and rounded to two decimal places only when a
//! value is reported. Rounding uses `Decimal::round_dp`, which rounds half to
//! even.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decimal places used for every reported monetary amount
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Rounds an amount to the reporting precision (2 dp, half to even)
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp(MONEY_DECIMAL_PLACES)
}

/// Returns true if `actual` is within `tolerance` of `expected` (inclusive)
pub fn within_tolerance(actual: Decimal, expected: Decimal, tolerance: Decimal) -> bool {
    (actual - expected).abs() <= tolerance
}

/// A percentage expressed in points (e.g. `15.0` for 15%)
///
/// Surcharge tables and tax rates are stored this way, so the type keeps
/// the point value and converts to a fraction only when applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(Decimal);

impl Percentage {
    /// Zero percent
    pub const ZERO: Percentage = Percentage(Decimal::ZERO);

    /// Creates a percentage from points (e.g. `dec!(10.07)` for 10.07%)
    pub fn from_points(points: Decimal) -> Self {
        Self(points)
    }

    /// Returns the value in points
    pub fn points(&self) -> Decimal {
        self.0
    }

    /// Returns the value as a fraction (15% -> 0.15)
    pub fn as_fraction(&self) -> Decimal {
        self.0 / dec!(100)
    }

    /// Returns true for a zero percentage
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Applies the percentage to an amount without rounding
    ///
    /// Computed as `amount * points / 100`.
    pub fn apply(&self, amount: Decimal) -> Decimal {
        amount * self.0 / dec!(100)
    }

    /// Applies the percentage and rounds the result to 2 dp
    pub fn apply_rounded(&self, amount: Decimal) -> Decimal {
        round_money(self.apply(amount))
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<Decimal> for Percentage {
    fn from(points: Decimal) -> Self {
        Self::from_points(points)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn rounding_moves_at_most_half_a_cent(minor in -1_000_000_000i64..1_000_000_000i64) {
            let amount = Decimal::new(minor, 4);
            let rounded = round_money(amount);
            prop_assert!((rounded - amount).abs() <= dec!(0.005));
            prop_assert!(rounded.scale() <= MONEY_DECIMAL_PLACES);
        }

        #[test]
        fn zero_percentage_is_neutral(minor in 0i64..1_000_000_000i64) {
            let amount = Decimal::new(minor, 2);
            prop_assert_eq!(Percentage::ZERO.apply(amount), Decimal::ZERO);
        }
    }
}
