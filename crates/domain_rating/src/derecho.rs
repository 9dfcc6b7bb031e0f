//! Emission fee (derecho de emisión) schedule
//!
//! The emission fee is a stamp/processing charge looked up from a table of
//! `(premium threshold, fee)` rows. A tariff premium takes the fee of the
//! row with the greatest threshold at or below it; premiums below every
//! threshold take the fee of the first row, which is the table minimum.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::RatingError;
use crate::limits::check_amount;

/// One row of the emission fee schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerechoScheduleEntry {
    /// Lowest tariff premium this row applies to
    pub premium_threshold: Decimal,
    /// Emission fee charged from this threshold upwards
    pub fee: Decimal,
}

impl DerechoScheduleEntry {
    pub fn new(premium_threshold: Decimal, fee: Decimal) -> Self {
        Self { premium_threshold, fee }
    }
}

/// Anything that maps a tariff premium to an emission fee
///
/// The solver is generic over this so tests can substitute flat or
/// synthetic fee functions.
pub trait FeeResolver {
    /// Returns the emission fee for a tariff premium
    fn fee_for(&self, tariff_premium: Decimal) -> Decimal;
}

/// Immutable, non-empty emission fee schedule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerechoScheduleResolver {
    entries: Vec<DerechoScheduleEntry>,
}

impl DerechoScheduleResolver {
    /// Builds a resolver from schedule rows
    ///
    /// Rows are sorted ascending by threshold; the sort is stable so rows
    /// sharing a threshold keep their relative order.
    ///
    /// # Errors
    ///
    /// * `RatingError::EmptySchedule` if `entries` is empty
    /// * `RatingError::InvalidStoredData` if a threshold or fee exceeds `MAX_AMOUNT`
    pub fn new(mut entries: Vec<DerechoScheduleEntry>) -> Result<Self, RatingError> {
        if entries.is_empty() {
            return Err(RatingError::EmptySchedule);
        }
        for entry in &entries {
            check_amount("fee threshold", entry.premium_threshold)
                .and_then(|_| check_amount("fee", entry.fee))
                .map_err(RatingError::InvalidStoredData)?;
        }
        entries.sort_by(|a, b| a.premium_threshold.cmp(&b.premium_threshold));
        Ok(Self { entries })
    }

    /// Returns the schedule rows in ascending threshold order
    pub fn entries(&self) -> &[DerechoScheduleEntry] {
        &self.entries
    }

    /// Number of rows in the schedule
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; a resolver cannot be built from an empty schedule
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fee charged when no threshold qualifies
    pub fn minimum_fee(&self) -> Decimal {
        self.entries[0].fee
    }

    /// Thresholds at which the fee changes
    ///
    /// Premium is a step function of rate across these points, so callers
    /// checking monotonicity should stay clear of them.
    pub fn thresholds(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.entries.iter().map(|e| e.premium_threshold)
    }
}

impl FeeResolver for DerechoScheduleResolver {
    fn fee_for(&self, tariff_premium: Decimal) -> Decimal {
        // Nearest row at or below the premium; on equal thresholds the first row wins
        self.entries
            .iter()
            .filter(|e| e.premium_threshold <= tariff_premium)
            .fold(None::<&DerechoScheduleEntry>, |best, entry| match best {
                Some(b) if b.premium_threshold >= entry.premium_threshold => Some(b),
                _ => Some(entry),
            })
            .map(|e| e.fee)
            .unwrap_or_else(|| self.minimum_fee())
    }
}

/// A single fee for every premium
///
/// Useful when the fee schedule is irrelevant to the calculation at hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatFee(pub Decimal);

impl FeeResolver for FlatFee {
    fn fee_for(&self, _tariff_premium: Decimal) -> Decimal {
        self.0
    }
}
