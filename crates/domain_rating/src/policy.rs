//! Policy base data
//!
//! The snapshot of stored rating parameters for one application, read once
//! per request and never modified while a quote is computed.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::Percentage;

/// Administrative surcharge applied to every re-rated quote, in points
pub const ADMIN_SURCHARGE_POINTS: Decimal = dec!(15.0);

/// Administrative surcharge used for rating
///
/// Always 15%, whatever is stored on the application.
pub fn rating_admin_percent() -> Percentage {
    Percentage::from_points(ADMIN_SURCHARGE_POINTS)
}

/// Bonification used for rating; always zero
pub fn rating_bonification() -> Decimal {
    Decimal::ZERO
}

/// Stored rating parameters for a policy application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyBaseData {
    /// Applied rate per mille of sum insured per year
    pub rate: Decimal,
    /// Insured capital on file
    pub sum_insured: Decimal,
    /// Administrative surcharge stored on the application
    pub admin_surcharge_percent: Percentage,
    /// Financial surcharge amount stored on the application (informational)
    pub financial_surcharge_amount: Decimal,
    /// Financial surcharge percentage stored on the application (informational)
    pub financial_surcharge_percent: Percentage,
    /// Notary (escribanía) fee, passed through unchanged
    pub escribania_fee: Decimal,
    /// Bonification stored on the application
    pub bonification: Decimal,
}

impl PolicyBaseData {
    /// Creates base data with the given rate and sum insured and no stored surcharges
    pub fn new(rate: Decimal, sum_insured: Decimal) -> Self {
        Self {
            rate,
            sum_insured,
            admin_surcharge_percent: Percentage::from_points(ADMIN_SURCHARGE_POINTS),
            financial_surcharge_amount: Decimal::ZERO,
            financial_surcharge_percent: Percentage::ZERO,
            escribania_fee: Decimal::ZERO,
            bonification: Decimal::ZERO,
        }
    }

    /// Sets the escribanía fee
    pub fn with_escribania_fee(mut self, fee: Decimal) -> Self {
        self.escribania_fee = fee;
        self
    }
}

/// Quote components currently on file for an application
///
/// Returned by the read-only stored-quote endpoint so a re-rated quote can
/// be compared with the original one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredQuote {
    pub tariff_premium: Decimal,
    pub bonification: Decimal,
    pub bonification_percent: Percentage,
    pub net_premium: Decimal,
    pub admin_surcharge: Decimal,
    pub admin_surcharge_percent: Percentage,
    pub financial_surcharge: Decimal,
    pub financial_surcharge_percent: Percentage,
    pub emission_fee: Decimal,
    pub escribania_fee: Decimal,
    pub subtotal: Decimal,
    pub total_taxes: Decimal,
    pub premium: Decimal,
    pub applied_rate: Decimal,
    pub sum_insured: Decimal,
}
