//! Input bounds
//!
//! The premium arithmetic runs on `Decimal`, whose integer range tops out
//! near 7.9e28. These limits keep every intermediate product of a quote
//! (tariff, surcharges, the bisection's upper rate, the tax cascade) well
//! inside that range, so out-of-range inputs are rejected up front instead
//! of overflowing mid-solve.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::RatingError;
use crate::policy::PolicyBaseData;
use crate::quote::QuoteRequest;
use crate::tax::TaxRule;

/// Longest coverage period accepted, in days (ten years)
pub const MAX_COVERAGE_DAYS: u32 = 3660;

/// Largest absolute monetary amount accepted on any input
pub const MAX_AMOUNT: Decimal = dec!(1000000000000);

/// Largest stored rate (per mille)
pub const MAX_RATE: Decimal = dec!(1000000);

/// Largest absolute tax rate, in percentage points
pub const MAX_TAX_POINTS: Decimal = dec!(100);

/// Most tax lines a single application may carry
pub const MAX_TAX_LINES: usize = 24;

/// Rejects a quote whose inputs fall outside the supported ranges
///
/// # Errors
///
/// * `RatingError::Validation` for an out-of-range request field
/// * `RatingError::InvalidStoredData` for out-of-range policy data or tax lines
pub fn check_quote_inputs(
    request: &QuoteRequest,
    policy: &PolicyBaseData,
    rules: &[TaxRule],
) -> Result<(), RatingError> {
    if request.days == 0 {
        return Err(RatingError::validation("days must be at least 1"));
    }
    if request.days > MAX_COVERAGE_DAYS {
        return Err(RatingError::validation(format!(
            "days must be at most {}",
            MAX_COVERAGE_DAYS
        )));
    }
    check_amount("reportedPremium", request.reported_premium).map_err(RatingError::Validation)?;
    if let Some(total) = request.total_insured_amount {
        check_amount("totalInsuredAmount", total).map_err(RatingError::Validation)?;
    }

    if policy.rate < Decimal::ZERO || policy.rate > MAX_RATE {
        return Err(RatingError::InvalidStoredData(format!(
            "rate {} outside 0..={}",
            policy.rate, MAX_RATE
        )));
    }
    check_amount("sum insured", policy.sum_insured).map_err(RatingError::InvalidStoredData)?;
    check_amount("escribania fee", policy.escribania_fee)
        .map_err(RatingError::InvalidStoredData)?;

    if rules.len() > MAX_TAX_LINES {
        return Err(RatingError::InvalidStoredData(format!(
            "{} tax lines, at most {} supported",
            rules.len(),
            MAX_TAX_LINES
        )));
    }
    for rule in rules {
        if rule.rate_percent.points().abs() > MAX_TAX_POINTS {
            return Err(RatingError::InvalidStoredData(format!(
                "tax {} rate {}% outside -{}..={}",
                rule.code,
                rule.rate_percent.points(),
                MAX_TAX_POINTS,
                MAX_TAX_POINTS
            )));
        }
        check_amount(&rule.code, rule.original_base).map_err(RatingError::InvalidStoredData)?;
    }

    Ok(())
}

/// Checks that an amount's magnitude is at most `MAX_AMOUNT`
pub(crate) fn check_amount(field: &str, amount: Decimal) -> Result<(), String> {
    if amount.abs() > MAX_AMOUNT {
        Err(format!("{} {} exceeds {}", field, amount, MAX_AMOUNT))
    } else {
        Ok(())
    }
}
