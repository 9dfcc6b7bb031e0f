//! Custom Test Assertions
//!
//! Assertion helpers for amounts and quote results that give more
//! meaningful failure messages than standard assertions.

use core_kernel::within_tolerance;
use domain_rating::QuoteResult;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Tolerance used when comparing rounded money values
pub const MONEY_TOLERANCE: Decimal = dec!(0.01);

/// Asserts that two amounts are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the amounts differ by more than `tolerance`
pub fn assert_decimal_approx_eq(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "Amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        diff,
        tolerance
    );
}

/// Asserts that an amount has at most two decimal places
pub fn assert_money_scale(amount: Decimal) {
    assert_eq!(
        amount.round_dp(2),
        amount,
        "Expected a money amount with at most 2 decimals, got {}",
        amount
    );
}

/// Asserts that a quote's reported components add up
///
/// Checks the net premium, the tax line total and the final premium
/// against their components, each within one cent.
pub fn assert_quote_consistent(quote: &QuoteResult) {
    assert_decimal_approx_eq(
        quote.net_premium,
        quote.tariff_premium - quote.bonification,
        MONEY_TOLERANCE,
    );

    let line_total: Decimal = quote.tax_lines.iter().map(|l| l.amount).sum();
    assert_decimal_approx_eq(line_total, quote.total_taxes, MONEY_TOLERANCE);

    let components = quote.taxable_subtotal + quote.financial_surcharge + quote.total_taxes;
    assert!(
        within_tolerance(quote.final_premium, components, MONEY_TOLERANCE),
        "Final premium {} does not match subtotal {} + financial surcharge {} + taxes {}",
        quote.final_premium,
        quote.taxable_subtotal,
        quote.financial_surcharge,
        quote.total_taxes
    );

    for amount in [
        quote.tariff_premium,
        quote.admin_surcharge,
        quote.financial_surcharge,
        quote.taxable_subtotal,
        quote.total_taxes,
        quote.final_premium,
    ] {
        assert_money_scale(amount);
    }
}

/// Asserts that a quote converged onto its target premium
pub fn assert_quote_converged(quote: &QuoteResult) {
    assert!(
        quote.converged,
        "Expected convergence on target {}, stopped at {} after {} iterations",
        quote.target_premium,
        quote.solved_premium,
        quote.iterations
    );
    assert_decimal_approx_eq(quote.solved_premium, quote.target_premium, MONEY_TOLERANCE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_eq_inclusive() {
        assert_decimal_approx_eq(dec!(100.01), dec!(100.00), dec!(0.01));
    }

    #[test]
    #[should_panic(expected = "differ by more than tolerance")]
    fn test_approx_eq_fails() {
        assert_decimal_approx_eq(dec!(100.02), dec!(100.00), dec!(0.01));
    }

    #[test]
    #[should_panic(expected = "at most 2 decimals")]
    fn test_money_scale_rejects_mills() {
        assert_money_scale(dec!(1.005));
    }
}
