//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating quote inputs that stay
//! inside the domain's valid ranges.

use core_kernel::ApplicationId;
use domain_rating::{DerechoScheduleEntry, TaxRule, INSTALLMENT_SURCHARGES};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for positive money amounts with cents (0.01 to 100000.00)
pub fn money_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for target premiums large enough to clear the minimum fee
pub fn target_premium_strategy() -> impl Strategy<Value = Decimal> {
    (100_000i64..2_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for per mille rates (0.0001 to 100.0000)
pub fn rate_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|n| Decimal::new(n, 4))
}

/// Strategy for tax percentages (0.00 to 30.00 points)
pub fn tax_points_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..3_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for coverage durations in days
pub fn days_strategy() -> impl Strategy<Value = u32> {
    1u32..=730u32
}

/// Strategy for installment counts that carry a surcharge
pub fn installment_count_strategy() -> impl Strategy<Value = u32> {
    prop::sample::select(INSTALLMENT_SURCHARGES.iter().map(|(n, _)| *n).collect::<Vec<_>>())
}

/// Strategy for application identifiers
pub fn application_id_strategy() -> impl Strategy<Value = ApplicationId> {
    (1i64..10_000_000i64).prop_map(ApplicationId::new)
}

/// Strategy for a single tax rule
pub fn tax_rule_strategy() -> impl Strategy<Value = TaxRule> {
    ("[A-Z]{2,4}", money_strategy(), tax_points_strategy())
        .prop_map(|(code, base, points)| TaxRule::new(code, base, points))
}

/// Strategy for tax sets of up to five lines, some sharing the first base
pub fn tax_rules_strategy() -> impl Strategy<Value = Vec<TaxRule>> {
    prop::collection::vec((tax_rule_strategy(), any::<bool>()), 0..5).prop_map(|lines| {
        let reference = lines.first().map(|(rule, _)| rule.original_base);
        lines
            .into_iter()
            .map(|(mut rule, linked)| {
                if let (true, Some(base)) = (linked, reference) {
                    rule.original_base = base;
                }
                rule
            })
            .collect()
    })
}

/// Strategy for non-empty fee schedules with ascending fees
pub fn schedule_strategy() -> impl Strategy<Value = Vec<DerechoScheduleEntry>> {
    prop::collection::vec((1i64..1_000_000i64, 1i64..10_000i64), 0..4).prop_map(|steps| {
        let mut threshold = Decimal::ZERO;
        let mut fee = Decimal::new(1000, 2);
        let mut entries = vec![DerechoScheduleEntry::new(threshold, fee)];
        for (gap, raise) in steps {
            threshold += Decimal::new(gap, 2);
            fee += Decimal::new(raise, 2);
            entries.push(DerechoScheduleEntry::new(threshold, fee));
        }
        entries
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_money_strategy_two_decimals(amount in money_strategy()) {
            prop_assert!(amount > Decimal::ZERO);
            prop_assert_eq!(amount.round_dp(2), amount);
        }

        #[test]
        fn test_schedule_strategy_starts_at_zero(entries in schedule_strategy()) {
            prop_assert!(!entries.is_empty());
            prop_assert_eq!(entries[0].premium_threshold, Decimal::ZERO);
        }

        #[test]
        fn test_installments_listed(count in installment_count_strategy()) {
            prop_assert!([1u32, 3, 6, 9, 12].contains(&count));
        }
    }
}
