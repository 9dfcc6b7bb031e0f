//! Integration tests for the re-rating engine
//!
//! Exercises the engine end to end over a three-row emission fee schedule
//! and a mixed linked/unlinked tax set, plus property tests for the quote
//! invariants.

use core_kernel::{within_tolerance, ApplicationId};
use domain_rating::{
    rating_admin_percent, DerechoScheduleEntry, DerechoScheduleResolver, PolicyBaseData,
    PremiumQuoteEngine, PremiumType, QuoteRequest, QuoteResult, RateBisectionSolver, RatingError,
    SolverInput, TaxRule,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn schedule() -> DerechoScheduleResolver {
    DerechoScheduleResolver::new(vec![
        DerechoScheduleEntry::new(dec!(0), dec!(10)),
        DerechoScheduleEntry::new(dec!(1000), dec!(20)),
        DerechoScheduleEntry::new(dec!(5000), dec!(50)),
    ])
    .unwrap()
}

fn rules() -> Vec<TaxRule> {
    vec![
        TaxRule::new("A", dec!(500), dec!(5)),
        TaxRule::new("B", dec!(500), dec!(3)),
        TaxRule::new("C", dec!(999), dec!(2)),
    ]
}

fn policy() -> PolicyBaseData {
    PolicyBaseData::new(dec!(10), dec!(100000))
}

fn request(target: Decimal) -> QuoteRequest {
    QuoteRequest::new(ApplicationId::new(151547), target, 365)
}

fn quote_for(request: &QuoteRequest) -> QuoteResult {
    PremiumQuoteEngine::new()
        .compute_quote(request, &policy(), &rules(), &schedule())
        .unwrap()
}

mod end_to_end {
    use super::*;

    #[test]
    fn test_solved_rate_reproduces_target() {
        let resolver = schedule();
        let rules = rules();
        let quote = PremiumQuoteEngine::new()
            .compute_quote(&request(dec!(5000)), &policy(), &rules, &resolver)
            .unwrap();

        assert!(quote.converged);
        assert!(quote.iterations <= 100);
        assert!(within_tolerance(quote.final_premium, dec!(5000), dec!(0.01)));

        let input = SolverInput {
            target: dec!(5000),
            sum_insured: dec!(100000),
            days: 365,
            admin_percent: rating_admin_percent(),
            bonification: Decimal::ZERO,
            initial_rate: dec!(10),
            rules: &rules,
        };
        let replay = RateBisectionSolver::new(&resolver).forward(&input, quote.applied_rate);
        assert!(within_tolerance(replay.premium, dec!(5000), dec!(0.01)));
    }

    #[test]
    fn test_breakdown_is_consistent() {
        let quote = quote_for(&request(dec!(5000)));

        // tariff lands between the 1000 and 5000 thresholds
        assert_eq!(quote.emission_fee, dec!(20));
        assert_eq!(quote.admin_surcharge_percent.points(), dec!(15));
        let expected_admin = quote.tariff_premium * dec!(0.15);
        assert!(within_tolerance(quote.admin_surcharge, expected_admin, dec!(0.01)));
        assert_eq!(quote.tax_lines.len(), 3);
        assert_eq!(quote.tax_lines[0].base, quote.taxable_subtotal);
        assert_eq!(quote.tax_lines[1].base, quote.taxable_subtotal);
        let line_sum: Decimal = quote.tax_lines.iter().map(|l| l.amount).sum();
        assert_eq!(line_sum, quote.total_taxes);
    }

    #[test]
    fn test_total_insured_amount_drives_target() {
        let request = request(dec!(1))
            .with_total_insured_amount(dec!(80000))
            .with_premium_type(PremiumType::U);
        let quote = quote_for(&request);

        assert_eq!(quote.target_premium, dec!(2400));
        assert_eq!(quote.sum_insured, dec!(80000));
        assert!(quote.converged);
        assert!(within_tolerance(quote.final_premium, dec!(2400), dec!(0.01)));
    }

    #[test]
    fn test_installments_raise_final_premium() {
        let cash = quote_for(&request(dec!(5000)));
        let financed = quote_for(&request(dec!(5000)).with_installments(12));

        assert_eq!(cash.applied_rate, financed.applied_rate);
        assert_eq!(financed.financial_surcharge_percent.points(), dec!(25.87));
        assert!(financed.financial_surcharge > Decimal::ZERO);
        assert!(financed.final_premium > cash.final_premium);
    }

    #[test]
    fn test_unlisted_installment_count_has_no_surcharge() {
        let quote = quote_for(&request(dec!(5000)).with_installments(4));
        assert_eq!(quote.financial_surcharge, Decimal::ZERO);
        assert!(quote.financial_surcharge_percent.is_zero());
    }

    #[test]
    fn test_negative_target_degrades() {
        let quote = quote_for(&request(dec!(-100)));
        assert!(!quote.converged);
        assert_eq!(quote.iterations, 100);
    }

    #[test]
    fn test_target_inside_fee_step_does_not_converge() {
        // At rate 10 the tariff reaches 1000 and the fee steps from 10 to 20,
        // so the premium jumps from about 1160 to 1170 and 1165 is never hit.
        let schedule = DerechoScheduleResolver::new(vec![
            DerechoScheduleEntry::new(dec!(0), dec!(10)),
            DerechoScheduleEntry::new(dec!(1000), dec!(20)),
        ])
        .unwrap();
        let quote = PremiumQuoteEngine::new()
            .compute_quote(&request(dec!(1165)), &policy(), &[], &schedule)
            .unwrap();

        assert!(!quote.converged);
        assert_eq!(quote.iterations, 100);
        assert_eq!(quote.final_premium, dec!(1170.00));
        assert_eq!(quote.applied_rate, dec!(10));
        assert_eq!(quote.target_gap(), dec!(5));
    }

    #[test]
    fn test_out_of_range_request_is_an_error() {
        let request = QuoteRequest::new(ApplicationId::new(1), dec!(1000), u32::MAX)
            .with_total_insured_amount(dec!(100000000000000000000));
        let result =
            PremiumQuoteEngine::new().compute_quote(&request, &policy(), &rules(), &schedule());
        assert!(matches!(result, Err(RatingError::Validation(_))));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_final_premium_matches_components(
        cents in 150_000i64..2_000_000,
        installments in prop::sample::select(vec![1u32, 3, 6, 9, 12]),
        days in 30u32..730,
    ) {
        let target = Decimal::new(cents, 2);
        let request = QuoteRequest::new(ApplicationId::new(1), target, days)
            .with_installments(installments);
        let quote = quote_for(&request);

        let components = quote.taxable_subtotal + quote.financial_surcharge + quote.total_taxes;
        prop_assert!(within_tolerance(quote.final_premium, components, dec!(0.01)));
    }

    #[test]
    fn prop_identical_inputs_identical_quotes(cents in 100_000i64..2_000_000) {
        let target = Decimal::new(cents, 2);
        let first = quote_for(&request(target));
        let second = quote_for(&request(target));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_rate_non_decreasing_between_thresholds(
        cents in 140_000i64..600_000,
        step in 100i64..20_000,
    ) {
        // Targets between ~1400 and ~6200 keep the tariff clear of the fee steps
        let a = quote_for(&request(Decimal::new(cents, 2)));
        let b = quote_for(&request(Decimal::new(cents + step, 2)));

        prop_assert!(a.converged && b.converged);
        prop_assert!(a.applied_rate <= b.applied_rate);
    }
}
