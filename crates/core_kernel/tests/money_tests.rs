//! Unit tests for the money module
//!
//! Covers reporting precision, tolerance checks and percentage application.

use core_kernel::{round_money, within_tolerance, Percentage, MONEY_DECIMAL_PLACES};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod rounding {
    use super::*;

    #[test]
    fn test_round_money_uses_two_places() {
        assert_eq!(MONEY_DECIMAL_PLACES, 2);
        assert_eq!(round_money(dec!(1080.123456)), dec!(1080.12));
    }

    #[test]
    fn test_round_money_midpoint_goes_to_even() {
        assert_eq!(round_money(dec!(0.125)), dec!(0.12));
        assert_eq!(round_money(dec!(0.135)), dec!(0.14));
    }

    #[test]
    fn test_round_money_negative_amounts() {
        assert_eq!(round_money(dec!(-5.556)), dec!(-5.56));
    }

    #[test]
    fn test_round_money_keeps_exact_values() {
        assert_eq!(round_money(dec!(101.60)), dec!(101.60));
        assert_eq!(round_money(Decimal::ZERO), Decimal::ZERO);
    }
}

mod tolerance {
    use super::*;

    #[test]
    fn test_within_tolerance_is_inclusive() {
        assert!(within_tolerance(dec!(5000.01), dec!(5000), dec!(0.01)));
        assert!(within_tolerance(dec!(4999.99), dec!(5000), dec!(0.01)));
    }

    #[test]
    fn test_outside_tolerance() {
        assert!(!within_tolerance(dec!(5000.02), dec!(5000), dec!(0.01)));
    }
}

mod percentage {
    use super::*;

    #[test]
    fn test_apply_is_unrounded() {
        let pct = Percentage::from_points(dec!(15.37));
        assert_eq!(pct.apply(dec!(1234.56)), dec!(189.751872));
    }

    #[test]
    fn test_apply_rounded() {
        let pct = Percentage::from_points(dec!(2));
        assert_eq!(pct.apply_rounded(dec!(1080)), dec!(21.60));
    }

    #[test]
    fn test_zero_and_default() {
        assert!(Percentage::default().is_zero());
        assert_eq!(Percentage::ZERO.points(), Decimal::ZERO);
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let pct = Percentage::from(dec!(25.87));
        let json = serde_json::to_string(&pct).unwrap();
        assert_eq!(json, "\"25.87\"");
    }
}
