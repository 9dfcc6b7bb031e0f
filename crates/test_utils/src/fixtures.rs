//! Pre-built Test Fixtures
//!
//! Ready-to-use applications, fee schedules and tax sets. Values are fixed
//! so that tests relying on them stay predictable.

use core_kernel::{ApplicationId, Percentage};
use domain_rating::{
    DerechoScheduleEntry, DerechoScheduleResolver, PolicyBaseData, StoredQuote, TaxRule,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixture for application identifiers
pub struct ApplicationFixtures;

impl ApplicationFixtures {
    /// The sample application used across the suite
    pub fn sample_id() -> ApplicationId {
        ApplicationId::new(151547)
    }

    /// An application id that is never seeded
    pub fn unknown_id() -> ApplicationId {
        ApplicationId::new(999_999)
    }

    /// Policy data for the sample application
    pub fn sample_policy() -> PolicyBaseData {
        PolicyBaseData::new(dec!(0.5), dec!(100000))
    }

    /// Policy data with a rate that puts a one-year tariff at 1000
    pub fn standard_policy() -> PolicyBaseData {
        PolicyBaseData::new(dec!(10), dec!(100000))
    }

    /// The quote on file for the sample application
    ///
    /// The bonification is a discount, stored negative.
    pub fn sample_stored_quote() -> StoredQuote {
        StoredQuote {
            tariff_premium: dec!(1000.00),
            bonification: dec!(-100.00),
            bonification_percent: Percentage::from_points(dec!(-10)),
            net_premium: dec!(900.00),
            admin_surcharge: dec!(50.00),
            admin_surcharge_percent: Percentage::from_points(dec!(5)),
            financial_surcharge: dec!(20.00),
            financial_surcharge_percent: Percentage::from_points(dec!(2)),
            emission_fee: dec!(30.00),
            escribania_fee: dec!(10.00),
            subtotal: dec!(1000.00),
            total_taxes: dec!(200.00),
            premium: dec!(1210.00),
            applied_rate: dec!(0.5),
            sum_insured: dec!(100000.00),
        }
    }
}

/// Fixture for emission fee schedules
pub struct ScheduleFixtures;

impl ScheduleFixtures {
    /// Three-step schedule: 10 from zero, 20 from 1000, 50 from 5000
    pub fn standard_entries() -> Vec<DerechoScheduleEntry> {
        vec![
            DerechoScheduleEntry::new(dec!(0), dec!(10)),
            DerechoScheduleEntry::new(dec!(1000), dec!(20)),
            DerechoScheduleEntry::new(dec!(5000), dec!(50)),
        ]
    }

    /// Resolver over the standard entries
    pub fn standard() -> DerechoScheduleResolver {
        DerechoScheduleResolver::new(Self::standard_entries())
            .expect("standard schedule is not empty")
    }

    /// Single-row schedule charging a flat 10
    pub fn flat() -> DerechoScheduleResolver {
        DerechoScheduleResolver::new(vec![DerechoScheduleEntry::new(Decimal::ZERO, dec!(10))])
            .expect("flat schedule is not empty")
    }
}

/// Fixture for tax rule sets
pub struct TaxFixtures;

impl TaxFixtures {
    /// Two lines sharing a reference base and one unlinked line
    pub fn cascade_rules() -> Vec<TaxRule> {
        vec![
            TaxRule::new("A", dec!(500), dec!(5)),
            TaxRule::new("B", dec!(500), dec!(3)),
            TaxRule::new("C", dec!(999), dec!(2)),
        ]
    }

    /// VAT plus a stamp tax on a different base
    pub fn sample_rules() -> Vec<TaxRule> {
        vec![
            TaxRule::new("IVA", dec!(1050), dec!(21)),
            TaxRule::new("SELL", dec!(1271), dec!(1.2)),
        ]
    }

    /// A single linked VAT line
    pub fn vat_only() -> Vec<TaxRule> {
        vec![TaxRule::new("IVA", dec!(500), dec!(10))]
    }
}
