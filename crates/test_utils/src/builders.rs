//! Test Data Builders
//!
//! Builder patterns for constructing policy data, tax sets and quote
//! requests with sensible defaults. Tests set only the fields they care
//! about.

use core_kernel::{ApplicationId, Percentage};
use domain_rating::{PolicyBaseData, PremiumType, QuoteRequest, TaxRule};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::ApplicationFixtures;

/// Builder for stored policy data
pub struct PolicyBaseDataBuilder {
    data: PolicyBaseData,
}

impl Default for PolicyBaseDataBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyBaseDataBuilder {
    /// Starts from the standard policy (rate 10, sum insured 100000)
    pub fn new() -> Self {
        Self {
            data: ApplicationFixtures::standard_policy(),
        }
    }

    pub fn with_rate(mut self, rate: Decimal) -> Self {
        self.data.rate = rate;
        self
    }

    pub fn with_sum_insured(mut self, sum_insured: Decimal) -> Self {
        self.data.sum_insured = sum_insured;
        self
    }

    /// Sets the stored admin surcharge; rating still uses 15%
    pub fn with_stored_admin_percent(mut self, points: Decimal) -> Self {
        self.data.admin_surcharge_percent = Percentage::from_points(points);
        self
    }

    /// Sets the stored bonification; rating still uses zero
    pub fn with_stored_bonification(mut self, amount: Decimal) -> Self {
        self.data.bonification = amount;
        self
    }

    pub fn with_escribania_fee(mut self, fee: Decimal) -> Self {
        self.data.escribania_fee = fee;
        self
    }

    pub fn build(self) -> PolicyBaseData {
        self.data
    }
}

/// Builder for an ordered tax rule set
#[derive(Default)]
pub struct TaxRuleSetBuilder {
    rules: Vec<TaxRule>,
}

impl TaxRuleSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line with its own original base
    pub fn with_line(mut self, code: &str, original_base: Decimal, rate_points: Decimal) -> Self {
        self.rules.push(TaxRule::new(code, original_base, rate_points));
        self
    }

    /// Appends a line sharing the first line's base
    ///
    /// With no lines yet, the new line becomes the reference line on a base of 1000.
    pub fn with_linked_line(self, code: &str, rate_points: Decimal) -> Self {
        let base = self
            .rules
            .first()
            .map(|r| r.original_base)
            .unwrap_or(dec!(1000));
        self.with_line(code, base, rate_points)
    }

    pub fn build(self) -> Vec<TaxRule> {
        self.rules
    }
}

/// Builder for re-rating requests
pub struct QuoteRequestBuilder {
    application_id: ApplicationId,
    reported_premium: Decimal,
    days: u32,
    total_insured_amount: Option<Decimal>,
    premium_type: Option<PremiumType>,
    installment_count: Option<u32>,
}

impl Default for QuoteRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteRequestBuilder {
    /// A one-year request for the sample application targeting 5000
    pub fn new() -> Self {
        Self {
            application_id: ApplicationFixtures::sample_id(),
            reported_premium: dec!(5000),
            days: 365,
            total_insured_amount: None,
            premium_type: None,
            installment_count: None,
        }
    }

    pub fn with_application_id(mut self, id: ApplicationId) -> Self {
        self.application_id = id;
        self
    }

    pub fn with_reported_premium(mut self, premium: Decimal) -> Self {
        self.reported_premium = premium;
        self
    }

    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    pub fn with_total_insured_amount(mut self, amount: Decimal, premium_type: PremiumType) -> Self {
        self.total_insured_amount = Some(amount);
        self.premium_type = Some(premium_type);
        self
    }

    pub fn with_installments(mut self, count: u32) -> Self {
        self.installment_count = Some(count);
        self
    }

    pub fn build(self) -> QuoteRequest {
        let mut request = QuoteRequest::new(self.application_id, self.reported_premium, self.days);
        request.total_insured_amount = self.total_insured_amount;
        request.premium_type = self.premium_type;
        request.installment_count = self.installment_count;
        request
    }
}
