//! Quote request and result types

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{ApplicationId, Percentage};

use crate::tax::TaxLineItem;

/// Product type used to derive the target premium from a total insured amount
///
/// Codes are the single letters used by the rental guarantee products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PremiumType {
    F,
    C,
    U,
}

impl PremiumType {
    /// Premium per hundred of total insured amount
    pub fn factor(&self) -> Decimal {
        match self {
            PremiumType::F => dec!(4.3),
            PremiumType::C => dec!(4.8),
            PremiumType::U => dec!(3.0),
        }
    }

    /// Factor for an optional type; absent types use the F factor
    pub fn factor_or_default(premium_type: Option<PremiumType>) -> Decimal {
        premium_type.unwrap_or(PremiumType::F).factor()
    }

    pub fn code(&self) -> &'static str {
        match self {
            PremiumType::F => "F",
            PremiumType::C => "C",
            PremiumType::U => "U",
        }
    }
}

impl fmt::Display for PremiumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for PremiumType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "F" => Ok(PremiumType::F),
            "C" => Ok(PremiumType::C),
            "U" => Ok(PremiumType::U),
            other => Err(format!("unknown premium type '{}'", other)),
        }
    }
}

/// A re-rating request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub application_id: ApplicationId,
    /// Premium the customer is willing to pay
    pub reported_premium: Decimal,
    /// Coverage duration in days
    pub days: u32,
    /// Total financed sum; when present it drives both target and sum insured
    pub total_insured_amount: Option<Decimal>,
    pub premium_type: Option<PremiumType>,
    pub installment_count: Option<u32>,
}

impl QuoteRequest {
    /// Creates a request targeting `reported_premium` over `days`
    pub fn new(application_id: ApplicationId, reported_premium: Decimal, days: u32) -> Self {
        Self {
            application_id,
            reported_premium,
            days,
            total_insured_amount: None,
            premium_type: None,
            installment_count: None,
        }
    }

    /// Sets the total insured amount
    pub fn with_total_insured_amount(mut self, amount: Decimal) -> Self {
        self.total_insured_amount = Some(amount);
        self
    }

    /// Sets the premium type
    pub fn with_premium_type(mut self, premium_type: PremiumType) -> Self {
        self.premium_type = Some(premium_type);
        self
    }

    /// Sets the installment count
    pub fn with_installments(mut self, count: u32) -> Self {
        self.installment_count = Some(count);
        self
    }

    /// Premium the solver must reproduce
    ///
    /// `total_insured_amount / 100 * factor(premium_type)` when a total
    /// insured amount is given, otherwise the reported premium.
    pub fn target_premium(&self) -> Decimal {
        match self.total_insured_amount {
            Some(total) => total / dec!(100) * PremiumType::factor_or_default(self.premium_type),
            None => self.reported_premium,
        }
    }

    /// Sum insured used by the rate formula
    pub fn rating_sum_insured(&self, stored_sum_insured: Decimal) -> Decimal {
        self.total_insured_amount.unwrap_or(stored_sum_insured)
    }
}

/// A re-rated quote
///
/// Monetary fields are rounded to 2 dp. `final_premium` equals
/// `taxable_subtotal + financial_surcharge + total_taxes` within a cent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResult {
    /// Rate-derived premium before surcharges and taxes (prima tarifa)
    pub tariff_premium: Decimal,
    pub bonification: Decimal,
    pub bonification_percent: Percentage,
    /// Tariff premium net of bonification
    pub net_premium: Decimal,
    pub admin_surcharge: Decimal,
    pub admin_surcharge_percent: Percentage,
    /// Installment financing surcharge
    pub financial_surcharge: Decimal,
    pub financial_surcharge_percent: Percentage,
    /// Derecho de emisión
    pub emission_fee: Decimal,
    pub escribania_fee: Decimal,
    /// Taxable base before the financing surcharge
    pub taxable_subtotal: Decimal,
    pub total_taxes: Decimal,
    pub tax_lines: Vec<TaxLineItem>,
    pub final_premium: Decimal,
    /// Rate the premium was computed with
    pub applied_rate: Decimal,
    pub sum_insured: Decimal,
    pub target_premium: Decimal,
    /// Premium matched against the target, before the financing surcharge
    pub solved_premium: Decimal,
    /// False when the solver hit its iteration cap before reaching the target
    pub converged: bool,
    pub iterations: u32,
}

impl QuoteResult {
    /// Distance between the premium the solver landed on and the target
    pub fn target_gap(&self) -> Decimal {
        (self.solved_premium - self.target_premium).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_from_total_insured_amount() {
        let request = QuoteRequest::new(ApplicationId::new(1), dec!(999), 365)
            .with_total_insured_amount(dec!(120000))
            .with_premium_type(PremiumType::C);
        assert_eq!(request.target_premium(), dec!(5760));
        assert_eq!(request.rating_sum_insured(dec!(50000)), dec!(120000));
    }

    #[test]
    fn test_target_defaults_to_f_factor() {
        let request = QuoteRequest::new(ApplicationId::new(1), dec!(999), 365)
            .with_total_insured_amount(dec!(100000));
        assert_eq!(request.target_premium(), dec!(4300));
    }

    #[test]
    fn test_target_without_total_is_reported_premium() {
        let request = QuoteRequest::new(ApplicationId::new(1), dec!(5000), 180)
            .with_premium_type(PremiumType::U);
        assert_eq!(request.target_premium(), dec!(5000));
        assert_eq!(request.rating_sum_insured(dec!(50000)), dec!(50000));
    }

    #[test]
    fn test_premium_type_parse() {
        assert_eq!("u".parse::<PremiumType>().unwrap(), PremiumType::U);
        assert_eq!(" C ".parse::<PremiumType>().unwrap(), PremiumType::C);
        assert!("X".parse::<PremiumType>().is_err());
    }
}
