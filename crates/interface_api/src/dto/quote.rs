//! Re-rating DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;
use validator::Validate;

use core_kernel::ApplicationId;
use domain_rating::{PremiumType, QuoteRequest, QuoteResult, TaxLineItem};

/// Query string of `GET /api/v1/requote`
///
/// `installmentCount` and `premiumType` are kept raw: a malformed value is
/// treated as absent rather than rejecting the request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RequoteQuery {
    pub application_id: i64,
    pub reported_premium: Decimal,
    #[validate(range(min = 1, max = 3660, message = "must be between 1 and 3660"))]
    pub days: u32,
    pub total_insured_amount: Option<Decimal>,
    pub installment_count: Option<String>,
    pub premium_type: Option<String>,
}

impl RequoteQuery {
    /// Converts the query into a domain request
    pub fn into_request(self) -> QuoteRequest {
        let installment_count = self.installment_count.as_deref().and_then(parse_installments);
        let premium_type = self.premium_type.as_deref().and_then(parse_premium_type);

        QuoteRequest {
            application_id: ApplicationId::new(self.application_id),
            reported_premium: self.reported_premium,
            days: self.days,
            total_insured_amount: self.total_insured_amount,
            premium_type,
            installment_count,
        }
    }
}

fn parse_installments(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<u32>() {
        Ok(count) => Some(count),
        Err(e) => {
            warn!(value = %raw, error = %e, "ignoring malformed installment count");
            None
        }
    }
}

fn parse_premium_type(raw: &str) -> Option<PremiumType> {
    if raw.trim().is_empty() {
        return None;
    }
    match raw.parse::<PremiumType>() {
        Ok(premium_type) => Some(premium_type),
        Err(e) => {
            warn!(value = %raw, error = %e, "ignoring malformed premium type");
            None
        }
    }
}

/// One re-assessed tax line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxDetailResponse {
    #[serde(rename = "impCod")]
    pub code: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub base: Decimal,
    #[serde(rename = "alicuota", with = "rust_decimal::serde::float")]
    pub rate_percent: Decimal,
    #[serde(rename = "importe", with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl From<TaxLineItem> for TaxDetailResponse {
    fn from(line: TaxLineItem) -> Self {
        Self {
            code: line.code,
            base: line.base,
            rate_percent: line.rate_percent.points(),
            amount: line.amount,
        }
    }
}

/// Re-rated quote
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteResponse {
    #[serde(rename = "primaTarifa", with = "rust_decimal::serde::float")]
    pub tariff_premium: Decimal,
    #[serde(rename = "bonificacion", with = "rust_decimal::serde::float")]
    pub bonification: Decimal,
    #[serde(rename = "bonificacionPct", with = "rust_decimal::serde::float")]
    pub bonification_percent: Decimal,
    #[serde(rename = "primaNeta", with = "rust_decimal::serde::float")]
    pub net_premium: Decimal,
    #[serde(rename = "recAdministrativo", with = "rust_decimal::serde::float")]
    pub admin_surcharge: Decimal,
    #[serde(rename = "recAdministrativoPct", with = "rust_decimal::serde::float")]
    pub admin_surcharge_percent: Decimal,
    #[serde(rename = "recFinanciero", with = "rust_decimal::serde::float")]
    pub financial_surcharge: Decimal,
    #[serde(rename = "recFinancieroPct", with = "rust_decimal::serde::float")]
    pub financial_surcharge_percent: Decimal,
    #[serde(rename = "derEmision", with = "rust_decimal::serde::float")]
    pub emission_fee: Decimal,
    #[serde(rename = "gastosEscribania", with = "rust_decimal::serde::float")]
    pub escribania_fee: Decimal,
    #[serde(rename = "subtotal", with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(rename = "impuestos", with = "rust_decimal::serde::float")]
    pub total_taxes: Decimal,
    #[serde(rename = "detalleImpuestos")]
    pub tax_details: Vec<TaxDetailResponse>,
    #[serde(rename = "premio", with = "rust_decimal::serde::float")]
    pub final_premium: Decimal,
    #[serde(rename = "tasaAplicada", with = "rust_decimal::serde::float")]
    pub applied_rate: Decimal,
    #[serde(rename = "sumaAsegurada", with = "rust_decimal::serde::float")]
    pub sum_insured: Decimal,
    #[serde(rename = "premioObjetivo", with = "rust_decimal::serde::float")]
    pub target_premium: Decimal,
    #[serde(rename = "convergio")]
    pub converged: bool,
    #[serde(rename = "iteraciones")]
    pub iterations: u32,
}

impl From<QuoteResult> for QuoteResponse {
    fn from(result: QuoteResult) -> Self {
        Self {
            tariff_premium: result.tariff_premium,
            bonification: result.bonification,
            bonification_percent: result.bonification_percent.points(),
            net_premium: result.net_premium,
            admin_surcharge: result.admin_surcharge,
            admin_surcharge_percent: result.admin_surcharge_percent.points(),
            financial_surcharge: result.financial_surcharge,
            financial_surcharge_percent: result.financial_surcharge_percent.points(),
            emission_fee: result.emission_fee,
            escribania_fee: result.escribania_fee,
            subtotal: result.taxable_subtotal,
            total_taxes: result.total_taxes,
            tax_details: result.tax_lines.into_iter().map(Into::into).collect(),
            final_premium: result.final_premium,
            applied_rate: result.applied_rate,
            sum_insured: result.sum_insured,
            target_premium: result.target_premium,
            converged: result.converged,
            iterations: result.iterations,
        }
    }
}
