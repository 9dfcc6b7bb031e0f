//! Stored application DTOs

use rust_decimal::Decimal;
use serde::Serialize;

use domain_rating::{StoredQuote, TaxRule};

/// Quote on file for an application
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredQuoteResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub prima_tarifa: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub bonificacion: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub bonificacion_pct: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub prima_neta: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub rec_administrativo: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub rec_administrativo_pct: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub rec_financiero: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub rec_financiero_pct: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub der_emision: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub gastos_escribania: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub impuestos: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub premio: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tasa_aplicada: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub suma_asegurada: Decimal,
}

impl From<StoredQuote> for StoredQuoteResponse {
    fn from(q: StoredQuote) -> Self {
        Self {
            prima_tarifa: q.tariff_premium,
            bonificacion: q.bonification,
            bonificacion_pct: q.bonification_percent.points(),
            prima_neta: q.net_premium,
            rec_administrativo: q.admin_surcharge,
            rec_administrativo_pct: q.admin_surcharge_percent.points(),
            rec_financiero: q.financial_surcharge,
            rec_financiero_pct: q.financial_surcharge_percent.points(),
            der_emision: q.emission_fee,
            gastos_escribania: q.escribania_fee,
            subtotal: q.subtotal,
            impuestos: q.total_taxes,
            premio: q.premium,
            tasa_aplicada: q.applied_rate,
            suma_asegurada: q.sum_insured,
        }
    }
}

/// Stored tax line as originally assessed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTaxResponse {
    pub imp_cod: String,
    #[serde(rename = "sol2Base", with = "rust_decimal::serde::float")]
    pub base: Decimal,
    #[serde(rename = "sol2Ali", with = "rust_decimal::serde::float")]
    pub rate_percent: Decimal,
}

impl From<TaxRule> for StoredTaxResponse {
    fn from(rule: TaxRule) -> Self {
        Self {
            imp_cod: rule.code,
            base: rule.original_base,
            rate_percent: rule.rate_percent.points(),
        }
    }
}
