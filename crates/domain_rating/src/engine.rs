//! Quote assembly
//!
//! Combines the solver, the installment surcharge and the tax cascade into
//! a single `QuoteResult`. The engine is pure: it holds no state and reads
//! nothing beyond its arguments, so identical inputs always yield identical
//! quotes.

use rust_decimal::Decimal;
use tracing::debug;

use core_kernel::{round_money, Percentage};

use crate::derecho::FeeResolver;
use crate::error::RatingError;
use crate::installments::InstallmentSurchargeTable;
use crate::limits::check_quote_inputs;
use crate::policy::{rating_admin_percent, rating_bonification, PolicyBaseData};
use crate::quote::{QuoteRequest, QuoteResult};
use crate::solver::{RateBisectionSolver, SolverInput, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use crate::tax::{TaxCascade, TaxCascadeCalculator, TaxLineItem, TaxRule};

/// Computes re-rated quotes
#[derive(Debug, Clone, Copy)]
pub struct PremiumQuoteEngine {
    tolerance: Decimal,
    max_iterations: u32,
    installments: InstallmentSurchargeTable,
    cascade: TaxCascadeCalculator,
}

impl Default for PremiumQuoteEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PremiumQuoteEngine {
    pub fn new() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            installments: InstallmentSurchargeTable,
            cascade: TaxCascadeCalculator,
        }
    }

    pub fn with_tolerance(mut self, tolerance: Decimal) -> Self {
        self.tolerance = tolerance.abs();
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    /// Re-rates one application
    ///
    /// Solves for the rate reproducing the request's target premium, then
    /// adds the installment financing surcharge and re-assesses taxes on the
    /// surcharged base. An unreachable target is not an error: it yields a
    /// quote with `converged = false`.
    ///
    /// # Errors
    ///
    /// Returns `RatingError::Validation` or `RatingError::InvalidStoredData`
    /// when an input is outside the ranges in [`crate::limits`].
    pub fn compute_quote<R: FeeResolver + ?Sized>(
        &self,
        request: &QuoteRequest,
        policy: &PolicyBaseData,
        rules: &[TaxRule],
        resolver: &R,
    ) -> Result<QuoteResult, RatingError> {
        check_quote_inputs(request, policy, rules)?;

        let target_premium = request.target_premium();
        let sum_insured = request.rating_sum_insured(policy.sum_insured);
        let admin_percent = rating_admin_percent();
        let bonification = rating_bonification();

        let input = SolverInput {
            target: target_premium,
            sum_insured,
            days: request.days,
            admin_percent,
            bonification,
            initial_rate: policy.rate,
            rules,
        };

        let outcome = RateBisectionSolver::new(resolver)
            .with_tolerance(self.tolerance)
            .with_max_iterations(self.max_iterations)
            .solve(&input);
        let evaluation = &outcome.evaluation;

        let financial_percent = self.installments.percent_for(request.installment_count);
        let (financial_surcharge, taxes, final_premium) = if financial_percent.is_zero() {
            (Decimal::ZERO, evaluation.taxes.clone(), evaluation.premium)
        } else {
            self.surcharged(evaluation.taxable_base, financial_percent, rules)
        };

        debug!(
            application_id = %request.application_id,
            rate = %evaluation.rate,
            converged = outcome.converged,
            iterations = outcome.iterations,
            final_premium = %final_premium,
            "quote computed"
        );

        let tariff_premium = round_money(evaluation.tariff_premium);
        Ok(QuoteResult {
            tariff_premium,
            bonification: round_money(bonification),
            bonification_percent: Percentage::ZERO,
            net_premium: round_money(evaluation.tariff_premium - bonification),
            admin_surcharge: round_money(evaluation.admin_surcharge),
            admin_surcharge_percent: admin_percent,
            financial_surcharge,
            financial_surcharge_percent: financial_percent,
            emission_fee: round_money(evaluation.emission_fee),
            escribania_fee: round_money(policy.escribania_fee),
            taxable_subtotal: round_money(evaluation.taxable_base),
            total_taxes: taxes.total,
            tax_lines: report_lines(taxes.lines),
            final_premium,
            applied_rate: evaluation.rate.normalize(),
            sum_insured,
            target_premium,
            solved_premium: evaluation.premium,
            converged: outcome.converged,
            iterations: outcome.iterations,
        })
    }

    /// Adds the financing surcharge and re-assesses taxes on the new base
    fn surcharged(
        &self,
        taxable_base: Decimal,
        financial_percent: Percentage,
        rules: &[TaxRule],
    ) -> (Decimal, TaxCascade, Decimal) {
        let surcharge = financial_percent.apply_rounded(taxable_base);
        let surcharged_base = taxable_base + surcharge;
        let taxes = self.cascade.apply(surcharged_base, rules);
        let final_premium = round_money(surcharged_base + taxes.total);
        (surcharge, taxes, final_premium)
    }
}

fn report_lines(lines: Vec<TaxLineItem>) -> Vec<TaxLineItem> {
    lines
        .into_iter()
        .map(|line| TaxLineItem { base: round_money(line.base), ..line })
        .collect()
}
