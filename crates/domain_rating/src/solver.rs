//! Rate bisection solver
//!
//! Finds the rate whose premium reproduces a target premium. For a candidate
//! rate the forward computation is:
//!
//! ```text
//! tariff      = rate * sum_insured / 1000 / 365 * days
//! admin       = tariff * admin% / 100
//! fee         = emission_fee(tariff)
//! taxable     = tariff - bonification + admin + fee
//! premium     = round(taxable + taxes(taxable), 2)
//! ```
//!
//! The search bisects the rate between 0 and `max(initial_rate * 10, 1000)`
//! until the premium is within tolerance of the target or the iteration cap
//! is reached. The emission fee is a step function of the tariff premium, so
//! premium is not strictly monotonic in rate near fee thresholds and the
//! search may settle on a neighbouring rate there.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use core_kernel::{round_money, within_tolerance, Percentage};

use crate::derecho::FeeResolver;
use crate::tax::{TaxCascade, TaxCascadeCalculator, TaxRule};

/// Accepted distance between solved and target premium
pub const DEFAULT_TOLERANCE: Decimal = dec!(0.01);

/// Maximum number of premium evaluations per solve
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Upper rate bound used when ten times the initial rate is lower
pub const MIN_UPPER_RATE: Decimal = dec!(1000);

const DAYS_PER_YEAR: Decimal = dec!(365);
const PER_MILLE: Decimal = dec!(1000);

/// Inputs that stay fixed while the rate is searched
#[derive(Debug, Clone)]
pub struct SolverInput<'a> {
    pub target: Decimal,
    pub sum_insured: Decimal,
    pub days: u32,
    pub admin_percent: Percentage,
    pub bonification: Decimal,
    /// Starting point of the search
    pub initial_rate: Decimal,
    pub rules: &'a [TaxRule],
}

/// Premium components computed for one candidate rate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub rate: Decimal,
    pub tariff_premium: Decimal,
    pub admin_surcharge: Decimal,
    pub emission_fee: Decimal,
    pub taxable_base: Decimal,
    pub taxes: TaxCascade,
    /// `round(taxable_base + taxes.total, 2)`
    pub premium: Decimal,
}

/// Result of a solve
///
/// `evaluation` holds the last candidate evaluated; when `converged` is
/// false it is the best effort after the iteration cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverOutcome {
    pub evaluation: Evaluation,
    pub converged: bool,
    /// Number of premium evaluations performed
    pub iterations: u32,
}

impl SolverOutcome {
    pub fn rate(&self) -> Decimal {
        self.evaluation.rate
    }

    pub fn premium(&self) -> Decimal {
        self.evaluation.premium
    }
}

/// Bisection search over the insurance rate
#[derive(Debug)]
pub struct RateBisectionSolver<'r, R: FeeResolver + ?Sized> {
    resolver: &'r R,
    cascade: TaxCascadeCalculator,
    tolerance: Decimal,
    max_iterations: u32,
}

impl<'r, R: FeeResolver + ?Sized> RateBisectionSolver<'r, R> {
    /// Creates a solver with the default tolerance (0.01) and cap (100)
    pub fn new(resolver: &'r R) -> Self {
        Self {
            resolver,
            cascade: TaxCascadeCalculator,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Overrides the tolerance
    pub fn with_tolerance(mut self, tolerance: Decimal) -> Self {
        self.tolerance = tolerance.abs();
        self
    }

    /// Overrides the iteration cap (at least one evaluation is always made)
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    /// Computes the premium components for a given rate
    pub fn forward(&self, input: &SolverInput<'_>, rate: Decimal) -> Evaluation {
        // Multiplied out before dividing so whole-year terms stay exact
        let tariff_premium =
            rate * input.sum_insured * Decimal::from(input.days) / (PER_MILLE * DAYS_PER_YEAR);
        let admin_surcharge = input.admin_percent.apply(tariff_premium);
        let emission_fee = self.resolver.fee_for(tariff_premium);
        let taxable_base = tariff_premium - input.bonification + admin_surcharge + emission_fee;
        let taxes = self.cascade.apply(taxable_base, input.rules);
        let premium = round_money(taxable_base + taxes.total);

        Evaluation {
            rate,
            tariff_premium,
            admin_surcharge,
            emission_fee,
            taxable_base,
            taxes,
            premium,
        }
    }

    /// Searches for the rate reproducing `input.target`
    ///
    /// Never fails: when the cap is reached the outcome reports
    /// `converged = false` with the last candidate.
    pub fn solve(&self, input: &SolverInput<'_>) -> SolverOutcome {
        let mut low = Decimal::ZERO;
        let mut high = (input.initial_rate * dec!(10)).max(MIN_UPPER_RATE);
        let mut current = input.initial_rate;
        let mut iterations = 0;

        loop {
            iterations += 1;
            let evaluation = self.forward(input, current);
            trace!(
                iteration = iterations,
                rate = %current,
                premium = %evaluation.premium,
                "bisection step"
            );

            if within_tolerance(evaluation.premium, input.target, self.tolerance) {
                debug!(iterations, rate = %current, "rate solved");
                return SolverOutcome { evaluation, converged: true, iterations };
            }

            if iterations >= self.max_iterations {
                debug!(
                    iterations,
                    rate = %current,
                    premium = %evaluation.premium,
                    target = %input.target,
                    "iteration cap reached without converging"
                );
                return SolverOutcome { evaluation, converged: false, iterations };
            }

            if evaluation.premium < input.target {
                low = current;
                current = (current + high) / dec!(2);
            } else {
                high = current;
                current = (current + low) / dec!(2);
            }
        }
    }
}
