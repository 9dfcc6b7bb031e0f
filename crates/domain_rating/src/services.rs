//! Rating domain services
//!
//! `QuoteService` fetches the application snapshot through the provider
//! ports and hands it to the pure quote engine.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use core_kernel::ApplicationId;

use crate::derecho::DerechoScheduleResolver;
use crate::engine::PremiumQuoteEngine;
use crate::error::RatingError;
use crate::limits::MAX_COVERAGE_DAYS;
use crate::policy::StoredQuote;
use crate::ports::{DerechoScheduleProvider, PolicyDataProvider, TaxRuleProvider};
use crate::quote::{QuoteRequest, QuoteResult};
use crate::tax::TaxRule;

/// Service for re-rating policy applications
///
/// Cheap to clone; ports and the fee schedule are shared behind `Arc`.
#[derive(Clone)]
pub struct QuoteService {
    policy_port: Arc<dyn PolicyDataProvider>,
    tax_port: Arc<dyn TaxRuleProvider>,
    resolver: Arc<DerechoScheduleResolver>,
    engine: PremiumQuoteEngine,
}

impl QuoteService {
    /// Creates a service over the given ports and fee schedule
    pub fn new(
        policy_port: Arc<dyn PolicyDataProvider>,
        tax_port: Arc<dyn TaxRuleProvider>,
        resolver: Arc<DerechoScheduleResolver>,
    ) -> Self {
        Self {
            policy_port,
            tax_port,
            resolver,
            engine: PremiumQuoteEngine::new(),
        }
    }

    /// Replaces the quote engine (tolerance, iteration cap)
    pub fn with_engine(mut self, engine: PremiumQuoteEngine) -> Self {
        self.engine = engine;
        self
    }

    /// The emission fee schedule in use
    pub fn resolver(&self) -> &DerechoScheduleResolver {
        &self.resolver
    }

    /// Re-rates an application
    ///
    /// # Errors
    ///
    /// * `RatingError::Validation` if `days` is zero or a request amount is out of range
    /// * `RatingError::InvalidStoredData` if the stored rating data is out of range
    /// * `RatingError::NotFound` if the application has no policy data
    /// * `RatingError::Provider` if a data source fails
    #[instrument(skip(self, request), fields(application_id = %request.application_id))]
    pub async fn quote(&self, request: &QuoteRequest) -> Result<QuoteResult, RatingError> {
        if request.days == 0 || request.days > MAX_COVERAGE_DAYS {
            return Err(RatingError::validation(format!(
                "days must be between 1 and {}",
                MAX_COVERAGE_DAYS
            )));
        }

        let policy = self.policy_port.policy_data(request.application_id).await?;
        let rules = self.tax_port.tax_rules(request.application_id).await?;

        let result = self
            .engine
            .compute_quote(request, &policy, &rules, self.resolver.as_ref())?;

        if result.converged {
            info!(
                rate = %result.applied_rate,
                final_premium = %result.final_premium,
                iterations = result.iterations,
                "application re-rated"
            );
        } else {
            warn!(
                rate = %result.applied_rate,
                target = %result.target_premium,
                solved = %result.solved_premium,
                gap = %result.target_gap(),
                iterations = result.iterations,
                "rate search did not converge, returning best effort"
            );
        }

        Ok(result)
    }

    /// Quote currently on file for an application
    #[instrument(skip(self))]
    pub async fn stored_quote(&self, id: ApplicationId) -> Result<StoredQuote, RatingError> {
        Ok(self.policy_port.stored_quote(id).await?)
    }

    /// Tax lines on file for an application
    ///
    /// Unlike quoting, an application with no tax lines is reported as not found.
    #[instrument(skip(self))]
    pub async fn stored_taxes(&self, id: ApplicationId) -> Result<Vec<TaxRule>, RatingError> {
        let rules = self.tax_port.tax_rules(id).await?;
        if rules.is_empty() {
            return Err(RatingError::not_found("Tax lines for application", id));
        }
        Ok(rules)
    }
}

/// Loads the emission fee schedule and builds a resolver
///
/// Called once at startup; the resolver is then shared read-only.
pub async fn load_schedule_resolver(
    provider: &dyn DerechoScheduleProvider,
) -> Result<DerechoScheduleResolver, RatingError> {
    let entries = provider.load_schedule().await?;
    let resolver = DerechoScheduleResolver::new(entries)?;
    info!(rows = resolver.len(), "emission fee schedule loaded");
    Ok(resolver)
}
