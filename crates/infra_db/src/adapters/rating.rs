//! PostgreSQL Rating Adapter
//!
//! Implements the rating domain's `PolicyDataProvider` and `TaxRuleProvider`
//! ports over the `ApplicationRepository`, translating rows to domain types
//! and database errors to port errors.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresRatingAdapter;
//! use domain_rating::PolicyDataProvider;
//! use std::sync::Arc;
//!
//! let adapter = Arc::new(PostgresRatingAdapter::new(pool));
//! let policy = adapter.policy_data(ApplicationId::new(151547)).await?;
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    AdapterHealth, ApplicationId, DomainPort, HealthCheckResult, HealthCheckable, Percentage,
    PortError,
};
use domain_rating::{PolicyBaseData, PolicyDataProvider, StoredQuote, TaxRule, TaxRuleProvider};

use crate::error::{db_to_port_error, DatabaseError};
use crate::pool::ping;
use crate::repositories::application::{ApplicationRepository, ApplicationRow, TaxLineRow};

/// Ping latency above which the adapter reports itself degraded
const SLOW_PING_MS: u64 = 500;

/// PostgreSQL-backed policy data and tax line provider
#[derive(Debug, Clone)]
pub struct PostgresRatingAdapter {
    repository: ApplicationRepository,
    pool: PgPool,
}

impl PostgresRatingAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ApplicationRepository::new(pool.clone()),
            pool,
        }
    }

    /// Returns the underlying repository
    pub fn repository(&self) -> &ApplicationRepository {
        &self.repository
    }
}

impl DomainPort for PostgresRatingAdapter {}

#[async_trait]
impl HealthCheckable for PostgresRatingAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();
        let result = ping(&self.pool).await;
        let latency_ms = start.elapsed().as_millis() as u64;

        let (status, message) = match result {
            Ok(()) if latency_ms > SLOW_PING_MS => (
                AdapterHealth::Degraded,
                Some(format!("database ping took {}ms", latency_ms)),
            ),
            Ok(()) => (AdapterHealth::Healthy, None),
            Err(e) => (AdapterHealth::Unhealthy, Some(e.to_string())),
        };
        HealthCheckResult {
            adapter_id: "postgres-rating-adapter".to_string(),
            status,
            latency_ms,
            message,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl PolicyDataProvider for PostgresRatingAdapter {
    #[instrument(skip(self), fields(application_id = %id))]
    async fn policy_data(&self, id: ApplicationId) -> Result<PolicyBaseData, PortError> {
        debug!("Fetching policy base data");
        let row = self
            .repository
            .find_policy_base(id.number())
            .await
            .map_err(db_to_port_error)?;
        row_to_policy_base(&row).map_err(db_to_port_error)
    }

    #[instrument(skip(self), fields(application_id = %id))]
    async fn stored_quote(&self, id: ApplicationId) -> Result<StoredQuote, PortError> {
        let row = self
            .repository
            .find_policy_base(id.number())
            .await
            .map_err(db_to_port_error)?;
        Ok(row_to_stored_quote(&row))
    }
}

#[async_trait]
impl TaxRuleProvider for PostgresRatingAdapter {
    #[instrument(skip(self), fields(application_id = %id))]
    async fn tax_rules(&self, id: ApplicationId) -> Result<Vec<TaxRule>, PortError> {
        let rows = self
            .repository
            .find_tax_lines(id.number())
            .await
            .map_err(db_to_port_error)?;
        Ok(rows.iter().map(row_to_tax_rule).collect())
    }
}

/// Maps an application row to the rating snapshot
///
/// Fails with not found when the application has no risk coverage row.
fn row_to_policy_base(row: &ApplicationRow) -> Result<PolicyBaseData, DatabaseError> {
    let (Some(rate), Some(sum_insured)) = (row.applied_rate, row.insured_capital) else {
        return Err(DatabaseError::not_found("Risk coverage for application", row.application_id));
    };

    Ok(PolicyBaseData {
        rate,
        sum_insured,
        admin_surcharge_percent: Percentage::from_points(row.admin_surcharge_percent),
        financial_surcharge_amount: row.financial_surcharge,
        financial_surcharge_percent: Percentage::from_points(row.financial_surcharge_percent),
        escribania_fee: row.escribania_fee,
        bonification: row.bonification,
    })
}

fn row_to_stored_quote(row: &ApplicationRow) -> StoredQuote {
    StoredQuote {
        tariff_premium: row.tariff_premium,
        bonification: row.bonification,
        bonification_percent: Percentage::from_points(row.bonification_percent),
        net_premium: row.net_premium(),
        admin_surcharge: row.admin_surcharge,
        admin_surcharge_percent: Percentage::from_points(row.admin_surcharge_percent),
        financial_surcharge: row.financial_surcharge,
        financial_surcharge_percent: Percentage::from_points(row.financial_surcharge_percent),
        emission_fee: row.emission_fee,
        escribania_fee: row.escribania_fee,
        subtotal: row.subtotal(),
        total_taxes: row.total_taxes,
        premium: row.premium,
        applied_rate: row.applied_rate.unwrap_or_default(),
        sum_insured: row.insured_capital.unwrap_or_default(),
    }
}

fn row_to_tax_rule(row: &TaxLineRow) -> TaxRule {
    TaxRule::new(row.tax_code.trim(), row.base, row.rate_percent)
}
