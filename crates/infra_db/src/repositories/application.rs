//! Application repository implementation
//!
//! Reads the rating snapshot of a policy application: the quote components
//! on file, the risk coverage it was rated with and its tax lines.

use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::debug;

use crate::error::DatabaseError;

/// An application joined with its risk coverage
///
/// Coverage columns are optional because the join is outer; an application
/// without coverage cannot be re-rated.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ApplicationRow {
    pub application_id: i64,
    pub tariff_premium: Decimal,
    pub bonification_percent: Decimal,
    /// Signed adjustment; discounts are stored negative
    pub bonification: Decimal,
    pub admin_surcharge_percent: Decimal,
    pub admin_surcharge: Decimal,
    pub financial_surcharge_percent: Decimal,
    pub financial_surcharge: Decimal,
    pub emission_fee: Decimal,
    pub escribania_fee: Decimal,
    pub total_taxes: Decimal,
    pub premium: Decimal,
    pub applied_rate: Option<Decimal>,
    pub insured_capital: Option<Decimal>,
}

impl ApplicationRow {
    /// Tariff premium net of the stored bonification
    pub fn net_premium(&self) -> Decimal {
        self.tariff_premium + self.bonification
    }

    /// Stored taxable subtotal
    pub fn subtotal(&self) -> Decimal {
        self.net_premium() + self.admin_surcharge + self.financial_surcharge + self.emission_fee
    }
}

/// A stored tax line
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct TaxLineRow {
    pub line_no: i32,
    pub tax_code: String,
    pub base: Decimal,
    pub rate_percent: Decimal,
    pub amount: Decimal,
}

/// Repository for application rating data
///
/// # Example
///
/// ```rust,ignore
/// use infra_db::repositories::ApplicationRepository;
///
/// let repo = ApplicationRepository::new(pool);
/// let row = repo.find_policy_base(151547).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ApplicationRepository {
    pool: PgPool,
}

impl ApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Loads an application with its risk coverage
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no application has this number
    pub async fn find_policy_base(
        &self,
        application_id: i64,
    ) -> Result<ApplicationRow, DatabaseError> {
        debug!(application_id, "loading application");

        sqlx::query_as::<_, ApplicationRow>(
            r#"
            SELECT
                a.application_id,
                a.tariff_premium,
                a.bonification_percent,
                a.bonification,
                a.admin_surcharge_percent,
                a.admin_surcharge,
                ROUND(a.financial_surcharge_percent, 2) AS financial_surcharge_percent,
                a.financial_surcharge,
                a.emission_fee,
                a.escribania_fee,
                a.total_taxes,
                a.premium,
                c.applied_rate,
                c.insured_capital
            FROM applications a
            LEFT JOIN risk_coverages c ON c.application_id = a.application_id
            WHERE a.application_id = $1
            "#,
        )
        .bind(application_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Application", application_id))
    }

    /// Loads an application's tax lines in assessment order
    ///
    /// Returns an empty list when the application has none.
    pub async fn find_tax_lines(
        &self,
        application_id: i64,
    ) -> Result<Vec<TaxLineRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, TaxLineRow>(
            r#"
            SELECT line_no, tax_code, base, rate_percent, amount
            FROM application_taxes
            WHERE application_id = $1
            ORDER BY line_no ASC
            "#,
        )
        .bind(application_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(application_id, lines = rows.len(), "loaded tax lines");
        Ok(rows)
    }
}
