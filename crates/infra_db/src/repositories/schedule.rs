//! Emission fee schedule repository

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::error::DatabaseError;

/// One stored schedule row
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ScheduleRow {
    pub premium_threshold: Decimal,
    pub fee: Decimal,
}

/// Repository for the emission fee schedule
#[derive(Debug, Clone)]
pub struct ScheduleRepository {
    pool: PgPool,
}

impl ScheduleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Loads every row, ordered by threshold then insertion order
    pub async fn load_all(&self) -> Result<Vec<ScheduleRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ScheduleRow>(
            r#"
            SELECT premium_threshold, fee
            FROM emission_fee_schedule
            ORDER BY premium_threshold ASC, schedule_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
