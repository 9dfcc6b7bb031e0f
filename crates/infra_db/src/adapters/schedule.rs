//! Emission fee schedule adapters
//!
//! The schedule is read once at startup, either from the database or from a
//! CSV file with `PRIMA,DERECHO` columns (tariff premium threshold, fee).

use std::io::Read;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::{info, instrument};

use core_kernel::{DomainPort, PortError};
use domain_rating::{DerechoScheduleEntry, DerechoScheduleProvider};

use crate::error::{db_to_port_error, DatabaseError};
use crate::repositories::schedule::ScheduleRepository;

/// Schedule provider backed by the `emission_fee_schedule` table
#[derive(Debug, Clone)]
pub struct PostgresScheduleAdapter {
    repository: ScheduleRepository,
}

impl PostgresScheduleAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ScheduleRepository::new(pool),
        }
    }
}

impl DomainPort for PostgresScheduleAdapter {}

#[async_trait]
impl DerechoScheduleProvider for PostgresScheduleAdapter {
    #[instrument(skip(self))]
    async fn load_schedule(&self) -> Result<Vec<DerechoScheduleEntry>, PortError> {
        let rows = self.repository.load_all().await.map_err(db_to_port_error)?;
        info!(rows = rows.len(), "loaded emission fee schedule from database");
        Ok(rows
            .into_iter()
            .map(|row| DerechoScheduleEntry::new(row.premium_threshold, row.fee))
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct ScheduleRecord {
    #[serde(alias = "PRIMA", with = "rust_decimal::serde::str")]
    prima: Decimal,
    #[serde(alias = "DERECHO", with = "rust_decimal::serde::str")]
    derecho: Decimal,
}

/// Schedule provider backed by a CSV file
#[derive(Debug, Clone)]
pub struct CsvScheduleAdapter {
    path: PathBuf,
}

impl CsvScheduleAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parses schedule rows from CSV with a `PRIMA,DERECHO` header
///
/// Values are read as decimal strings; rows keep file order.
pub fn parse_schedule_csv<R: Read>(reader: R) -> Result<Vec<DerechoScheduleEntry>, DatabaseError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut entries = Vec::new();
    for result in rdr.deserialize() {
        let record: ScheduleRecord =
            result.map_err(|e| DatabaseError::ScheduleFile(e.to_string()))?;
        entries.push(DerechoScheduleEntry::new(record.prima, record.derecho));
    }
    Ok(entries)
}

impl DomainPort for CsvScheduleAdapter {}

#[async_trait]
impl DerechoScheduleProvider for CsvScheduleAdapter {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load_schedule(&self) -> Result<Vec<DerechoScheduleEntry>, PortError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            db_to_port_error(DatabaseError::ScheduleFile(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        })?;
        let entries = parse_schedule_csv(bytes.as_slice()).map_err(db_to_port_error)?;
        info!(rows = entries.len(), "loaded emission fee schedule from file");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_schedule_csv() {
        let data = "PRIMA,DERECHO\n0,10\n1000, 20\n5000,50.50\n";
        let entries = parse_schedule_csv(data.as_bytes()).unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1], DerechoScheduleEntry::new(dec!(1000), dec!(20)));
        assert_eq!(entries[2].fee, dec!(50.50));
    }

    #[test]
    fn test_parse_rejects_bad_number() {
        let data = "PRIMA,DERECHO\nabc,10\n";
        let err = parse_schedule_csv(data.as_bytes()).unwrap_err();
        assert!(matches!(err, DatabaseError::ScheduleFile(_)));
    }

    #[tokio::test]
    async fn test_missing_file_is_transformation_error() {
        let adapter = CsvScheduleAdapter::new("/nonexistent/derechos.csv");
        let err = adapter.load_schedule().await.unwrap_err();
        assert!(matches!(err, PortError::Transformation { .. }));
    }
}
