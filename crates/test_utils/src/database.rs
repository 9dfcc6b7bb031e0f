//! Database Test Utilities
//!
//! Provides helpers for database testing: a PostgreSQL testcontainer with
//! the rating schema applied, and seed helpers for applications, tax lines
//! and the emission fee schedule.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use testcontainers::{
    core::{IntoContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};
use tokio::sync::OnceCell;

use core_kernel::ApplicationId;
use domain_rating::{DerechoScheduleEntry, StoredQuote, TaxRule};

/// Default PostgreSQL image for testing
const POSTGRES_IMAGE: &str = "postgres";
const POSTGRES_TAG: &str = "16-alpine";
const POSTGRES_USER: &str = "test_user";
const POSTGRES_PASSWORD: &str = "test_password";
const POSTGRES_DB: &str = "rating_test";

/// Configuration for test database
#[derive(Debug, Clone)]
pub struct TestDatabaseConfig {
    pub user: String,
    pub password: String,
    pub database: String,
    pub host: String,
    pub port: u16,
}

impl Default for TestDatabaseConfig {
    fn default() -> Self {
        Self {
            user: POSTGRES_USER.to_string(),
            password: POSTGRES_PASSWORD.to_string(),
            database: POSTGRES_DB.to_string(),
            host: "localhost".to_string(),
            port: 5432,
        }
    }
}

impl TestDatabaseConfig {
    /// Creates the database connection URL
    pub fn connection_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.database
        )
    }
}

/// A wrapper around a PostgreSQL test container
pub struct TestDatabase {
    _container: ContainerAsync<GenericImage>,
    pub config: TestDatabaseConfig,
    pub pool: PgPool,
}

impl TestDatabase {
    /// Starts a new PostgreSQL container for testing
    ///
    /// # Returns
    ///
    /// A new TestDatabase instance with an initialized schema
    ///
    /// # Errors
    ///
    /// Returns an error if the container fails to start or schema fails to initialize
    pub async fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        // Create and start the container
        let container = GenericImage::new(POSTGRES_IMAGE, POSTGRES_TAG)
            .with_exposed_port(5432.tcp())
            .with_wait_for(WaitFor::message_on_stderr(
                "database system is ready to accept connections",
            ))
            .with_env_var("POSTGRES_USER", POSTGRES_USER)
            .with_env_var("POSTGRES_PASSWORD", POSTGRES_PASSWORD)
            .with_env_var("POSTGRES_DB", POSTGRES_DB)
            .start()
            .await?;

        // Get the mapped port
        let port = container.get_host_port_ipv4(5432.tcp()).await?;
        let host = container.get_host().await?.to_string();

        let config = TestDatabaseConfig {
            user: POSTGRES_USER.to_string(),
            password: POSTGRES_PASSWORD.to_string(),
            database: POSTGRES_DB.to_string(),
            host,
            port,
        };

        // Create connection pool
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&config.connection_url())
            .await?;

        let test_db = Self {
            _container: container,
            config,
            pool,
        };

        // Initialize schema
        test_db.init_schema().await?;

        Ok(test_db)
    }

    /// Initializes the database schema from the migrations file
    async fn init_schema(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        // Read and execute the initial schema
        let schema = include_str!("../../../migrations/20240101_000001_initial_schema.sql");
        sqlx::raw_sql(schema).execute(&self.pool).await?;
        Ok(())
    }

    /// Returns a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Clears all data from the database while preserving the schema
    ///
    /// Useful for resetting state between tests
    pub async fn clear_data(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let tables = [
            "application_taxes",
            "risk_coverages",
            "applications",
            "emission_fee_schedule",
        ];

        for table in tables {
            sqlx::query(&format!("TRUNCATE TABLE {} CASCADE", table))
                .execute(&self.pool)
                .await?;
        }

        Ok(())
    }
}

/// Inserts an application with the given quote on file
///
/// The risk coverage row takes the quote's applied rate and sum insured.
pub async fn insert_application(
    pool: &PgPool,
    id: ApplicationId,
    quote: &StoredQuote,
) -> Result<(), sqlx::Error> {
    insert_application_without_coverage(pool, id, quote).await?;

    sqlx::query(
        r#"
        INSERT INTO risk_coverages (application_id, applied_rate, insured_capital)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(id.number())
    .bind(quote.applied_rate)
    .bind(quote.sum_insured)
    .execute(pool)
    .await?;

    Ok(())
}

/// Inserts an application row with no risk coverage
pub async fn insert_application_without_coverage(
    pool: &PgPool,
    id: ApplicationId,
    quote: &StoredQuote,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO applications (
            application_id, tariff_premium, bonification_percent, bonification,
            admin_surcharge_percent, admin_surcharge, financial_surcharge_percent,
            financial_surcharge, emission_fee, escribania_fee, total_taxes, premium
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        "#,
    )
    .bind(id.number())
    .bind(quote.tariff_premium)
    .bind(quote.bonification_percent.points())
    .bind(quote.bonification)
    .bind(quote.admin_surcharge_percent.points())
    .bind(quote.admin_surcharge)
    .bind(quote.financial_surcharge_percent.points())
    .bind(quote.financial_surcharge)
    .bind(quote.emission_fee)
    .bind(quote.escribania_fee)
    .bind(quote.total_taxes)
    .bind(quote.premium)
    .execute(pool)
    .await?;

    Ok(())
}

/// Inserts an application's tax lines, numbered in list order
pub async fn insert_tax_lines(
    pool: &PgPool,
    id: ApplicationId,
    rules: &[TaxRule],
) -> Result<(), sqlx::Error> {
    for (line_no, rule) in rules.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO application_taxes
                (application_id, line_no, tax_code, base, rate_percent, amount)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(id.number())
        .bind(line_no as i32 + 1)
        .bind(&rule.code)
        .bind(rule.original_base)
        .bind(rule.rate_percent.points())
        .bind(rule.rate_percent.apply_rounded(rule.original_base))
        .execute(pool)
        .await?;
    }

    Ok(())
}

/// Inserts emission fee schedule rows
pub async fn insert_schedule(
    pool: &PgPool,
    entries: &[DerechoScheduleEntry],
) -> Result<(), sqlx::Error> {
    for entry in entries {
        sqlx::query("INSERT INTO emission_fee_schedule (premium_threshold, fee) VALUES ($1, $2)")
            .bind(entry.premium_threshold)
            .bind(entry.fee)
            .execute(pool)
            .await?;
    }

    Ok(())
}

/// Global test database for shared integration tests
static SHARED_TEST_DB: OnceCell<Arc<TestDatabase>> = OnceCell::const_new();

/// Gets or creates a shared test database instance
///
/// This function provides a singleton test database that can be shared
/// across multiple tests to reduce container startup overhead.
///
/// # Returns
///
/// An Arc to the shared TestDatabase instance
///
/// # Panics
///
/// Panics if the database fails to initialize
pub async fn get_shared_test_database() -> Arc<TestDatabase> {
    SHARED_TEST_DB
        .get_or_init(|| async {
            Arc::new(
                TestDatabase::new()
                    .await
                    .expect("Failed to create shared test database"),
            )
        })
        .await
        .clone()
}

/// Creates an isolated test database for a single test
///
/// Use this when tests need to modify data and isolation is required
pub async fn create_isolated_test_database(
) -> Result<TestDatabase, Box<dyn std::error::Error + Send + Sync>> {
    TestDatabase::new().await
}

/// Helper macro for running database tests
#[macro_export]
macro_rules! db_test {
    ($name:ident, $body:expr) => {
        #[tokio::test]
        async fn $name() {
            let db = $crate::database::create_isolated_test_database()
                .await
                .expect("Failed to create test database");
            let pool = db.pool();
            $body
        }
    };
}
