//! Rating Domain Ports
//!
//! Port interfaces the rating domain needs from its data sources. The
//! quote engine itself is pure; these traits describe where the policy
//! snapshot, the stored tax lines and the emission fee schedule come from.
//!
//! - **Postgres adapters** (infra_db) read the application tables
//! - **CSV adapter** (infra_db) loads the fee schedule from a file
//! - **Mock adapters** keep everything in memory for tests
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_rating::ports::{PolicyDataProvider, TaxRuleProvider};
//! use std::sync::Arc;
//!
//! let adapter = PostgresRatingAdapter::new(pool.clone());
//! let policy_port: Arc<dyn PolicyDataProvider> = Arc::new(adapter);
//! let policy = policy_port.policy_data(ApplicationId::new(151547)).await?;
//! ```

use async_trait::async_trait;

use core_kernel::{ApplicationId, DomainPort, PortError};

use crate::derecho::DerechoScheduleEntry;
use crate::policy::{PolicyBaseData, StoredQuote};
use crate::tax::TaxRule;

/// Source of stored rating parameters for an application
#[async_trait]
pub trait PolicyDataProvider: DomainPort {
    /// Returns the rating snapshot for an application
    ///
    /// Fails with `PortError::NotFound` when the application has no policy data.
    async fn policy_data(&self, id: ApplicationId) -> Result<PolicyBaseData, PortError>;

    /// Returns the quote components currently stored for an application
    async fn stored_quote(&self, id: ApplicationId) -> Result<StoredQuote, PortError>;
}

/// Source of stored tax lines for an application
#[async_trait]
pub trait TaxRuleProvider: DomainPort {
    /// Returns the application's tax lines in their stored order
    ///
    /// An application without tax lines yields an empty list.
    async fn tax_rules(&self, id: ApplicationId) -> Result<Vec<TaxRule>, PortError>;
}

/// Source of the emission fee schedule
#[async_trait]
pub trait DerechoScheduleProvider: DomainPort {
    /// Loads every schedule row
    async fn load_schedule(&self) -> Result<Vec<DerechoScheduleEntry>, PortError>;
}

/// In-memory ports for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use chrono::Utc;

    use core_kernel::{AdapterHealth, HealthCheckResult, HealthCheckable};

    /// In-memory policy data and tax lines keyed by application
    #[derive(Debug, Default)]
    pub struct MockRatingPort {
        policies: Arc<RwLock<HashMap<ApplicationId, PolicyBaseData>>>,
        quotes: Arc<RwLock<HashMap<ApplicationId, StoredQuote>>>,
        taxes: Arc<RwLock<HashMap<ApplicationId, Vec<TaxRule>>>>,
        unavailable: AtomicBool,
    }

    impl MockRatingPort {
        /// Creates an empty mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Stores policy data and tax lines for an application
        pub async fn insert(&self, id: ApplicationId, policy: PolicyBaseData, rules: Vec<TaxRule>) {
            self.policies.write().await.insert(id, policy);
            self.taxes.write().await.insert(id, rules);
        }

        /// Stores the quote on file for an application
        pub async fn insert_stored_quote(&self, id: ApplicationId, quote: StoredQuote) {
            self.quotes.write().await.insert(id, quote);
        }

        /// Makes every call fail with a connection error
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        fn check_available(&self) -> Result<(), PortError> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(PortError::connection("mock rating port unavailable"));
            }
            Ok(())
        }
    }

    impl DomainPort for MockRatingPort {}

    #[async_trait]
    impl HealthCheckable for MockRatingPort {
        async fn health_check(&self) -> HealthCheckResult {
            let status = if self.unavailable.load(Ordering::SeqCst) {
                AdapterHealth::Unhealthy
            } else {
                AdapterHealth::Healthy
            };
            HealthCheckResult {
                adapter_id: "mock-rating-port".to_string(),
                status,
                latency_ms: 0,
                message: None,
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl PolicyDataProvider for MockRatingPort {
        async fn policy_data(&self, id: ApplicationId) -> Result<PolicyBaseData, PortError> {
            self.check_available()?;
            self.policies
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Application", id))
        }

        async fn stored_quote(&self, id: ApplicationId) -> Result<StoredQuote, PortError> {
            self.check_available()?;
            self.quotes
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Quote", id))
        }
    }

    #[async_trait]
    impl TaxRuleProvider for MockRatingPort {
        async fn tax_rules(&self, id: ApplicationId) -> Result<Vec<TaxRule>, PortError> {
            self.check_available()?;
            Ok(self.taxes.read().await.get(&id).cloned().unwrap_or_default())
        }
    }

    /// Fixed emission fee schedule
    #[derive(Debug, Clone, Default)]
    pub struct MockSchedulePort {
        entries: Vec<DerechoScheduleEntry>,
    }

    impl MockSchedulePort {
        pub fn new(entries: Vec<DerechoScheduleEntry>) -> Self {
            Self { entries }
        }
    }

    impl DomainPort for MockSchedulePort {}

    #[async_trait]
    impl DerechoScheduleProvider for MockSchedulePort {
        async fn load_schedule(&self) -> Result<Vec<DerechoScheduleEntry>, PortError> {
            Ok(self.entries.clone())
        }
    }
}
