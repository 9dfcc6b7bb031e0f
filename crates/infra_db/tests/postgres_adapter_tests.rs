//! PostgreSQL adapter tests
//!
//! Each test starts its own PostgreSQL container with the rating schema
//! applied, so they are ignored by default. Run with
//! `cargo test -p infra_db -- --ignored` on a machine with Docker.

use std::sync::Arc;

use core_kernel::{HealthCheckable, PortError};
use domain_rating::{
    load_schedule_resolver, DerechoScheduleProvider, PolicyDataProvider, QuoteService,
    TaxRuleProvider,
};
use infra_db::{PostgresRatingAdapter, PostgresScheduleAdapter};
use rust_decimal_macros::dec;
use test_utils::{
    assert_quote_consistent, create_isolated_test_database, insert_application,
    insert_application_without_coverage, insert_schedule, insert_tax_lines, ApplicationFixtures,
    QuoteRequestBuilder, ScheduleFixtures, TaxFixtures, TestDatabase,
};

async fn seeded_database() -> TestDatabase {
    let db = create_isolated_test_database()
        .await
        .expect("Failed to create test database");

    let id = ApplicationFixtures::sample_id();
    insert_application(db.pool(), id, &ApplicationFixtures::sample_stored_quote())
        .await
        .expect("Failed to seed application");
    insert_tax_lines(db.pool(), id, &TaxFixtures::sample_rules())
        .await
        .expect("Failed to seed tax lines");
    insert_schedule(db.pool(), &ScheduleFixtures::standard_entries())
        .await
        .expect("Failed to seed schedule");

    db
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_policy_data_reads_coverage() {
    let db = seeded_database().await;
    let adapter = PostgresRatingAdapter::new(db.pool().clone());

    let policy = adapter
        .policy_data(ApplicationFixtures::sample_id())
        .await
        .unwrap();

    assert_eq!(policy.rate, dec!(0.5));
    assert_eq!(policy.sum_insured, dec!(100000));
    assert_eq!(policy.bonification, dec!(-100));
    assert_eq!(policy.escribania_fee, dec!(10));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_stored_quote_round_trips() {
    let db = seeded_database().await;
    let adapter = PostgresRatingAdapter::new(db.pool().clone());

    let stored = adapter
        .stored_quote(ApplicationFixtures::sample_id())
        .await
        .unwrap();

    assert_eq!(stored, ApplicationFixtures::sample_stored_quote());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_tax_rules_keep_line_order() {
    let db = seeded_database().await;
    let adapter = PostgresRatingAdapter::new(db.pool().clone());

    let rules = adapter
        .tax_rules(ApplicationFixtures::sample_id())
        .await
        .unwrap();

    assert_eq!(rules, TaxFixtures::sample_rules());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_unknown_application_is_not_found() {
    let db = seeded_database().await;
    let adapter = PostgresRatingAdapter::new(db.pool().clone());

    let err = adapter
        .policy_data(ApplicationFixtures::unknown_id())
        .await
        .unwrap_err();
    assert!(matches!(err, PortError::NotFound { .. }));

    let rules = adapter
        .tax_rules(ApplicationFixtures::unknown_id())
        .await
        .unwrap();
    assert!(rules.is_empty());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_application_without_coverage_is_not_found() {
    let db = create_isolated_test_database().await.unwrap();
    let id = ApplicationFixtures::sample_id();
    insert_application_without_coverage(db.pool(), id, &ApplicationFixtures::sample_stored_quote())
        .await
        .unwrap();
    let adapter = PostgresRatingAdapter::new(db.pool().clone());

    assert!(adapter.policy_data(id).await.unwrap_err().is_not_found());
    // The stored quote does not need the coverage row
    assert!(adapter.stored_quote(id).await.is_ok());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_schedule_loads_in_threshold_order() {
    let db = create_isolated_test_database().await.unwrap();
    let mut entries = ScheduleFixtures::standard_entries();
    entries.reverse();
    insert_schedule(db.pool(), &entries).await.unwrap();

    let loaded = PostgresScheduleAdapter::new(db.pool().clone())
        .load_schedule()
        .await
        .unwrap();

    assert_eq!(loaded, ScheduleFixtures::standard_entries());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_health_check_reports_healthy() {
    let db = seeded_database().await;
    let adapter = PostgresRatingAdapter::new(db.pool().clone());
    assert!(adapter.health_check().await.is_operational());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_quote_service_over_postgres() {
    let db = seeded_database().await;
    let adapter = Arc::new(PostgresRatingAdapter::new(db.pool().clone()));
    let resolver = load_schedule_resolver(&PostgresScheduleAdapter::new(db.pool().clone()))
        .await
        .unwrap();
    let service = QuoteService::new(adapter.clone(), adapter, Arc::new(resolver));

    let quote = service
        .quote(&QuoteRequestBuilder::new().with_reported_premium(dec!(3000)).build())
        .await
        .unwrap();

    assert!(quote.converged);
    assert_quote_consistent(&quote);
    assert_eq!(quote.tax_lines.len(), 2);
}
