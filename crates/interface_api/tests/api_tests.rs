//! HTTP API tests
//!
//! Drives the router in-process over the in-memory rating port.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use core_kernel::ApplicationId;
use domain_rating::ports::mock::MockRatingPort;
use domain_rating::QuoteService;
use interface_api::{create_router, AppState};
use test_utils::{ApplicationFixtures, ScheduleFixtures, TaxFixtures};

const STANDARD_ID: i64 = 1001;
const NO_TAXES_ID: i64 = 1002;

async fn setup() -> (Router, Arc<MockRatingPort>) {
    let port = Arc::new(MockRatingPort::new());
    port.insert(
        ApplicationId::new(STANDARD_ID),
        ApplicationFixtures::standard_policy(),
        TaxFixtures::vat_only(),
    )
    .await;
    port.insert(
        ApplicationId::new(NO_TAXES_ID),
        ApplicationFixtures::standard_policy(),
        vec![],
    )
    .await;
    port.insert_stored_quote(
        ApplicationFixtures::sample_id(),
        ApplicationFixtures::sample_stored_quote(),
    )
    .await;

    let service = QuoteService::new(port.clone(), port.clone(), Arc::new(ScheduleFixtures::flat()));
    let router = create_router(AppState::new(service, port.clone()));
    (router, port)
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn number(body: &Value, field: &str) -> f64 {
    body[field]
        .as_f64()
        .unwrap_or_else(|| panic!("Expected numeric field {}, got {}", field, body[field]))
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "Expected {}, got {}",
        expected,
        actual
    );
}

mod health {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        let (router, _) = setup().await;
        let (status, body) = get(router, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_ready_reports_schedule_rows() {
        let (router, _) = setup().await;
        let (status, body) = get(router, "/health/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["schedule_rows"], 1);
    }

    #[tokio::test]
    async fn test_not_ready_when_port_down() {
        let (router, port) = setup().await;
        port.set_unavailable(true);
        let (status, _) = get(router, "/health/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}

mod requote {
    use super::*;

    #[tokio::test]
    async fn test_stored_rate_reproduces_target() {
        let (router, _) = setup().await;
        let (status, body) = get(
            router,
            "/api/v1/requote?applicationId=1001&reportedPremium=1276&days=365",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["convergio"], true);
        assert_eq!(body["iteraciones"], 1);
        assert_close(number(&body, "premio"), 1276.0);
        assert_close(number(&body, "primaTarifa"), 1000.0);
        assert_close(number(&body, "recAdministrativo"), 150.0);
        assert_close(number(&body, "recAdministrativoPct"), 15.0);
        assert_close(number(&body, "derEmision"), 10.0);
        assert_close(number(&body, "tasaAplicada"), 10.0);
        assert_close(number(&body, "sumaAsegurada"), 100000.0);

        let details = body["detalleImpuestos"].as_array().unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0]["impCod"], "IVA");
        assert_close(number(&details[0], "importe"), 116.0);
    }

    #[tokio::test]
    async fn test_installments_add_financial_surcharge() {
        let (router, _) = setup().await;
        let (status, body) = get(
            router,
            "/api/v1/requote?applicationId=1001&reportedPremium=1276&days=365&installmentCount=3",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_close(number(&body, "recFinancieroPct"), 10.07);
        assert_close(number(&body, "recFinanciero"), 116.81);
        assert_close(number(&body, "impuestos"), 127.68);
        assert_close(number(&body, "premio"), 1404.49);
    }

    #[tokio::test]
    async fn test_malformed_installments_ignored() {
        let (router, _) = setup().await;
        let (status, body) = get(
            router,
            concat!(
                "/api/v1/requote?applicationId=1001&reportedPremium=1276&days=365",
                "&installmentCount=abc&premiumType=X",
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_close(number(&body, "recFinanciero"), 0.0);
        assert_close(number(&body, "premio"), 1276.0);
    }

    #[tokio::test]
    async fn test_zero_days_is_validation_error() {
        let (router, _) = setup().await;
        let (status, body) = get(
            router,
            "/api/v1/requote?applicationId=1001&reportedPremium=1276&days=0",
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_overlong_coverage_is_validation_error() {
        let (router, _) = setup().await;
        let (status, body) = get(
            router,
            "/api/v1/requote?applicationId=1001&reportedPremium=1276&days=4294967295",
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_oversized_total_insured_amount_is_validation_error() {
        let (router, _) = setup().await;
        let (status, body) = get(
            router,
            concat!(
                "/api/v1/requote?applicationId=1001&reportedPremium=1276&days=365",
                "&totalInsuredAmount=100000000000000000000",
            ),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_missing_premium_is_bad_request() {
        let (router, _) = setup().await;
        let (status, body) = get(router, "/api/v1/requote?applicationId=1001&days=365").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
    }

    #[tokio::test]
    async fn test_unknown_application_is_not_found() {
        let (router, _) = setup().await;
        let (status, body) = get(
            router,
            "/api/v1/requote?applicationId=42&reportedPremium=1276&days=365",
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_port_failure_is_server_error() {
        let (router, port) = setup().await;
        port.set_unavailable(true);
        let (status, _) = get(
            router,
            "/api/v1/requote?applicationId=1001&reportedPremium=1276&days=365",
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_unreachable_target_still_answers() {
        let (router, _) = setup().await;
        let (status, body) = get(
            router,
            "/api/v1/requote?applicationId=1001&reportedPremium=-50&days=365",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["convergio"], false);
        assert_eq!(body["iteraciones"], 100);
    }
}

mod stored {
    use super::*;

    #[tokio::test]
    async fn test_stored_quote() {
        let (router, _) = setup().await;
        let (status, body) = get(router, "/api/v1/applications/151547/quote").await;

        assert_eq!(status, StatusCode::OK);
        assert_close(number(&body, "primaTarifa"), 1000.0);
        assert_close(number(&body, "bonificacion"), -100.0);
        assert_close(number(&body, "primaNeta"), 900.0);
        assert_close(number(&body, "premio"), 1210.0);
        assert_close(number(&body, "tasaAplicada"), 0.5);
    }

    #[tokio::test]
    async fn test_stored_taxes() {
        let (router, _) = setup().await;
        let (status, body) = get(router, "/api/v1/applications/1001/taxes").await;

        assert_eq!(status, StatusCode::OK);
        let lines = body.as_array().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["impCod"], "IVA");
        assert_close(number(&lines[0], "sol2Base"), 500.0);
        assert_close(number(&lines[0], "sol2Ali"), 10.0);
    }

    #[tokio::test]
    async fn test_empty_taxes_not_found() {
        let (router, _) = setup().await;
        let (status, _) = get(router, "/api/v1/applications/1002/taxes").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_stored_quote_not_found() {
        let (router, _) = setup().await;
        let (status, _) = get(router, "/api/v1/applications/999999/quote").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
