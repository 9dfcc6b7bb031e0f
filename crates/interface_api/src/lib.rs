//! HTTP API Layer
//!
//! REST API for the re-rating service using Axum.
//!
//! # Routes
//!
//! - `GET /health`, `GET /health/ready`
//! - `GET /api/v1/requote?applicationId=..&reportedPremium=..&days=..`
//!   with optional `totalInsuredAmount`, `installmentCount`, `premiumType`
//! - `GET /api/v1/applications/:id/quote`
//! - `GET /api/v1/applications/:id/taxes`
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(AppState::new(service, adapter));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{middleware as axum_middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use core_kernel::HealthCheckable;
use domain_rating::QuoteService;

use crate::handlers::{application, health, quote};
use crate::middleware::access_log_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: QuoteService,
    /// Data source pinged by the readiness check
    pub readiness: Arc<dyn HealthCheckable>,
}

impl AppState {
    pub fn new(service: QuoteService, readiness: Arc<dyn HealthCheckable>) -> Self {
        Self { service, readiness }
    }
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let api_routes = Router::new()
        .route("/requote", get(quote::requote))
        .route("/applications/:id/quote", get(application::get_stored_quote))
        .route("/applications/:id/taxes", get(application::get_stored_taxes))
        .layer(axum_middleware::from_fn(access_log_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
