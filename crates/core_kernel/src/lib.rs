//! Core Kernel - Foundational types and utilities for the re-rating system
//!
//! This crate provides the building blocks shared by every other crate:
//! - Monetary rounding and percentage helpers on top of `rust_decimal`
//! - The application identifier
//! - Port error and health-check types for the adapter layer

pub mod money;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use money::{round_money, within_tolerance, Percentage, MONEY_DECIMAL_PLACES};
pub use identifiers::ApplicationId;
pub use ports::{PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth};
pub use error::CoreError;
