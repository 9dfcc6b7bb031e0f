//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! re-rating test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built applications, schedules and tax sets
//! - `builders`: Builder patterns for policy data, tax sets and requests
//! - `database`: Database test helpers and container management
//! - `assertions`: Assertion helpers for quote results
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
