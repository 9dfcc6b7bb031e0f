//! Infrastructure Database Layer
//!
//! Data access for the re-rating service: PostgreSQL repositories for
//! applications, tax lines and the emission fee schedule, plus the adapters
//! that implement the rating domain ports on top of them.
//!
//! # Architecture
//!
//! Repositories own the SQL and return row types. Adapters map rows to
//! domain types and translate `DatabaseError` into `PortError`, so the
//! domain never sees SQLx.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, DatabaseConfig};
//! use infra_db::adapters::PostgresRatingAdapter;
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/rating")).await?;
//! let adapter = PostgresRatingAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, ping, DatabaseConfig};
pub use error::{DatabaseError, db_to_port_error};
pub use adapters::{CsvScheduleAdapter, PostgresRatingAdapter, PostgresScheduleAdapter};
