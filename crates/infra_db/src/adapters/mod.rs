//! Domain Adapters
//!
//! Implementations of the rating domain ports over PostgreSQL and the
//! emission fee schedule file.

pub mod rating;
pub mod schedule;

pub use rating::PostgresRatingAdapter;
pub use schedule::{parse_schedule_csv, CsvScheduleAdapter, PostgresScheduleAdapter};
