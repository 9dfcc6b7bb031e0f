//! Repository implementations
//!
//! Repositories encapsulate the SQL and return plain row types; the
//! adapters map rows to rating domain types.

pub mod application;
pub mod schedule;

pub use application::{ApplicationRepository, ApplicationRow, TaxLineRow};
pub use schedule::{ScheduleRepository, ScheduleRow};
