//! Request and response DTOs
//!
//! Response field names follow the quoting front end (`primaTarifa`,
//! `recFinanciero`, ...); amounts are serialized as JSON numbers.

pub mod quote;
pub mod application;
