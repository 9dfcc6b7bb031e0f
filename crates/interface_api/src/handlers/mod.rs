//! Request handlers

pub mod health;
pub mod quote;
pub mod application;
