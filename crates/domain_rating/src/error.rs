//! Rating domain errors
//!
//! This module defines the error types that can occur while re-rating a
//! policy application.

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur in the rating domain
#[derive(Debug, Error)]
pub enum RatingError {
    /// No policy data (or no application) exists for the requested id
    #[error("Not found: {0}")]
    NotFound(String),

    /// An emission-fee schedule needs at least one entry
    #[error("Emission fee schedule is empty")]
    EmptySchedule,

    /// Input rejected before rating
    #[error("Validation error: {0}")]
    Validation(String),

    /// Stored policy data or tax lines fall outside the supported ranges
    #[error("Invalid stored data: {0}")]
    InvalidStoredData(String),

    /// A data provider failed for a reason other than a missing record
    #[error("Data provider error: {0}")]
    Provider(String),
}

impl RatingError {
    /// Creates a not found error for an entity and identifier
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        RatingError::NotFound(format!("{} {} not found", entity, id))
    }

    /// Creates a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        RatingError::Validation(message.into())
    }

    /// Returns true if this error should be reported as "not found"
    pub fn is_not_found(&self) -> bool {
        matches!(self, RatingError::NotFound(_))
    }
}

impl From<PortError> for RatingError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { entity_type, id } => RatingError::not_found(&entity_type, id),
            PortError::Validation { message, .. } => RatingError::Validation(message),
            other => RatingError::Provider(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_not_found_maps_to_not_found() {
        let err: RatingError = PortError::not_found("Application", "APP-7").into();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Not found: Application APP-7 not found");
    }

    #[test]
    fn test_port_internal_keeps_message() {
        let err: RatingError = PortError::internal("connection reset by peer").into();
        match err {
            RatingError::Provider(msg) => assert!(msg.contains("connection reset by peer")),
            other => panic!("Expected Provider error, got {:?}", other),
        }
    }
}
