//! Database error types
//!
//! This module defines the error types that can occur while reading rating
//! data, and their translation into port errors for the domain layer.

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur during database and schedule file access
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to establish a database connection
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Entity not found in database
    #[error("Entity not found: {entity} with id '{id}'")]
    NotFound { entity: String, id: String },

    /// A stored value could not be mapped to a domain value
    #[error("Invalid stored data: {0}")]
    InvalidData(String),

    /// The emission fee schedule file could not be read or parsed
    #[error("Schedule file error: {0}")]
    ScheduleFile(String),

    /// Pool exhaustion - no available connections
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Generic SQL error
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Creates a not found error for a specific entity type and identifier
    ///
    /// # Example
    ///
    /// ```rust
    /// use infra_db::DatabaseError;
    ///
    /// let error = DatabaseError::not_found("Application", 151547);
    /// assert!(error.to_string().contains("151547"));
    /// ```
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        DatabaseError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    /// Checks if this error indicates a record was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound { .. })
    }

    /// Checks if this error is a connection-related issue
    pub fn is_connection_error(&self) -> bool {
        match self {
            DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted => true,
            DatabaseError::SqlError(e) => matches!(
                e,
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
            ),
            _ => false,
        }
    }
}

/// Converts SQLx errors to more specific DatabaseError variants
impl From<&sqlx::Error> for DatabaseError {
    fn from(error: &sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => DatabaseError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted,
            sqlx::Error::Database(db_err) => {
                DatabaseError::QueryFailed(db_err.message().to_string())
            }
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                DatabaseError::InvalidData(error.to_string())
            }
            _ => DatabaseError::QueryFailed(error.to_string()),
        }
    }
}

/// Translates a database error into the port error seen by the domain
///
/// Not found stays not found, connectivity problems become
/// `PortError::Connection`, unreadable rows `PortError::Transformation`,
/// and everything else `PortError::Internal` with the message preserved.
pub fn db_to_port_error(e: DatabaseError) -> PortError {
    if e.is_connection_error() {
        return PortError::connection(e.to_string());
    }
    match e {
        DatabaseError::NotFound { entity, id } => PortError::NotFound { entity_type: entity, id },
        DatabaseError::InvalidData(msg) | DatabaseError::ScheduleFile(msg) => {
            PortError::transformation(msg)
        }
        other => PortError::internal(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_translation() {
        let port = db_to_port_error(DatabaseError::not_found("Application", 42));
        assert!(port.is_not_found());
        assert!(port.to_string().contains("42"));
    }

    #[test]
    fn test_pool_exhausted_is_transient() {
        assert!(db_to_port_error(DatabaseError::PoolExhausted).is_transient());
        let timed_out = DatabaseError::SqlError(sqlx::Error::PoolTimedOut);
        assert!(db_to_port_error(timed_out).is_transient());
    }

    #[test]
    fn test_query_failure_keeps_message() {
        let port = db_to_port_error(DatabaseError::QueryFailed("relation does not exist".into()));
        assert!(matches!(port, PortError::Internal { .. }));
        assert!(port.to_string().contains("relation does not exist"));
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err = DatabaseError::from(&sqlx::Error::RowNotFound);
        assert!(err.is_not_found());
    }
}
