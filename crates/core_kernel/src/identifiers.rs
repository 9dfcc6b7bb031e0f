//! Strongly-typed identifiers
//!
//! Applications (policy requests) are numbered sequentially by the
//! underwriting system, so the identifier wraps the numeric application
//! number rather than a UUID.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of a policy application
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(i64);

impl ApplicationId {
    /// Creates an identifier from an application number
    pub fn new(number: i64) -> Self {
        Self(number)
    }

    /// Returns the application number
    pub fn number(&self) -> i64 {
        self.0
    }

    /// Returns the identifier prefix for display
    pub fn prefix() -> &'static str {
        "APP"
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", Self::prefix(), self.0)
    }
}

impl FromStr for ApplicationId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Strip prefix if present
        let number = s.trim();
        let number = number.strip_prefix("APP-").unwrap_or(number);
        Ok(Self(number.parse()?))
    }
}

impl From<i64> for ApplicationId {
    fn from(number: i64) -> Self {
        Self(number)
    }
}

impl From<ApplicationId> for i64 {
    fn from(id: ApplicationId) -> i64 {
        id.0
    }
}
