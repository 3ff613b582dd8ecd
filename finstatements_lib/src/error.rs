//! Error types for the library layer.

use std::fmt;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding input validation failures.
#[derive(Debug)]
pub enum StatementsError {
    /// The provider was unreachable, answered with an error status, or
    /// returned something other than a list of statements.
    Api(fmp_api::Error),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl fmt::Display for StatementsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "Upstream error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for StatementsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::InvalidInput(_) => None,
        }
    }
}

impl From<fmp_api::Error> for StatementsError {
    fn from(e: fmp_api::Error) -> Self {
        Self::Api(e)
    }
}
