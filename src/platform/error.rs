//! Location service error types

use std::fmt;

/// Errors reported by a location service
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// The platform has no location hardware or service
    Unavailable { details: String },
    /// Updates requested from a stream that was never started
    NotStarted { stream: &'static str },
    /// The service was stopped and cannot deliver more events
    Stopped,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Unavailable { details } => {
                write!(f, "Location service unavailable: {}", details)
            }
            ServiceError::NotStarted { stream } => {
                write!(f, "{} updates were not started", stream)
            }
            ServiceError::Stopped => write!(f, "Location service stopped"),
        }
    }
}

impl std::error::Error for ServiceError {}

/// Result type for location service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
