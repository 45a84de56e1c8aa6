//! Validation error types

use std::fmt;

/// Validation error for domain models and request input
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Numeric field is below zero
    Negative { field: &'static str },

    /// Numeric field exceeds what the column can hold
    OutOfRange { field: &'static str, max: String },

    /// String doesn't match required format (e.g., numeric id)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Request body could not be decoded
    MalformedBody { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::Negative { field } => write!(f, "{} must not be negative", field),
            Self::OutOfRange { field, max } => {
                write!(f, "{} must not exceed {}", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::MalformedBody { reason } => {
                write!(f, "invalid request payload: {}", reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
