//! # Error Types
//!
//! Domain-specific error types for velora-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  velora-core errors (this file)                                        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  velora-db errors (separate crate)                                     │
//! │  └── StoreError       - Database operation failures                    │
//! │                                                                         │
//! │  store-api errors (in app)                                             │
//! │  └── ApiError         - What HTTP clients see (status + JSON body)     │
//! │                                                                         │
//! │  Flow: ValidationError → StoreError → ApiError → Client                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, limit, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet business requirements.
/// Used for early validation before any storage work runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A collection that must not be empty is empty.
    #[error("{field} must contain at least one entry")]
    Empty { field: String },
}

/// Result type alias for validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooLong {
            field: "title".to_string(),
            max: 100,
        };
        assert_eq!(err.to_string(), "title must be at most 100 characters");

        let err = ValidationError::Empty {
            field: "items".to_string(),
        };
        assert_eq!(err.to_string(), "items must contain at least one entry");
    }
}
