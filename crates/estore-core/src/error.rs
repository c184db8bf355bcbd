//! # Error Types
//!
//! Domain-specific error types for estore-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  estore-core errors (this file)                                         │
//! │  ├── CoreError        - Stock and bill rule violations                  │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  estore-db errors (separate crate)                                      │
//! │  └── DbError          - Collection read/write failures                  │
//! │                                                                         │
//! │  estore-service errors                                                  │
//! │  ├── ServiceError     - Soft failures (logged, reported as `false`)     │
//! │  └── BillingError     - Hard failure of bill creation                   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ServiceError → front end           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations detected by the domain types themselves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A stock change would take the quantity below zero.
    ///
    /// ## When This Occurs
    /// - Selling more than is on the shelf
    /// - A manager correction with a delta larger than the current stock
    #[error("Insufficient stock for {item_id}: available {available}, requested {requested}")]
    InsufficientStock {
        item_id: String,
        available: u32,
        requested: u64,
    },

    /// A stock change would overflow the quantity type.
    #[error("Stock for {item_id} would exceed the maximum quantity")]
    StockOverflow { item_id: String },

    /// A line subtotal or bill total would not fit in `Money`.
    #[error("Amount overflow adding {item_id} to bill {bill_id}")]
    AmountOverflow { bill_id: String, item_id: String },

    /// A bill line was not found on the open bill.
    #[error("Bill line not found: {0}")]
    LineNotFound(String),

    /// The item handed in does not match the item a bill line sold.
    #[error("Bill line {line_id} sold item {expected}, not {actual}")]
    LineItemMismatch {
        line_id: String,
        expected: String,
        actual: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any collection is touched, so a rejected input never
/// costs a load/save round trip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
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

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Duplicate value (e.g., an existing username).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            item_id: "I1a2b3c4d".to_string(),
            available: 10,
            requested: 11,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for I1a2b3c4d: available 10, requested 11"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::Duplicate {
            field: "username".to_string(),
            value: "alice".to_string(),
        };
        assert_eq!(err.to_string(), "username 'alice' already exists");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
