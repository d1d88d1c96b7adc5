//! # Error Types
//!
//! Error types for the layers around the engine.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  calculator (round / item / bill)  →  never fails                       │
//! │                                                                         │
//! │  opt-in layers (this file)                                              │
//! │  ├── ValidationError  - a field breaks a business rule or won't parse   │
//! │  ├── ConfigError      - BillingConfig could not be loaded               │
//! │  └── CoreError        - wraps the above, adds the failing line index    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → API route → Frontend               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, line index)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by the conversion and validation layers.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A field failed validation outside of any specific line.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A specific bill line failed conversion or validation.
    ///
    /// ## User Workflow
    /// ```text
    /// Bill form: 3 lines
    ///      │
    ///      ▼
    /// line 2: discountPercentage = "abc"
    ///      │
    ///      ▼
    /// InvalidLineItem { index: 1, source: InvalidFormat { .. } }
    ///      │
    ///      ▼
    /// UI highlights the second row
    /// ```
    #[error("Line item {index}: {source}")]
    InvalidLineItem {
        index: usize,
        #[source]
        source: ValidationError,
    },

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CoreError {
    /// Index of the offending line, if the error is tied to one.
    pub fn line_index(&self) -> Option<usize> {
        match self {
            CoreError::InvalidLineItem { index, .. } => Some(*index),
            _ => None,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation and conversion errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Text could not be read as a decimal number.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Bill has more lines than allowed.
    #[error("Bill cannot have more than {max} line items (got {count})")]
    TooManyItems { count: usize, max: usize },
}

impl ValidationError {
    /// Name of the offending field, when the error concerns a single field.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::Required { field }
            | ValidationError::NotFinite { field }
            | ValidationError::MustBeNonNegative { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => Some(field),
            ValidationError::TooManyItems { .. } => None,
        }
    }
}

// =============================================================================
// Config Error
// =============================================================================

/// Configuration error types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Inconsistent configuration: {0}")]
    Inconsistent(String),
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
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "price".to_string(),
        };
        assert_eq!(err.to_string(), "price is required");

        let err = ValidationError::OutOfRange {
            field: "taxRate".to_string(),
            min: 0.0,
            max: 100.0,
        };
        assert_eq!(err.to_string(), "taxRate must be between 0 and 100");

        let err = ValidationError::TooManyItems { count: 3, max: 2 };
        assert_eq!(
            err.to_string(),
            "Bill cannot have more than 2 line items (got 3)"
        );
    }

    #[test]
    fn test_line_item_error_message() {
        let err = CoreError::InvalidLineItem {
            index: 1,
            source: ValidationError::MustBeNonNegative {
                field: "quantity".to_string(),
            },
        };
        assert_eq!(err.to_string(), "Line item 1: quantity must not be negative");
        assert_eq!(err.line_index(), Some(1));
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::NotFinite {
            field: "price".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.line_index(), None);
    }

    #[test]
    fn test_field_accessor() {
        let err = ValidationError::InvalidFormat {
            field: "taxRate".to_string(),
            reason: "not a number".to_string(),
        };
        assert_eq!(err.field(), Some("taxRate"));
        assert_eq!(ValidationError::TooManyItems { count: 1, max: 0 }.field(), None);
    }
}
