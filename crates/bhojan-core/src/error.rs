//! # Error Types
//!
//! Domain-specific error types for bhojan-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bhojan-core errors (this file)                                        │
//! │  ├── CoreError        - Order, bill and table failures                 │
//! │  └── ValidationError  - Malformed input (menu rows, names, rates)      │
//! │                                                                         │
//! │  bhojan-db errors (separate crate)                                     │
//! │  └── DbError          - Database and file operation failures           │
//! │                                                                         │
//! │  register errors (in app)                                              │
//! │  └── RegisterError    - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → RegisterError → Operator          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant is a caller-input error: none of them is transient, so
//! nothing in the core retries.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A quantity of zero or less was added to the order.
    #[error("Invalid quantity {quantity} for {item}: must be a positive integer")]
    InvalidQuantity { item: String, quantity: i64 },

    /// An order line references an item missing from the catalog.
    ///
    /// ## When This Occurs
    /// The catalog was reloaded between adding the line and computing the
    /// bill, and the item is gone.
    #[error("Unknown menu item: {0}")]
    UnknownItem(String),

    /// Discount outside [0, 100] percent.
    #[error("Invalid discount: {reason}")]
    InvalidDiscount { reason: String },

    /// Dine-in requested while every table is occupied.
    #[error("No free table: all tables are occupied")]
    NoFreeTable,

    /// Toggle on a table id the registry does not know.
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    /// An amount no longer fits in 64-bit minor units.
    #[error("Amount overflow while computing {0}")]
    AmountOverflow(&'static str),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an InvalidDiscount error.
    pub fn invalid_discount(reason: impl Into<String>) -> Self {
        CoreError::InvalidDiscount {
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before business logic runs, mostly while building a
/// [`MenuCatalog`](crate::catalog::MenuCatalog) from raw rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., unparsable decimal).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g., two menu rows with the same name).
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
        let err = CoreError::InvalidQuantity {
            item: "Tea".to_string(),
            quantity: 0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid quantity 0 for Tea: must be a positive integer"
        );

        assert_eq!(
            CoreError::UnknownItem("Lassi".to_string()).to_string(),
            "Unknown menu item: Lassi"
        );
        assert_eq!(
            CoreError::NoFreeTable.to_string(),
            "No free table: all tables are occupied"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "itemname".to_string(),
        };
        assert_eq!(err.to_string(), "itemname is required");

        let err = ValidationError::Duplicate {
            field: "itemname".to_string(),
            value: "Tea".to_string(),
        };
        assert_eq!(err.to_string(), "itemname 'Tea' already exists");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "itemname".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
