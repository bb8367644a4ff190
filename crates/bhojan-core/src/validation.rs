//! # Validation Module
//!
//! Input validation for menu rows and register input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI / file parsing                                           │
//! │  └── Type conversion (clap, csv, serde)                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Business rules on names, prices and rates                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  └── NOT NULL / UNIQUE / CHECK constraints                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bhojan_core::validation::{validate_item_name, validate_tax_rate_bps};
//!
//! validate_item_name("Masala Dosa").unwrap();
//! validate_tax_rate_bps(500).unwrap();
//! assert!(validate_item_name("  ").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::BPS_PER_UNIT;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest menu item name accepted.
pub const MAX_ITEM_NAME_LEN: usize = 100;

/// Validates a menu item name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most [`MAX_ITEM_NAME_LEN`] characters
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "itemname".to_string(),
        });
    }

    if name.chars().count() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "itemname".to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a menu price. Zero is allowed (complimentary items).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a tax rate in basis points: 0 to 10000 (0% to 100%).
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > BPS_PER_UNIT {
        return Err(ValidationError::OutOfRange {
            field: "tax rate".to_string(),
            min: 0,
            max: BPS_PER_UNIT as i64,
        });
    }

    Ok(())
}

/// Validates a table identifier (non-empty, no surrounding whitespace).
pub fn validate_table_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "table id".to_string(),
        });
    }

    if id.trim() != id {
        return Err(ValidationError::InvalidFormat {
            field: "table id".to_string(),
            reason: "must not start or end with whitespace".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
