//! # Domain Types
//!
//! Small value types used throughout Bhojan POS.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │  DiscountRate   │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  bps (u32)      │   │  Cash           │       │
//! │  │  500 = 5% GST   │   │  1000 = 10% off │   │  Upi            │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐                                                   │
//! │  │  TableStatus    │                                                   │
//! │  │  ─────────────  │                                                   │
//! │  │  Free           │                                                   │
//! │  │  Occupied       │                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::validation::ValidationResult;
use crate::BPS_PER_UNIT;

// =============================================================================
// Tax Rate
// =============================================================================

/// Per-item tax rate in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000.
/// 500 bps = 5% (the usual restaurant GST slab).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a fraction in [0, 1] (0.05 = 5%).
    ///
    /// Fractions that are not a whole number of basis points are rejected
    /// rather than rounded.
    ///
    /// ## Example
    /// ```rust
    /// use bhojan_core::types::TaxRate;
    ///
    /// assert_eq!(TaxRate::from_fraction(0.05).unwrap().bps(), 500);
    /// assert!(TaxRate::from_fraction(1.5).is_err());
    /// assert!(TaxRate::from_fraction(-0.1).is_err());
    /// assert!(TaxRate::from_fraction(0.123456).is_err());
    /// ```
    pub fn from_fraction(fraction: f64) -> ValidationResult<Self> {
        if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
            return Err(ValidationError::OutOfRange {
                field: "tax rate".to_string(),
                min: 0,
                max: 1,
            });
        }
        whole_bps(fraction * BPS_PER_UNIT as f64)
            .map(TaxRate)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "tax rate".to_string(),
                reason: format!("{} is finer than 0.0001 (one basis point)", fraction),
            })
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// Whole-bill percentage discount in basis points (1000 = 10%).
///
/// Percentages carry up to two decimals (12.5% = 1250 bps). Values above
/// 100% can only be built through [`DiscountRate::from_bps`]; the bill
/// calculator rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a discount from basis points, unchecked.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a discount from a percentage in [0, 100] with at most two
    /// decimal places. Finer percentages are rejected rather than rounded.
    ///
    /// ## Example
    /// ```rust
    /// use bhojan_core::types::DiscountRate;
    ///
    /// assert_eq!(DiscountRate::from_percentage(10.0).unwrap().bps(), 1000);
    /// assert_eq!(DiscountRate::from_percentage(12.5).unwrap().bps(), 1250);
    /// assert!(DiscountRate::from_percentage(150.0).is_err());
    /// assert!(DiscountRate::from_percentage(-1.0).is_err());
    /// assert!(DiscountRate::from_percentage(33.333).is_err());
    /// ```
    pub fn from_percentage(percent: f64) -> CoreResult<Self> {
        if !percent.is_finite() {
            return Err(CoreError::invalid_discount("discount must be a number"));
        }
        if percent < 0.0 {
            return Err(CoreError::invalid_discount(format!(
                "discount {}% is negative",
                percent
            )));
        }
        if percent > 100.0 {
            return Err(CoreError::invalid_discount(format!(
                "discount {}% exceeds 100%",
                percent
            )));
        }
        whole_bps(percent * 100.0).map(DiscountRate).ok_or_else(|| {
            CoreError::invalid_discount(format!(
                "discount {}% has more than two decimal places",
                percent
            ))
        })
    }

    /// Returns the discount in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the discount as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// No discount.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }
}

/// `scaled` as a whole basis-point count, or `None` when it has a fractional
/// part beyond float noise.
fn whole_bps(scaled: f64) -> Option<u32> {
    const TOLERANCE: f64 = 1e-6;

    let rounded = scaled.round();
    if (scaled - rounded).abs() > TOLERANCE {
        return None;
    }
    Some(rounded as u32)
}

// =============================================================================
// Payment Method
// =============================================================================

#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash at the counter.
    #[default]
    Cash,
    /// UPI transfer (a payment link is printed on the bill).
    Upi,
}

impl PaymentMethod {
    /// Lowercase tag used in the ledger and CSV exports.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Upi => "upi",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "upi" => Ok(PaymentMethod::Upi),
            _ => Err(ValidationError::NotAllowed {
                field: "payment method".to_string(),
                allowed: vec!["cash".to_string(), "upi".to_string()],
            }),
        }
    }
}

// =============================================================================
// Table Status
// =============================================================================

/// Occupancy of a dine-in table. There are no intermediate states.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    #[default]
    Free,
    Occupied,
}

impl TableStatus {
    /// The other state.
    #[inline]
    pub const fn toggled(self) -> Self {
        match self {
            TableStatus::Free => TableStatus::Occupied,
            TableStatus::Occupied => TableStatus::Free,
        }
    }

    #[inline]
    pub const fn is_free(&self) -> bool {
        matches!(self, TableStatus::Free)
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableStatus::Free => f.write_str("Free"),
            TableStatus::Occupied => f.write_str("Occupied"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_fraction() {
        assert_eq!(TaxRate::from_fraction(0.05).unwrap().bps(), 500);
        assert_eq!(TaxRate::from_fraction(0.18).unwrap().bps(), 1800);
        assert_eq!(TaxRate::from_fraction(0.0).unwrap(), TaxRate::zero());
        assert_eq!(TaxRate::from_fraction(1.0).unwrap().bps(), 10_000);
        assert!(TaxRate::from_fraction(f64::NAN).is_err());
        assert!(TaxRate::from_fraction(1.01).is_err());

        let err = TaxRate::from_fraction(0.123456).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
        assert_eq!(TaxRate::from_fraction(0.1234).unwrap().bps(), 1234);
    }

    #[test]
    fn test_discount_from_percentage() {
        assert_eq!(DiscountRate::from_percentage(0.0).unwrap(), DiscountRate::zero());
        assert_eq!(DiscountRate::from_percentage(100.0).unwrap().bps(), 10_000);
        assert!((DiscountRate::from_bps(1250).percentage() - 12.5).abs() < 1e-9);

        let err = DiscountRate::from_percentage(150.0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidDiscount { .. }));
        assert!(DiscountRate::from_percentage(f64::INFINITY).is_err());

        assert_eq!(DiscountRate::from_percentage(33.33).unwrap().bps(), 3333);
        assert_eq!(DiscountRate::from_percentage(0.01).unwrap().bps(), 1);
        let err = DiscountRate::from_percentage(33.333).unwrap_err();
        assert!(matches!(err, CoreError::InvalidDiscount { .. }));
        assert!(DiscountRate::from_percentage(0.005).is_err());
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("cash".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert_eq!(" UPI ".parse::<PaymentMethod>().unwrap(), PaymentMethod::Upi);
        assert!("card".parse::<PaymentMethod>().is_err());
        assert_eq!(PaymentMethod::Upi.to_string(), "upi");
    }

    #[test]
    fn test_table_status_toggle() {
        assert_eq!(TableStatus::default(), TableStatus::Free);
        assert_eq!(TableStatus::Free.toggled(), TableStatus::Occupied);
        assert_eq!(TableStatus::Occupied.toggled(), TableStatus::Free);
        assert_eq!(TableStatus::Occupied.to_string(), "Occupied");
    }

    #[test]
    fn test_serde_tags() {
        assert_eq!(serde_json::to_string(&PaymentMethod::Upi).unwrap(), "\"upi\"");
        assert_eq!(
            serde_json::to_string(&TableStatus::Occupied).unwrap(),
            "\"occupied\""
        );
    }
}
