//! # bhojan-core: Pure Billing Logic for Bhojan POS
//!
//! This crate is the **heart** of Bhojan POS. It contains the order, bill
//! and table logic as pure functions and plain data with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bhojan POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Register (apps/register)                     │   │
//! │  │    add item ──► place order ──► show bill ──► record sale       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bhojan-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────────┐   │   │
//! │  │   │ catalog  │  │  order   │  │   bill   │  │   tables     │   │   │
//! │  │   │MenuEntry │  │ OrderAcc │  │ Bill     │  │ TableRegistry│   │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────────┘   │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────────┐                 │   │
//! │  │   │  ledger  │  │ receipt  │  │ payment_link │                 │   │
//! │  │   │SaleRecord│  │ bill text│  │  upi://pay   │                 │   │
//! │  │   └──────────┘  └──────────┘  └──────────────┘                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    bhojan-db (Database Layer)                   │   │
//! │  │              menu rows, sale ledger, table status               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (TaxRate, DiscountRate, PaymentMethod, TableStatus)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - Validated menu catalog
//! - [`order`] - Order accumulator and snapshots
//! - [`bill`] - Bill calculator
//! - [`tables`] - Dine-in table registry
//! - [`ledger`] - Sale record shaping
//! - [`receipt`] - Plain text bill export
//! - [`payment_link`] - UPI deep links
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use bhojan_core::catalog::{MenuCatalog, MenuRow};
//! use bhojan_core::order::OrderAccumulator;
//! use bhojan_core::bill::calculate_bill;
//! use bhojan_core::types::DiscountRate;
//!
//! let catalog = MenuCatalog::from_rows(vec![
//!     MenuRow::new("Tea", 1000, "Drinks", 500), // ₹10.00 at 5%
//! ]).unwrap();
//!
//! let mut order = OrderAccumulator::new();
//! order.add_item("Tea", 2).unwrap();
//!
//! let bill = calculate_bill(&order.snapshot(), &catalog, DiscountRate::zero()).unwrap();
//! assert_eq!(bill.subtotal.cents(), 2000);
//! assert_eq!(bill.tax.cents(), 100);
//! assert_eq!(bill.total.cents(), 2100);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bill;
pub mod catalog;
pub mod error;
pub mod ledger;
pub mod money;
pub mod order;
pub mod payment_link;
pub mod receipt;
pub mod tables;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use bill::{calculate_bill, Bill, BillLine};
pub use catalog::{MenuCatalog, MenuEntry, MenuRow};
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::SaleRecord;
pub use money::Money;
pub use order::{OrderAccumulator, OrderLine, OrderSnapshot};
pub use tables::{Table, TableRegistry};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of dine-in tables when nothing else is configured.
pub const DEFAULT_TABLE_COUNT: usize = 6;

/// Basis points in 100%.
pub const BPS_PER_UNIT: u32 = 10_000;
