//! # Sale Records
//!
//! The immutable record a placed order leaves in the sales ledger.
//!
//! ## Snapshot Pattern
//! A record freezes the bill totals and the ordered items at the moment of
//! sale. Later menu changes never alter a recorded sale.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Bill ──────────┐                                                       │
//! │  table (opt) ───┼──► SaleRecord::from_bill ──► SaleRecord ──► ledger   │
//! │  payment ───────┤                              (id, timestamp,          │
//! │  recorded_at ───┘                               items, totals)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::bill::Bill;
use crate::money::Money;
use crate::order::OrderLine;
use crate::types::PaymentMethod;

/// One completed sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleRecord {
    /// UUID v4.
    pub id: String,
    #[ts(as = "String")]
    pub recorded_at: DateTime<Utc>,
    /// Assigned table for dine-in orders.
    pub table_id: Option<String>,
    /// Ordered items at time of sale (frozen).
    pub items: Vec<OrderLine>,
    pub subtotal_cents: i64,
    pub discount_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
    pub payment_method: PaymentMethod,
}

impl SaleRecord {
    /// Shapes a record from a computed bill. A fresh id is generated.
    pub fn from_bill(
        bill: &Bill,
        table_id: Option<String>,
        payment_method: PaymentMethod,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        SaleRecord {
            id: Uuid::new_v4().to_string(),
            recorded_at,
            table_id,
            items: bill
                .lines
                .iter()
                .map(|l| OrderLine {
                    item: l.item.clone(),
                    quantity: l.quantity,
                })
                .collect(),
            subtotal_cents: bill.subtotal.cents(),
            discount_cents: bill.discount.cents(),
            tax_cents: bill.tax.cents(),
            total_cents: bill.total.cents(),
            payment_method,
        }
    }

    /// Items as a JSON array, the form the ledger stores them in.
    pub fn items_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.items)
    }

    /// Parses items stored by [`SaleRecord::items_json`].
    pub fn items_from_json(json: &str) -> serde_json::Result<Vec<OrderLine>> {
        serde_json::from_str(json)
    }

    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_cents(self.discount_cents)
    }

    #[inline]
    pub fn tax(&self) -> Money {
        Money::from_cents(self.tax_cents)
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    pub fn is_dine_in(&self) -> bool {
        self.table_id.is_some()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
