//! # Order Accumulator
//!
//! Holds the in-progress order: item name → requested quantity.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operator Action          Accumulator              State Change         │
//! │  ───────────────          ───────────              ────────────         │
//! │                                                                         │
//! │  Add "Tea" x2 ───────────► add_item() ───────────► Tea: 2               │
//! │  Add "Tea" x1 ───────────► add_item() ───────────► Tea: 3 (additive)    │
//! │  Add "Tea" x0 ───────────► add_item() ───────────► InvalidQuantity      │
//! │  Remove "Tea" ───────────► remove_item() ────────► line gone            │
//! │  Place order ────────────► snapshot() ───────────► frozen copy          │
//! │  Sale recorded ──────────► reset() ──────────────► empty                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines keep the order in which items were first added; that order flows
//! through the bill and onto the printed receipt.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

/// One item and its requested quantity. Quantity is always positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderLine {
    pub item: String,
    pub quantity: i64,
}

/// The mutable, in-progress order.
///
/// ## Invariants
/// - Items are unique (adding an existing item increases its quantity)
/// - Every stored quantity is > 0
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderAccumulator {
    lines: Vec<OrderLine>,
}

impl OrderAccumulator {
    /// Creates an empty order.
    pub fn new() -> Self {
        OrderAccumulator::default()
    }

    /// Adds `quantity` of `name`, merging with an existing line.
    ///
    /// ## Errors
    /// `InvalidQuantity` when `quantity <= 0`; the order is left untouched.
    ///
    /// ## Example
    /// ```rust
    /// use bhojan_core::order::OrderAccumulator;
    ///
    /// let mut order = OrderAccumulator::new();
    /// order.add_item("Tea", 2).unwrap();
    /// order.add_item("Tea", 1).unwrap();
    /// assert_eq!(order.quantity_of("Tea"), 3);
    /// assert!(order.add_item("Tea", 0).is_err());
    /// ```
    pub fn add_item(&mut self, name: &str, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            return Err(CoreError::InvalidQuantity {
                item: name.to_string(),
                quantity,
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.item == name) {
            line.quantity = line
                .quantity
                .checked_add(quantity)
                .ok_or(CoreError::AmountOverflow("quantity"))?;
            return Ok(());
        }

        self.lines.push(OrderLine {
            item: name.to_string(),
            quantity,
        });
        Ok(())
    }

    /// Removes the whole line for `name`. Returns whether a line was removed;
    /// removing an absent item is not an error.
    pub fn remove_item(&mut self, name: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.item != name);
        self.lines.len() != before
    }

    /// Immutable copy of the current lines.
    pub fn snapshot(&self) -> OrderSnapshot {
        OrderSnapshot {
            lines: self.lines.clone(),
        }
    }

    /// Clears every line.
    pub fn reset(&mut self) {
        self.lines.clear();
    }

    /// Quantity currently ordered for `name` (0 if absent).
    pub fn quantity_of(&self, name: &str) -> i64 {
        self.lines
            .iter()
            .find(|l| l.item == name)
            .map(|l| l.quantity)
            .unwrap_or(0)
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all quantities.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

/// A frozen copy of an order, used for billing and for the sale record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderSnapshot {
    lines: Vec<OrderLine>,
}

impl OrderSnapshot {
    /// Builds a snapshot from (item, quantity) pairs with the same rules as
    /// [`OrderAccumulator::add_item`]: repeated items are summed and
    /// non-positive quantities are rejected.
    pub fn try_from_pairs<I, S>(pairs: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: AsRef<str>,
    {
        let mut acc = OrderAccumulator::new();
        for (item, quantity) in pairs {
            acc.add_item(item.as_ref(), quantity)?;
        }
        Ok(acc.snapshot())
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_new_and_existing() {
        let mut order = OrderAccumulator::new();
        order.add_item("Tea", 2).unwrap();
        order.add_item("Coffee", 1).unwrap();
        order.add_item("Tea", 3).unwrap();

        assert_eq!(order.len(), 2);
        assert_eq!(order.quantity_of("Tea"), 5);
        assert_eq!(order.quantity_of("Coffee"), 1);
        assert_eq!(order.total_quantity(), 6);

        // First-added order is preserved
        let names: Vec<_> = order.lines().iter().map(|l| l.item.as_str()).collect();
        assert_eq!(names, vec!["Tea", "Coffee"]);
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        let mut order = OrderAccumulator::new();
        order.add_item("Tea", 1).unwrap();

        for bad in [0, -1, -100] {
            let err = order.add_item("Tea", bad).unwrap_err();
            assert_eq!(
                err,
                CoreError::InvalidQuantity {
                    item: "Tea".to_string(),
                    quantity: bad,
                }
            );
        }

        assert!(order.add_item("Coffee", 0).is_err());
        assert_eq!(order.quantity_of("Tea"), 1);
        assert_eq!(order.len(), 1);
    }

    #[test]
    fn test_remove_item() {
        let mut order = OrderAccumulator::new();
        order.add_item("Tea", 2).unwrap();

        assert!(order.remove_item("Tea"));
        assert!(order.is_empty());

        // Absent item is a no-op
        assert!(!order.remove_item("Tea"));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut order = OrderAccumulator::new();
        order.add_item("Tea", 2).unwrap();

        let snapshot = order.snapshot();
        order.add_item("Tea", 5).unwrap();
        order.add_item("Coffee", 1).unwrap();
        order.reset();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.lines()[0].quantity, 2);
        assert!(order.is_empty());
    }

    #[test]
    fn test_snapshot_from_pairs() {
        let snapshot =
            OrderSnapshot::try_from_pairs(vec![("Tea", 1), ("Coffee", 2), ("Tea", 1)]).unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.lines()[0].quantity, 2);

        assert!(OrderSnapshot::try_from_pairs(vec![("Tea", 0)]).is_err());
    }
}
