//! # Register State
//!
//! The single owner of everything a billing session mutates.
//!
//! ## Place Order Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Register::place_order                               │
//! │                                                                         │
//! │  1. order.snapshot()                                                    │
//! │  2. calculate_bill(snapshot, catalog, discount) ── error? ──► abort     │
//! │  3. dine-in? assign a free table on a COPY of the registry              │
//! │                                        └── NoFreeTable? ──► abort       │
//! │  4. SaleRecord::from_bill(...)                                          │
//! │  5. ledger.append(&record, &copy) ──────── error? ──► abort             │
//! │  6. commit: registry copy, sales.push, order.reset, discount = 0        │
//! │                                                                         │
//! │  Any abort leaves order, tables, discount and sales untouched.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All mutation goes through `&mut Register`, so a place-order call is one
//! critical section for the single terminal that owns the register.

use chrono::Utc;
use tracing::{debug, info};

use bhojan_core::{
    calculate_bill, Bill, CoreError, DiscountRate, MenuCatalog, OrderAccumulator, PaymentMethod,
    SaleRecord, TableRegistry, TableStatus,
};

use crate::error::{RegisterError, RegisterResult};
use crate::ledger::SaleLedger;

/// Outcome of a successful [`Register::place_order`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    pub bill: Bill,
    pub sale: SaleRecord,
}

/// Billing session state: catalog, current order, discount, tables and the
/// sales recorded so far.
#[derive(Debug, Clone)]
pub struct Register {
    catalog: MenuCatalog,
    order: OrderAccumulator,
    discount: DiscountRate,
    tables: TableRegistry,
    sales: Vec<SaleRecord>,
}

impl Register {
    /// A register with an empty order and no recorded sales.
    pub fn new(catalog: MenuCatalog, tables: TableRegistry) -> Self {
        Register {
            catalog,
            order: OrderAccumulator::new(),
            discount: DiscountRate::zero(),
            tables,
            sales: Vec::new(),
        }
    }

    /// Seeds the in-memory sales list with sales recorded earlier, oldest
    /// first.
    pub fn with_sales(mut self, sales: Vec<SaleRecord>) -> Self {
        self.sales = sales;
        self
    }

    // =========================================================================
    // Order
    // =========================================================================

    /// Adds `quantity` of a catalog item to the current order.
    ///
    /// ## Errors
    /// - `UnknownItem` when `name` is not on the menu
    /// - `InvalidQuantity` when `quantity <= 0`
    pub fn add_item(&mut self, name: &str, quantity: i64) -> RegisterResult<()> {
        if !self.catalog.contains(name) {
            return Err(CoreError::UnknownItem(name.to_string()).into());
        }

        self.order.add_item(name, quantity)?;
        debug!(item = %name, quantity, total = self.order.quantity_of(name), "Item added");
        Ok(())
    }

    /// Removes an item's line. Returns whether anything was removed.
    pub fn remove_item(&mut self, name: &str) -> bool {
        let removed = self.order.remove_item(name);
        if removed {
            debug!(item = %name, "Item removed");
        }
        removed
    }

    /// Discards the current order.
    pub fn clear_order(&mut self) {
        self.order.reset();
    }

    /// Sets the whole-bill discount for the next order.
    ///
    /// ## Errors
    /// `InvalidDiscount` above 100%; the current discount is kept.
    pub fn set_discount(&mut self, discount: DiscountRate) -> RegisterResult<()> {
        if discount.bps() > bhojan_core::BPS_PER_UNIT {
            return Err(CoreError::invalid_discount(format!(
                "discount {}% exceeds 100%",
                discount.percentage()
            ))
            .into());
        }
        self.discount = discount;
        Ok(())
    }

    pub fn reset_discount(&mut self) {
        self.discount = DiscountRate::zero();
    }

    /// The bill the current order would produce, without placing it.
    pub fn preview_bill(&self) -> RegisterResult<Bill> {
        Ok(calculate_bill(
            &self.order.snapshot(),
            &self.catalog,
            self.discount,
        )?)
    }

    /// Bills the current order and records the sale.
    ///
    /// ## Errors
    /// - `EmptyOrder` when no items were added
    /// - any bill calculation error
    /// - `NoFreeTable` for dine-in when every table is occupied
    /// - the ledger's error when the append fails
    ///
    /// On error nothing in the register changes.
    pub async fn place_order<L: SaleLedger>(
        &mut self,
        dine_in: bool,
        payment_method: PaymentMethod,
        ledger: &L,
    ) -> RegisterResult<PlacedOrder> {
        if self.order.is_empty() {
            return Err(RegisterError::EmptyOrder);
        }

        let snapshot = self.order.snapshot();
        let bill = calculate_bill(&snapshot, &self.catalog, self.discount)?;

        let mut tables = self.tables.clone();
        let table_id = if dine_in {
            Some(tables.assign_free_table()?)
        } else {
            None
        };

        let sale = SaleRecord::from_bill(&bill, table_id, payment_method, Utc::now());
        ledger.append(&sale, &tables).await?;

        info!(
            id = %sale.id,
            table = ?sale.table_id,
            items = self.order.total_quantity(),
            payment = %payment_method,
            total = %bill.total,
            "Order placed"
        );

        self.tables = tables;
        self.sales.push(sale.clone());
        self.order.reset();
        self.reset_discount();

        Ok(PlacedOrder { bill, sale })
    }

    // =========================================================================
    // Tables
    // =========================================================================

    /// Flips a table between Free and Occupied.
    pub fn toggle_table(&mut self, id: &str) -> RegisterResult<TableStatus> {
        let status = self.tables.toggle(id)?;
        info!(table = %id, %status, "Table toggled");
        Ok(status)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn catalog(&self) -> &MenuCatalog {
        &self.catalog
    }

    pub fn order(&self) -> &OrderAccumulator {
        &self.order
    }

    pub fn discount(&self) -> DiscountRate {
        self.discount
    }

    pub fn tables(&self) -> &TableRegistry {
        &self.tables
    }

    /// Sales in the order they were recorded.
    pub fn sales(&self) -> &[SaleRecord] {
        &self.sales
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
