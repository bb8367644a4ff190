//! # Sale Ledger Sinks
//!
//! Where the register sends a finalized [`SaleRecord`].
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Register::place_order ──► SaleLedger::append(&record, &tables)         │
//! │                                   │                                     │
//! │                 ┌─────────────────┴──────────────────┐                  │
//! │                 ▼                                    ▼                  │
//! │          SaleRepository                     DatabaseLedger              │
//! │          (SQLite only)                      (SQLite + sales CSV)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An append either records the sale or returns an error; there are no
//! retries. `tables` is the registry as it stands once the sale is seated;
//! a sink that stores table occupancy writes it in the same step as the
//! sale.

use std::path::PathBuf;
use tracing::warn;

use bhojan_core::{SaleRecord, TableRegistry};
use bhojan_db::{append_sale_csv, SaleRepository};

use crate::error::RegisterResult;

/// Append-only destination for completed sales.
#[allow(async_fn_in_trait)]
pub trait SaleLedger {
    async fn append(&self, sale: &SaleRecord, tables: &TableRegistry) -> RegisterResult<()>;
}

impl SaleLedger for SaleRepository {
    async fn append(&self, sale: &SaleRecord, tables: &TableRegistry) -> RegisterResult<()> {
        if sale.is_dine_in() {
            self.append_with_tables(sale, tables).await?;
        } else {
            SaleRepository::append(self, sale).await?;
        }
        Ok(())
    }
}

/// The production ledger: the SQLite sales table, plus a running sales
/// CSV when one is configured.
///
/// The sale row and the seated table's status commit in one transaction.
/// The database is authoritative; a CSV append failure is logged and does
/// not fail the sale.
#[derive(Debug, Clone)]
pub struct DatabaseLedger {
    sales: SaleRepository,
    sales_csv: Option<PathBuf>,
}

impl DatabaseLedger {
    pub fn new(sales: SaleRepository, sales_csv: Option<PathBuf>) -> Self {
        DatabaseLedger { sales, sales_csv }
    }
}

impl SaleLedger for DatabaseLedger {
    async fn append(&self, sale: &SaleRecord, tables: &TableRegistry) -> RegisterResult<()> {
        SaleLedger::append(&self.sales, sale, tables).await?;

        if let Some(path) = &self.sales_csv {
            if let Err(e) = append_sale_csv(sale, path) {
                warn!(id = %sale.id, path = %path.display(), error = %e, "Sales CSV append failed");
            }
        }

        Ok(())
    }
}
