//! # Command Handlers
//!
//! Maps each CLI command onto register and storage operations.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Session::open                                                          │
//! │    SQLite ──► menu rows ──► MenuCatalog                                 │
//! │    SQLite ──► table status ──► TableRegistry (config table count)       │
//! │    SQLite ──► recorded sales ──► Register::with_sales                   │
//! │                                                                         │
//! │  Session::execute(command) ──► output text for stdout                   │
//! │    order / replay --record ──► DatabaseLedger (SQLite + sales CSV)      │
//! │    dine-in order ──► sale and table status in one SQLite transaction    │
//! │    toggle ──► table status saved back to SQLite                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Local;
use std::fmt::Write as _;
use std::path::Path;
use tracing::{debug, info};

use bhojan_core::payment_link::upi_link;
use bhojan_core::receipt::{format_bill_text, ReceiptContext};
use bhojan_core::{DiscountRate, MenuCatalog, PaymentMethod, TableRegistry};
use bhojan_db::{export_sales_csv, import_menu_csv, Database, DbConfig};

use crate::cli::{Command, MenuCommand, OrderArgs, SalesCommand, TablesCommand};
use crate::config::RegisterConfig;
use crate::error::{RegisterError, RegisterResult};
use crate::ledger::DatabaseLedger;
use crate::register::{PlacedOrder, Register};
use crate::samples::{SampleBill, load_sample_bills, preview_sample_bills, replay_sample_bills};

/// An open database plus the register state loaded from it.
pub struct Session {
    config: RegisterConfig,
    db: Database,
    register: Register,
}

impl Session {
    /// Opens the configured database and loads the register from it.
    pub async fn open(config: RegisterConfig) -> RegisterResult<Self> {
        let path = config.database_path()?;
        info!(path = %path.display(), "Opening database");
        let db = Database::new(DbConfig::new(path).busy_timeout(config.lock_wait())).await?;
        Self::with_database(config, db).await
    }

    /// Loads the register from an already open database.
    pub async fn with_database(config: RegisterConfig, db: Database) -> RegisterResult<Self> {
        let catalog = MenuCatalog::from_rows(db.menu().list_all().await?)?;

        let mut tables = TableRegistry::with_count(config.tables.count);
        db.tables().restore_into(&mut tables).await?;

        let sales = db.sales().list_all().await?;
        debug!(
            items = catalog.len(),
            tables = tables.len(),
            sales = sales.len(),
            "Register loaded"
        );

        let register = Register::new(catalog, tables).with_sales(sales);
        Ok(Session {
            config,
            db,
            register,
        })
    }

    pub fn register(&self) -> &Register {
        &self.register
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Runs one command and returns what it prints.
    pub async fn execute(&mut self, command: Command) -> RegisterResult<String> {
        match command {
            Command::Menu(MenuCommand::List) => Ok(self.menu_list()),
            Command::Menu(MenuCommand::Import { path }) => self.menu_import(&path).await,
            Command::Order(args) => self.order(args).await,
            Command::Tables(TablesCommand::List) => Ok(self.tables_list()),
            Command::Tables(TablesCommand::Toggle { id }) => self.tables_toggle(&id).await,
            Command::Sales(SalesCommand::List) => self.sales_list().await,
            Command::Sales(SalesCommand::Export { path }) => self.sales_export(&path),
            Command::Replay { path, record } => self.replay(&path, record).await,
        }
    }

    fn ledger(&self) -> DatabaseLedger {
        DatabaseLedger::new(self.db.sales(), self.config.storage.sales_csv.clone())
    }

    // =========================================================================
    // Menu
    // =========================================================================

    fn menu_list(&self) -> String {
        let catalog = self.register.catalog();
        if catalog.is_empty() {
            return "Menu is empty. Import one with `bhojan menu import <csv>`.".to_string();
        }

        let sym = &self.config.store.currency_symbol;
        let mut out = String::new();
        for (category, entries) in catalog.by_category() {
            let _ = writeln!(out, "{}", category);
            for entry in entries {
                let _ = writeln!(
                    out,
                    "  {:24}{}{:>8}  GST {}%",
                    entry.name,
                    sym,
                    entry.price.to_string(),
                    entry.tax_rate.bps() as f64 / 100.0
                );
            }
        }
        out.trim_end().to_string()
    }

    async fn menu_import(&mut self, path: &Path) -> RegisterResult<String> {
        let summary = import_menu_csv(&self.db.menu(), path).await?;
        self.register = self.reloaded_register().await?;

        Ok(format!(
            "Imported {} new item(s), {} already on the menu, {} rejected.",
            summary.inserted, summary.existing, summary.rejected
        ))
    }

    async fn reloaded_register(&self) -> RegisterResult<Register> {
        let catalog = MenuCatalog::from_rows(self.db.menu().list_all().await?)?;
        Ok(Register::new(catalog, self.register.tables().clone())
            .with_sales(self.register.sales().to_vec()))
    }

    // =========================================================================
    // Orders
    // =========================================================================

    async fn order(&mut self, args: OrderArgs) -> RegisterResult<String> {
        self.register.clear_order();
        for (name, quantity) in &args.items {
            self.register.add_item(name, *quantity)?;
        }
        self.register
            .set_discount(DiscountRate::from_percentage(args.discount)?)?;

        let ledger = self.ledger();
        let placed = self
            .register
            .place_order(args.dine_in, args.payment, &ledger)
            .await?;

        let receipt = self.receipt(&placed);
        if let Some(path) = &args.save {
            std::fs::write(path, format!("{}\n", receipt))
                .map_err(|e| RegisterError::file(path, e))?;
            info!(path = %path.display(), "Bill saved");
        }

        Ok(receipt)
    }

    /// Receipt text for a placed order, with a UPI link for UPI payments.
    pub fn receipt(&self, placed: &PlacedOrder) -> String {
        let upi = match placed.sale.payment_method {
            PaymentMethod::Upi => Some(upi_link(&self.config.upi_payee(), placed.bill.total)),
            PaymentMethod::Cash => None,
        };

        let ctx = ReceiptContext {
            store_name: self.config.store.name.clone(),
            currency_symbol: self.config.store.currency_symbol.clone(),
            printed_at: placed.sale.recorded_at.with_timezone(&Local).naive_local(),
            table_id: placed.sale.table_id.clone(),
            payment_method: placed.sale.payment_method,
            upi_link: upi,
        };

        format_bill_text(&placed.bill, &ctx)
    }

    async fn replay(&mut self, path: &Path, record: bool) -> RegisterResult<String> {
        let bills = load_sample_bills(path)?;
        if !record {
            return Ok(self.preview(bills));
        }

        let ledger = self.ledger();
        let summary = replay_sample_bills(&mut self.register, bills, &ledger).await?;

        let sym = &self.config.store.currency_symbol;
        let mut out = String::new();
        for placed in &summary.placed {
            let _ = writeln!(out, "{}  {}{}", placed.sale.id, sym, placed.bill.total);
        }
        for (index, err) in &summary.skipped {
            let _ = writeln!(out, "bill #{} skipped: {}", index + 1, err);
        }
        let _ = write!(
            out,
            "Placed {} sample bill(s), skipped {}.",
            summary.placed.len(),
            summary.skipped.len()
        );
        Ok(out)
    }

    fn preview(&mut self, bills: Vec<SampleBill>) -> String {
        let sym = &self.config.store.currency_symbol;
        let mut out = String::new();
        let mut billed = 0;
        for (index, result) in preview_sample_bills(&mut self.register, bills) {
            match result {
                Ok(bill) => {
                    billed += 1;
                    let _ = writeln!(out, "bill #{}  {}{}", index + 1, sym, bill.total);
                }
                Err(e) => {
                    let _ = writeln!(out, "bill #{} skipped: {}", index + 1, e);
                }
            }
        }
        let _ = write!(
            out,
            "Previewed {} sample bill(s), nothing recorded. Use --record to place them.",
            billed
        );
        out
    }

    // =========================================================================
    // Tables
    // =========================================================================

    fn tables_list(&self) -> String {
        let tables = self.register.tables();
        let mut out = String::new();
        for table in tables.iter() {
            let _ = writeln!(out, "{:6}{}", table.id, table.status);
        }
        let _ = write!(out, "{} of {} free", tables.free_count(), tables.len());
        out
    }

    async fn tables_toggle(&mut self, id: &str) -> RegisterResult<String> {
        let status = self.register.toggle_table(id)?;
        self.db.tables().save_all(self.register.tables()).await?;
        Ok(format!("{} is now {}", id, status))
    }

    // =========================================================================
    // Sales
    // =========================================================================

    async fn sales_list(&self) -> RegisterResult<String> {
        let sales = self.register.sales();
        if sales.is_empty() {
            return Ok("No sales recorded yet.".to_string());
        }

        let sym = &self.config.store.currency_symbol;
        let mut out = String::new();
        for sale in sales {
            let recorded = sale.recorded_at.with_timezone(&Local);
            let _ = writeln!(
                out,
                "{}  {}  {:8}{:5}{}{:>9}",
                recorded.format("%Y-%m-%d %H:%M"),
                sale.id,
                sale.table_id.as_deref().unwrap_or("-"),
                sale.payment_method.as_str(),
                sym,
                sale.total().to_string()
            );
        }
        let ledger = self.db.sales();
        let count = ledger.count().await?;
        let takings = ledger.total_takings_cents().await?;
        let _ = write!(
            out,
            "{} sale(s), takings {}{}",
            count,
            sym,
            bhojan_core::Money::from_cents(takings)
        );
        Ok(out)
    }

    fn sales_export(&self, path: &Path) -> RegisterResult<String> {
        let written = export_sales_csv(self.register.sales(), path)?;
        Ok(format!("Exported {} sale(s) to {}", written, path.display()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
