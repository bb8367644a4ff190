//! # CSV Import / Export
//!
//! Menu CSV import and sales report CSV files.
//!
//! ## Menu CSV
//! ```text
//! itemname,price,category,gst
//! Masala Dosa,80.00,Breakfast,0.05
//! Filter Coffee,25,Drinks,
//! ```
//! - `price` is a decimal in rupees (at most 2 decimals)
//! - `gst` is a fraction in [0, 1]; blank or missing means 0.05
//! - Malformed rows are skipped with a warning; names already on the menu
//!   are kept as they are
//!
//! ## Sales CSV
//! ```text
//! datetime,table,items,subtotal,discount,gst,total,payment
//! 2024-03-01T12:30:00+00:00,T1,"[{""item"":""Tea"",""quantity"":2}]",20.00,0.00,1.00,21.00,cash
//! ```
//! Column names are the ones existing sales reports already use. The sale id
//! stays in SQLite only.

use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::repository::menu::MenuRepository;
use bhojan_core::{MenuEntry, MenuRow, Money, SaleRecord, TaxRate};

/// GST applied when a menu row leaves the column blank.
pub const DEFAULT_GST_BPS: u32 = 500;

// =============================================================================
// Menu Import
// =============================================================================

#[derive(Debug, Deserialize)]
struct MenuCsvRow {
    itemname: String,
    price: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    gst: Option<String>,
}

impl MenuCsvRow {
    fn into_entry(self) -> Result<MenuEntry, String> {
        let price = Money::parse_decimal(&self.price).map_err(|e| e.to_string())?;

        let tax_rate = match self.gst.as_deref().map(str::trim) {
            None | Some("") => TaxRate::from_bps(DEFAULT_GST_BPS),
            Some(raw) => {
                let fraction: f64 = raw
                    .parse()
                    .map_err(|_| format!("gst '{}' is not a number", raw))?;
                TaxRate::from_fraction(fraction).map_err(|e| e.to_string())?
            }
        };

        MenuEntry::try_from_row(MenuRow {
            name: self.itemname,
            price,
            category: self.category,
            tax_rate,
        })
        .map_err(|e| e.to_string())
    }
}

/// Outcome of a menu import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// New items written.
    pub inserted: usize,
    /// Valid rows whose name was already on the menu.
    pub existing: usize,
    /// Malformed rows that were skipped.
    pub rejected: usize,
}

/// Imports a menu CSV into the `menu` table.
pub async fn import_menu_csv(menu: &MenuRepository, path: &Path) -> DbResult<ImportSummary> {
    info!(path = %path.display(), "Importing menu CSV");

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    let mut summary = ImportSummary::default();

    for (index, result) in reader.deserialize::<MenuCsvRow>().enumerate() {
        // Line 1 is the header
        let line = index + 2;

        let entry = match result.map_err(|e| e.to_string()).and_then(MenuCsvRow::into_entry) {
            Ok(entry) => entry,
            Err(reason) => {
                warn!(line, reason = %reason, "Skipping menu row");
                summary.rejected += 1;
                continue;
            }
        };

        if menu.insert_ignore(&entry).await? {
            summary.inserted += 1;
        } else {
            debug!(item = %entry.name, "Menu item already exists");
            summary.existing += 1;
        }
    }

    info!(
        inserted = summary.inserted,
        existing = summary.existing,
        rejected = summary.rejected,
        "Menu import finished"
    );
    Ok(summary)
}

// =============================================================================
// Sales Export
// =============================================================================

#[derive(Debug, Serialize)]
struct SalesCsvRow<'a> {
    datetime: String,
    table: &'a str,
    items: String,
    subtotal: String,
    discount: String,
    gst: String,
    total: String,
    payment: &'a str,
}

impl<'a> SalesCsvRow<'a> {
    fn from_record(sale: &'a SaleRecord) -> DbResult<Self> {
        Ok(SalesCsvRow {
            datetime: sale.recorded_at.to_rfc3339(),
            table: sale.table_id.as_deref().unwrap_or(""),
            items: sale.items_json()?,
            subtotal: sale.subtotal().to_string(),
            discount: sale.discount().to_string(),
            gst: sale.tax().to_string(),
            total: sale.total().to_string(),
            payment: sale.payment_method.as_str(),
        })
    }
}

/// Writes every sale to a new CSV file (overwriting), returning the row count.
pub fn export_sales_csv(sales: &[SaleRecord], path: &Path) -> DbResult<usize> {
    let mut writer = csv::Writer::from_path(path)?;

    for sale in sales {
        writer.serialize(SalesCsvRow::from_record(sale)?)?;
    }
    writer.flush().map_err(|e| DbError::file(path, e))?;

    info!(path = %path.display(), count = sales.len(), "Exported sales CSV");
    Ok(sales.len())
}

/// Appends one sale to a running sales CSV, writing the header first when
/// the file is new or empty.
pub fn append_sale_csv(sale: &SaleRecord, path: &Path) -> DbResult<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| DbError::file(path, e))?;
    let is_empty = file
        .metadata()
        .map_err(|e| DbError::file(path, e))?
        .len()
        == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(is_empty)
        .from_writer(file);
    writer.serialize(SalesCsvRow::from_record(sale)?)?;
    writer.flush().map_err(|e| DbError::file(path, e))?;

    debug!(id = %sale.id, path = %path.display(), "Appended sale to CSV");
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
