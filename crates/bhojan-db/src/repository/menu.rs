//! # Menu Repository
//!
//! Database operations for menu items.
//!
//! ## Read/Write Split
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Writes take a validated MenuEntry:                                     │
//! │     insert_ignore()  existing names are kept (menu CSV import)          │
//! │                                                                         │
//! │  Reads return raw MenuRow values:                                       │
//! │     list_all() ──► MenuCatalog::from_rows() validates them again        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use bhojan_core::{MenuEntry, MenuRow, Money, TaxRate};

/// One `menu` table row as stored.
#[derive(Debug, sqlx::FromRow)]
struct MenuRecord {
    itemname: String,
    price_cents: i64,
    category: String,
    tax_rate_bps: i64,
}

impl TryFrom<MenuRecord> for MenuRow {
    type Error = DbError;

    fn try_from(record: MenuRecord) -> DbResult<Self> {
        let tax_rate_bps = u32::try_from(record.tax_rate_bps)
            .map_err(|e| DbError::corrupt("Menu item", &record.itemname, e))?;

        Ok(MenuRow {
            name: record.itemname,
            price: Money::from_cents(record.price_cents),
            category: record.category,
            tax_rate: TaxRate::from_bps(tax_rate_bps),
        })
    }
}

/// Repository for menu database operations.
#[derive(Debug, Clone)]
pub struct MenuRepository {
    pool: SqlitePool,
}

impl MenuRepository {
    /// Creates a new MenuRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MenuRepository { pool }
    }

    /// Every menu row, ordered by category then name.
    pub async fn list_all(&self) -> DbResult<Vec<MenuRow>> {
        let records: Vec<MenuRecord> = sqlx::query_as(
            r#"
            SELECT itemname, price_cents, category, tax_rate_bps
            FROM menu
            ORDER BY category, itemname
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = records.len(), "Loaded menu rows");
        records.into_iter().map(MenuRow::try_from).collect()
    }

    /// Inserts an item unless the name already exists.
    ///
    /// ## Returns
    /// `true` if a row was inserted, `false` if the name was taken.
    pub async fn insert_ignore(&self, entry: &MenuEntry) -> DbResult<bool> {
        debug!(item = %entry.name, "Inserting menu item (ignore existing)");

        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO menu (itemname, price_cents, category, tax_rate_bps)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&entry.name)
        .bind(entry.price.cents())
        .bind(&entry.category)
        .bind(entry.tax_rate.bps())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Counts menu items.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
