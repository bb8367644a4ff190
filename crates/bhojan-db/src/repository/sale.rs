//! # Sale Repository
//!
//! The append-only sales ledger.
//!
//! ## Ledger Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  append()             one INSERT per sale; never UPDATE or DELETE       │
//! │  append_with_tables() the INSERT plus table statuses, one transaction  │
//! │  list_all()           oldest first (recorded_at, then insertion order)  │
//! │                                                                         │
//! │  Ordered items are stored as a JSON array in items_json:                │
//! │    [{"item":"Tea","quantity":2},{"item":"Idli","quantity":1}]           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::table::{stored_status, write_statuses};
use bhojan_core::{PaymentMethod, SaleRecord, TableRegistry, TableStatus};

/// One `sales` row as stored.
#[derive(Debug, sqlx::FromRow)]
struct SaleRow {
    id: String,
    recorded_at: DateTime<Utc>,
    table_id: Option<String>,
    items_json: String,
    subtotal_cents: i64,
    discount_cents: i64,
    tax_cents: i64,
    total_cents: i64,
    payment_method: PaymentMethod,
}

impl TryFrom<SaleRow> for SaleRecord {
    type Error = DbError;

    fn try_from(row: SaleRow) -> DbResult<Self> {
        let items = SaleRecord::items_from_json(&row.items_json)
            .map_err(|e| DbError::corrupt("Sale", &row.id, e))?;

        Ok(SaleRecord {
            id: row.id,
            recorded_at: row.recorded_at,
            table_id: row.table_id,
            items,
            subtotal_cents: row.subtotal_cents,
            discount_cents: row.discount_cents,
            tax_cents: row.tax_cents,
            total_cents: row.total_cents,
            payment_method: row.payment_method,
        })
    }
}

const SELECT_SALES: &str = r#"
    SELECT
        id, recorded_at, table_id, items_json,
        subtotal_cents, discount_cents, tax_cents, total_cents,
        payment_method
    FROM sales
"#;

/// Repository for the sales ledger.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Appends one sale.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - a sale with this id exists
    pub async fn append(&self, sale: &SaleRecord) -> DbResult<()> {
        let mut conn = self.pool.acquire().await?;
        insert_sale(&mut conn, sale).await
    }

    /// Appends a sale and, for a dine-in sale, stores the table statuses
    /// that seating it produced. Both writes commit together or not at all.
    ///
    /// ## Returns
    /// * `Err(DbError::TableOccupied)` - the sale's table is already stored
    ///   as occupied (seated by another register since `tables` was loaded)
    /// * `Err(DbError::UniqueViolation)` - a sale with this id exists
    pub async fn append_with_tables(
        &self,
        sale: &SaleRecord,
        tables: &TableRegistry,
    ) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;
        insert_sale(&mut tx, sale).await?;

        if let Some(table_id) = &sale.table_id {
            if stored_status(&mut tx, table_id).await? == Some(TableStatus::Occupied) {
                return Err(DbError::TableOccupied(table_id.clone()));
            }
            write_statuses(&mut tx, tables).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Every recorded sale, oldest first.
    pub async fn list_all(&self) -> DbResult<Vec<SaleRecord>> {
        let rows: Vec<SaleRow> =
            sqlx::query_as(&format!("{} ORDER BY recorded_at, rowid", SELECT_SALES))
                .fetch_all(&self.pool)
                .await?;

        debug!(count = rows.len(), "Loaded sales");
        rows.into_iter().map(SaleRecord::try_from).collect()
    }

    /// Counts recorded sales.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Sum of all sale totals in paise.
    pub async fn total_takings_cents(&self) -> DbResult<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(total_cents), 0) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }
}

async fn insert_sale(conn: &mut SqliteConnection, sale: &SaleRecord) -> DbResult<()> {
    debug!(
        id = %sale.id,
        total_cents = sale.total_cents,
        table = ?sale.table_id,
        "Appending sale"
    );

    sqlx::query(
        r#"
        INSERT INTO sales (
            id, recorded_at, table_id, items_json,
            subtotal_cents, discount_cents, tax_cents, total_cents,
            payment_method
        ) VALUES (
            ?1, ?2, ?3, ?4,
            ?5, ?6, ?7, ?8,
            ?9
        )
        "#,
    )
    .bind(&sale.id)
    .bind(sale.recorded_at)
    .bind(&sale.table_id)
    .bind(sale.items_json()?)
    .bind(sale.subtotal_cents)
    .bind(sale.discount_cents)
    .bind(sale.tax_cents)
    .bind(sale.total_cents)
    .bind(sale.payment_method)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
