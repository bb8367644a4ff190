//! # Table Repository
//!
//! Persists dining table occupancy so it survives register restarts.
//!
//! The register owns the authoritative [`TableRegistry`] while running;
//! this repository only loads it at startup and saves it after changes.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, warn};

use crate::error::DbResult;
use bhojan_core::{Table, TableRegistry, TableStatus};

/// Repository for dining table state.
#[derive(Debug, Clone)]
pub struct TableRepository {
    pool: SqlitePool,
}

impl TableRepository {
    /// Creates a new TableRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TableRepository { pool }
    }

    /// Every stored table.
    pub async fn load(&self) -> DbResult<Vec<Table>> {
        let rows: Vec<(String, TableStatus)> =
            sqlx::query_as("SELECT id, status FROM dining_tables ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(id, status)| Table { id, status })
            .collect())
    }

    /// Applies stored statuses onto `registry`. Stored tables the registry
    /// does not know (e.g. after the table count shrank) are skipped.
    pub async fn restore_into(&self, registry: &mut TableRegistry) -> DbResult<()> {
        for table in self.load().await? {
            if registry.set_status(&table.id, table.status).is_err() {
                warn!(table = %table.id, "Ignoring stored status for unknown table");
            }
        }
        Ok(())
    }

    /// Writes every table's status in one transaction.
    pub async fn save_all(&self, registry: &TableRegistry) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;
        write_statuses(&mut tx, registry).await?;
        tx.commit().await?;

        debug!(count = registry.len(), "Saved table statuses");
        Ok(())
    }
}

/// Upserts every table's status on `conn`. The caller owns the transaction.
pub(crate) async fn write_statuses(
    conn: &mut SqliteConnection,
    registry: &TableRegistry,
) -> DbResult<()> {
    for table in registry.iter() {
        sqlx::query(
            r#"
            INSERT INTO dining_tables (id, status) VALUES (?1, ?2)
            ON CONFLICT(id) DO UPDATE SET status = excluded.status
            "#,
        )
        .bind(&table.id)
        .bind(table.status)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

/// Stored status of one table, `None` if it was never saved.
pub(crate) async fn stored_status(
    conn: &mut SqliteConnection,
    id: &str,
) -> DbResult<Option<TableStatus>> {
    let status: Option<TableStatus> =
        sqlx::query_scalar("SELECT status FROM dining_tables WHERE id = ?1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
    Ok(status)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};

    use super::*;

    #[tokio::test]
    async fn test_save_and_restore() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.tables();

        let mut registry = TableRegistry::with_count(3);
        registry.toggle("T2").unwrap();
        repo.save_all(&registry).await.unwrap();

        let mut fresh = TableRegistry::with_count(3);
        repo.restore_into(&mut fresh).await.unwrap();
        assert_eq!(fresh, registry);

        // Saving again updates in place
        registry.toggle("T2").unwrap();
        repo.save_all(&registry).await.unwrap();
        assert_eq!(repo.load().await.unwrap().len(), 3);
        assert!(repo
            .load()
            .await
            .unwrap()
            .iter()
            .all(|t| t.status == TableStatus::Free));
    }

    #[tokio::test]
    async fn test_restore_skips_unknown_tables() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.tables();

        let mut six = TableRegistry::with_count(6);
        six.toggle("T6").unwrap();
        six.toggle("T1").unwrap();
        repo.save_all(&six).await.unwrap();

        let mut two = TableRegistry::with_count(2);
        repo.restore_into(&mut two).await.unwrap();
        assert_eq!(two.status("T1"), Some(TableStatus::Occupied));
        assert_eq!(two.free_count(), 1);
    }
}
