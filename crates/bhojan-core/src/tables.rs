//! # Table Registry
//!
//! Dine-in table occupancy for a fixed set of tables.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │            assign_free_table() / toggle()                               │
//! │   ┌──────┐ ─────────────────────────────────► ┌──────────┐              │
//! │   │ Free │                                    │ Occupied │              │
//! │   └──────┘ ◄───────────────────────────────── └──────────┘              │
//! │                       toggle()                                          │
//! │                                                                         │
//! │  Tables are never created or removed after construction.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tables are kept in natural identifier order (`T2` before `T10`), and
//! assignment always picks the first free table in that order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::TableStatus;
use crate::validation::validate_table_id;

/// A single dine-in table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Table {
    pub id: String,
    pub status: TableStatus,
}

/// The fixed set of tables and their occupancy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableRegistry {
    tables: Vec<Table>,
}

impl TableRegistry {
    /// Builds a registry of free tables from explicit identifiers.
    ///
    /// ## Errors
    /// `Validation` for a blank/padded identifier or a duplicate.
    pub fn new<I, S>(ids: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tables: Vec<Table> = Vec::new();

        for id in ids {
            let id = id.into();
            validate_table_id(&id)?;
            if tables.iter().any(|t| t.id == id) {
                return Err(ValidationError::Duplicate {
                    field: "table id".to_string(),
                    value: id,
                }
                .into());
            }
            tables.push(Table {
                id,
                status: TableStatus::Free,
            });
        }

        tables.sort_by(|a, b| natural_cmp(&a.id, &b.id));
        Ok(TableRegistry { tables })
    }

    /// Builds `T1..Tn`, all free.
    ///
    /// ## Example
    /// ```rust
    /// use bhojan_core::tables::TableRegistry;
    ///
    /// let mut tables = TableRegistry::with_count(2);
    /// assert_eq!(tables.assign_free_table().unwrap(), "T1");
    /// assert_eq!(tables.assign_free_table().unwrap(), "T2");
    /// assert!(tables.assign_free_table().is_err());
    /// ```
    pub fn with_count(count: usize) -> Self {
        TableRegistry {
            tables: (1..=count)
                .map(|n| Table {
                    id: format!("T{}", n),
                    status: TableStatus::Free,
                })
                .collect(),
        }
    }

    /// Marks the first free table occupied and returns its id.
    ///
    /// ## Errors
    /// `NoFreeTable` when every table is occupied; nothing changes.
    pub fn assign_free_table(&mut self) -> CoreResult<String> {
        let table = self
            .tables
            .iter_mut()
            .find(|t| t.status.is_free())
            .ok_or(CoreError::NoFreeTable)?;

        table.status = TableStatus::Occupied;
        Ok(table.id.clone())
    }

    /// Flips a table between Free and Occupied, returning the new status.
    pub fn toggle(&mut self, id: &str) -> CoreResult<TableStatus> {
        let table = self.find_mut(id)?;
        table.status = table.status.toggled();
        Ok(table.status)
    }

    /// Sets a table's status directly (used when restoring persisted state).
    pub fn set_status(&mut self, id: &str, status: TableStatus) -> CoreResult<()> {
        self.find_mut(id)?.status = status;
        Ok(())
    }

    pub fn status(&self, id: &str) -> Option<TableStatus> {
        self.tables.iter().find(|t| t.id == id).map(|t| t.status)
    }

    pub fn free_count(&self) -> usize {
        self.tables.iter().filter(|t| t.status.is_free()).count()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter()
    }

    fn find_mut(&mut self, id: &str) -> CoreResult<&mut Table> {
        self.tables
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| CoreError::UnknownTable(id.to_string()))
    }
}

/// Orders identifiers by their non-digit prefix, then by the numeric
/// suffix as a number.
fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (a_prefix, a_num) = split_numeric_suffix(a);
    let (b_prefix, b_num) = split_numeric_suffix(b);

    a_prefix
        .cmp(b_prefix)
        .then(a_num.cmp(&b_num))
        .then_with(|| a.cmp(b))
}

fn split_numeric_suffix(id: &str) -> (&str, Option<u64>) {
    let digits_start = id
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)
        .unwrap_or(id.len());

    let (prefix, digits) = id.split_at(digits_start);
    (prefix, digits.parse().ok())
}

// =============================================================================
// Unit Tests
// =============================================================================
