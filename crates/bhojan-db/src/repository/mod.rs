//! # Repository Module
//!
//! Database repository implementations for Bhojan POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Register                                                              │
//! │       │                                                                 │
//! │       │  db.sales().append(&record)                                    │
//! │       ▼                                                                 │
//! │  SaleRepository                                                        │
//! │  ├── append(&self, sale)                                               │
//! │  ├── list_all(&self)                                                   │
//! │  └── last(&self)                                                       │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`menu::MenuRepository`] - Menu items
//! - [`sale::SaleRepository`] - Append-only sales ledger
//! - [`table::TableRepository`] - Dining table occupancy

pub mod menu;
pub mod sale;
pub mod table;
