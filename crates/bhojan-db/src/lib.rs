//! # bhojan-db: Storage Layer for Bhojan POS
//!
//! This crate provides persistent storage for the register: the menu, the
//! append-only sales ledger and dining table occupancy live in SQLite
//! (through sqlx); menus arrive and reports leave as CSV files.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bhojan POS Data Flow                             │
//! │                                                                         │
//! │  Register (place order / menu import / sales export)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     bhojan-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ MenuRepo      │    │ 001_initial_ │  │   │
//! │  │   │ SqlitePool    │◄───│ SaleRepo      │    │  schema.sql  │  │   │
//! │  │   │               │    │ TableRepo     │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   csv_io: menu.csv ──► menu table      sales ──► report.csv    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <platform data dir>/bhojan.db                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Storage error types
//! - [`repository`] - Menu, sale and table repositories
//! - [`csv_io`] - Menu CSV import, sales CSV export
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bhojan_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("bhojan.db")).await?;
//! let rows = db.menu().list_all().await?;
//! db.sales().append(&record).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod csv_io;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use csv_io::{append_sale_csv, export_sales_csv, import_menu_csv, ImportSummary};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::menu::MenuRepository;
pub use repository::sale::SaleRepository;
pub use repository::table::TableRepository;
