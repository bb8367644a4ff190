//! # Register Error Type
//!
//! Unified error type for register operations and commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Bhojan POS                             │
//! │                                                                         │
//! │  bhojan-core ── CoreError (bad quantity, unknown item, no table) ──┐   │
//! │  bhojan-db ──── DbError (SQLite, CSV files) ───────────────────────┤   │
//! │  config ─────── TOML / validation failures ────────────────────────┤   │
//! │                                                                     ▼   │
//! │                                                           RegisterError │
//! │                                                                     │   │
//! │  main() prints "error: <message>" and exits with status 1 ◄─────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use thiserror::Error;

use bhojan_core::CoreError;
use bhojan_db::DbError;

/// Errors surfaced by the register.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// Billing rule violation (quantity, discount, unknown item or table).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Storage failure.
    #[error(transparent)]
    Storage(#[from] DbError),

    /// Placing an order with no items.
    #[error("Nothing to order: add at least one item first")]
    EmptyOrder,

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Config file is not valid TOML for the expected layout.
    #[error("Cannot parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Sample bill file is not the expected JSON.
    #[error("Cannot parse sample bills: {0}")]
    SampleParse(#[from] serde_json::Error),

    /// File could not be read or written.
    #[error("Cannot access {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RegisterError {
    /// Wraps an I/O error with the path it happened on.
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RegisterError::File {
            path: path.into(),
            source,
        }
    }

    /// Creates an InvalidConfig error.
    pub fn config(message: impl Into<String>) -> Self {
        RegisterError::InvalidConfig(message.into())
    }
}

/// Result type for register operations.
pub type RegisterResult<T> = Result<T, RegisterError>;
