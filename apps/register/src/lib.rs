//! # Bhojan Register
//!
//! Command line billing register for Bhojan POS.
//!
//! ## Module Organization
//! ```text
//! bhojan_register/
//! ├── lib.rs          ◄─── You are here (tracing setup, entry point)
//! ├── cli.rs          ◄─── clap command definitions
//! ├── commands.rs     ◄─── Session: loads state, runs one command
//! ├── register.rs     ◄─── Register state and the place-order sequence
//! ├── ledger.rs       ◄─── SaleLedger sinks (SQLite, sales CSV)
//! ├── samples.rs      ◄─── Sample bill replay
//! ├── config.rs       ◄─── register.toml + BHOJAN_* environment
//! └── error.rs        ◄─── RegisterError
//! ```
//!
//! ## One Invocation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cli::parse ──► RegisterConfig::load ──► Session::open ──► execute      │
//! │                                                              │          │
//! │                                          stdout ◄── output ──┘          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod ledger;
pub mod register;
pub mod samples;

use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use commands::Session;
use config::RegisterConfig;
pub use error::{RegisterError, RegisterResult};
pub use ledger::{DatabaseLedger, SaleLedger};
pub use register::{PlacedOrder, Register};

/// Runs one parsed command line and returns its output.
pub async fn run(cli: Cli) -> RegisterResult<String> {
    let config = RegisterConfig::load(cli.config)?;
    info!(store = %config.store.name, tables = config.tables.count, "Register starting");

    let mut session = Session::open(config).await?;
    let output = session.execute(cli.command).await;
    session.database().close().await;
    output
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` overrides the default filter. Logs go to stderr so command
/// output on stdout stays clean.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bhojan=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
