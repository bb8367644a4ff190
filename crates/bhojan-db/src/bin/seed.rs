//! # Menu Seeder
//!
//! Loads a menu CSV into a database.
//!
//! ## Usage
//! ```bash
//! # Import ./data/menu.csv into ./bhojan_dev.db (defaults)
//! cargo run -p bhojan-db --bin seed
//!
//! # Custom paths
//! cargo run -p bhojan-db --bin seed -- --csv ./menu.csv --db ./data/bhojan.db
//! ```
//!
//! Rows already on the menu are kept; malformed rows are skipped and
//! reported.

use std::env;
use std::path::PathBuf;

use bhojan_db::{import_menu_csv, Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut csv_path = PathBuf::from("./data/menu.csv");
    let mut db_path = PathBuf::from("./bhojan_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--csv" | "-c" => {
                if i + 1 < args.len() {
                    csv_path = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Bhojan POS Menu Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --csv <PATH>   Menu CSV (default: ./data/menu.csv)");
                println!("  -d, --db <PATH>    Database file path (default: ./bhojan_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Bhojan POS Menu Seeder");
    println!("=========================");
    println!("Database: {}", db_path.display());
    println!("Menu CSV: {}", csv_path.display());
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let summary = import_menu_csv(&db.menu(), &csv_path).await?;

    println!();
    println!("✓ Inserted {} items", summary.inserted);
    if summary.existing > 0 {
        println!("  {} items already on the menu (kept)", summary.existing);
    }
    if summary.rejected > 0 {
        println!("⚠ {} malformed rows skipped", summary.rejected);
    }
    println!("  Menu now has {} items", db.menu().count().await?);

    db.close().await;
    Ok(())
}
