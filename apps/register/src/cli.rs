//! Command line definition for the `bhojan` binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use bhojan_core::PaymentMethod;

/// Bhojan POS: restaurant billing from the terminal.
#[derive(Parser, Debug)]
#[command(name = "bhojan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to register.toml (defaults to the platform config dir).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show or import the menu.
    #[command(subcommand)]
    Menu(MenuCommand),

    /// Bill an order and record the sale.
    Order(OrderArgs),

    /// Show or change table occupancy.
    #[command(subcommand)]
    Tables(TablesCommand),

    /// Show or export recorded sales.
    #[command(subcommand)]
    Sales(SalesCommand),

    /// Bill every order in a sample JSON file. Nothing is recorded
    /// unless --record is given.
    Replay {
        /// Sample bills file.
        path: PathBuf,

        /// Place each bill as a takeaway sale and record it.
        #[arg(long)]
        record: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum MenuCommand {
    /// List menu items grouped by category.
    List,

    /// Import items from a CSV file (itemname,price,category,gst).
    /// Items already on the menu are kept as they are.
    Import {
        /// Menu CSV file.
        path: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
pub struct OrderArgs {
    /// Item and quantity as NAME=QTY. Repeat for more items.
    #[arg(short, long = "item", value_name = "NAME=QTY", required = true, value_parser = parse_item)]
    pub items: Vec<(String, i64)>,

    /// Whole-bill discount percentage (0-100).
    #[arg(short, long, default_value_t = 0.0)]
    pub discount: f64,

    /// Payment method: cash or upi.
    #[arg(short, long, default_value = "cash")]
    pub payment: PaymentMethod,

    /// Seat the order at the first free table.
    #[arg(long)]
    pub dine_in: bool,

    /// Also write the bill text to this file.
    #[arg(long, value_name = "PATH")]
    pub save: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum TablesCommand {
    /// List tables and their status.
    List,

    /// Flip a table between free and occupied.
    Toggle {
        /// Table id, e.g. T3.
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum SalesCommand {
    /// List recorded sales, oldest first.
    List,

    /// Write every recorded sale to a CSV file.
    Export {
        /// Output CSV file.
        path: PathBuf,
    },
}

/// Parses `NAME=QTY`. The last `=` splits, so names may contain `=`.
pub fn parse_item(raw: &str) -> Result<(String, i64), String> {
    let (name, qty) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=QTY, got '{}'", raw))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing item name in '{}'", raw));
    }

    let qty = qty
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("quantity in '{}' is not a whole number", raw))?;

    Ok((name.to_string(), qty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item() {
        assert_eq!(parse_item("Tea=2"), Ok(("Tea".to_string(), 2)));
        assert_eq!(parse_item(" Masala Dosa = 1 "), Ok(("Masala Dosa".to_string(), 1)));
        assert_eq!(parse_item("A=B=3"), Ok(("A=B".to_string(), 3)));
        // Sign is checked by the order, not the parser
        assert_eq!(parse_item("Tea=-1"), Ok(("Tea".to_string(), -1)));

        assert!(parse_item("Tea").is_err());
        assert!(parse_item("=2").is_err());
        assert!(parse_item("Tea=two").is_err());
    }

    #[test]
    fn test_order_command() {
        let cli = Cli::try_parse_from([
            "bhojan", "order", "-i", "Tea=2", "--item", "Coffee=1", "--discount", "10",
            "--payment", "upi", "--dine-in",
        ])
        .unwrap();

        match cli.command {
            Command::Order(args) => {
                assert_eq!(args.items.len(), 2);
                assert_eq!(args.discount, 10.0);
                assert_eq!(args.payment, PaymentMethod::Upi);
                assert!(args.dine_in);
                assert!(args.save.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_order_requires_items() {
        assert!(Cli::try_parse_from(["bhojan", "order"]).is_err());
        assert!(Cli::try_parse_from(["bhojan", "order", "-i", "Tea=2", "-p", "card"]).is_err());
    }

    #[test]
    fn test_replay_records_only_on_request() {
        let cli = Cli::try_parse_from(["bhojan", "replay", "sample_bill.json"]).unwrap();
        assert!(matches!(cli.command, Command::Replay { record: false, .. }));

        let cli = Cli::try_parse_from(["bhojan", "replay", "sample_bill.json", "--record"]).unwrap();
        assert!(matches!(cli.command, Command::Replay { record: true, .. }));
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["bhojan", "tables", "toggle", "T3", "--config", "r.toml"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("r.toml")));
        assert!(matches!(cli.command, Command::Tables(TablesCommand::Toggle { ref id }) if id == "T3"));
    }
}
