//! # Sample Bill Replay
//!
//! Bills a batch of canned orders through the register. A preview only
//! computes each bill; a replay places and records every bill as a sale,
//! for demos or for seeding a fresh database.
//!
//! ## File Format
//! ```json
//! [
//!   { "items": { "Tea": 2, "Samosa": 1 }, "discount": 10, "payment": "upi" },
//!   { "items": [["Dosa", 1], ["Coffee", 2]] }
//! ]
//! ```
//!
//! `items` is a name → quantity map (placed in name order) or a list of
//! `[name, quantity]` pairs (placed in list order). `discount` is a
//! percentage and defaults to 0; `payment` defaults to `cash`. Replayed
//! bills are placed as takeaway orders.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

use bhojan_core::{Bill, DiscountRate, PaymentMethod};

use crate::error::{RegisterError, RegisterResult};
use crate::ledger::SaleLedger;
use crate::register::{PlacedOrder, Register};

/// Items of one sample bill.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SampleItems {
    Map(BTreeMap<String, i64>),
    Pairs(Vec<(String, i64)>),
}

impl SampleItems {
    fn into_pairs(self) -> Vec<(String, i64)> {
        match self {
            SampleItems::Map(map) => map.into_iter().collect(),
            SampleItems::Pairs(pairs) => pairs,
        }
    }
}

/// One canned bill.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SampleBill {
    pub items: SampleItems,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub payment: PaymentMethod,
}

/// What a replay did.
#[derive(Debug, Default)]
pub struct ReplaySummary {
    pub placed: Vec<PlacedOrder>,
    /// Bills skipped, by position in the file (0-based), with the reason.
    pub skipped: Vec<(usize, RegisterError)>,
}

/// Parses sample bills from JSON text.
pub fn parse_sample_bills(json: &str) -> RegisterResult<Vec<SampleBill>> {
    Ok(serde_json::from_str(json)?)
}

/// Reads sample bills from a JSON file.
pub fn load_sample_bills(path: &Path) -> RegisterResult<Vec<SampleBill>> {
    let text = std::fs::read_to_string(path).map_err(|e| RegisterError::file(path, e))?;
    let bills = parse_sample_bills(&text)?;
    info!(path = %path.display(), count = bills.len(), "Sample bills loaded");
    Ok(bills)
}

/// Computes each sample bill without recording anything.
///
/// Results are paired with each bill's position in the file (0-based). The
/// order and discount are cleared after every bill, and sales and tables are
/// left as they were.
pub fn preview_sample_bills(
    register: &mut Register,
    bills: Vec<SampleBill>,
) -> Vec<(usize, RegisterResult<Bill>)> {
    let results: Vec<_> = bills
        .into_iter()
        .enumerate()
        .map(|(index, bill)| {
            register.clear_order();
            let result = stage_sample(register, bill).and_then(|()| register.preview_bill());
            register.clear_order();
            register.reset_discount();
            (index, result)
        })
        .collect();

    debug!(bills = results.len(), "Sample bills previewed");
    results
}

/// Places each sample bill as a takeaway order.
///
/// Any order in progress is discarded first. A bill with a bad item,
/// quantity or discount is skipped with a warning. A ledger failure stops
/// the replay and is returned.
pub async fn replay_sample_bills<L: SaleLedger>(
    register: &mut Register,
    bills: Vec<SampleBill>,
    ledger: &L,
) -> RegisterResult<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    for (index, bill) in bills.into_iter().enumerate() {
        register.clear_order();

        match place_sample(register, bill, ledger).await {
            Ok(placed) => summary.placed.push(placed),
            Err(e @ RegisterError::Storage(_)) => {
                register.clear_order();
                return Err(e);
            }
            Err(e) => {
                warn!(bill = index, error = %e, "Skipping sample bill");
                register.clear_order();
                summary.skipped.push((index, e));
            }
        }
    }

    info!(
        placed = summary.placed.len(),
        skipped = summary.skipped.len(),
        "Sample bills replayed"
    );
    Ok(summary)
}

async fn place_sample<L: SaleLedger>(
    register: &mut Register,
    bill: SampleBill,
    ledger: &L,
) -> RegisterResult<PlacedOrder> {
    let payment = bill.payment;
    stage_sample(register, bill)?;

    let placed = register.place_order(false, payment, ledger).await;
    if placed.is_err() {
        register.reset_discount();
    }
    placed
}

fn stage_sample(register: &mut Register, bill: SampleBill) -> RegisterResult<()> {
    for (name, quantity) in bill.items.into_pairs() {
        register.add_item(&name, quantity)?;
    }
    register.set_discount(DiscountRate::from_percentage(bill.discount)?)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use bhojan_core::{CoreError, MenuCatalog, MenuRow, SaleRecord, TableRegistry};
    use bhojan_db::DbError;

    use super::*;

    #[derive(Default)]
    struct VecLedger(Mutex<Vec<SaleRecord>>);

    impl SaleLedger for VecLedger {
        async fn append(&self, sale: &SaleRecord, _tables: &TableRegistry) -> RegisterResult<()> {
            self.0.lock().unwrap().push(sale.clone());
            Ok(())
        }
    }

    struct BrokenLedger;

    impl SaleLedger for BrokenLedger {
        async fn append(&self, _sale: &SaleRecord, _tables: &TableRegistry) -> RegisterResult<()> {
            Err(DbError::Internal("database is locked".to_string()).into())
        }
    }

    fn register() -> Register {
        let catalog = MenuCatalog::from_rows(vec![
            MenuRow::new("Tea", 1000, "Drinks", 500),
            MenuRow::new("Samosa", 1500, "Snacks", 500),
        ])
        .unwrap();
        Register::new(catalog, TableRegistry::with_count(2))
    }

    const SAMPLES: &str = r#"[
        { "items": { "Tea": 2, "Samosa": 1 }, "discount": 10, "payment": "upi" },
        { "items": [["Samosa", 2], ["Tea", 1]] },
        { "items": { "Lassi": 1 } }
    ]"#;

    #[test]
    fn test_parse_both_item_shapes() {
        let bills = parse_sample_bills(SAMPLES).unwrap();
        assert_eq!(bills.len(), 3);

        assert_eq!(bills[0].discount, 10.0);
        assert_eq!(bills[0].payment, PaymentMethod::Upi);
        assert_eq!(
            bills[1].items.clone().into_pairs(),
            vec![("Samosa".to_string(), 2), ("Tea".to_string(), 1)]
        );
        assert_eq!(bills[1].payment, PaymentMethod::Cash);
        assert_eq!(bills[1].discount, 0.0);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_sample_bills(r#"{"items": 3}"#).unwrap_err();
        assert!(matches!(err, RegisterError::SampleParse(_)));
    }

    #[tokio::test]
    async fn test_replay_places_takeaway_orders() {
        let mut reg = register();
        let ledger = VecLedger::default();
        let bills = parse_sample_bills(SAMPLES).unwrap();

        let summary = replay_sample_bills(&mut reg, bills, &ledger).await.unwrap();

        assert_eq!(summary.placed.len(), 2);
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.skipped[0].0, 2);
        assert!(matches!(
            summary.skipped[0].1,
            RegisterError::Core(CoreError::UnknownItem(_))
        ));

        // 2×10 + 15 = 35.00, 10% off = 31.50, tax 5% = 1.575 → 1.58
        let first = &summary.placed[0].bill;
        assert_eq!(first.subtotal.cents(), 3500);
        assert_eq!(first.total.cents(), 3308);

        assert!(summary.placed.iter().all(|p| p.sale.table_id.is_none()));
        assert_eq!(reg.tables().free_count(), 2);
        assert_eq!(ledger.0.lock().unwrap().len(), 2);
        assert!(reg.order().is_empty());
        assert_eq!(reg.discount(), DiscountRate::zero());
    }

    #[tokio::test]
    async fn test_bad_discount_is_skipped() {
        let mut reg = register();
        let ledger = VecLedger::default();
        let bills = parse_sample_bills(r#"[{ "items": { "Tea": 1 }, "discount": 150 }]"#).unwrap();

        let summary = replay_sample_bills(&mut reg, bills, &ledger).await.unwrap();
        assert!(summary.placed.is_empty());
        assert!(matches!(
            summary.skipped[0].1,
            RegisterError::Core(CoreError::InvalidDiscount { .. })
        ));
        assert!(reg.order().is_empty());
    }

    #[tokio::test]
    async fn test_ledger_failure_stops_replay() {
        let mut reg = register();
        let bills = parse_sample_bills(SAMPLES).unwrap();

        let err = replay_sample_bills(&mut reg, bills, &BrokenLedger).await.unwrap_err();
        assert!(matches!(err, RegisterError::Storage(_)));
        assert!(reg.sales().is_empty());
        assert!(reg.order().is_empty());
        assert_eq!(reg.discount(), DiscountRate::zero());
    }

    #[test]
    fn test_preview_records_nothing() {
        let mut reg = register();
        let bills = parse_sample_bills(SAMPLES).unwrap();

        let results = preview_sample_bills(&mut reg, bills);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].0, 0);
        assert_eq!(results[0].1.as_ref().unwrap().total.cents(), 3308);
        // 2×15 + 10 = 40.00, tax 2.00
        assert_eq!(results[1].1.as_ref().unwrap().total.cents(), 4200);
        assert!(matches!(
            results[2].1,
            Err(RegisterError::Core(CoreError::UnknownItem(_)))
        ));

        assert!(reg.sales().is_empty());
        assert_eq!(reg.tables().free_count(), 2);
        assert!(reg.order().is_empty());
        assert_eq!(reg.discount(), DiscountRate::zero());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_sample_bills(Path::new("/nonexistent/sample_bill.json")).unwrap_err();
        assert!(matches!(err, RegisterError::File { .. }));
    }
}
