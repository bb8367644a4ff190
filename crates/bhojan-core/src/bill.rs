//! # Bill Calculator
//!
//! Turns an order snapshot into an itemized, discounted, taxed bill.
//!
//! ## Calculation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  for each line:  amount = price × qty        line tax = amount × rate  │
//! │                                                                         │
//! │  subtotal = Σ amount                 raw tax = Σ line tax              │
//! │  discount = subtotal × pct / 100                                       │
//! │  taxable  = subtotal − discount                                        │
//! │  tax      = raw tax × taxable / subtotal     (0 when subtotal is 0)    │
//! │  total    = taxable + tax                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Proportional Tax Scaling
//! The discount is a whole-bill percentage, and the aggregate tax is scaled
//! by the same ratio the discount removes from the taxable base. Items with
//! different tax rates are therefore discounted uniformly; tax is NOT
//! recomputed per discounted line. This is the intended billing rule.
//!
//! ## Precision
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  quantity            scale         held as                              │
//! │  ────────            ─────         ───────                              │
//! │  amount, subtotal    paise         exact i128                           │
//! │  line tax, raw tax   paise × 10⁴   exact i128 (amount × bps)            │
//! │  discount, taxable   paise × 10⁴   exact i128 (subtotal × bps)          │
//! │  tax, total          paise × 10⁸   exact i128                           │
//! │                                                                         │
//! │  Rounding to whole paise happens once, when the Bill is built.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::MenuCatalog;
use crate::error::{CoreError, CoreResult};
use crate::money::{round_half_away, Money};
use crate::order::OrderSnapshot;
use crate::types::{DiscountRate, TaxRate};
use crate::BPS_PER_UNIT;

const BPS: i128 = BPS_PER_UNIT as i128;
const BPS_SQUARED: i128 = BPS * BPS;

/// One itemized line of a bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BillLine {
    pub item: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub tax_rate: TaxRate,
    /// price × quantity (exact).
    pub amount: Money,
    /// amount × tax rate, rounded to whole paise.
    pub tax: Money,
}

/// A computed bill. All amounts are rounded to whole paise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Bill {
    /// Lines in the order the items were first added.
    pub lines: Vec<BillLine>,
    pub subtotal: Money,
    pub discount_rate: DiscountRate,
    pub discount: Money,
    /// Subtotal after discount, before tax.
    pub taxable: Money,
    /// Tax before the discount scaling.
    pub raw_tax: Money,
    /// Tax after proportional scaling; this is what the customer pays.
    pub tax: Money,
    pub total: Money,
}

impl Bill {
    /// Looks up the line for `item`.
    pub fn line(&self, item: &str) -> Option<&BillLine> {
        self.lines.iter().find(|l| l.item == item)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Computes a bill. Pure: same inputs, same bill.
///
/// ## Errors
/// - `InvalidDiscount` when the discount exceeds 100% (the taxable amount
///   would go negative)
/// - `UnknownItem` when a line's item is missing from `catalog`
/// - `AmountOverflow` for amounts beyond 64-bit paise
///
/// An empty snapshot is not an error: every amount is zero.
///
/// ## Example
/// ```rust
/// use bhojan_core::bill::calculate_bill;
/// use bhojan_core::catalog::{MenuCatalog, MenuRow};
/// use bhojan_core::order::OrderSnapshot;
/// use bhojan_core::types::DiscountRate;
///
/// let catalog = MenuCatalog::from_rows(vec![
///     MenuRow::new("Tea", 1000, "Drinks", 500),
///     MenuRow::new("Coffee", 2000, "Drinks", 1000),
/// ]).unwrap();
/// let order = OrderSnapshot::try_from_pairs(vec![("Tea", 1), ("Coffee", 1)]).unwrap();
///
/// let bill = calculate_bill(&order, &catalog, DiscountRate::from_percentage(10.0).unwrap()).unwrap();
/// assert_eq!(bill.subtotal.cents(), 3000);
/// assert_eq!(bill.discount.cents(), 300);
/// assert_eq!(bill.raw_tax.cents(), 250);
/// assert_eq!(bill.tax.cents(), 225);
/// assert_eq!(bill.total.cents(), 2925);
/// ```
pub fn calculate_bill(
    snapshot: &OrderSnapshot,
    catalog: &MenuCatalog,
    discount: DiscountRate,
) -> CoreResult<Bill> {
    if discount.bps() > BPS_PER_UNIT {
        return Err(CoreError::invalid_discount(format!(
            "discount {}% exceeds 100%",
            discount.percentage()
        )));
    }

    let mut lines = Vec::with_capacity(snapshot.len());
    let mut subtotal: i128 = 0;
    let mut raw_tax_num: i128 = 0;

    for line in snapshot.lines() {
        let entry = catalog
            .get(&line.item)
            .ok_or_else(|| CoreError::UnknownItem(line.item.clone()))?;

        let amount = checked_mul(entry.price.cents() as i128, line.quantity as i128, "line amount")?;
        let tax_num = checked_mul(amount, entry.tax_rate.bps() as i128, "line tax")?;

        subtotal = checked_add(subtotal, amount, "subtotal")?;
        raw_tax_num = checked_add(raw_tax_num, tax_num, "tax")?;

        lines.push(BillLine {
            item: line.item.clone(),
            quantity: line.quantity,
            unit_price: entry.price,
            tax_rate: entry.tax_rate,
            amount: to_money(amount, "line amount")?,
            tax: to_money(round_half_away(tax_num, BPS), "line tax")?,
        });
    }

    let discount_bps = discount.bps() as i128;
    let discount_num = checked_mul(subtotal, discount_bps, "discount")?;
    let taxable_num = checked_mul(subtotal, BPS, "taxable amount")? - discount_num;

    // taxable / subtotal is exactly (10⁴ − d) / 10⁴, so scaling stays exact.
    let scaled_tax_num = if subtotal > 0 {
        checked_mul(raw_tax_num, BPS - discount_bps, "tax")?
    } else {
        0
    };
    let total_num = checked_add(
        checked_mul(taxable_num, BPS, "total")?,
        scaled_tax_num,
        "total",
    )?;

    Ok(Bill {
        lines,
        subtotal: to_money(subtotal, "subtotal")?,
        discount_rate: discount,
        discount: to_money(round_half_away(discount_num, BPS), "discount")?,
        taxable: to_money(round_half_away(taxable_num, BPS), "taxable amount")?,
        raw_tax: to_money(round_half_away(raw_tax_num, BPS), "tax")?,
        tax: to_money(round_half_away(scaled_tax_num, BPS_SQUARED), "tax")?,
        total: to_money(round_half_away(total_num, BPS_SQUARED), "total")?,
    })
}

fn checked_mul(a: i128, b: i128, what: &'static str) -> CoreResult<i128> {
    a.checked_mul(b).ok_or(CoreError::AmountOverflow(what))
}

fn checked_add(a: i128, b: i128, what: &'static str) -> CoreResult<i128> {
    a.checked_add(b).ok_or(CoreError::AmountOverflow(what))
}

fn to_money(value: i128, what: &'static str) -> CoreResult<Money> {
    i64::try_from(value)
        .map(Money::from_cents)
        .map_err(|_| CoreError::AmountOverflow(what))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MenuRow;

    fn catalog() -> MenuCatalog {
        MenuCatalog::from_rows(vec![
            MenuRow::new("Tea", 1000, "Drinks", 500),
            MenuRow::new("Coffee", 2000, "Drinks", 1000),
            MenuRow::new("Samosa", 1550, "Snacks", 500),
            MenuRow::new("Thali", 24_999, "Meals", 1800),
            MenuRow::new("Water", 0, "Drinks", 0),
        ])
        .unwrap()
    }

    fn order(pairs: &[(&str, i64)]) -> OrderSnapshot {
        OrderSnapshot::try_from_pairs(pairs.iter().map(|(n, q)| (*n, *q))).unwrap()
    }

    fn pct(p: f64) -> DiscountRate {
        DiscountRate::from_percentage(p).unwrap()
    }

    #[test]
    fn test_single_item_no_discount() {
        let bill = calculate_bill(&order(&[("Tea", 2)]), &catalog(), DiscountRate::zero()).unwrap();

        assert_eq!(bill.subtotal.cents(), 2000);
        assert_eq!(bill.discount.cents(), 0);
        assert_eq!(bill.tax.cents(), 100);
        assert_eq!(bill.total.cents(), 2100);

        let tea = bill.line("Tea").unwrap();
        assert_eq!(tea.quantity, 2);
        assert_eq!(tea.amount.cents(), 2000);
        assert_eq!(tea.tax.cents(), 100);
    }

    #[test]
    fn test_discount_scales_tax_proportionally() {
        let bill =
            calculate_bill(&order(&[("Tea", 1), ("Coffee", 1)]), &catalog(), pct(10.0)).unwrap();

        assert_eq!(bill.subtotal.cents(), 3000);
        assert_eq!(bill.discount.cents(), 300);
        assert_eq!(bill.taxable.cents(), 2700);
        assert_eq!(bill.raw_tax.cents(), 250);
        // 2.50 × 27/30
        assert_eq!(bill.tax.cents(), 225);
        assert_eq!(bill.total.cents(), 2925);
    }

    #[test]
    fn test_rounding_happens_once() {
        // Samosa 15.50 × 3 = 46.50, tax 5% = 2.325
        // 33.33% off: discount 15.498..., tax 2.325 × 0.6667 = 1.55007...
        let bill = calculate_bill(&order(&[("Samosa", 3)]), &catalog(), pct(33.33)).unwrap();

        assert_eq!(bill.subtotal.cents(), 4650);
        assert_eq!(bill.discount.cents(), 1550); // 1549.845 → 1550
        assert_eq!(bill.taxable.cents(), 3100); // 3100.155 → 3100
        assert_eq!(bill.raw_tax.cents(), 233); // 232.5 → 233
        assert_eq!(bill.tax.cents(), 155); // 155.007... → 155
        assert_eq!(bill.total.cents(), 3255); // 3255.162... → 3255

        // Line tax is rounded for display only
        assert_eq!(bill.line("Samosa").unwrap().tax.cents(), 233);
    }

    #[test]
    fn test_empty_order_is_all_zero() {
        let bill = calculate_bill(&OrderSnapshot::default(), &catalog(), pct(5.0)).unwrap();

        assert!(bill.is_empty());
        assert_eq!(bill.subtotal, Money::zero());
        assert_eq!(bill.discount, Money::zero());
        assert_eq!(bill.tax, Money::zero());
        assert_eq!(bill.total, Money::zero());
    }

    #[test]
    fn test_zero_priced_items() {
        let bill = calculate_bill(&order(&[("Water", 4)]), &catalog(), pct(50.0)).unwrap();
        assert_eq!(bill.subtotal, Money::zero());
        assert_eq!(bill.tax, Money::zero());
        assert_eq!(bill.total, Money::zero());
        assert_eq!(bill.line("Water").unwrap().quantity, 4);
    }

    #[test]
    fn test_full_discount() {
        let bill = calculate_bill(&order(&[("Thali", 1)]), &catalog(), pct(100.0)).unwrap();
        assert_eq!(bill.discount, bill.subtotal);
        assert_eq!(bill.taxable, Money::zero());
        assert_eq!(bill.tax, Money::zero());
        assert_eq!(bill.total, Money::zero());
    }

    #[test]
    fn test_discount_over_100_rejected() {
        let err = calculate_bill(
            &order(&[("Tea", 1)]),
            &catalog(),
            DiscountRate::from_bps(15_000),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidDiscount { .. }));
    }

    #[test]
    fn test_sub_basis_point_discount_never_billed() {
        // 33.333% off a 1000.00 Thali would bill 333.33; it must not silently
        // bill 333.30 at 33.33%.
        let catalog = MenuCatalog::from_rows(vec![MenuRow::new("Thali", 100_000, "Meals", 0)])
            .unwrap();
        let err = DiscountRate::from_percentage(33.333).unwrap_err();
        assert!(matches!(err, CoreError::InvalidDiscount { .. }));

        let bill = calculate_bill(&order(&[("Thali", 1)]), &catalog, pct(33.33)).unwrap();
        assert_eq!(bill.discount.cents(), 33_330);
        assert_eq!(bill.total.cents(), 66_670);
    }

    #[test]
    fn test_unknown_item_rejected() {
        let err =
            calculate_bill(&order(&[("Tea", 1), ("Lassi", 1)]), &catalog(), DiscountRate::zero())
                .unwrap_err();
        assert_eq!(err, CoreError::UnknownItem("Lassi".to_string()));
    }

    #[test]
    fn test_no_discount_means_no_scaling() {
        let orders: Vec<&[(&str, i64)]> = vec![
            &[("Tea", 1)],
            &[("Samosa", 7), ("Coffee", 3)],
            &[("Thali", 2), ("Tea", 11), ("Samosa", 1)],
        ];

        for o in orders {
            let bill = calculate_bill(&order(o), &catalog(), DiscountRate::zero()).unwrap();
            assert_eq!(bill.tax, bill.raw_tax, "order {:?}", o);
            assert_eq!(
                bill.total.cents(),
                bill.subtotal.cents() + bill.tax.cents(),
                "order {:?}",
                o
            );
        }
    }

    #[test]
    fn test_totals_consistent_within_rounding() {
        let orders: Vec<&[(&str, i64)]> = vec![
            &[("Tea", 1)],
            &[("Samosa", 7), ("Coffee", 3)],
            &[("Thali", 2), ("Tea", 11), ("Samosa", 1)],
        ];
        let discounts = [0.0, 2.5, 10.0, 12.34, 33.33, 99.99, 100.0];

        for o in &orders {
            for d in discounts {
                let bill = calculate_bill(&order(o), &catalog(), pct(d)).unwrap();
                let taxable_gap =
                    (bill.subtotal.cents() - bill.discount.cents() - bill.taxable.cents()).abs();
                let total_gap = (bill.taxable.cents() + bill.tax.cents() - bill.total.cents()).abs();
                assert!(taxable_gap <= 1, "order {:?} discount {}", o, d);
                assert!(total_gap <= 1, "order {:?} discount {}", o, d);
                assert!(!bill.total.is_negative());
            }
        }
    }

    #[test]
    fn test_calculation_is_idempotent() {
        let snapshot = order(&[("Thali", 2), ("Samosa", 3)]);
        let first = calculate_bill(&snapshot, &catalog(), pct(12.5)).unwrap();
        let second = calculate_bill(&snapshot, &catalog(), pct(12.5)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_lines_follow_order_sequence() {
        let bill = calculate_bill(
            &order(&[("Samosa", 1), ("Tea", 1), ("Coffee", 1)]),
            &catalog(),
            DiscountRate::zero(),
        )
        .unwrap();

        let names: Vec<_> = bill.lines.iter().map(|l| l.item.as_str()).collect();
        assert_eq!(names, vec!["Samosa", "Tea", "Coffee"]);
    }

    #[test]
    fn test_overflow_reported() {
        let catalog = MenuCatalog::from_rows(vec![MenuRow::new("Gold", i64::MAX, "Luxury", 0)])
            .unwrap();
        let err = calculate_bill(&order(&[("Gold", 2)]), &catalog, DiscountRate::zero()).unwrap_err();
        assert!(matches!(err, CoreError::AmountOverflow(_)));
    }
}
