//! End-to-end billing scenarios: order → bill → sale record → receipt.

use bhojan_core::payment_link::{upi_link, UpiPayee};
use bhojan_core::receipt::{format_bill_text, ReceiptContext};
use bhojan_core::{
    calculate_bill, CoreError, DiscountRate, MenuCatalog, MenuRow, Money, OrderAccumulator,
    PaymentMethod, SaleRecord, TableRegistry, TableStatus,
};
use chrono::Utc;

fn cafe_menu(coffee_tax_bps: u32) -> MenuCatalog {
    MenuCatalog::from_rows(vec![
        MenuRow::new("Tea", 1000, "Drinks", 500),
        MenuRow::new("Coffee", 2000, "Drinks", coffee_tax_bps),
        MenuRow::new("Masala Dosa", 8000, "Breakfast", 500),
    ])
    .unwrap()
}

#[test]
fn two_teas_no_discount() {
    let mut order = OrderAccumulator::new();
    order.add_item("Tea", 2).unwrap();

    let bill = calculate_bill(&order.snapshot(), &cafe_menu(1000), DiscountRate::zero()).unwrap();

    assert_eq!(bill.subtotal, Money::from_cents(2000));
    assert_eq!(bill.discount, Money::zero());
    assert_eq!(bill.tax, Money::from_cents(100));
    assert_eq!(bill.total, Money::from_cents(2100));
}

#[test]
fn mixed_rates_with_ten_percent_off() {
    let mut order = OrderAccumulator::new();
    order.add_item("Tea", 1).unwrap();
    order.add_item("Coffee", 1).unwrap();
    let discount = DiscountRate::from_percentage(10.0).unwrap();

    // Coffee at 10%
    let bill = calculate_bill(&order.snapshot(), &cafe_menu(1000), discount).unwrap();
    assert_eq!(bill.subtotal.to_string(), "30.00");
    assert_eq!(bill.discount.to_string(), "3.00");
    assert_eq!(bill.taxable.to_string(), "27.00");
    assert_eq!(bill.raw_tax.to_string(), "2.50");
    assert_eq!(bill.tax.to_string(), "2.25");
    assert_eq!(bill.total.to_string(), "29.25");

    // Coffee at 5%
    let bill = calculate_bill(&order.snapshot(), &cafe_menu(500), discount).unwrap();
    assert_eq!(bill.raw_tax.to_string(), "1.50");
    assert_eq!(bill.tax.to_string(), "1.35");
    assert_eq!(bill.total.to_string(), "28.35");
}

#[test]
fn empty_order_with_discount() {
    let order = OrderAccumulator::new();
    let discount = DiscountRate::from_percentage(5.0).unwrap();

    let bill = calculate_bill(&order.snapshot(), &cafe_menu(1000), discount).unwrap();

    assert!(bill.lines.is_empty());
    assert_eq!(bill.total, Money::zero());
}

#[test]
fn out_of_range_discount_is_rejected() {
    assert!(matches!(
        DiscountRate::from_percentage(150.0),
        Err(CoreError::InvalidDiscount { .. })
    ));

    let mut order = OrderAccumulator::new();
    order.add_item("Tea", 1).unwrap();
    assert!(matches!(
        calculate_bill(&order.snapshot(), &cafe_menu(1000), DiscountRate::from_bps(15_000)),
        Err(CoreError::InvalidDiscount { .. })
    ));
}

#[test]
fn item_missing_from_catalog() {
    let mut order = OrderAccumulator::new();
    order.add_item("Filter Coffee", 1).unwrap();

    let err = calculate_bill(&order.snapshot(), &cafe_menu(1000), DiscountRate::zero()).unwrap_err();
    assert_eq!(err, CoreError::UnknownItem("Filter Coffee".to_string()));
}

#[test]
fn dine_in_upi_sale_end_to_end() {
    let menu = cafe_menu(500);
    let mut tables = TableRegistry::with_count(6);
    let mut order = OrderAccumulator::new();
    order.add_item("Masala Dosa", 2).unwrap();
    order.add_item("Tea", 2).unwrap();

    let bill = calculate_bill(&order.snapshot(), &menu, DiscountRate::zero()).unwrap();
    let table = tables.assign_free_table().unwrap();
    let record = SaleRecord::from_bill(&bill, Some(table.clone()), PaymentMethod::Upi, Utc::now());
    order.reset();

    assert_eq!(table, "T1");
    assert_eq!(tables.status("T1"), Some(TableStatus::Occupied));
    assert_eq!(record.total_cents, 18_900);
    assert!(order.is_empty());

    let payee = UpiPayee::new("shop@okbank", "Bharat Bhojan");
    let ctx = ReceiptContext {
        store_name: "Bharat Bhojan".to_string(),
        currency_symbol: "₹".to_string(),
        printed_at: record.recorded_at.naive_local(),
        table_id: record.table_id.clone(),
        payment_method: record.payment_method,
        upi_link: Some(upi_link(&payee, bill.total)),
    };
    let text = format_bill_text(&bill, &ctx);

    assert!(text.contains("Table: T1"));
    assert!(text.contains("Total            : ₹189.00"));
    assert!(text.contains("am=189.00"));
}
