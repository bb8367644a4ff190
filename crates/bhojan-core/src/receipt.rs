//! # Receipt Text
//!
//! Renders a bill as the fixed-width plain text receipt that is shown
//! after an order and can be saved to a file.
//!
//! ## Layout
//! ```text
//! Bharat Bhojan
//! Date: 2024-03-01 12:30:00
//! Table: T1                                  (dine-in only)
//! ----------------------------------------
//! Item                Qty   Amount
//! Tea                  x2   = ₹20.00
//! ----------------------------------------
//! Subtotal         : ₹20.00
//! Discount         : -₹0.00
//! Tax              : ₹1.00
//! Total            : ₹21.00
//! Payment Method   : CASH
//! UPI Link: upi://pay?...                    (UPI only)
//! ----------------------------------------
//! Thank you! Visit again
//! ```

use chrono::NaiveDateTime;

use crate::bill::Bill;
use crate::types::PaymentMethod;

const RULE_WIDTH: usize = 40;

/// Everything the receipt shows that is not part of the bill itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptContext {
    pub store_name: String,
    pub currency_symbol: String,
    /// Local wall-clock time printed in the header.
    pub printed_at: NaiveDateTime,
    pub table_id: Option<String>,
    pub payment_method: PaymentMethod,
    /// Printed only for UPI payments.
    pub upi_link: Option<String>,
}

/// Formats `bill` as receipt text. Lines are joined with `\n`, no trailing
/// newline.
pub fn format_bill_text(bill: &Bill, ctx: &ReceiptContext) -> String {
    let sym = &ctx.currency_symbol;
    let rule = "-".repeat(RULE_WIDTH);
    let mut lines = Vec::with_capacity(bill.lines.len() + 14);

    lines.push(ctx.store_name.clone());
    lines.push(format!("Date: {}", ctx.printed_at.format("%Y-%m-%d %H:%M:%S")));
    if let Some(table) = &ctx.table_id {
        lines.push(format!("Table: {}", table));
    }
    lines.push(rule.clone());

    lines.push(format!("{:20}Qty   Amount", "Item"));
    for line in &bill.lines {
        lines.push(format!(
            "{:20} x{:<3} = {}{}",
            line.item, line.quantity, sym, line.amount
        ));
    }
    lines.push(rule.clone());

    lines.push(format!("Subtotal         : {}{}", sym, bill.subtotal));
    lines.push(format!("Discount         : -{}{}", sym, bill.discount));
    lines.push(format!("Tax              : {}{}", sym, bill.tax));
    lines.push(format!("Total            : {}{}", sym, bill.total));
    lines.push(format!(
        "Payment Method   : {}",
        ctx.payment_method.as_str().to_uppercase()
    ));

    if ctx.payment_method == PaymentMethod::Upi {
        if let Some(link) = &ctx.upi_link {
            lines.push(format!("UPI Link: {}", link));
        }
    }

    lines.push(rule);
    lines.push("Thank you! Visit again".to_string());
    lines.join("\n")
}

// =============================================================================
// Unit Tests
// =============================================================================
