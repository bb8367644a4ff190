//! # UPI Payment Links
//!
//! Builds the `upi://pay` deep link printed on UPI bills.
//!
//! ```text
//! upi://pay?pa=<payee id>&pn=<payee name>&am=<amount, 2dp>&cu=<currency>
//! ```
//!
//! Parameters are form-urlencoded (space becomes `+`).

use serde::{Deserialize, Serialize};
use url::form_urlencoded::byte_serialize;

use crate::money::Money;

/// Who receives a UPI payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpiPayee {
    /// Virtual payment address, e.g. `shop@okbank`.
    pub id: String,
    /// Display name shown in the payer's app.
    pub name: String,
    /// ISO 4217 code.
    pub currency: String,
}

impl UpiPayee {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        UpiPayee {
            id: id.into(),
            name: name.into(),
            currency: "INR".to_string(),
        }
    }
}

/// Builds the payment link for `amount`.
///
/// ## Example
/// ```rust
/// use bhojan_core::money::Money;
/// use bhojan_core::payment_link::{upi_link, UpiPayee};
///
/// let payee = UpiPayee::new("shop@okbank", "Bharat Bhojan");
/// assert_eq!(
///     upi_link(&payee, Money::from_cents(2925)),
///     "upi://pay?pa=shop%40okbank&pn=Bharat+Bhojan&am=29.25&cu=INR"
/// );
/// ```
pub fn upi_link(payee: &UpiPayee, amount: Money) -> String {
    format!(
        "upi://pay?pa={}&pn={}&am={}&cu={}",
        encode(&payee.id),
        encode(&payee.name),
        amount,
        encode(&payee.currency)
    )
}

fn encode(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}
