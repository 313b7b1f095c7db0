//! The order summary shown on the last screen and sent when the order is submitted.

use crate::money::{CurrencyFormat, Money};
use crate::types::OrderState;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Subject line of a submitted order
pub const ORDER_SUBJECT: &str = "New Cupcake Order";

/// Point-in-time copy of the fields a summary needs
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    /// Number of cupcakes
    pub quantity: u32,
    /// Flavor label
    pub flavor: String,
    /// Pickup date label
    pub pickup_date: String,
    /// Calendar day of the pickup, when the label is one of the offered days
    pub pickup_day: Option<NaiveDate>,
    /// Total
    pub price: Money,
}

impl OrderSnapshot {
    /// Copy the current order
    #[must_use]
    pub fn of(state: &OrderState) -> Self {
        Self {
            quantity: state.quantity(),
            flavor: state.flavor().to_string(),
            pickup_date: state.pickup_date().to_string(),
            pickup_day: state.pickup_day(),
            price: state.price(),
        }
    }
}

/// Human-readable order, ready to hand to a share target
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Subject line
    pub subject: String,
    /// Message body
    pub body: String,
}

impl OrderSummary {
    /// Render a snapshot as subject and body text
    #[must_use]
    pub fn render(snapshot: &OrderSnapshot, currency: &CurrencyFormat) -> Self {
        let body = format!(
            "Quantity: {}\nFlavor: {}\nPickup date: {}\nTotal: {}\n\nThank you!",
            quantity_text(snapshot.quantity),
            snapshot.flavor,
            snapshot.pickup_date,
            currency.format(snapshot.price),
        );

        Self {
            subject: ORDER_SUBJECT.to_string(),
            body,
        }
    }
}

/// `1 cupcake`, `6 cupcakes`
#[must_use]
pub fn quantity_text(quantity: u32) -> String {
    if quantity == 1 {
        "1 cupcake".to_string()
    } else {
        format!("{quantity} cupcakes")
    }
}
