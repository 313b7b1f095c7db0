//! Domain types for the cupcake order.
//!
//! [`OrderState`] is the single record shared by every screen of the order
//! flow. It owns the price rule: the total is recomputed whenever the
//! quantity or the pickup date changes, never when the flavor changes.

use crate::config::PricingConfig;
use crate::money::{CurrencyFormat, Money};
use crate::pickup::{DateLabelFormat, PickupOptions};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected order input
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum OrderError {
    /// An argument was outside its allowed range
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// State of one ordering session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderState {
    quantity: u32,
    flavor: String,
    pickup_date: String,
    price: Money,
    pickup_options: PickupOptions,
    pricing: PricingConfig,
    last_error: Option<OrderError>,
}

impl OrderState {
    /// Open an order on `today`, with pickup options starting that day
    ///
    /// The new order is already reset: no cupcakes, no flavor, the same-day
    /// slot selected and a zero total.
    #[must_use]
    pub fn new(today: NaiveDate, pricing: PricingConfig, date_format: &DateLabelFormat) -> Self {
        let pickup_options = PickupOptions::starting(today, date_format);
        let mut state = Self {
            quantity: 0,
            flavor: String::new(),
            pickup_date: String::new(),
            price: Money::ZERO,
            pickup_options,
            pricing,
            last_error: None,
        };
        state.reset();
        state
    }

    /// Number of cupcakes
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Chosen flavor, empty when unset
    #[must_use]
    pub fn flavor(&self) -> &str {
        &self.flavor
    }

    /// Chosen pickup date label, empty when unset
    #[must_use]
    pub fn pickup_date(&self) -> &str {
        &self.pickup_date
    }

    /// Current total
    #[must_use]
    pub const fn price(&self) -> Money {
        self.price
    }

    /// Prices this order is computed with
    #[must_use]
    pub const fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }

    /// The four pickup date labels, same-day first
    #[must_use]
    pub fn date_options(&self) -> &[String] {
        self.pickup_options.labels()
    }

    /// The pickup options with their calendar days
    #[must_use]
    pub const fn pickup_options(&self) -> &PickupOptions {
        &self.pickup_options
    }

    /// Most recent rejected input, cleared by the next accepted one
    #[must_use]
    pub const fn last_error(&self) -> Option<&OrderError> {
        self.last_error.as_ref()
    }

    pub(crate) fn record_error(&mut self, error: Option<OrderError>) {
        self.last_error = error;
    }

    /// Set the number of cupcakes and recompute the total
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidArgument`] for a negative quantity or
    /// one too large to count; the order is left unchanged.
    pub fn set_quantity(&mut self, quantity: i64) -> Result<(), OrderError> {
        if quantity < 0 {
            return Err(OrderError::InvalidArgument(format!(
                "quantity must not be negative, got {quantity}"
            )));
        }
        let quantity = u32::try_from(quantity).map_err(|_| {
            OrderError::InvalidArgument(format!("quantity {quantity} is too large"))
        })?;

        self.quantity = quantity;
        self.update_price();
        Ok(())
    }

    /// Set the flavor; any label is accepted and the total is left alone
    pub fn set_flavor(&mut self, flavor: impl Into<String>) {
        self.flavor = flavor.into();
    }

    /// Whether a flavor has been chosen
    #[must_use]
    pub fn has_flavor_set(&self) -> bool {
        !self.flavor.is_empty()
    }

    /// Set the pickup date label and recompute the total
    ///
    /// The label is not checked against the options; an unknown label simply
    /// never earns the same-day surcharge.
    pub fn set_date(&mut self, date: impl Into<String>) {
        self.pickup_date = date.into();
        self.update_price();
    }

    /// Back to a fresh order: no cupcakes, no flavor, same-day pickup, zero
    /// total and no pending error
    pub fn reset(&mut self) {
        self.quantity = 0;
        self.flavor.clear();
        self.pickup_date = self.pickup_options.same_day().to_string();
        self.price = Money::ZERO;
        self.last_error = None;
    }

    /// The total as currency text
    #[must_use]
    pub fn price_display(&self, format: &CurrencyFormat) -> String {
        format.format(self.price)
    }

    /// Whether the same-day slot is selected
    #[must_use]
    pub fn is_same_day_pickup(&self) -> bool {
        self.pickup_options.is_same_day(&self.pickup_date)
    }

    /// Calendar day behind the selected pickup label, if it is one of the options
    #[must_use]
    pub fn pickup_day(&self) -> Option<NaiveDate> {
        self.pickup_options.day_for(&self.pickup_date)
    }

    fn update_price(&mut self) {
        let mut price = self.pricing.price_per_unit.times(self.quantity);
        if self.is_same_day_pickup() {
            price = price + self.pricing.same_day_surcharge;
        }
        self.price = price;
    }
}

/// Inputs the order reacts to
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderAction {
    /// Set the number of cupcakes
    SetQuantity {
        /// Requested count; negative counts are rejected
        quantity: i64,
    },
    /// Set the flavor
    SetFlavor {
        /// Flavor label
        flavor: String,
    },
    /// Set the pickup date
    SetDate {
        /// Date label
        date: String,
    },
    /// Start over
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;
    use cupcake_testing::properties::{labels, negative_quantities, quantities};
    use proptest::prelude::*;

    fn order() -> OrderState {
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or(NaiveDate::MIN);
        OrderState::new(today, PricingConfig::default(), &DateLabelFormat::default())
    }

    fn cents(value: i64) -> Money {
        Money::from_cents(value)
    }

    #[test]
    fn new_order_is_reset() {
        let state = order();
        assert_eq!(state.quantity(), 0);
        assert_eq!(state.flavor(), "");
        assert_eq!(state.pickup_date(), "Wed Jan 1");
        assert_eq!(state.price(), Money::ZERO);
        assert!(!state.has_flavor_set());
        assert_eq!(state.date_options().len(), 4);
    }

    #[test]
    fn same_day_pickup_adds_surcharge() {
        let mut state = order();
        let today = state.date_options()[0].clone();

        state.set_date(today);
        assert_eq!(state.set_quantity(3), Ok(()));

        assert_eq!(state.price(), cents(900));
        assert_eq!(state.price_display(&CurrencyFormat::default()), "$9.00");
    }

    #[test]
    fn later_pickup_has_no_surcharge() {
        let mut state = order();
        let tomorrow = state.date_options()[1].clone();

        state.set_date(tomorrow);
        assert_eq!(state.set_quantity(5), Ok(()));

        assert_eq!(state.price(), cents(1000));
    }

    #[test]
    fn zero_cupcakes_today_still_pays_surcharge() {
        let mut state = order();
        assert_eq!(state.set_quantity(0), Ok(()));
        assert_eq!(state.price(), cents(300));
    }

    #[test]
    fn negative_quantity_is_rejected_without_change() {
        let mut state = order();
        assert_eq!(state.set_quantity(6), Ok(()));
        let before = state.clone();

        let result = state.set_quantity(-1);

        assert!(matches!(result, Err(OrderError::InvalidArgument(_))));
        assert_eq!(state, before);
    }

    #[test]
    fn oversized_quantity_is_rejected() {
        let mut state = order();
        let result = state.set_quantity(i64::from(u32::MAX) + 1);
        assert!(matches!(result, Err(OrderError::InvalidArgument(_))));
        assert_eq!(state.quantity(), 0);
    }

    #[test]
    fn date_outside_options_is_accepted() {
        let mut state = order();
        assert_eq!(state.set_quantity(2), Ok(()));
        state.set_date("next year");

        assert_eq!(state.pickup_date(), "next year");
        assert!(!state.is_same_day_pickup());
        assert_eq!(state.price(), cents(400));
    }

    #[test]
    fn reset_clears_everything() {
        let mut state = order();
        let later = state.date_options()[3].clone();
        assert_eq!(state.set_quantity(12), Ok(()));
        state.set_flavor("Coffee");
        state.set_date(later);

        state.reset();
        let once = state.clone();
        state.reset();

        assert_eq!(state, once);
        assert_eq!(state.quantity(), 0);
        assert!(!state.has_flavor_set());
        assert_eq!(state.pickup_date(), state.date_options()[0]);
        assert_eq!(state.price(), Money::ZERO);
    }

    #[test]
    fn reset_clears_last_error() {
        let mut state = order();
        let error = state.set_quantity(-1).err();
        state.record_error(error);
        assert!(state.last_error().is_some());

        state.reset();

        assert_eq!(state.last_error(), None);
    }

    #[test]
    fn pickup_day_follows_selected_label() {
        let mut state = order();
        assert_eq!(state.pickup_day(), NaiveDate::from_ymd_opt(2025, 1, 1));

        let last = state.date_options()[3].clone();
        state.set_date(last);
        assert_eq!(state.pickup_day(), NaiveDate::from_ymd_opt(2025, 1, 4));

        state.set_date("next year");
        assert_eq!(state.pickup_day(), None);
    }

    #[test]
    fn latest_quantity_wins() {
        let mut state = order();
        let later = state.date_options()[2].clone();
        state.set_date(later);

        assert_eq!(state.set_quantity(12), Ok(()));
        assert_eq!(state.set_quantity(1), Ok(()));

        assert_eq!(state.price(), cents(200));
    }

    #[test]
    fn custom_pricing_is_used() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or(NaiveDate::MIN);
        let pricing = PricingConfig {
            price_per_unit: cents(350),
            same_day_surcharge: cents(100),
        };
        let mut state = OrderState::new(today, pricing, &DateLabelFormat::default());

        assert_eq!(state.set_quantity(2), Ok(()));
        assert_eq!(state.price(), cents(800));
    }

    proptest! {
        #[test]
        fn price_follows_formula(quantity in quantities(), day in 0usize..4) {
            let mut state = order();
            let date = state.date_options()[day].clone();
            state.set_date(date);
            prop_assert!(state.set_quantity(quantity).is_ok());

            let surcharge = if day == 0 { 300 } else { 0 };
            prop_assert_eq!(state.price(), cents(quantity * 200 + surcharge));
        }

        #[test]
        fn flavor_never_changes_price(quantity in quantities(), flavor in labels()) {
            let mut state = order();
            prop_assert!(state.set_quantity(quantity).is_ok());
            let before = state.price();

            state.set_flavor(flavor.clone());

            prop_assert_eq!(state.price(), before);
            prop_assert_eq!(state.has_flavor_set(), !flavor.is_empty());
        }

        #[test]
        fn negative_quantities_never_apply(quantity in negative_quantities()) {
            let mut state = order();
            prop_assert!(state.set_quantity(quantity).is_err());
            prop_assert_eq!(state.quantity(), 0);
            prop_assert_eq!(state.price(), Money::ZERO);
        }
    }
}
