//! Reducer logic for the order.

use crate::config::OrderConfig;
use crate::types::{OrderAction, OrderState};
use chrono::{FixedOffset, Local, NaiveDate, Offset};
use cupcake_core::{environment::Clock, reducer::Reducer};
use std::sync::Arc;

/// Environment dependencies for the order reducer and flow
#[derive(Clone)]
pub struct OrderEnvironment {
    /// Clock deciding which day "today" is
    pub clock: Arc<dyn Clock>,
    /// Offset of the shop's wall clock from UTC
    pub utc_offset: FixedOffset,
    /// Prices, menu and display settings
    pub config: Arc<OrderConfig>,
}

impl OrderEnvironment {
    /// Creates a new `OrderEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, utc_offset: FixedOffset, config: OrderConfig) -> Self {
        Self {
            clock,
            utc_offset,
            config: Arc::new(config),
        }
    }

    /// Environment using the configured offset, or the host's local offset when unset
    #[must_use]
    pub fn from_config(clock: Arc<dyn Clock>, config: OrderConfig) -> Self {
        let utc_offset = config
            .utc_offset()
            .unwrap_or_else(|| Local::now().offset().fix());
        Self::new(clock, utc_offset, config)
    }

    /// The calendar day on the shop's wall clock
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.now().with_timezone(&self.utc_offset).date_naive()
    }

    /// A fresh order opened now
    #[must_use]
    pub fn open_order(&self) -> OrderState {
        OrderState::new(
            self.today(),
            self.config.pricing,
            &self.config.date_label_format,
        )
    }
}

/// Reducer for the order
///
/// Pure: every action is applied to the state and nothing else happens.
/// Rejected input is kept in [`OrderState::last_error`].
#[derive(Clone, Debug, Default)]
pub struct OrderReducer;

impl OrderReducer {
    /// Creates a new `OrderReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for OrderReducer {
    type State = OrderState;
    type Action = OrderAction;
    type Environment = OrderEnvironment;

    fn reduce(&self, state: &mut Self::State, action: Self::Action, _env: &Self::Environment) {
        match action {
            OrderAction::SetQuantity { quantity } => match state.set_quantity(quantity) {
                Ok(()) => {
                    tracing::debug!(quantity, price = state.price().cents(), "Quantity set");
                    state.record_error(None);
                },
                Err(error) => {
                    tracing::warn!(quantity, %error, "Quantity rejected");
                    state.record_error(Some(error));
                },
            },
            OrderAction::SetFlavor { flavor } => {
                tracing::debug!(flavor = %flavor, "Flavor set");
                state.set_flavor(flavor);
                state.record_error(None);
            },
            OrderAction::SetDate { date } => {
                tracing::debug!(date = %date, "Pickup date set");
                state.set_date(date);
                tracing::debug!(
                    same_day = state.is_same_day_pickup(),
                    price = state.price().cents(),
                    "Price updated"
                );
                state.record_error(None);
            },
            OrderAction::Reset => {
                tracing::debug!("Order reset");
                state.reset();
            },
        }
    }
}
