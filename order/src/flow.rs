//! The order wizard: start → flavor → pickup → summary.
//!
//! [`OrderFlow`] is the presentation adapter. It turns user input into
//! [`OrderAction`]s on the shared store, decides when the user may move on,
//! and owns every call to the [`ShareTarget`] and [`Navigator`] ports.

use crate::money::CurrencyFormat;
use crate::ports::{Navigator, Screen, ShareError, ShareTarget};
use crate::reducer::{OrderEnvironment, OrderReducer};
use crate::summary::{OrderSnapshot, OrderSummary};
use crate::types::{OrderAction, OrderError, OrderState};
use cupcake_runtime::{Store, StoreError};
use std::sync::Arc;
use thiserror::Error;

/// Store holding one ordering session
pub type OrderStore = Store<OrderState, OrderAction, OrderEnvironment, OrderReducer>;

/// Why a wizard step could not complete
#[derive(Debug, Error)]
pub enum FlowError {
    /// The order rejected the input
    #[error(transparent)]
    Order(#[from] OrderError),

    /// The store is no longer accepting input
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The share target failed
    #[error(transparent)]
    Share(#[from] ShareError),

    /// The flavor is not on the menu
    #[error("flavor {0:?} is not offered")]
    UnknownFlavor(String),

    /// The user tried to leave the flavor screen without choosing one
    #[error("a flavor must be chosen before continuing")]
    FlavorRequired,
}

/// Result of submitting an order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The summary was handed to the share target
    Shared,
    /// Nothing could receive the summary; the order stays on screen
    NoHandler,
}

/// Drives one ordering session through its screens
#[derive(Clone)]
pub struct OrderFlow {
    store: OrderStore,
    share: Arc<dyn ShareTarget>,
    navigator: Arc<dyn Navigator>,
}

impl OrderFlow {
    /// Wrap an existing store
    #[must_use]
    pub fn new(store: OrderStore, share: Arc<dyn ShareTarget>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            store,
            share,
            navigator,
        }
    }

    /// Open a fresh order in a new store
    #[must_use]
    pub fn open(
        environment: OrderEnvironment,
        share: Arc<dyn ShareTarget>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let state = environment.open_order();
        tracing::info!(pickup_options = ?state.date_options(), "Order opened");
        let store = Store::new(state, OrderReducer::new(), environment);
        Self::new(store, share, navigator)
    }

    /// The shared store, for observers and reads
    #[must_use]
    pub const fn store(&self) -> &OrderStore {
        &self.store
    }

    fn currency(&self) -> &CurrencyFormat {
        &self.store.environment().config.currency
    }

    /// Start screen: the quantities offered as buttons
    #[must_use]
    pub fn quantity_choices(&self) -> &[u32] {
        &self.store.environment().config.quantity_choices
    }

    /// Flavor screen: the flavors on the menu
    #[must_use]
    pub fn flavors(&self) -> &[String] {
        &self.store.environment().config.flavors
    }

    /// Pickup screen: the four date labels, same-day first
    pub async fn pickup_options(&self) -> Vec<String> {
        self.store.state(|s| s.date_options().to_vec()).await
    }

    /// Start screen: order `quantity` cupcakes and move to the flavor screen
    ///
    /// Preselects the default flavor if none has been chosen yet.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Order`] for a negative quantity; the user stays
    /// on the start screen.
    pub async fn start_order(&self, quantity: i64) -> Result<(), FlowError> {
        self.store.send(OrderAction::SetQuantity { quantity }).await?;
        if let Some(error) = self.store.state(|s| s.last_error().cloned()).await {
            return Err(error.into());
        }

        if !self.store.state(OrderState::has_flavor_set).await {
            let flavor = self.store.environment().config.default_flavor.clone();
            self.store.send(OrderAction::SetFlavor { flavor }).await?;
        }

        self.go(Screen::Flavor);
        Ok(())
    }

    /// Flavor screen: pick one of the offered flavors
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::UnknownFlavor`] if `flavor` is not on the menu.
    pub async fn choose_flavor(&self, flavor: &str) -> Result<(), FlowError> {
        if !self.store.environment().config.offers_flavor(flavor) {
            tracing::warn!(flavor, "Flavor not offered");
            return Err(FlowError::UnknownFlavor(flavor.to_string()));
        }
        self.store
            .send(OrderAction::SetFlavor {
                flavor: flavor.to_string(),
            })
            .await?;
        Ok(())
    }

    /// Flavor screen: continue to the pickup screen
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::FlavorRequired`] if no flavor is set.
    pub async fn next_from_flavor(&self) -> Result<(), FlowError> {
        if !self.store.state(OrderState::has_flavor_set).await {
            return Err(FlowError::FlavorRequired);
        }
        self.go(Screen::Pickup);
        Ok(())
    }

    /// Pickup screen: pick a date label
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Store`] if the session has been closed.
    pub async fn choose_pickup_date(&self, date: &str) -> Result<(), FlowError> {
        self.store
            .send(OrderAction::SetDate {
                date: date.to_string(),
            })
            .await?;
        Ok(())
    }

    /// Pickup screen: continue to the summary
    pub fn next_from_pickup(&self) {
        self.go(Screen::Summary);
    }

    /// Current total as currency text
    pub async fn price_text(&self) -> String {
        let currency = self.currency().clone();
        self.store.state(move |s| s.price_display(&currency)).await
    }

    /// Current order as a snapshot
    pub async fn snapshot(&self) -> OrderSnapshot {
        self.store.state(OrderSnapshot::of).await
    }

    /// Summary screen text for the current order
    pub async fn summary(&self) -> OrderSummary {
        OrderSummary::render(&self.snapshot().await, self.currency())
    }

    /// Summary screen: submit the order through the share target
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Share`] if the share target fails.
    pub async fn send_order(&self) -> Result<ShareOutcome, FlowError> {
        let summary = self.summary().await;

        if !self.share.can_share() {
            tracing::warn!("No share target available, order not sent");
            return Ok(ShareOutcome::NoHandler);
        }

        self.share.share_text(&summary.subject, &summary.body)?;
        tracing::info!(subject = %summary.subject, "Order shared");
        Ok(ShareOutcome::Shared)
    }

    /// Any screen: drop the order and return to the start screen
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Store`] if the session has been closed.
    pub async fn cancel_order(&self) -> Result<(), FlowError> {
        self.store.send(OrderAction::Reset).await?;
        tracing::info!("Order cancelled");
        self.go(Screen::Start);
        Ok(())
    }

    fn go(&self, screen: Screen) {
        tracing::debug!(%screen, "Next screen");
        self.navigator.navigate_to(screen);
    }
}
