//! Cupcake order wizard.
//!
//! A single ordering session: the customer picks a quantity, a flavor and a
//! pickup day, reviews the total and either submits the order as text or
//! cancels it.
//!
//! - [`OrderState`] holds the order and owns the price rule
//!   (`quantity × unit price`, plus a surcharge for same-day pickup)
//! - [`OrderReducer`] applies [`OrderAction`]s to it inside a
//!   [`cupcake_runtime::Store`], which notifies observers after each change
//! - [`OrderFlow`] drives the screens and talks to the host through the
//!   [`ShareTarget`] and [`Navigator`] ports
//!
//! # Quick Start
//!
//! ```no_run
//! use cupcake_core::environment::SystemClock;
//! use cupcake_order::{
//!     ConsoleShareTarget, OrderConfig, OrderEnvironment, OrderFlow, TracingNavigator,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = OrderEnvironment::from_config(Arc::new(SystemClock), OrderConfig::from_env()?);
//! let flow = OrderFlow::open(env, Arc::new(ConsoleShareTarget), Arc::new(TracingNavigator));
//!
//! flow.start_order(6).await?;
//! flow.choose_flavor("Chocolate").await?;
//! flow.next_from_flavor().await?;
//! flow.next_from_pickup();
//! flow.send_order().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod flow;
pub mod money;
pub mod pickup;
pub mod ports;
pub mod reducer;
pub mod summary;
pub mod types;

// Re-export commonly used types
pub use config::{ConfigError, OrderConfig, PricingConfig};
pub use flow::{FlowError, OrderFlow, OrderStore, ShareOutcome};
pub use money::{CurrencyFormat, Money};
pub use pickup::{DateLabelFormat, PICKUP_OPTION_COUNT, PickupOptions};
pub use ports::{ConsoleShareTarget, Navigator, Screen, ShareError, ShareTarget, TracingNavigator};
pub use reducer::{OrderEnvironment, OrderReducer};
pub use summary::{OrderSnapshot, OrderSummary};
pub use types::{OrderAction, OrderError, OrderState};
