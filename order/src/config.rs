//! Configuration for the order flow.
//!
//! Every value has a default matching the shop's standard menu. Deployments
//! can override prices, currency and date labels through `CUPCAKE_*`
//! environment variables.
//!
//! ```no_run
//! use cupcake_order::config::OrderConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = OrderConfig::from_env()?;
//! println!("Unit price: {}", config.currency.format(config.pricing.price_per_unit));
//! # Ok(())
//! # }
//! ```

use crate::money::{CurrencyFormat, Money};
use crate::pickup::{DateLabelFormat, InvalidDateLabelFormat};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unit price override, in cents
pub const ENV_PRICE_PER_UNIT: &str = "CUPCAKE_PRICE_PER_UNIT_CENTS";
/// Same-day surcharge override, in cents
pub const ENV_SAME_DAY_SURCHARGE: &str = "CUPCAKE_SAME_DAY_SURCHARGE_CENTS";
/// Currency symbol override
pub const ENV_CURRENCY_SYMBOL: &str = "CUPCAKE_CURRENCY_SYMBOL";
/// Date label pattern override
pub const ENV_DATE_LABEL_FORMAT: &str = "CUPCAKE_DATE_LABEL_FORMAT";
/// Wall-clock offset from UTC, in minutes
pub const ENV_UTC_OFFSET_MINUTES: &str = "CUPCAKE_UTC_OFFSET_MINUTES";

/// Configuration error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("invalid value {value:?} for {var}")]
    InvalidValue {
        /// Variable name
        var: String,
        /// Raw value
        value: String,
    },

    /// The date label pattern is unusable
    #[error(transparent)]
    DateLabelFormat(#[from] InvalidDateLabelFormat),

    /// Configuration validation failed
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

/// Prices applied to an order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Price of one cupcake
    pub price_per_unit: Money,
    /// Extra charge for picking up on the day the order was opened
    pub same_day_surcharge: Money,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            price_per_unit: Money::from_cents(200),
            same_day_surcharge: Money::from_cents(300),
        }
    }
}

/// Full configuration of the order flow
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    /// Prices
    pub pricing: PricingConfig,
    /// How totals are rendered
    pub currency: CurrencyFormat,
    /// Pattern for pickup date labels
    pub date_label_format: DateLabelFormat,
    /// Offset used to decide what "today" is; `None` means the host's local offset
    pub utc_offset_minutes: Option<i32>,
    /// Flavors offered on the flavor screen
    pub flavors: Vec<String>,
    /// Flavor preselected when an order starts without one
    pub default_flavor: String,
    /// Quantities offered on the start screen
    pub quantity_choices: Vec<u32>,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            pricing: PricingConfig::default(),
            currency: CurrencyFormat::default(),
            date_label_format: DateLabelFormat::default(),
            utc_offset_minutes: None,
            flavors: ["Vanilla", "Chocolate", "Red Velvet", "Salted Caramel", "Coffee"]
                .into_iter()
                .map(String::from)
                .collect(),
            default_flavor: "Vanilla".to_string(),
            quantity_choices: vec![1, 6, 12],
        }
    }
}

impl OrderConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or the result fails
    /// [`OrderConfig::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup, starting from defaults
    ///
    /// # Errors
    ///
    /// Same as [`OrderConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(cents) = parse_var::<i64, _>(&lookup, ENV_PRICE_PER_UNIT)? {
            config.pricing.price_per_unit = Money::from_cents(cents);
        }
        if let Some(cents) = parse_var::<i64, _>(&lookup, ENV_SAME_DAY_SURCHARGE)? {
            config.pricing.same_day_surcharge = Money::from_cents(cents);
        }
        if let Some(symbol) = lookup(ENV_CURRENCY_SYMBOL) {
            config.currency.symbol = symbol;
        }
        if let Some(pattern) = lookup(ENV_DATE_LABEL_FORMAT) {
            config.date_label_format = DateLabelFormat::parse(&pattern)?;
        }
        if let Some(minutes) = parse_var::<i32, _>(&lookup, ENV_UTC_OFFSET_MINUTES)? {
            config.utc_offset_minutes = Some(minutes);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for internal consistency
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pricing.price_per_unit.is_negative() {
            return Err(ConfigError::Validation(
                "price per unit must not be negative".to_string(),
            ));
        }
        if self.pricing.same_day_surcharge.is_negative() {
            return Err(ConfigError::Validation(
                "same-day surcharge must not be negative".to_string(),
            ));
        }
        if self.flavors.iter().any(|flavor| flavor.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "flavor names must not be empty".to_string(),
            ));
        }
        if !self.offers_flavor(&self.default_flavor) {
            return Err(ConfigError::Validation(format!(
                "default flavor {:?} is not on the menu",
                self.default_flavor
            )));
        }
        if self.quantity_choices.is_empty() {
            return Err(ConfigError::Validation(
                "at least one quantity choice is required".to_string(),
            ));
        }
        if self.quantity_choices.contains(&0) {
            return Err(ConfigError::Validation(
                "quantity choices must be at least one cupcake".to_string(),
            ));
        }
        if self.utc_offset_minutes.is_some() && self.utc_offset().is_none() {
            return Err(ConfigError::Validation(format!(
                "UTC offset of {:?} minutes is out of range",
                self.utc_offset_minutes
            )));
        }
        Ok(())
    }

    /// Whether `flavor` is on the menu
    #[must_use]
    pub fn offers_flavor(&self, flavor: &str) -> bool {
        self.flavors.iter().any(|offered| offered == flavor)
    }

    /// Configured wall-clock offset, if one is set and in range
    #[must_use]
    pub fn utc_offset(&self) -> Option<FixedOffset> {
        self.utc_offset_minutes
            .and_then(|minutes| minutes.checked_mul(60))
            .and_then(FixedOffset::east_opt)
    }
}

fn parse_var<T, F>(lookup: &F, var: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|value| {
            value.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
                var: var.to_string(),
                value,
            })
        })
        .transpose()
}
