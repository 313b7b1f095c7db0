//! Outbound ports of the order flow.
//!
//! Sharing a finished order and moving between screens are owned by the host
//! (a UI shell, a terminal, a test). The flow talks to them only through
//! these traits.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Screens of the order wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    /// Choose how many cupcakes
    Start,
    /// Choose a flavor
    Flavor,
    /// Choose a pickup date
    Pickup,
    /// Review, submit or cancel
    Summary,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Flavor => write!(f, "flavor"),
            Self::Pickup => write!(f, "pickup"),
            Self::Summary => write!(f, "summary"),
        }
    }
}

/// Share failure reported by a [`ShareTarget`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    /// The target accepted the request but could not deliver it
    #[error("share target failed: {0}")]
    Failed(String),
}

/// Somewhere a plain-text order can be sent (mail, chat, clipboard)
pub trait ShareTarget: Send + Sync {
    /// Whether anything is available to receive the text
    fn can_share(&self) -> bool;

    /// Hand over a subject and body
    ///
    /// # Errors
    ///
    /// Returns [`ShareError`] if delivery fails.
    fn share_text(&self, subject: &str, body: &str) -> Result<(), ShareError>;
}

/// Moves the host between screens
pub trait Navigator: Send + Sync {
    /// Show `screen`
    fn navigate_to(&self, screen: Screen);
}

/// Writes shared orders to standard output
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleShareTarget;

impl ShareTarget for ConsoleShareTarget {
    fn can_share(&self) -> bool {
        true
    }

    fn share_text(&self, subject: &str, body: &str) -> Result<(), ShareError> {
        println!("Subject: {subject}\n\n{body}\n");
        Ok(())
    }
}

/// Navigator that only logs where the user is sent
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate_to(&self, screen: Screen) {
        tracing::info!(%screen, "Navigating");
    }
}
