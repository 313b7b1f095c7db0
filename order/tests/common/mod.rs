//! Shared fixtures for the order integration tests.

#![allow(dead_code)]

use chrono::FixedOffset;
use cupcake_order::{
    Navigator, OrderConfig, OrderEnvironment, OrderFlow, Screen, ShareError, ShareTarget,
};
use cupcake_testing::test_clock;
use std::sync::{Arc, Mutex};

/// Share target that keeps everything it receives
#[derive(Default)]
pub struct RecordingShareTarget {
    pub unavailable: bool,
    pub failure: Option<String>,
    pub shared: Mutex<Vec<(String, String)>>,
}

impl RecordingShareTarget {
    pub fn shared(&self) -> Vec<(String, String)> {
        self.shared.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl ShareTarget for RecordingShareTarget {
    fn can_share(&self) -> bool {
        !self.unavailable
    }

    fn share_text(&self, subject: &str, body: &str) -> Result<(), ShareError> {
        if let Some(reason) = &self.failure {
            return Err(ShareError::Failed(reason.clone()));
        }
        if let Ok(mut shared) = self.shared.lock() {
            shared.push((subject.to_string(), body.to_string()));
        }
        Ok(())
    }
}

/// Navigator that records every screen it is asked to show
#[derive(Default)]
pub struct RecordingNavigator {
    pub screens: Mutex<Vec<Screen>>,
}

impl RecordingNavigator {
    pub fn screens(&self) -> Vec<Screen> {
        self.screens.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&self, screen: Screen) {
        if let Ok(mut screens) = self.screens.lock() {
            screens.push(screen);
        }
    }
}

/// Environment on 2025-01-01 (a Wednesday) in UTC with the default menu
pub fn environment() -> OrderEnvironment {
    let utc = FixedOffset::east_opt(0).unwrap_or_else(|| unreachable!("zero offset is valid"));
    OrderEnvironment::new(Arc::new(test_clock()), utc, OrderConfig::default())
}

pub struct Harness {
    pub flow: OrderFlow,
    pub share: Arc<RecordingShareTarget>,
    pub navigator: Arc<RecordingNavigator>,
}

pub fn harness_with(share: RecordingShareTarget) -> Harness {
    let share = Arc::new(share);
    let navigator = Arc::new(RecordingNavigator::default());
    let flow = OrderFlow::open(environment(), share.clone(), navigator.clone());
    Harness {
        flow,
        share,
        navigator,
    }
}

pub fn harness() -> Harness {
    harness_with(RecordingShareTarget::default())
}
