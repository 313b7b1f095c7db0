//! # Cupcake Testing
//!
//! Testing utilities and helpers for the cupcake order flow.
//!
//! This crate provides:
//! - Deterministic [`Clock`] implementations
//! - [`ReducerTest`], a given/when/then harness for reducers
//! - proptest strategies for order inputs
//!
//! ## Example
//!
//! ```
//! use cupcake_core::{environment::Clock, reducer::Reducer};
//! use cupcake_testing::{test_clock, FixedClock, ReducerTest};
//! use chrono::Datelike;
//!
//! /// Records the day of month each time it is asked to
//! struct Stamp;
//!
//! impl Reducer for Stamp {
//!     type State = Vec<u32>;
//!     type Action = ();
//!     type Environment = FixedClock;
//!
//!     fn reduce(&self, state: &mut Vec<u32>, _action: (), clock: &FixedClock) {
//!         state.push(clock.now().day());
//!     }
//! }
//!
//! ReducerTest::new(Stamp)
//!     .with_env(test_clock())
//!     .given_state(Vec::new())
//!     .when_action(())
//!     .then_state(|days| assert_eq!(days, &[1]))
//!     .run();
//! ```
//!
//! The order crate's reducer tests use the same harness with
//! `OrderEnvironment::new(Arc::new(test_clock()), utc, OrderConfig::default())`.

use chrono::{DateTime, Utc};
use cupcake_core::environment::Clock;

/// Given/when/then harness for reducers
pub mod reducer_test;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use chrono::TimeZone;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use cupcake_testing::mocks::FixedClock;
    /// use cupcake_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }

        /// Fixed clock at midday UTC of the given calendar date
        ///
        /// Returns `None` for dates chrono cannot represent.
        #[must_use]
        pub fn on_date(year: i32, month: u32, day: u32) -> Option<Self> {
            Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
                .single()
                .map(Self::new)
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC, a Wednesday)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Property-based testing utilities using proptest
pub mod properties {
    use chrono::{Days, NaiveDate};
    use proptest::prelude::*;

    /// Quantities a customer could plausibly order
    pub fn quantities() -> impl Strategy<Value = i64> {
        0i64..=10_000
    }

    /// Quantities that must be rejected
    pub fn negative_quantities() -> impl Strategy<Value = i64> {
        i64::MIN..0
    }

    /// Free-form labels, including the empty label
    pub fn labels() -> impl Strategy<Value = String> {
        "[A-Za-z ]{0,24}"
    }

    /// Calendar dates spread over several years, month and year ends included
    pub fn calendar_dates() -> impl Strategy<Value = NaiveDate> {
        (0u64..3_000).prop_filter_map("date out of range", |offset| {
            NaiveDate::from_ymd_opt(2020, 1, 1)
                .and_then(|start| start.checked_add_days(Days::new(offset)))
        })
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::ReducerTest;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
    }

    #[test]
    fn test_fixed_clock_on_date() {
        let clock = FixedClock::on_date(2024, 2, 29);
        let day = clock.map(|c| (c.now().month(), c.now().day()));
        assert_eq!(day, Some((2, 29)));

        assert!(FixedClock::on_date(2023, 2, 29).is_none());
    }
}
