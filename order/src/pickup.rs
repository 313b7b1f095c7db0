//! Pickup date options.
//!
//! An order offers four consecutive calendar days for pickup, starting with
//! the day the order was opened. The first option is the same-day slot.

use chrono::format::{Item, StrftimeItems};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// Number of pickup days offered
pub const PICKUP_OPTION_COUNT: usize = 4;

const DAY_OFFSETS: [u64; PICKUP_OPTION_COUNT] = [0, 1, 2, 3];

/// Default label pattern, e.g. `Wed Jan 1`
pub const DEFAULT_DATE_LABEL_FORMAT: &str = "%a %b %-d";

/// Leap year whose days are rendered when a pattern is validated
const CHECK_YEAR: i32 = 2024;

/// 366 days plus the start of the next year
const CHECK_DAYS: usize = 366 + PICKUP_OPTION_COUNT;

/// A validated chrono `strftime` pattern for date labels
///
/// A pattern is only accepted if it renders a non-empty label for every
/// calendar day and gives any four consecutive days four different labels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateLabelFormat(String);

/// The pattern cannot label pickup days
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date label format {pattern:?}: {reason}")]
pub struct InvalidDateLabelFormat {
    /// The rejected pattern
    pub pattern: String,
    /// What is wrong with it
    pub reason: &'static str,
}

impl DateLabelFormat {
    /// Parse and validate a pattern
    ///
    /// Every day from the first of a leap year through the first days of the
    /// next year is rendered, so month ends, the leap day and the year
    /// rollover are all covered.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDateLabelFormat`] if the pattern is empty or
    /// malformed, needs more than a calendar date to render (e.g. `%H:%M`),
    /// renders an empty label, or gives two of four consecutive days the same
    /// label (e.g. `%Y` or plain text).
    pub fn parse(pattern: &str) -> Result<Self, InvalidDateLabelFormat> {
        let format = Self(pattern.to_string());

        if pattern.trim().is_empty() {
            return Err(format.invalid("pattern is empty"));
        }
        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            return Err(format.invalid("unknown specifier"));
        }

        let first = NaiveDate::from_ymd_opt(CHECK_YEAR, 1, 1)
            .ok_or_else(|| format.invalid("calendar check unavailable"))?;
        let labels = first
            .iter_days()
            .take(CHECK_DAYS)
            .map(|day| format.label(day))
            .collect::<Result<Vec<_>, _>>()?;

        if labels.iter().any(|label| label.trim().is_empty()) {
            return Err(format.invalid("renders an empty label"));
        }
        let repeats = labels.windows(PICKUP_OPTION_COUNT).any(|window| {
            window
                .iter()
                .enumerate()
                .any(|(i, label)| window[i + 1..].contains(label))
        });
        if repeats {
            return Err(format.invalid("consecutive days share a label"));
        }

        Ok(format)
    }

    /// The raw pattern
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Render a calendar day with this pattern
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDateLabelFormat`] if the pattern asks for a time or
    /// time zone, which a calendar day does not have.
    pub fn label(&self, day: NaiveDate) -> Result<String, InvalidDateLabelFormat> {
        let mut out = String::new();
        write!(out, "{}", day.format(&self.0))
            .map_err(|_| self.invalid("needs more than a calendar date"))?;
        Ok(out)
    }

    fn invalid(&self, reason: &'static str) -> InvalidDateLabelFormat {
        InvalidDateLabelFormat {
            pattern: self.0.clone(),
            reason,
        }
    }
}

impl Default for DateLabelFormat {
    fn default() -> Self {
        Self(DEFAULT_DATE_LABEL_FORMAT.to_string())
    }
}

impl TryFrom<String> for DateLabelFormat {
    type Error = InvalidDateLabelFormat;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DateLabelFormat> for String {
    fn from(value: DateLabelFormat) -> Self {
        value.0
    }
}

impl fmt::Display for DateLabelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The four pickup days of one order, generated once
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickupOptions {
    days: [NaiveDate; PICKUP_OPTION_COUNT],
    labels: Vec<String>,
}

impl PickupOptions {
    /// Today and the three following calendar days
    #[must_use]
    pub fn starting(today: NaiveDate, format: &DateLabelFormat) -> Self {
        let days = DAY_OFFSETS.map(|offset| {
            today
                .checked_add_days(Days::new(offset))
                .unwrap_or(NaiveDate::MAX)
        });
        // Parsed patterns always render; ISO dates stand in otherwise
        let labels = days
            .iter()
            .map(|day| format.label(*day).unwrap_or_else(|_| day.to_string()))
            .collect();

        Self { days, labels }
    }

    /// Labels in calendar order
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Calendar days in order
    #[must_use]
    pub const fn days(&self) -> &[NaiveDate; PICKUP_OPTION_COUNT] {
        &self.days
    }

    /// Label of the same-day slot
    #[must_use]
    pub fn same_day(&self) -> &str {
        &self.labels[0]
    }

    /// Whether `label` names the same-day slot
    #[must_use]
    pub fn is_same_day(&self, label: &str) -> bool {
        self.same_day() == label
    }

    /// Calendar day behind a label, if it is one of the options
    #[must_use]
    pub fn day_for(&self, label: &str) -> Option<NaiveDate> {
        self.labels
            .iter()
            .position(|candidate| candidate == label)
            .map(|index| self.days[index])
    }
}
