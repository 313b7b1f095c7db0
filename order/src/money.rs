//! Money amounts and their display as currency text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Money amount in cents (to avoid floating point issues)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Zero amount
    pub const ZERO: Self = Self(0);

    /// Creates a new money amount from cents
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the value in cents
    #[must_use]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Price of `quantity` units at this unit price, saturating at the bounds of `i64`
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(i64::from(quantity)))
    }

    /// Whether the amount is below zero
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&CurrencyFormat::default().format(*self))
    }
}

/// Where the currency symbol goes relative to the number
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    /// `$9.00`
    #[default]
    Prefix,
    /// `9,00 €`
    Suffix,
}

/// Locale conventions for rendering a [`Money`] amount
///
/// The default matches US dollars: `$1,234.50`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    /// Currency symbol, e.g. `$` or `€`
    pub symbol: String,
    /// Placement of the symbol
    pub position: SymbolPosition,
    /// Separator between whole units and cents
    pub decimal_separator: char,
    /// Separator between groups of three digits, if any
    pub grouping_separator: Option<char>,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            position: SymbolPosition::Prefix,
            decimal_separator: '.',
            grouping_separator: Some(','),
        }
    }
}

impl CurrencyFormat {
    /// Render an amount as currency text
    #[must_use]
    pub fn format(&self, amount: Money) -> String {
        let cents = amount.cents().unsigned_abs();
        let whole = group_digits(&(cents / 100).to_string(), self.grouping_separator);
        let number = format!("{whole}{}{:02}", self.decimal_separator, cents % 100);
        let sign = if amount.is_negative() { "-" } else { "" };

        match self.position {
            SymbolPosition::Prefix => format!("{sign}{}{number}", self.symbol),
            SymbolPosition::Suffix => format!("{sign}{number} {}", self.symbol),
        }
    }
}

fn group_digits(digits: &str, separator: Option<char>) -> String {
    let Some(separator) = separator else {
        return digits.to_string();
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
