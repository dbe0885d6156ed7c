//! Percentage-of-header-width values.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// A width expressed as a percentage of the header row width.
///
/// Declared column widths live in `(0, 100]`; computed widths (remainder
/// fill, resize output) are plain values and are not range-checked here.
///
/// Deserializes from either a number (`40`, `12.5`) or a percent string
/// (`"40%"`), so column files written for CSS-style widths load unchanged.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct Percent(f64);

impl Percent {
    /// The full header width.
    pub const FULL: Self = Self(100.0);

    /// Wrap a raw percentage.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// The raw percentage.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// Parse `"40"`, `"40%"` or `" 12.5 % "`.
    ///
    /// Returns `None` for empty, non-numeric or non-finite input.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
        let value: f64 = number.parse().ok()?;
        value.is_finite().then_some(Self(value))
    }

    /// Whether the value is usable as a declared column width.
    #[must_use]
    pub fn is_declarable(self) -> bool {
        self.0.is_finite() && self.0 > 0.0 && self.0 <= 100.0
    }
}

impl From<f64> for Percent {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PercentRepr {
    Number(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Percent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match PercentRepr::deserialize(deserializer)? {
            PercentRepr::Number(value) if value.is_finite() => Ok(Self(value)),
            PercentRepr::Number(value) => Err(de::Error::custom(format!(
                "percentage must be finite, got {value}"
            ))),
            PercentRepr::Text(raw) => Self::parse(&raw)
                .ok_or_else(|| de::Error::custom(format!("invalid percentage {raw:?}"))),
        }
    }
}
