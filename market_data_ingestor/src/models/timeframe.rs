//! Bar aggregation interval.
//!
//! A [`TimeFrame`] is an amount paired with a [`TimeFrameUnit`]. It renders in
//! the brokerage wire form (`"1Min"`, `"15Min"`, `"1Hour"`, `"1Day"`) and
//! parses both that form and the short CLI form (`"5m"`, `"1h"`, `"1D"`,
//! `"1W"`, `"6M"`). Which combinations a vendor accepts is checked by each
//! provider, not here.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimeFrameError {
    #[error("Invalid amount for {:?}: {}", unit, message)]
    InvalidAmount {
        unit: TimeFrameUnit,
        message: String,
    },

    #[error("Invalid input: {}", message)]
    InvalidInput { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFrameUnit {
    Minute,
    Hour,
    Day,
    Week,
    Month,
}

impl TimeFrameUnit {
    /// Suffix used by the brokerage API (`1Min`, `1Hour`, ...).
    pub const fn wire_suffix(self) -> &'static str {
        match self {
            TimeFrameUnit::Minute => "Min",
            TimeFrameUnit::Hour => "Hour",
            TimeFrameUnit::Day => "Day",
            TimeFrameUnit::Week => "Week",
            TimeFrameUnit::Month => "Month",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeFrame {
    pub amount: u32,
    pub unit: TimeFrameUnit,
}

impl TimeFrame {
    pub const fn new(amount: u32, unit: TimeFrameUnit) -> Self {
        Self { amount, unit }
    }

    pub fn minutes(amount: u32) -> Result<Self, TimeFrameError> {
        Self::non_zero(amount, TimeFrameUnit::Minute)
    }

    pub fn hours(amount: u32) -> Result<Self, TimeFrameError> {
        Self::non_zero(amount, TimeFrameUnit::Hour)
    }

    pub const fn day() -> Self {
        Self::new(1, TimeFrameUnit::Day)
    }

    pub const fn week() -> Self {
        Self::new(1, TimeFrameUnit::Week)
    }

    pub fn months(amount: u32) -> Result<Self, TimeFrameError> {
        Self::non_zero(amount, TimeFrameUnit::Month)
    }

    fn non_zero(amount: u32, unit: TimeFrameUnit) -> Result<Self, TimeFrameError> {
        if amount == 0 {
            return Err(TimeFrameError::InvalidAmount {
                unit,
                message: "amount must be greater than zero".into(),
            });
        }
        Ok(Self::new(amount, unit))
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.wire_suffix())
    }
}

impl FromStr for TimeFrame {
    type Err = TimeFrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        let (digits, unit) = s.split_at(split);

        let amount = if digits.is_empty() {
            1
        } else {
            digits.parse::<u32>().map_err(|e| TimeFrameError::InvalidInput {
                message: format!("bad amount in timeframe {s:?}: {e}"),
            })?
        };

        // single letters are case sensitive: m = minute, M = month
        let unit = match unit {
            "m" | "T" => TimeFrameUnit::Minute,
            "M" => TimeFrameUnit::Month,
            other => match other.to_ascii_lowercase().as_str() {
                "min" | "minute" | "minutes" => TimeFrameUnit::Minute,
                "h" | "hr" | "hour" | "hours" => TimeFrameUnit::Hour,
                "d" | "day" | "days" => TimeFrameUnit::Day,
                "w" | "wk" | "week" | "weeks" => TimeFrameUnit::Week,
                "mo" | "month" | "months" => TimeFrameUnit::Month,
                _ => {
                    return Err(TimeFrameError::InvalidInput {
                        message: format!("unknown timeframe unit in {s:?}"),
                    });
                }
            },
        };

        Self::non_zero(amount, unit)
    }
}

impl TryFrom<String> for TimeFrame {
    type Error = TimeFrameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeFrame> for String {
    fn from(tf: TimeFrame) -> Self {
        tf.to_string()
    }
}
