//! Defines the time mode of a weather query: forecast, historical, or current
//! conditions. Providers declare capabilities per mode, and planned requests
//! carry exactly one mode.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The temporal regime a query targets.
///
/// Providers typically expose different variable sets per mode (a forecast
/// endpoint rarely serves thirty-year archives), so the mode participates in
/// capability filtering and in prompt/answer wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeMode {
    /// Hour-by-hour (or daily) predictions for the coming days.
    Forecast,
    /// Archived observations or reanalysis, up to decades back.
    Historical,
    /// Present conditions, a single observation per variable.
    Current,
}

impl TimeMode {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            TimeMode::Forecast => "forecast",
            TimeMode::Historical => "historical",
            TimeMode::Current => "current",
        }
    }
}

/// Formats a `TimeMode` as its lowercase wire name.
///
/// # Examples
///
/// ```
/// use meteowriter::TimeMode;
///
/// assert_eq!(format!("{}", TimeMode::Forecast), "forecast");
/// assert_eq!(TimeMode::Historical.to_string(), "historical");
/// ```
impl fmt::Display for TimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a string does not name a known time mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown time mode '{0}', expected forecast, historical or current")]
pub struct ParseTimeModeError(pub String);

impl FromStr for TimeMode {
    type Err = ParseTimeModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forecast" => Ok(TimeMode::Forecast),
            "historical" => Ok(TimeMode::Historical),
            "current" => Ok(TimeMode::Current),
            _ => Err(ParseTimeModeError(s.to_string())),
        }
    }
}
