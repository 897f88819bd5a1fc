//! Validated form inputs.
//!
//! Each value enforces its range when constructed, so anything that reaches
//! the estimator is already inside the domain the form allows.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const SECONDS_PER_HOUR: u32 = 60 * 60;
const SECONDS_PER_MINUTE: u32 = 60;

/// Target time to wake up (hour and minute only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WakeTime {
    hour: u8,
    minute: u8,
}

impl WakeTime {
    pub const DEFAULT: Self = Self { hour: 7, minute: 0 };

    pub fn new(hour: u32, minute: u32) -> Result<Self, ValidationError> {
        if hour > 23 {
            return Err(ValidationError::OutOfRange {
                field: "wake hour",
                min: 0.0,
                max: 23.0,
                value: hour as f64,
            });
        }
        if minute > 59 {
            return Err(ValidationError::OutOfRange {
                field: "wake minute",
                min: 0.0,
                max: 59.0,
                value: minute as f64,
            });
        }
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    /// Take the hour and minute of any clock value. Seconds and the date
    /// component are dropped.
    pub fn from_time<T: Timelike>(value: &T) -> Self {
        Self {
            hour: value.hour() as u8,
            minute: value.minute() as u8,
        }
    }

    pub fn hour(&self) -> u32 {
        self.hour as u32
    }

    pub fn minute(&self) -> u32 {
        self.minute as u32
    }

    /// Total seconds past midnight.
    pub fn seconds_since_midnight(&self) -> u32 {
        self.hour() * SECONDS_PER_HOUR + self.minute() * SECONDS_PER_MINUTE
    }

    pub fn as_naive_time(&self) -> NaiveTime {
        NaiveTime::from_num_seconds_from_midnight_opt(self.seconds_since_midnight(), 0)
            .unwrap_or(NaiveTime::MIN)
    }
}

impl Default for WakeTime {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for WakeTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for WakeTime {
    type Err = ValidationError;

    /// Parses 24-hour `HH:MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let time = NaiveTime::parse_from_str(s.trim(), "%H:%M").map_err(|e| {
            ValidationError::InvalidValue {
                field: "wake time",
                message: format!("expected HH:MM, got '{s}' ({e})"),
            }
        })?;
        Ok(Self::from_time(&time))
    }
}

impl TryFrom<String> for WakeTime {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WakeTime> for String {
    fn from(value: WakeTime) -> Self {
        value.to_string()
    }
}

/// Desired hours of sleep, in quarter-hour steps between 4 and 12.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SleepAmount(f64);

impl SleepAmount {
    pub const MIN: f64 = 4.0;
    pub const MAX: f64 = 12.0;
    pub const STEP: f64 = 0.25;
    pub const DEFAULT: Self = Self(8.0);

    pub fn new(hours: f64) -> Result<Self, ValidationError> {
        if !hours.is_finite() {
            return Err(ValidationError::InvalidValue {
                field: "sleep amount",
                message: format!("{hours} is not a number of hours"),
            });
        }
        if !(Self::MIN..=Self::MAX).contains(&hours) {
            return Err(ValidationError::OutOfRange {
                field: "sleep amount",
                min: Self::MIN,
                max: Self::MAX,
                value: hours,
            });
        }
        if (hours / Self::STEP).fract() != 0.0 {
            return Err(ValidationError::OffStep {
                field: "sleep amount",
                step: Self::STEP,
                value: hours,
            });
        }
        Ok(Self(hours))
    }

    pub fn hours(&self) -> f64 {
        self.0
    }

    /// Form label, e.g. `8 hours` or `7.25 hours`.
    pub fn label(&self) -> String {
        format!("{} hours", self.0)
    }
}

impl Default for SleepAmount {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for SleepAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SleepAmount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hours = s
            .trim()
            .parse::<f64>()
            .map_err(|e| ValidationError::InvalidValue {
                field: "sleep amount",
                message: format!("'{s}': {e}"),
            })?;
        Self::new(hours)
    }
}

impl TryFrom<f64> for SleepAmount {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SleepAmount> for f64 {
    fn from(value: SleepAmount) -> Self {
        value.0
    }
}

/// Daily cups of coffee, 1 to 20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct CoffeeAmount(u8);

impl CoffeeAmount {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 20;
    pub const DEFAULT: Self = Self(1);

    pub fn new(cups: u32) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&cups) {
            return Err(ValidationError::OutOfRange {
                field: "coffee amount",
                min: Self::MIN as f64,
                max: Self::MAX as f64,
                value: cups as f64,
            });
        }
        Ok(Self(cups as u8))
    }

    pub fn cups(&self) -> u32 {
        self.0 as u32
    }

    /// Form label, `1 cup` or `N cups`.
    pub fn label(&self) -> String {
        if self.0 == 1 {
            "1 cup".to_string()
        } else {
            format!("{} cups", self.0)
        }
    }
}

impl Default for CoffeeAmount {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for CoffeeAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CoffeeAmount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cups = s
            .trim()
            .parse::<u32>()
            .map_err(|e| ValidationError::InvalidValue {
                field: "coffee amount",
                message: format!("'{s}': {e}"),
            })?;
        Self::new(cups)
    }
}

impl TryFrom<u32> for CoffeeAmount {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CoffeeAmount> for u32 {
    fn from(value: CoffeeAmount) -> Self {
        value.cups()
    }
}

/// The three form values together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SleepRequest {
    #[serde(default)]
    pub wake_time: WakeTime,
    #[serde(default)]
    pub sleep_amount: SleepAmount,
    #[serde(default)]
    pub coffee_amount: CoffeeAmount,
}

impl SleepRequest {
    pub fn prediction_input(&self) -> PredictionInput {
        PredictionInput::new(self.wake_time, self.sleep_amount, self.coffee_amount)
    }
}

/// Feature vector handed to a predictor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionInput {
    /// Wake time as seconds past midnight.
    pub wake: f64,
    /// Desired sleep in hours.
    pub estimated_sleep: f64,
    /// Cups of coffee per day.
    pub coffee: f64,
}

impl PredictionInput {
    pub fn new(wake_time: WakeTime, sleep: SleepAmount, coffee: CoffeeAmount) -> Self {
        Self {
            wake: wake_time.seconds_since_midnight() as f64,
            estimated_sleep: sleep.hours(),
            coffee: coffee.cups() as f64,
        }
    }
}
