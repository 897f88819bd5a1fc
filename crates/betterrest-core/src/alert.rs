//! The message shown after a calculation.

use serde::Serialize;

use crate::estimator::{BedtimeResult, ClockStyle};

pub const SUCCESS_TITLE: &str = "Your ideal bedtime is";
pub const FAILURE_TITLE: &str = "Error";
pub const DISMISS_LABEL: &str = "Understood";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub is_error: bool,
}

impl Alert {
    pub fn from_result(result: &BedtimeResult, style: ClockStyle) -> Self {
        match result {
            Ok(bedtime) => Self {
                title: SUCCESS_TITLE.to_string(),
                message: bedtime.format_short(style),
                is_error: false,
            },
            Err(failure) => Self {
                title: FAILURE_TITLE.to_string(),
                message: failure.to_string(),
                is_error: true,
            },
        }
    }

    /// Plain-text rendering: title, message, then the dismiss hint.
    pub fn render(&self) -> String {
        format!("{}\n{}\n[{}]", self.title, self.message, DISMISS_LABEL)
    }
}
