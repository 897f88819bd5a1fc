//! Bedtime estimation.
//!
//! Turns the three form values into a recommended bedtime by asking a
//! [`Predictor`] how much sleep is actually needed and counting that
//! duration back from the wake time.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{PredictionError, PredictionFailure};
use crate::inputs::{CoffeeAmount, PredictionInput, SleepAmount, SleepRequest, WakeTime};
use crate::predictor::Predictor;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Outcome of a calculation.
pub type BedtimeResult = Result<Bedtime, PredictionFailure>;

/// Clock style for [`Bedtime::format_short`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockStyle {
    /// `11:30 PM`
    #[default]
    TwelveHour,
    /// `23:30`
    TwentyFourHour,
}

/// A recommended bedtime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bedtime {
    /// Clock time to go to bed.
    pub time: NaiveTime,
    /// How many days before the wake day the bedtime falls (1 = the
    /// evening before).
    pub days_before: u32,
    /// Predicted hours of sleep that produced this bedtime.
    pub predicted_sleep: f64,
}

impl Bedtime {
    /// Short clock format, e.g. `10:55 PM`.
    pub fn format_short(&self, style: ClockStyle) -> String {
        match style {
            ClockStyle::TwelveHour => self.time.format("%-I:%M %p").to_string(),
            ClockStyle::TwentyFourHour => self.time.format("%H:%M").to_string(),
        }
    }

    /// Bedtime as a full timestamp given the date of the wake-up.
    pub fn on(&self, wake_date: NaiveDate) -> NaiveDateTime {
        (wake_date - Duration::days(self.days_before as i64)).and_time(self.time)
    }
}

/// Counts `predicted_hours` back from `wake`.
fn bedtime_before(wake: WakeTime, predicted_hours: f64) -> Result<Bedtime, PredictionError> {
    if !predicted_hours.is_finite() || predicted_hours < 0.0 {
        return Err(PredictionError::InvalidOutput(predicted_hours));
    }
    // Whole seconds; anything shorter than one second is not a bedtime.
    let delta = (predicted_hours * 3600.0).round();
    if delta <= 0.0 || delta > i64::MAX as f64 / 2.0 {
        return Err(PredictionError::InvalidOutput(predicted_hours));
    }

    let offset = wake.seconds_since_midnight() as i64 - delta as i64;
    let clock = offset.rem_euclid(SECONDS_PER_DAY);
    let days_before = (clock - offset) / SECONDS_PER_DAY;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(clock as u32, 0)
        .ok_or(PredictionError::InvalidOutput(predicted_hours))?;
    let days_before =
        u32::try_from(days_before).map_err(|_| PredictionError::InvalidOutput(predicted_hours))?;

    Ok(Bedtime {
        time,
        days_before,
        predicted_sleep: predicted_hours,
    })
}

/// Recommend a bedtime for the given inputs.
///
/// Any predictor error collapses into the single [`PredictionFailure`].
pub fn estimate<P: Predictor + ?Sized>(
    wake_time: WakeTime,
    sleep_amount: SleepAmount,
    coffee_amount: CoffeeAmount,
    predictor: &P,
) -> BedtimeResult {
    let input = PredictionInput::new(wake_time, sleep_amount, coffee_amount);
    let outcome = predictor
        .predict(&input)
        .and_then(|hours| bedtime_before(wake_time, hours));

    match outcome {
        Ok(bedtime) => {
            tracing::debug!(
                wake = %wake_time,
                estimated_sleep = input.estimated_sleep,
                coffee = input.coffee,
                predicted_sleep = bedtime.predicted_sleep,
                bedtime = %bedtime.time,
                days_before = bedtime.days_before,
                "bedtime estimated"
            );
            Ok(bedtime)
        }
        Err(cause) => {
            tracing::warn!(wake = %wake_time, error = %cause, "sleep prediction failed");
            Err(PredictionFailure::from(cause))
        }
    }
}

/// Estimator that owns its predictor.
pub struct BedtimeEstimator<P> {
    predictor: P,
}

impl<P: Predictor> BedtimeEstimator<P> {
    pub fn new(predictor: P) -> Self {
        Self { predictor }
    }

    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    pub fn estimate(
        &self,
        wake_time: WakeTime,
        sleep_amount: SleepAmount,
        coffee_amount: CoffeeAmount,
    ) -> BedtimeResult {
        estimate(wake_time, sleep_amount, coffee_amount, &self.predictor)
    }

    pub fn estimate_request(&self, request: &SleepRequest) -> BedtimeResult {
        self.estimate(
            request.wake_time,
            request.sleep_amount,
            request.coffee_amount,
        )
    }
}
