//! # BetterRest Core Library
//!
//! Recommends a bedtime from three form values: when the user wants to wake
//! up, how long they would like to sleep, and how much coffee they drink.
//! A sleep model predicts the hours actually needed and the bedtime is that
//! duration counted back from the wake time.
//!
//! ## Architecture
//!
//! - **Inputs**: validated newtypes for the three form values
//! - **Predictor**: one-method trait for the sleep model, with a linear
//!   regression implementation and a TOML model artifact loader
//! - **Estimator**: the wake-time arithmetic, collapsing every model error
//!   into a single failure
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`estimate`] / [`BedtimeEstimator`]: bedtime calculation
//! - [`Predictor`]: trait for sleep models
//! - [`Alert`]: the title/message pair shown to the user
//! - [`Config`]: application configuration management

pub mod alert;
pub mod error;
pub mod estimator;
pub mod inputs;
pub mod predictor;
pub mod storage;

pub use alert::Alert;
pub use error::{ConfigError, CoreError, PredictionError, PredictionFailure, ValidationError};
pub use estimator::{estimate, Bedtime, BedtimeEstimator, BedtimeResult, ClockStyle};
pub use inputs::{CoffeeAmount, PredictionInput, SleepAmount, SleepRequest, WakeTime};
pub use predictor::{ArtifactPredictor, FnPredictor, LinearModel, Predictor};
pub use storage::Config;
