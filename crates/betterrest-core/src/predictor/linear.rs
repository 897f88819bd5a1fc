//! Linear regression sleep model.
//!
//! `actual_sleep = intercept + wake * w + estimated_sleep * s + coffee * c`
//!
//! The model is stored as a small TOML artifact so a retrained coefficient
//! set can be dropped in without rebuilding.

use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Predictor;
use crate::error::PredictionError;
use crate::inputs::PredictionInput;

/// Input ranges the coefficients were fitted on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureDomain {
    /// Seconds past midnight.
    #[serde(default = "default_wake_range")]
    pub wake: RangeInclusive<f64>,
    #[serde(default = "default_sleep_range")]
    pub estimated_sleep: RangeInclusive<f64>,
    #[serde(default = "default_coffee_range")]
    pub coffee: RangeInclusive<f64>,
}

fn default_wake_range() -> RangeInclusive<f64> {
    0.0..=86_340.0
}
fn default_sleep_range() -> RangeInclusive<f64> {
    4.0..=12.0
}
fn default_coffee_range() -> RangeInclusive<f64> {
    1.0..=20.0
}

impl Default for FeatureDomain {
    fn default() -> Self {
        Self {
            wake: default_wake_range(),
            estimated_sleep: default_sleep_range(),
            coffee: default_coffee_range(),
        }
    }
}

impl FeatureDomain {
    fn check(&self, input: &PredictionInput) -> Result<(), PredictionError> {
        let features = [
            ("wake", input.wake, &self.wake),
            ("estimated_sleep", input.estimated_sleep, &self.estimated_sleep),
            ("coffee", input.coffee, &self.coffee),
        ];
        for (feature, value, range) in features {
            if !value.is_finite() || !range.contains(&value) {
                return Err(PredictionError::InvalidInput { feature, value });
            }
        }
        Ok(())
    }
}

/// Coefficients of the sleep regression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    /// Per second past midnight.
    pub wake: f64,
    /// Per desired hour of sleep.
    pub estimated_sleep: f64,
    /// Per daily cup of coffee.
    pub coffee: f64,
    #[serde(default)]
    pub domain: FeatureDomain,
}

impl Default for LinearModel {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LinearModel {
    /// Coefficient set shipped with the app.
    ///
    /// Later wake times shave a little off the need (about 1.5 minutes per
    /// hour), each cup of coffee adds about 3.6 minutes.
    pub fn builtin() -> Self {
        Self {
            intercept: 0.6,
            wake: -6.94e-6,
            estimated_sleep: 0.95,
            coffee: 0.06,
            domain: FeatureDomain::default(),
        }
    }

    /// Parse an artifact from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load an artifact from disk.
    ///
    /// # Errors
    ///
    /// Returns [`PredictionError::ModelUnavailable`] if the file cannot be
    /// read or is not a valid artifact.
    pub fn load(path: &Path) -> Result<Self, PredictionError> {
        let unavailable = |message: String| PredictionError::ModelUnavailable {
            path: path.to_path_buf(),
            message,
        };
        let content = std::fs::read_to_string(path).map_err(|e| unavailable(e.to_string()))?;
        let model = Self::from_toml_str(&content).map_err(|e| unavailable(e.to_string()))?;
        model.validate().map_err(unavailable)?;
        Ok(model)
    }

    /// Write the artifact as TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    fn validate(&self) -> Result<(), String> {
        let coefficients = [
            ("intercept", self.intercept),
            ("wake", self.wake),
            ("estimated_sleep", self.estimated_sleep),
            ("coffee", self.coffee),
        ];
        match coefficients.iter().find(|(_, v)| !v.is_finite()) {
            Some((name, v)) => Err(format!("coefficient '{name}' is not finite ({v})")),
            None => Ok(()),
        }
    }
}

impl Predictor for LinearModel {
    fn predict(&self, input: &PredictionInput) -> Result<f64, PredictionError> {
        self.domain.check(input)?;
        Ok(self.intercept
            + self.wake * input.wake
            + self.estimated_sleep * input.estimated_sleep
            + self.coffee * input.coffee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn input(wake: f64, sleep: f64, coffee: f64) -> PredictionInput {
        PredictionInput {
            wake,
            estimated_sleep: sleep,
            coffee,
        }
    }

    #[test]
    fn builtin_prediction_is_plausible() {
        let model = LinearModel::builtin();
        let hours = model.predict(&input(25_200.0, 8.0, 1.0)).unwrap();
        assert!((7.5..9.0).contains(&hours), "got {hours}");
    }

    #[test]
    fn coffee_increases_need() {
        let model = LinearModel::builtin();
        let one = model.predict(&input(25_200.0, 8.0, 1.0)).unwrap();
        let five = model.predict(&input(25_200.0, 8.0, 5.0)).unwrap();
        assert!(five > one);
    }

    #[test]
    fn rejects_inputs_outside_domain() {
        let model = LinearModel::builtin();
        assert!(matches!(
            model.predict(&input(25_200.0, 20.0, 1.0)),
            Err(PredictionError::InvalidInput { feature: "estimated_sleep", .. })
        ));
        assert!(matches!(
            model.predict(&input(f64::NAN, 8.0, 1.0)),
            Err(PredictionError::InvalidInput { feature: "wake", .. })
        ));
        assert!(matches!(
            model.predict(&input(25_200.0, 8.0, 0.0)),
            Err(PredictionError::InvalidInput { feature: "coffee", .. })
        ));
    }

    #[test]
    fn wake_domain_covers_whole_clock_day() {
        let model = LinearModel::builtin();
        assert!(model.predict(&input(0.0, 8.0, 1.0)).is_ok());
        assert!(model.predict(&input(86_340.0, 8.0, 1.0)).is_ok());
        assert!(matches!(
            model.predict(&input(86_400.0, 8.0, 1.0)),
            Err(PredictionError::InvalidInput { feature: "wake", .. })
        ));
    }

    #[test]
    fn artifact_without_domain_uses_defaults() {
        let model = LinearModel::from_toml_str(
            "intercept = 1.0\nwake = 0.0\nestimated_sleep = 1.0\ncoffee = 0.0\n",
        )
        .unwrap();
        assert_eq!(model.domain, FeatureDomain::default());
        assert_eq!(model.predict(&input(0.0, 6.0, 2.0)).unwrap(), 7.0);
    }

    #[test]
    fn toml_artifact_survives_write_and_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let text = LinearModel::builtin().to_toml_string().unwrap();
        file.write_all(text.as_bytes()).unwrap();

        let loaded = LinearModel::load(file.path()).unwrap();
        assert_eq!(loaded, LinearModel::builtin());
    }

    #[test]
    fn load_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = LinearModel::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, PredictionError::ModelUnavailable { .. }));
    }

    #[test]
    fn load_malformed_file_is_unavailable() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"intercept = \"lots\"\n").unwrap();
        let err = LinearModel::load(file.path()).unwrap_err();
        assert!(matches!(err, PredictionError::ModelUnavailable { .. }));
    }
}
