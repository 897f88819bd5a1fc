//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Default form values (wake time, sleep amount, coffee amount)
//! - Which model artifact to predict with
//! - Clock display style
//!
//! Configuration is stored at `~/.config/betterrest/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::estimator::ClockStyle;
use crate::inputs::SleepRequest;
use crate::predictor::{ArtifactPredictor, LinearModel, Predictor};

/// Model selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model artifact to load. The built-in coefficients are used when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl ModelConfig {
    /// Predictor for this selection, with an optional path taking precedence.
    pub fn predictor(&self, override_path: Option<&Path>) -> Box<dyn Predictor> {
        match override_path.or(self.path.as_deref()) {
            Some(path) => Box::new(ArtifactPredictor::new(path)),
            None => Box::new(LinearModel::builtin()),
        }
    }
}

/// Display configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub clock_24h: bool,
}

impl DisplayConfig {
    pub fn clock_style(&self) -> ClockStyle {
        if self.clock_24h {
            ClockStyle::TwentyFourHour
        } else {
            ClockStyle::TwelveHour
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/betterrest/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: SleepRequest,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    // Empty clears optional keys; required keys reject null on deserialize.
                    _ if value.is_empty() => serde_json::Value::Null,
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults there if it is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => Some(String::new()),
            other => Some(other.to_string()),
        }
    }

    /// Update a value by key without saving. Values go through the same
    /// validation as the form inputs.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value is rejected.
    pub fn update(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Set a value by key and save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value is rejected,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.update(key, value)?;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.defaults, SleepRequest::default());
        assert!(!parsed.display.clock_24h);
        assert!(parsed.model.path.is_none());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("defaults.wake_time").as_deref(), Some("07:00"));
        assert_eq!(cfg.get("defaults.coffee_amount").as_deref(), Some("1"));
        assert_eq!(cfg.get("display.clock_24h").as_deref(), Some("false"));
        assert!(cfg.get("defaults.missing_key").is_none());
    }

    #[test]
    fn update_nested_values() {
        let mut cfg = Config::default();
        cfg.update("defaults.wake_time", "06:30").unwrap();
        cfg.update("defaults.sleep_amount", "9.5").unwrap();
        cfg.update("defaults.coffee_amount", "3").unwrap();
        cfg.update("display.clock_24h", "true").unwrap();
        assert_eq!(cfg.defaults.wake_time.to_string(), "06:30");
        assert_eq!(cfg.defaults.sleep_amount.hours(), 9.5);
        assert_eq!(cfg.defaults.coffee_amount.cups(), 3);
        assert_eq!(cfg.display.clock_style(), ClockStyle::TwentyFourHour);
    }

    #[test]
    fn update_whole_number_sleep_amount() {
        let mut cfg = Config::default();
        cfg.update("defaults.sleep_amount", "10").unwrap();
        assert_eq!(cfg.defaults.sleep_amount.hours(), 10.0);
    }

    #[test]
    fn update_model_path() {
        let mut cfg = Config::default();
        cfg.update("model.path", "/tmp/model.toml").unwrap();
        assert_eq!(cfg.model.path, Some(PathBuf::from("/tmp/model.toml")));
    }

    #[test]
    fn empty_value_clears_model_path() {
        let mut cfg = Config::default();
        assert_eq!(cfg.get("model.path").as_deref(), Some(""));
        cfg.update("model.path", "/tmp/model.toml").unwrap();
        cfg.update("model.path", "").unwrap();
        assert!(cfg.model.path.is_none());
        assert_eq!(cfg.get("model.path").as_deref(), Some(""));
    }

    #[test]
    fn empty_value_rejected_for_required_keys() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.update("defaults.wake_time", ""),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(cfg.update("display.clock_24h", "").is_err());
        assert_eq!(cfg.defaults.wake_time.to_string(), "07:00");
    }

    #[test]
    fn update_rejects_out_of_range_values() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.update("defaults.sleep_amount", "13"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(cfg.update("defaults.sleep_amount", "7.1").is_err());
        assert!(cfg.update("defaults.coffee_amount", "0").is_err());
        assert!(cfg.update("defaults.wake_time", "7am").is_err());
        assert_eq!(cfg.defaults, SleepRequest::default());
    }

    #[test]
    fn set_json_value_by_path_rejects_unknown_key() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "display.nonexistent", "value");
        assert!(matches!(result, Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_json_value_by_path_rejects_invalid_type() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "display.clock_24h", "sometimes");
        assert!(result.is_err());
    }

    #[test]
    fn load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.defaults, SleepRequest::default());
        assert!(path.exists());
    }

    #[test]
    fn load_from_reads_saved_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.update("defaults.coffee_amount", "4").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.defaults.coffee_amount.cups(), 4);
    }

    #[test]
    fn load_from_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[defaults]\ncoffee_amount = 99\n").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let cfg: Config = toml::from_str("[display]\nclock_24h = true\n").unwrap();
        assert_eq!(cfg.defaults.wake_time.to_string(), "07:00");
        assert!(cfg.display.clock_24h);
    }
}
