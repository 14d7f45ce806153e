//! Wheel configuration and its validation.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::palette::Palette;
use crate::scenario::{ScenarioRule, ScenarioSet};
use crate::tracker::TrackerKind;

const DEFAULT_WHEEL_DATA: &str = include_str!("../../spinwheel-web/static/assets/data/wheel.json");

/// Errors raised while loading or validating a [`WheelConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("wheel config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be at least {min} (got {value})")]
    MinViolation {
        field: &'static str,
        min: f64,
        value: f64,
    },
    #[error("{field} must be in [{min:.2}, {max:.2}) (got {value:.2})")]
    RangeViolation {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("palette must contain at least one colour")]
    EmptyPalette,
    #[error("scenario rule {index} is invalid: {reason}")]
    InvalidScenario { index: usize, reason: &'static str },
}

/// Tunables for selection, rotation, and colouring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelConfig {
    #[serde(default)]
    pub tracker: TrackerKind,
    /// Full turns added to every spin before the landing offset.
    #[serde(default = "WheelConfig::default_min_turns")]
    pub min_turns: u32,
    /// Landing jitter as a fraction of one segment, applied either side of the centre.
    #[serde(default = "WheelConfig::default_jitter_ratio")]
    pub jitter_ratio: f64,
    #[serde(default = "WheelConfig::default_spin_duration_ms")]
    pub spin_duration_ms: u32,
    #[serde(default)]
    pub palette: Palette,
    #[serde(default)]
    pub scenarios: ScenarioSet,
}

impl WheelConfig {
    #[must_use]
    pub const fn default_min_turns() -> u32 {
        6
    }

    #[must_use]
    pub const fn default_jitter_ratio() -> f64 {
        0.3
    }

    #[must_use]
    pub const fn default_spin_duration_ms() -> u32 {
        5000
    }

    /// Configuration shipped with the web assets, falling back to code defaults.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_WHEEL_DATA).unwrap_or_else(|err| {
            log::warn!("bundled wheel config rejected, using defaults: {err}");
            Self::default()
        })
    }

    #[must_use]
    pub fn default_config() -> Self {
        Self::load_from_static()
    }

    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or any field is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    #[must_use]
    pub fn with_tracker(mut self, tracker: TrackerKind) -> Self {
        self.tracker = tracker;
        self
    }

    #[must_use]
    pub fn with_scenarios(mut self, rules: Vec<ScenarioRule>) -> Self {
        self.scenarios = ScenarioSet::new(rules);
        self
    }

    /// Check every field against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_jitter_ratio()?;
        if self.min_turns < 1 {
            return Err(ConfigError::MinViolation {
                field: "min_turns",
                min: 1.0,
                value: f64::from(self.min_turns),
            });
        }
        if self.spin_duration_ms < 1 {
            return Err(ConfigError::MinViolation {
                field: "spin_duration_ms",
                min: 1.0,
                value: f64::from(self.spin_duration_ms),
            });
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        self.validate_scenarios()
    }

    fn validate_jitter_ratio(&self) -> Result<(), ConfigError> {
        const MIN_RATIO: f64 = 0.0;
        const MAX_RATIO: f64 = 0.5;
        if !(MIN_RATIO..MAX_RATIO).contains(&self.jitter_ratio) {
            return Err(ConfigError::RangeViolation {
                field: "jitter_ratio",
                min: MIN_RATIO,
                max: MAX_RATIO,
                value: self.jitter_ratio,
            });
        }
        Ok(())
    }

    fn validate_scenarios(&self) -> Result<(), ConfigError> {
        for (index, rule) in self.scenarios.rules().iter().enumerate() {
            if rule.headcount == 0 {
                return Err(ConfigError::InvalidScenario {
                    index,
                    reason: "headcount must be positive",
                });
            }
            if rule.sentinel.trim().is_empty() {
                return Err(ConfigError::InvalidScenario {
                    index,
                    reason: "sentinel must not be blank",
                });
            }
        }
        Ok(())
    }
}

/// Code defaults carry no scenario rules. Use [`WheelConfig::default_config`]
/// for the bundled configuration, which includes the sentinel rule.
impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            tracker: TrackerKind::default(),
            min_turns: Self::default_min_turns(),
            jitter_ratio: Self::default_jitter_ratio(),
            spin_duration_ms: Self::default_spin_duration_ms(),
            palette: Palette::default(),
            scenarios: ScenarioSet::default(),
        }
    }
}
