//! Risk scoring policy constants
//!
//! Offsets, coefficients, noise span and band thresholds. These are policy
//! values, not trained parameters; the defaults reproduce the reference
//! formula exactly.

use crate::domain::{RiskThresholds, SensorReadings};
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Linear contribution of one metric: `max(0, (value - offset) * coefficient)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorWeight {
    pub offset: f64,
    pub coefficient: f64,
}

impl FactorWeight {
    pub const fn new(offset: f64, coefficient: f64) -> Self {
        Self {
            offset,
            coefficient,
        }
    }

    /// Non-negative contribution for a reading
    pub fn contribution(&self, value: f64) -> f64 {
        ((value - self.offset) * self.coefficient).max(0.0)
    }
}

/// Which readings the classifier scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Only the most recent sample
    #[default]
    Latest,
    /// Mean of every sample in the window
    WindowMean,
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => write!(f, "latest"),
            Self::WindowMean => write!(f, "window_mean"),
        }
    }
}

/// Complete scoring policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskPolicy {
    pub temperature: FactorWeight,
    pub vibration: FactorWeight,
    pub current: FactorWeight,
    /// Upper bound of the uniform noise added to every score
    pub noise_max: f64,
    pub thresholds: RiskThresholds,
    pub mode: ScoringMode,
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self {
            temperature: FactorWeight::new(70.0, 2.0),
            vibration: FactorWeight::new(2.0, 20.0),
            current: FactorWeight::new(12.0, 5.0),
            noise_max: 20.0,
            thresholds: RiskThresholds::default(),
            mode: ScoringMode::Latest,
        }
    }
}

impl RiskPolicy {
    /// Check the policy can only produce meaningful scores
    pub fn validate(&self) -> Result<(), DomainError> {
        self.thresholds.validate()?;

        if !self.noise_max.is_finite() || self.noise_max < 0.0 {
            return Err(DomainError::InvalidValue(format!(
                "noise_max must be a non-negative number (got {})",
                self.noise_max
            )));
        }

        for (name, weight) in [
            ("temperature", self.temperature),
            ("vibration", self.vibration),
            ("current", self.current),
        ] {
            if !weight.offset.is_finite() || !weight.coefficient.is_finite() {
                return Err(DomainError::InvalidValue(format!(
                    "{} weight must be finite",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Per-metric contributions before noise
    pub fn contributions(&self, readings: &SensorReadings) -> SensorReadings {
        SensorReadings {
            temperature: self.temperature.contribution(readings.temperature),
            vibration: self.vibration.contribution(readings.vibration),
            current: self.current.contribution(readings.current),
        }
    }
}
