//! Risk score and assessment types

use super::sensor::SensorReadings;
use super::severity::Severity;
use crate::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Failure-likelihood score (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct RiskScore(u8);

impl RiskScore {
    pub const MIN: RiskScore = RiskScore(0);
    pub const MAX: RiskScore = RiskScore(100);

    /// Create a new risk score, saturating at 100
    pub fn new(score: u8) -> Self {
        Self(score.min(100))
    }

    /// Clamp a raw formula value into [0, 100] and round half away from zero
    pub fn from_raw(raw: f64) -> Self {
        if raw.is_nan() {
            return Self::MIN;
        }
        Self(raw.clamp(0.0, 100.0).round() as u8)
    }

    /// Get the score value
    #[inline]
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u32> for RiskScore {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value > 100 {
            return Err(DomainError::InvalidRiskScore(value));
        }
        Ok(Self(value as u8))
    }
}

impl From<RiskScore> for u32 {
    fn from(score: RiskScore) -> Self {
        score.0 as u32
    }
}

/// Score cut-offs between severity bands
///
/// Bands are half-open: a score equal to a cut-off belongs to the higher band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    /// Lowest MEDIUM score
    pub medium: u8,
    /// Lowest HIGH score
    pub high: u8,
    /// Lowest CRITICAL score
    pub critical: u8,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            medium: 25,
            high: 50,
            critical: 75,
        }
    }
}

impl RiskThresholds {
    /// Check cut-offs are strictly ascending and within the score range
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(self.medium < self.high && self.high < self.critical) {
            return Err(DomainError::InvalidValue(format!(
                "thresholds must be strictly ascending (got {}/{}/{})",
                self.medium, self.high, self.critical
            )));
        }
        if self.critical > 100 {
            return Err(DomainError::InvalidValue(format!(
                "critical threshold {} exceeds 100",
                self.critical
            )));
        }
        Ok(())
    }

    /// Band for a score
    pub fn classify(&self, score: RiskScore) -> Severity {
        let s = score.value();
        if s < self.medium {
            Severity::Low
        } else if s < self.high {
            Severity::Medium
        } else if s < self.critical {
            Severity::High
        } else {
            Severity::Critical
        }
    }
}

/// Result of one classifier invocation
///
/// The prediction is derived from the score when the assessment is built, so
/// an assessment can never disagree with its own score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    risk_score: RiskScore,
    timestamp: DateTime<Utc>,
    equipment_id: String,
    prediction: Severity,
    factors: SensorReadings,
}

impl RiskAssessment {
    /// Build an assessment, deriving the prediction from `thresholds`
    pub fn new(
        risk_score: RiskScore,
        equipment_id: impl Into<String>,
        factors: SensorReadings,
        thresholds: &RiskThresholds,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            prediction: thresholds.classify(risk_score),
            risk_score,
            timestamp,
            equipment_id: equipment_id.into(),
            factors,
        }
    }

    pub fn risk_score(&self) -> RiskScore {
        self.risk_score
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn equipment_id(&self) -> &str {
        &self.equipment_id
    }

    pub fn prediction(&self) -> Severity {
        self.prediction
    }

    /// Exact input values the score was computed from
    pub fn factors(&self) -> SensorReadings {
        self.factors
    }
}
