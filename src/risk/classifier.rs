//! Risk classifier
//!
//! Scores the window's readings against a [`RiskPolicy`] and bands the result.

use super::policy::{RiskPolicy, ScoringMode};
use crate::domain::{RiskAssessment, RiskScore, SensorReadings, SensorSample};
use crate::error::{DomainError, RiskError};
use crate::sampling::noise::NoiseSource;
use crate::sampling::window::summarize;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// How a score was assembled
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Readings the score was computed from
    pub factors: SensorReadings,
    /// Per-metric contributions
    pub contributions: SensorReadings,
    /// Noise added on top
    pub noise: f64,
    /// Sum before clamping and rounding
    pub raw: f64,
    /// Final clamped, rounded score
    pub score: RiskScore,
}

/// Risk classifier
#[derive(Debug, Clone, Default)]
pub struct RiskClassifier {
    policy: RiskPolicy,
}

impl RiskClassifier {
    /// Create a classifier, rejecting policies that cannot band consistently
    pub fn new(policy: RiskPolicy) -> Result<Self, DomainError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    /// Get the scoring policy
    pub fn policy(&self) -> &RiskPolicy {
        &self.policy
    }

    /// Classify a non-empty run of samples, newest last
    pub fn classify(
        &self,
        samples: &[SensorSample],
        noise: &mut dyn NoiseSource,
    ) -> Result<RiskAssessment, RiskError> {
        self.classify_at(samples, noise, Utc::now())
    }

    /// Classify with an explicit assessment timestamp
    pub fn classify_at(
        &self,
        samples: &[SensorSample],
        noise: &mut dyn NoiseSource,
        timestamp: DateTime<Utc>,
    ) -> Result<RiskAssessment, RiskError> {
        let latest = samples
            .last()
            .ok_or_else(|| RiskError::InvalidInput("cannot classify an empty sample window".to_string()))?;

        let factors = match self.policy.mode {
            ScoringMode::Latest => latest.readings(),
            ScoringMode::WindowMean => summarize(samples)
                .map(|summary| summary.mean)
                .unwrap_or_else(|| latest.readings()),
        };

        let breakdown = self.score(&factors, noise);
        log::debug!(
            "Classified {} ({} mode, {} samples): raw {:.2} -> {}",
            latest.equipment_id(),
            self.policy.mode,
            samples.len(),
            breakdown.raw,
            breakdown.score
        );

        Ok(RiskAssessment::new(
            breakdown.score,
            latest.equipment_id(),
            factors,
            &self.policy.thresholds,
            timestamp,
        ))
    }

    /// Score one set of readings, drawing a single noise value
    pub fn score(&self, factors: &SensorReadings, noise: &mut dyn NoiseSource) -> ScoreBreakdown {
        let contributions = self.policy.contributions(factors);
        let noise = noise.next_scaled(self.policy.noise_max);
        let raw = contributions.temperature + contributions.vibration + contributions.current + noise;

        ScoreBreakdown {
            factors: *factors,
            contributions,
            noise,
            raw,
            score: RiskScore::from_raw(raw),
        }
    }
}
