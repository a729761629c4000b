//! Synthetic sensor sample generator
//!
//! Produces readings around fixed baselines with uniform noise.

use super::noise::NoiseSource;
use crate::domain::{SensorReadings, SensorSample};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Length of the random id suffix
const ID_SUFFIX_LEN: usize = 9;

/// Baselines and noise spans for generated readings
///
/// Each value is drawn as `baseline + (U(0,1) - 0.5) * range`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingProfile {
    pub baseline: SensorReadings,
    pub range: SensorReadings,
}

impl Default for SamplingProfile {
    fn default() -> Self {
        Self {
            baseline: SensorReadings::new(75.0, 2.5, 15.0),
            range: SensorReadings::new(10.0, 2.0, 5.0),
        }
    }
}

/// Sensor sample generator
pub struct SampleGenerator {
    profile: SamplingProfile,
    noise: Box<dyn NoiseSource>,
}

impl SampleGenerator {
    /// Create a generator drawing values from `noise`
    pub fn new(profile: SamplingProfile, noise: Box<dyn NoiseSource>) -> Self {
        Self { profile, noise }
    }

    /// Get the sampling profile
    pub fn profile(&self) -> &SamplingProfile {
        &self.profile
    }

    /// Generate a reading for `equipment_id`, stamped with the current time
    pub fn generate(&mut self, equipment_id: &str) -> SensorSample {
        let now = chrono::Utc::now().timestamp_millis();
        self.generate_at(equipment_id, now)
    }

    /// Generate a reading with an explicit epoch-millisecond timestamp
    pub fn generate_at(&mut self, equipment_id: &str, timestamp: i64) -> SensorSample {
        let SamplingProfile { baseline, range } = self.profile;

        let readings = SensorReadings {
            temperature: baseline.temperature + self.noise.next_centered(range.temperature),
            vibration: baseline.vibration + self.noise.next_centered(range.vibration),
            current: baseline.current + self.noise.next_centered(range.current),
        };

        let id = format!("sensor_{}_{}", timestamp, random_suffix());
        log::debug!("Generated sample {} for {}: {}", id, equipment_id, readings);

        SensorSample::new(id, equipment_id, readings, timestamp)
    }
}

/// Lowercase base-36 suffix; probabilistic uniqueness only
pub(crate) fn random_suffix() -> String {
    let mut rng = rand::rng();
    (0..ID_SUFFIX_LEN)
        .filter_map(|_| std::char::from_digit(rng.random_range(0..36), 36))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::noise::{FixedNoise, RngNoise, ScriptedNoise};
    use std::collections::HashSet;

    #[test]
    fn test_midpoint_noise_yields_baseline() {
        let mut generator =
            SampleGenerator::new(SamplingProfile::default(), Box::new(FixedNoise::midpoint()));
        let sample = generator.generate("EQ001");
        assert_eq!(sample.equipment_id(), "EQ001");
        assert_eq!(sample.readings(), SensorReadings::new(75.0, 2.5, 15.0));
    }

    #[test]
    fn test_extreme_draws_hit_range_edges() {
        let mut low = SampleGenerator::new(SamplingProfile::default(), Box::new(FixedNoise::zero()));
        assert_eq!(
            low.generate("EQ001").readings(),
            SensorReadings::new(70.0, 1.5, 12.5)
        );

        let mut high =
            SampleGenerator::new(SamplingProfile::default(), Box::new(FixedNoise::new(1.0)));
        assert_eq!(
            high.generate("EQ001").readings(),
            SensorReadings::new(80.0, 3.5, 17.5)
        );
    }

    #[test]
    fn test_each_metric_gets_independent_draw() {
        let noise = ScriptedNoise::new([0.0, 0.5, 1.0]);
        let mut generator = SampleGenerator::new(SamplingProfile::default(), Box::new(noise));
        let readings = generator.generate("EQ002").readings();
        assert_eq!(readings.temperature, 70.0);
        assert_eq!(readings.vibration, 2.5);
        assert_eq!(readings.current, 17.5);
    }

    #[test]
    fn test_random_readings_stay_in_range() {
        let mut generator =
            SampleGenerator::new(SamplingProfile::default(), Box::new(RngNoise::seeded(7)));
        for _ in 0..500 {
            let r = generator.generate("EQ001").readings();
            assert!((70.0..80.0).contains(&r.temperature));
            assert!((1.5..3.5).contains(&r.vibration));
            assert!((12.5..17.5).contains(&r.current));
        }
    }

    #[test]
    fn test_sample_id_format() {
        let mut generator =
            SampleGenerator::new(SamplingProfile::default(), Box::new(FixedNoise::zero()));
        let sample = generator.generate_at("EQ001", 1_700_000_000_123);
        let suffix = sample
            .id()
            .strip_prefix("sensor_1700000000123_")
            .expect("id prefix");
        assert_eq!(suffix.len(), ID_SUFFIX_LEN);
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert_eq!(sample.timestamp(), 1_700_000_000_123);
    }

    #[test]
    fn test_ids_unique_within_same_millisecond() {
        let mut generator =
            SampleGenerator::new(SamplingProfile::default(), Box::new(FixedNoise::zero()));
        let ids: HashSet<String> = (0..200)
            .map(|_| generator.generate_at("EQ001", 42).id().to_string())
            .collect();
        assert_eq!(ids.len(), 200);
    }
}
