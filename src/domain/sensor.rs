//! Sensor sample domain types

use serde::{Deserialize, Serialize};
use std::fmt;

/// One synthetic reading of temperature, vibration and current
///
/// Samples are immutable once created; only the sample generator builds them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorSample {
    id: String,
    equipment_id: String,
    temperature: f64,
    vibration: f64,
    current: f64,
    timestamp: i64,
}

impl SensorSample {
    /// Create a sample from raw values
    pub fn new(
        id: impl Into<String>,
        equipment_id: impl Into<String>,
        readings: SensorReadings,
        timestamp: i64,
    ) -> Self {
        Self {
            id: id.into(),
            equipment_id: equipment_id.into(),
            temperature: readings.temperature,
            vibration: readings.vibration,
            current: readings.current,
            timestamp,
        }
    }

    /// Opaque sample id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Equipment the reading belongs to
    pub fn equipment_id(&self) -> &str {
        &self.equipment_id
    }

    /// Temperature in °F
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Vibration in Hz
    pub fn vibration(&self) -> f64 {
        self.vibration
    }

    /// Current draw in A
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Epoch milliseconds
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// The three measured values
    pub fn readings(&self) -> SensorReadings {
        SensorReadings {
            temperature: self.temperature,
            vibration: self.vibration,
            current: self.current,
        }
    }
}

/// Temperature (°F), vibration (Hz) and current (A) triple
///
/// Also used as the factor snapshot of a risk assessment.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SensorReadings {
    pub temperature: f64,
    pub vibration: f64,
    pub current: f64,
}

impl SensorReadings {
    pub const fn new(temperature: f64, vibration: f64, current: f64) -> Self {
        Self {
            temperature,
            vibration,
            current,
        }
    }
}

impl fmt::Display for SensorReadings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1}°F, {:.2} Hz, {:.1} A",
            self.temperature, self.vibration, self.current
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_accessors() {
        let sample = SensorSample::new(
            "sensor_1_abc",
            "EQ001",
            SensorReadings::new(75.0, 2.5, 15.0),
            1_700_000_000_000,
        );
        assert_eq!(sample.id(), "sensor_1_abc");
        assert_eq!(sample.equipment_id(), "EQ001");
        assert_eq!(sample.readings(), SensorReadings::new(75.0, 2.5, 15.0));
        assert_eq!(sample.timestamp(), 1_700_000_000_000);
    }

    #[test]
    fn test_sample_serializes_camel_case() {
        let sample = SensorSample::new("s", "EQ002", SensorReadings::new(70.0, 2.0, 12.0), 5);
        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(json["equipmentId"], "EQ002");
        assert_eq!(json["timestamp"], 5);
    }

    #[test]
    fn test_readings_display() {
        let readings = SensorReadings::new(80.04, 2.456, 14.94);
        assert_eq!(readings.to_string(), "80.0°F, 2.46 Hz, 14.9 A");
    }
}
