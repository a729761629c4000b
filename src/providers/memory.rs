//! In-memory collaborators
//!
//! Serve the demo fleet and capture telemetry without touching disk or
//! network. An optional artificial latency mimics a remote round-trip.

use super::traits::{AlertSource, EquipmentCatalog, SubmitReceipt, TelemetrySink};
use crate::alerts::Alert;
use crate::domain::{Equipment, EquipmentStatus, RiskScore, SensorSample, Severity};
use crate::error::ProviderError;
use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Default artificial round-trip for in-memory collaborators
pub const DEFAULT_SIMULATED_LATENCY: Duration = Duration::from_millis(100);

fn simulate_latency(latency: Duration) {
    if !latency.is_zero() {
        std::thread::sleep(latency);
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// The four-machine demo fleet
pub fn demo_equipment() -> Vec<Equipment> {
    vec![
        Equipment::new("EQ001", "Compressor Unit A", "Compressor", EquipmentStatus::Healthy)
            .with_maintenance(date(2024, 1, 15), date(2024, 4, 15))
            .with_risk_score(RiskScore::new(25)),
        Equipment::new("EQ002", "Turbine Generator B", "Generator", EquipmentStatus::Warning)
            .with_maintenance(date(2024, 1, 10), date(2024, 3, 10))
            .with_risk_score(RiskScore::new(65)),
        Equipment::new("EQ003", "Cooling Pump C", "Pump", EquipmentStatus::Critical)
            .with_maintenance(date(2024, 1, 1), date(2024, 2, 1))
            .with_risk_score(RiskScore::new(85)),
        Equipment::new("EQ004", "Heat Exchanger D", "Heat Exchanger", EquipmentStatus::Healthy)
            .with_maintenance(date(2024, 1, 20), date(2024, 5, 20))
            .with_risk_score(RiskScore::new(15)),
    ]
}

/// Alerts the demo session starts with, timestamped relative to now
pub fn demo_alerts() -> Vec<Alert> {
    let now = Utc::now();
    vec![
        Alert::new(
            "alert_1",
            "EQ003",
            "Cooling Pump C",
            Severity::Critical,
            "High vibration detected - immediate maintenance required",
            now - ChronoDuration::minutes(5),
        ),
        Alert::new(
            "alert_2",
            "EQ002",
            "Turbine Generator B",
            Severity::High,
            "Temperature approaching critical threshold",
            now - ChronoDuration::minutes(15),
        ),
    ]
}

/// In-memory equipment catalog and alert source
#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    equipment: Vec<Equipment>,
    alerts: Vec<Alert>,
    latency: Duration,
}

impl InMemoryCatalog {
    /// Catalog with the given contents and no latency
    pub fn new(equipment: Vec<Equipment>, alerts: Vec<Alert>) -> Self {
        Self {
            equipment,
            alerts,
            latency: Duration::ZERO,
        }
    }

    /// Demo fleet and seed alerts
    pub fn demo() -> Self {
        Self::new(demo_equipment(), demo_alerts())
    }

    /// Builder: set artificial latency
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::demo()
    }
}

impl EquipmentCatalog for InMemoryCatalog {
    fn list_equipment(&self) -> Result<Vec<Equipment>, ProviderError> {
        simulate_latency(self.latency);
        Ok(self.equipment.clone())
    }
}

impl AlertSource for InMemoryCatalog {
    fn list_alerts(&self) -> Result<Vec<Alert>, ProviderError> {
        simulate_latency(self.latency);
        Ok(self.alerts.clone())
    }
}

/// Telemetry sink that keeps every submitted sample
#[derive(Debug, Default)]
pub struct InMemoryTelemetrySink {
    samples: Mutex<Vec<SensorSample>>,
    latency: Duration,
}

impl InMemoryTelemetrySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set artificial latency
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Copy of everything submitted so far
    pub fn submitted(&self) -> Vec<SensorSample> {
        self.samples
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of samples submitted so far
    pub fn len(&self) -> usize {
        self.samples.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TelemetrySink for InMemoryTelemetrySink {
    fn submit(&self, sample: &SensorSample) -> Result<SubmitReceipt, ProviderError> {
        simulate_latency(self.latency);
        self.samples
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sample.clone());
        Ok(SubmitReceipt {
            sample_id: sample.id().to_string(),
            sink: self.name(),
        })
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// Telemetry sink that only logs what it receives
#[derive(Debug, Default)]
pub struct LogTelemetrySink {
    latency: Duration,
}

impl LogTelemetrySink {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl TelemetrySink for LogTelemetrySink {
    fn submit(&self, sample: &SensorSample) -> Result<SubmitReceipt, ProviderError> {
        simulate_latency(self.latency);
        log::debug!(
            "Sensor data sent: {} {} {}",
            sample.id(),
            sample.equipment_id(),
            sample.readings()
        );
        Ok(SubmitReceipt {
            sample_id: sample.id().to_string(),
            sink: self.name(),
        })
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
