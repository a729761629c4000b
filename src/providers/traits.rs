//! Trait definitions for external collaborators
//!
//! These traits keep the decision core independent of where equipment,
//! seed alerts and telemetry actually live, and allow in-memory fakes in tests.

use crate::alerts::Alert;
use crate::domain::{Equipment, SensorSample};
use crate::error::ProviderError;
use serde::Serialize;

/// Source of the equipment catalog
pub trait EquipmentCatalog: Send + Sync {
    /// List catalogued equipment in display order
    fn list_equipment(&self) -> Result<Vec<Equipment>, ProviderError>;

    /// Look up one piece of equipment
    fn find_equipment(&self, id: &str) -> Result<Option<Equipment>, ProviderError> {
        Ok(self.list_equipment()?.into_iter().find(|eq| eq.id == id))
    }
}

/// Source of the alerts a session starts with
pub trait AlertSource: Send + Sync {
    /// List seed alerts in display order
    fn list_alerts(&self) -> Result<Vec<Alert>, ProviderError>;
}

/// Acknowledgement returned by a telemetry sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitReceipt {
    /// Id of the accepted sample
    pub sample_id: String,
    /// Sink that accepted it
    pub sink: &'static str,
}

/// Best-effort destination for generated samples
pub trait TelemetrySink: Send + Sync {
    /// Submit one sample
    fn submit(&self, sample: &SensorSample) -> Result<SubmitReceipt, ProviderError>;

    /// Sink name for identification
    fn name(&self) -> &'static str;
}
