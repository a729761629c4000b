//! File-backed collaborators
//!
//! A TOML catalog document holding equipment and seed alerts, and a
//! JSON-lines telemetry sink.

use super::memory::{demo_alerts, demo_equipment};
use super::traits::{AlertSource, EquipmentCatalog, SubmitReceipt, TelemetrySink};
use crate::alerts::Alert;
use crate::domain::{Equipment, SensorSample};
use crate::error::ProviderError;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// On-disk catalog layout
///
/// ```toml
/// [[equipment]]
/// id = "EQ001"
/// name = "Compressor Unit A"
/// type = "Compressor"
/// status = "HEALTHY"
/// lastMaintenance = "2024-01-15"
/// nextMaintenance = "2024-04-15"
/// riskScore = 25
///
/// [[alerts]]
/// id = "alert_1"
/// equipmentId = "EQ001"
/// equipmentName = "Compressor Unit A"
/// severity = "HIGH"
/// message = "Bearing temperature rising"
/// timestamp = "2024-03-01T08:00:00Z"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub equipment: Vec<Equipment>,
    #[serde(default)]
    pub alerts: Vec<Alert>,
}

impl CatalogDocument {
    /// Document with the demo fleet and seed alerts
    pub fn demo() -> Self {
        Self {
            equipment: demo_equipment(),
            alerts: demo_alerts(),
        }
    }

    /// Write the document as TOML
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ProviderError> {
        let contents = toml::to_string_pretty(self).map_err(|e| ProviderError::Decode {
            collaborator: "catalog file",
            reason: e.to_string(),
        })?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Catalog read from a TOML file on every request
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the whole document
    pub fn document(&self) -> Result<CatalogDocument, ProviderError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            ProviderError::unavailable(
                "catalog file",
                format!("{}: {}", self.path.display(), e),
            )
        })?;

        toml::from_str(&contents).map_err(|e| ProviderError::Decode {
            collaborator: "catalog file",
            reason: e.to_string(),
        })
    }
}

impl EquipmentCatalog for FileCatalog {
    fn list_equipment(&self) -> Result<Vec<Equipment>, ProviderError> {
        Ok(self.document()?.equipment)
    }
}

impl AlertSource for FileCatalog {
    fn list_alerts(&self) -> Result<Vec<Alert>, ProviderError> {
        Ok(self.document()?.alerts)
    }
}

/// Telemetry sink appending one JSON object per line
#[derive(Debug)]
pub struct JsonLinesSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonLinesSink {
    /// Open (or create) the file in append mode
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ProviderError> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                ProviderError::unavailable("telemetry file", format!("{}: {}", path.display(), e))
            })?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TelemetrySink for JsonLinesSink {
    fn submit(&self, sample: &SensorSample) -> Result<SubmitReceipt, ProviderError> {
        let line = serde_json::to_string(sample).map_err(|e| ProviderError::Decode {
            collaborator: "telemetry file",
            reason: e.to_string(),
        })?;

        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(file, "{}", line)?;
        file.flush()?;

        Ok(SubmitReceipt {
            sample_id: sample.id().to_string(),
            sink: self.name(),
        })
    }

    fn name(&self) -> &'static str {
        "jsonl"
    }
}
