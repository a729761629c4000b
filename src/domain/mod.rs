//! Domain models for maintctl
//!
//! This module contains all domain types with validation.
//! Types are validated on construction (fail-fast pattern).

pub mod equipment;
pub mod risk;
pub mod sensor;
pub mod severity;

pub use equipment::{Equipment, EquipmentStatus};
pub use risk::{RiskAssessment, RiskScore, RiskThresholds};
pub use sensor::{SensorReadings, SensorSample};
pub use severity::Severity;
