//! Alert system domain types
//!
//! Alert records and their acknowledgement state.

use crate::domain::{RiskAssessment, Severity};
use crate::sampling::random_suffix;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Acknowledgement state of an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertState {
    /// Raised and waiting for an operator
    Unacknowledged,
    /// Seen by an operator; final
    Acknowledged,
}

impl fmt::Display for AlertState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unacknowledged => write!(f, "UNACKNOWLEDGED"),
            Self::Acknowledged => write!(f, "ACKNOWLEDGED"),
        }
    }
}

/// Alert record tied to a piece of equipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Unique alert ID
    pub id: String,
    /// Equipment the alert was raised for
    pub equipment_id: String,
    /// Display name of the equipment
    pub equipment_name: String,
    /// Alert severity
    pub severity: Severity,
    /// Alert message
    pub message: String,
    /// When the alert was raised
    pub timestamp: DateTime<Utc>,
    /// Whether an operator acknowledged the alert
    #[serde(default)]
    acknowledged: bool,
}

impl Alert {
    /// Create a new unacknowledged alert
    pub fn new(
        id: impl Into<String>,
        equipment_id: impl Into<String>,
        equipment_name: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            equipment_id: equipment_id.into(),
            equipment_name: equipment_name.into(),
            severity,
            message: message.into(),
            timestamp,
            acknowledged: false,
        }
    }

    /// Record an alert for a risk assessment that crossed the notification threshold
    ///
    /// Ids carry a random suffix so assessments in the same millisecond stay
    /// distinct.
    pub fn from_assessment(assessment: &RiskAssessment, equipment_name: &str) -> Self {
        let id = format!(
            "alert_{}_{}_{}",
            assessment.equipment_id(),
            assessment.timestamp().timestamp_millis(),
            random_suffix()
        );
        let message = format!(
            "Predicted {} risk ({}) - {}",
            assessment.prediction(),
            assessment.risk_score(),
            assessment.factors()
        );

        Self::new(
            id,
            assessment.equipment_id(),
            equipment_name,
            assessment.prediction(),
            message,
            assessment.timestamp(),
        )
    }

    /// Builder: start out acknowledged (seed data only)
    pub fn acknowledged(mut self) -> Self {
        self.acknowledged = true;
        self
    }

    /// Whether the alert has been acknowledged
    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged
    }

    /// Current state
    pub fn state(&self) -> AlertState {
        if self.acknowledged {
            AlertState::Acknowledged
        } else {
            AlertState::Unacknowledged
        }
    }

    /// Mark alert as acknowledged
    ///
    /// Returns `true` if this call changed the state. There is no way back.
    pub fn acknowledge(&mut self) -> bool {
        let changed = !self.acknowledged;
        self.acknowledged = true;
        changed
    }
}
