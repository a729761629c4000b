//! Equipment catalog types
//!
//! Static reference data describing monitored machines.

use super::risk::RiskScore;
use super::severity::Severity;
use super::RiskThresholds;
use crate::error::DomainError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operational status reported by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EquipmentStatus {
    Healthy,
    Warning,
    Critical,
    Offline,
}

impl fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Healthy => write!(f, "HEALTHY"),
            Self::Warning => write!(f, "WARNING"),
            Self::Critical => write!(f, "CRITICAL"),
            Self::Offline => write!(f, "OFFLINE"),
        }
    }
}

impl FromStr for EquipmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "healthy" => Ok(Self::Healthy),
            "warning" => Ok(Self::Warning),
            "critical" => Ok(Self::Critical),
            "offline" => Ok(Self::Offline),
            _ => Err(DomainError::UnknownStatus(s.to_string())),
        }
    }
}

/// A monitored piece of equipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: EquipmentStatus,
    pub last_maintenance: NaiveDate,
    pub next_maintenance: NaiveDate,
    pub risk_score: RiskScore,
}

impl Equipment {
    /// Create a new catalog entry
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: impl Into<String>,
        status: EquipmentStatus,
    ) -> Self {
        let today = chrono::Utc::now().date_naive();
        Self {
            id: id.into(),
            name: name.into(),
            kind: kind.into(),
            status,
            last_maintenance: today,
            next_maintenance: today,
            risk_score: RiskScore::MIN,
        }
    }

    /// Builder: set maintenance dates
    pub fn with_maintenance(mut self, last: NaiveDate, next: NaiveDate) -> Self {
        self.last_maintenance = last;
        self.next_maintenance = next;
        self
    }

    /// Builder: set catalog risk score
    pub fn with_risk_score(mut self, score: RiskScore) -> Self {
        self.risk_score = score;
        self
    }

    /// Severity band of the catalog risk score
    pub fn risk_band(&self, thresholds: &RiskThresholds) -> Severity {
        thresholds.classify(self.risk_score)
    }

    /// Days until the next scheduled maintenance (negative when overdue)
    pub fn days_until_maintenance(&self, today: NaiveDate) -> i64 {
        (self.next_maintenance - today).num_days()
    }

    /// Check if scheduled maintenance has passed
    pub fn is_maintenance_overdue(&self, today: NaiveDate) -> bool {
        self.next_maintenance < today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn pump() -> Equipment {
        Equipment::new("EQ003", "Cooling Pump C", "Pump", EquipmentStatus::Critical)
            .with_maintenance(date("2024-01-01"), date("2024-02-01"))
            .with_risk_score(RiskScore::new(85))
    }

    #[test]
    fn test_maintenance_schedule() {
        let eq = pump();
        assert_eq!(eq.days_until_maintenance(date("2024-01-25")), 7);
        assert!(!eq.is_maintenance_overdue(date("2024-02-01")));
        assert!(eq.is_maintenance_overdue(date("2024-02-02")));
        assert_eq!(eq.days_until_maintenance(date("2024-02-03")), -2);
    }

    #[test]
    fn test_risk_band() {
        assert_eq!(pump().risk_band(&RiskThresholds::default()), Severity::Critical);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(
            "warning".parse::<EquipmentStatus>().unwrap(),
            EquipmentStatus::Warning
        );
        assert!("broken".parse::<EquipmentStatus>().is_err());
    }

    #[test]
    fn test_equipment_json_shape() {
        let json = serde_json::to_value(pump()).unwrap();
        assert_eq!(json["type"], "Pump");
        assert_eq!(json["status"], "CRITICAL");
        assert_eq!(json["lastMaintenance"], "2024-01-01");
        assert_eq!(json["riskScore"], 85);
    }
}
