//! Alert manager implementation
//!
//! Holds the session's alert records, enforces that every alert refers to
//! catalogued equipment, and applies acknowledgements.

use super::types::Alert;
use crate::domain::{Equipment, RiskAssessment, Severity};
use crate::error::AlertError;
use std::collections::{BTreeMap, HashMap};

/// Alert manager configuration
#[derive(Debug, Clone, Default)]
pub struct AlertManagerConfig {
    /// Record a persistent alert when an assessment triggers a high-risk notice
    pub materialize_high_risk: bool,
}

/// Alert manager
///
/// Alerts keep their insertion order and are never removed during a session.
#[derive(Debug, Clone, Default)]
pub struct AlertManager {
    /// Alerts in insertion order
    alerts: Vec<Alert>,
    /// Known equipment names by id
    equipment: HashMap<String, String>,
    /// Configuration
    config: AlertManagerConfig,
}

impl AlertManager {
    /// Create a new alert manager
    pub fn new(config: AlertManagerConfig) -> Self {
        Self {
            alerts: Vec::new(),
            equipment: HashMap::new(),
            config,
        }
    }

    /// Register catalogued equipment that alerts may refer to
    pub fn register_equipment<'a>(&mut self, equipment: impl IntoIterator<Item = &'a Equipment>) {
        for eq in equipment {
            self.equipment.insert(eq.id.clone(), eq.name.clone());
        }
    }

    /// Whether alerts may refer to this equipment id
    pub fn knows_equipment(&self, equipment_id: &str) -> bool {
        self.equipment.contains_key(equipment_id)
    }

    /// Display name for a known equipment id
    pub fn equipment_name(&self, equipment_id: &str) -> Option<&str> {
        self.equipment.get(equipment_id).map(String::as_str)
    }

    /// Load seed alerts, dropping any that reference unknown equipment
    ///
    /// Returns the number of alerts accepted.
    pub fn seed(&mut self, alerts: impl IntoIterator<Item = Alert>) -> usize {
        let mut accepted = 0;
        for alert in alerts {
            match self.insert(alert) {
                Ok(()) => accepted += 1,
                Err(e) => log::warn!("Dropping seed alert: {}", e),
            }
        }
        accepted
    }

    /// Track a new alert
    pub fn insert(&mut self, alert: Alert) -> Result<(), AlertError> {
        if !self.knows_equipment(&alert.equipment_id) {
            return Err(AlertError::UnknownEquipment {
                alert_id: alert.id,
                equipment_id: alert.equipment_id,
            });
        }
        if self.get(&alert.id).is_some() {
            return Err(AlertError::Duplicate(alert.id));
        }

        log::debug!(
            "Tracking alert {} [{}] for {}",
            alert.id,
            alert.severity,
            alert.equipment_id
        );
        self.alerts.push(alert);
        Ok(())
    }

    /// Record a persistent alert for a high-risk assessment, if configured to
    ///
    /// Returns the recorded alert, or `None` when materialization is off or the
    /// equipment is not catalogued.
    pub fn raise_from_assessment(&mut self, assessment: &RiskAssessment) -> Option<&Alert> {
        if !self.config.materialize_high_risk {
            return None;
        }

        let Some(name) = self.equipment_name(assessment.equipment_id()) else {
            log::warn!(
                "Not recording alert for uncatalogued equipment {}",
                assessment.equipment_id()
            );
            return None;
        };

        let alert = Alert::from_assessment(assessment, name);
        match self.insert(alert) {
            Ok(()) => self.alerts.last(),
            Err(e) => {
                log::warn!("Failed to record high-risk alert: {}", e);
                None
            }
        }
    }

    /// All alerts in insertion order
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Look up an alert by id
    pub fn get(&self, alert_id: &str) -> Option<&Alert> {
        self.alerts.iter().find(|a| a.id == alert_id)
    }

    /// Acknowledge an alert, ignoring unknown ids
    ///
    /// Idempotent. Returns the updated collection.
    pub fn acknowledge(&mut self, alert_id: &str) -> &[Alert] {
        if let Err(e) = self.try_acknowledge(alert_id) {
            log::debug!("Ignoring acknowledge: {}", e);
        }
        &self.alerts
    }

    /// Acknowledge an alert, failing on unknown ids
    pub fn try_acknowledge(&mut self, alert_id: &str) -> Result<&Alert, AlertError> {
        let alert = self
            .alerts
            .iter_mut()
            .find(|a| a.id == alert_id)
            .ok_or_else(|| AlertError::NotFound(alert_id.to_string()))?;

        if alert.acknowledge() {
            log::info!("Acknowledged alert {}", alert.id);
        }
        Ok(&*alert)
    }

    /// Alerts still waiting for an operator
    pub fn unacknowledged(&self) -> Vec<&Alert> {
        self.alerts.iter().filter(|a| !a.is_acknowledged()).collect()
    }

    /// Alerts with CRITICAL severity, acknowledged or not
    pub fn critical(&self) -> Vec<&Alert> {
        self.alerts
            .iter()
            .filter(|a| a.severity == Severity::Critical)
            .collect()
    }

    /// Unacknowledged alert count by severity
    pub fn count_by_severity(&self) -> BTreeMap<Severity, usize> {
        let mut counts = BTreeMap::new();
        for alert in self.alerts.iter().filter(|a| !a.is_acknowledged()) {
            *counts.entry(alert.severity).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EquipmentStatus, RiskScore, RiskThresholds, SensorReadings};
    use chrono::Utc;

    fn fleet() -> Vec<Equipment> {
        vec![
            Equipment::new("EQ002", "Turbine Generator B", "Generator", EquipmentStatus::Warning),
            Equipment::new("EQ003", "Cooling Pump C", "Pump", EquipmentStatus::Critical),
        ]
    }

    fn seed_alerts() -> Vec<Alert> {
        vec![
            Alert::new(
                "alert_1",
                "EQ003",
                "Cooling Pump C",
                Severity::Critical,
                "High vibration detected - immediate maintenance required",
                Utc::now(),
            ),
            Alert::new(
                "alert_2",
                "EQ002",
                "Turbine Generator B",
                Severity::High,
                "Temperature approaching critical threshold",
                Utc::now(),
            ),
        ]
    }

    fn manager() -> AlertManager {
        let mut manager = AlertManager::default();
        manager.register_equipment(&fleet());
        assert_eq!(manager.seed(seed_alerts()), 2);
        manager
    }

    fn assessment(score: u8) -> RiskAssessment {
        RiskAssessment::new(
            RiskScore::new(score),
            "EQ002",
            SensorReadings::new(90.0, 3.0, 16.0),
            &RiskThresholds::default(),
            Utc::now(),
        )
    }

    #[test]
    fn test_acknowledge_changes_only_target() {
        let mut manager = manager();
        let before = manager.alerts().to_vec();

        let after = manager.acknowledge("alert_1").to_vec();

        assert!(after[0].is_acknowledged());
        assert_eq!(after[1], before[1]);
        let mut expected = before[0].clone();
        expected.acknowledge();
        assert_eq!(after[0], expected);
    }

    #[test]
    fn test_acknowledge_is_idempotent() {
        let mut once = manager();
        once.acknowledge("alert_2");

        let mut twice = manager();
        twice.acknowledge("alert_2");
        twice.acknowledge("alert_2");

        assert_eq!(
            once.alerts().iter().map(Alert::is_acknowledged).collect::<Vec<_>>(),
            twice.alerts().iter().map(Alert::is_acknowledged).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_acknowledge_unknown_is_noop() {
        let mut manager = manager();
        let before = manager.alerts().to_vec();
        let after = manager.acknowledge("alert_404");
        assert_eq!(after, before.as_slice());
    }

    #[test]
    fn test_try_acknowledge_unknown_fails() {
        let mut manager = manager();
        assert_eq!(
            manager.try_acknowledge("alert_404").unwrap_err(),
            AlertError::NotFound("alert_404".to_string())
        );
        assert!(manager.try_acknowledge("alert_1").unwrap().is_acknowledged());
    }

    #[test]
    fn test_derived_queries() {
        let mut manager = manager();
        assert_eq!(manager.unacknowledged().len(), 2);
        assert_eq!(manager.critical().len(), 1);

        manager.acknowledge("alert_1");
        let unacked: Vec<&str> = manager.unacknowledged().into_iter().map(|a| a.id.as_str()).collect();
        assert_eq!(unacked, vec!["alert_2"]);
        // acknowledged critical alerts still count as critical
        assert_eq!(manager.critical().len(), 1);
    }

    #[test]
    fn test_count_by_severity() {
        let mut manager = manager();
        let counts = manager.count_by_severity();
        assert_eq!(counts.get(&Severity::Critical), Some(&1));
        assert_eq!(counts.get(&Severity::High), Some(&1));

        manager.acknowledge("alert_1");
        assert_eq!(manager.count_by_severity().get(&Severity::Critical), None);
    }

    #[test]
    fn test_seed_drops_unknown_equipment() {
        let mut manager = AlertManager::default();
        manager.register_equipment(&fleet());
        let stray = Alert::new("alert_9", "EQ999", "Ghost", Severity::Low, "?", Utc::now());
        assert_eq!(manager.seed(vec![stray]), 0);
        assert!(manager.alerts().is_empty());
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut manager = manager();
        let dup = seed_alerts().remove(0);
        assert_eq!(
            manager.insert(dup),
            Err(AlertError::Duplicate("alert_1".to_string()))
        );
    }

    #[test]
    fn test_raise_from_assessment_disabled_by_default() {
        let mut manager = manager();
        assert!(manager.raise_from_assessment(&assessment(90)).is_none());
        assert_eq!(manager.alerts().len(), 2);
    }

    #[test]
    fn test_raise_from_assessment_when_enabled() {
        let mut manager = AlertManager::new(AlertManagerConfig {
            materialize_high_risk: true,
        });
        manager.register_equipment(&fleet());

        let alert = manager.raise_from_assessment(&assessment(90)).unwrap().clone();
        assert_eq!(alert.equipment_name, "Turbine Generator B");
        assert_eq!(alert.severity, Severity::Critical);
        assert_eq!(manager.unacknowledged().len(), 1);
    }

    #[test]
    fn test_repeated_assessment_records_every_alert() {
        let mut manager = AlertManager::new(AlertManagerConfig {
            materialize_high_risk: true,
        });
        manager.register_equipment(&fleet());

        // Same timestamp every time
        let assessment = assessment(97);
        for _ in 0..3 {
            assert!(manager.raise_from_assessment(&assessment).is_some());
        }

        assert_eq!(manager.alerts().len(), 3);
        let ids: std::collections::HashSet<_> = manager.alerts().iter().map(|a| &a.id).collect();
        assert_eq!(ids.len(), 3);
    }
}
