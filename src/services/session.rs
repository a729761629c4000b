//! Monitoring session
//!
//! Owns everything one operator session works with: the catalogued equipment,
//! the current selection, the rolling window, the latest assessment, the
//! alert list and the active high-risk notice.

use crate::alerts::{Alert, AlertManager, HighRiskNotice, NotificationManager, NotificationPolicy};
use crate::config::Config;
use crate::domain::{Equipment, RiskAssessment, SensorSample};
use crate::error::{AppError, DomainError, Result};
use crate::providers::{AlertSource, EquipmentCatalog};
use crate::risk::RiskClassifier;
use crate::sampling::{NoiseSource, RngNoise, RollingWindow, SampleGenerator, WindowState};

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// High-risk notice waiting to go out to the notification channels
pub struct PendingNotice {
    notice: HighRiskNotice,
    notifications: Arc<NotificationManager>,
}

impl PendingNotice {
    pub fn notice(&self) -> &HighRiskNotice {
        &self.notice
    }

    /// Send the notice to every channel, returning how many delivered it
    pub fn dispatch(self) -> usize {
        let delivered = self.notifications.notify_all(&self.notice);
        log::debug!("High-risk notice delivered to {} channels", delivered);
        delivered
    }
}

/// Session shared between the controller and the sampling task
pub type SharedSession = Arc<RwLock<MonitoringSession>>;

/// Classify a shared session, delivering any notice once the lock is released
pub fn classify_shared(session: &SharedSession) -> Result<RiskAssessment> {
    let (assessment, pending) = write_session(session).classify_window()?;
    if let Some(pending) = pending {
        pending.dispatch();
    }
    Ok(assessment)
}

/// Take a read lock, recovering the state if a writer panicked
pub fn read_session(session: &SharedSession) -> RwLockReadGuard<'_, MonitoringSession> {
    session
        .read()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Take a write lock, recovering the state if a writer panicked
pub fn write_session(session: &SharedSession) -> RwLockWriteGuard<'_, MonitoringSession> {
    session
        .write()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Sample produced by one monitoring tick
#[derive(Debug, Clone)]
pub struct TickOutcome {
    /// Monitoring epoch the sample belongs to
    pub epoch: u64,
    /// The appended sample
    pub sample: SensorSample,
    /// Window state after the append
    pub window: WindowState,
}

/// What a session managed to load from its collaborators
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub equipment: usize,
    pub alerts: usize,
    /// Collaborators that failed to answer
    pub failures: usize,
}

/// State of one monitoring session
pub struct MonitoringSession {
    equipment: Vec<Equipment>,
    selected: Option<String>,
    monitoring: bool,
    epoch: u64,
    window: RollingWindow,
    generator: SampleGenerator,
    classifier: RiskClassifier,
    classification_noise: Box<dyn NoiseSource>,
    alerts: AlertManager,
    current: Option<RiskAssessment>,
    notice: Option<HighRiskNotice>,
    notification_policy: NotificationPolicy,
    notifications: Arc<NotificationManager>,
    strict_acknowledge: bool,
}

impl MonitoringSession {
    /// Create an empty session from configuration
    ///
    /// Noise is seeded from `general.seed` when set, from the OS otherwise.
    pub fn new(config: &Config) -> Result<Self> {
        let noise = |stream: u64| -> Box<dyn NoiseSource> {
            match config.general.seed {
                Some(seed) => Box::new(RngNoise::seeded(seed.wrapping_add(stream))),
                None => Box::new(RngNoise::from_entropy()),
            }
        };
        let sample_noise = noise(0);
        let classification_noise = noise(1);

        Ok(Self {
            equipment: Vec::new(),
            selected: None,
            monitoring: false,
            epoch: 0,
            window: RollingWindow::new(config.monitoring.window_capacity)?,
            generator: SampleGenerator::new(config.sampling.to_profile(), sample_noise),
            classifier: RiskClassifier::new(config.risk.to_policy())?,
            classification_noise,
            alerts: AlertManager::new(config.alerts.to_manager_config()),
            current: None,
            notice: None,
            notification_policy: config.alerts.to_policy(),
            notifications: Arc::new(NotificationManager::default()),
            strict_acknowledge: config.alerts.strict_acknowledge,
        })
    }

    /// Create a session and populate it from its collaborators
    ///
    /// Collaborator failures are logged and the session starts with whatever
    /// could be loaded. The configured default equipment is selected when it
    /// is catalogued.
    pub fn load(
        config: &Config,
        catalog: &dyn EquipmentCatalog,
        source: &dyn AlertSource,
    ) -> Result<Self> {
        let mut session = Self::new(config)?;
        let report = session.populate(catalog, source);
        log::info!(
            "Session loaded {} equipment and {} alerts ({} collaborator failures)",
            report.equipment,
            report.alerts,
            report.failures
        );

        if let Some(id) = config.monitoring.default_equipment.as_deref() {
            if let Err(e) = session.select_equipment(id) {
                log::warn!("Default equipment not selected: {}", e);
            }
        }

        Ok(session)
    }

    /// Load equipment and seed alerts into this session
    pub fn populate(
        &mut self,
        catalog: &dyn EquipmentCatalog,
        source: &dyn AlertSource,
    ) -> LoadReport {
        let mut report = LoadReport::default();

        match catalog.list_equipment() {
            Ok(equipment) => {
                self.alerts.register_equipment(&equipment);
                report.equipment = equipment.len();
                self.equipment = equipment;
            }
            Err(e) => {
                log::warn!("Failed to load equipment: {}", e);
                report.failures += 1;
            }
        }

        match source.list_alerts() {
            Ok(alerts) => report.alerts = self.alerts.seed(alerts),
            Err(e) => {
                log::warn!("Failed to load alerts: {}", e);
                report.failures += 1;
            }
        }

        report
    }

    /// Replace the sample and classification noise sources
    pub fn with_noise(
        mut self,
        sample_noise: Box<dyn NoiseSource>,
        classification_noise: Box<dyn NoiseSource>,
    ) -> Self {
        self.generator = SampleGenerator::new(*self.generator.profile(), sample_noise);
        self.classification_noise = classification_noise;
        self
    }

    /// Replace the notification channels
    pub fn with_notifications(mut self, notifications: NotificationManager) -> Self {
        self.notifications = Arc::new(notifications);
        self
    }

    /// Wrap the session for sharing with a sampling task
    pub fn into_shared(self) -> SharedSession {
        Arc::new(RwLock::new(self))
    }

    /// Select the equipment to monitor
    ///
    /// Switching to different equipment resets the window, clears the current
    /// assessment and starts a new epoch. Reselecting the current equipment
    /// changes nothing.
    pub fn select_equipment(&mut self, equipment_id: &str) -> Result<&Equipment> {
        let equipment_id = equipment_id.trim();
        if equipment_id.is_empty() {
            return Err(DomainError::EmptyEquipmentId.into());
        }

        let index = self
            .equipment
            .iter()
            .position(|eq| eq.id == equipment_id)
            .ok_or_else(|| AppError::EquipmentNotFound(equipment_id.to_string()))?;

        if self.selected.as_deref() != Some(equipment_id) {
            self.selected = Some(equipment_id.to_string());
            self.window.reset();
            self.current = None;
            self.epoch += 1;
            log::info!("Selected equipment {}", equipment_id);
        }

        Ok(&self.equipment[index])
    }

    /// Begin monitoring the selected equipment
    ///
    /// Clears the window and starts a new epoch. Returns `false` if monitoring
    /// was already running.
    pub fn start_monitoring(&mut self) -> Result<bool> {
        let Some(selected) = self.selected.as_deref() else {
            return Err(AppError::NoEquipmentSelected);
        };

        if self.monitoring {
            log::debug!("Monitoring already running for {}", selected);
            return Ok(false);
        }

        log::info!("Starting monitoring for {}", selected);
        self.window.reset();
        self.epoch += 1;
        self.monitoring = true;
        Ok(true)
    }

    /// Stop monitoring, keeping the window contents
    ///
    /// Returns `false` if monitoring was not running.
    pub fn stop_monitoring(&mut self) -> bool {
        if !self.monitoring {
            return false;
        }
        log::info!("Stopping monitoring after {} samples", self.window.len());
        self.monitoring = false;
        true
    }

    /// Generate one sample for the selected equipment and append it
    ///
    /// Does nothing unless monitoring is running.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        if !self.monitoring {
            return None;
        }
        let equipment_id = self.selected.as_deref()?;

        let sample = self.generator.generate(equipment_id);
        let window = self.window.append(sample.clone());
        if window.evicted > 0 {
            log::debug!("Window full, evicted {} oldest samples", window.evicted);
        }

        Some(TickOutcome {
            epoch: self.epoch,
            sample,
            window,
        })
    }

    /// Whether a result produced during `epoch` still belongs to this run
    pub fn accepts(&self, epoch: u64) -> bool {
        self.monitoring && self.epoch == epoch
    }

    /// Classify the current window contents and deliver any notice
    pub fn run_classification(&mut self) -> Result<RiskAssessment> {
        let (assessment, pending) = self.classify_window()?;
        if let Some(pending) = pending {
            pending.dispatch();
        }
        Ok(assessment)
    }

    /// Classify the current window contents
    ///
    /// On failure the previous assessment stays in place. A score above the
    /// notification threshold sets the active notice and, if configured,
    /// records an alert. The notice is returned undelivered so callers holding
    /// the session lock can send it after releasing it.
    pub fn classify_window(&mut self) -> Result<(RiskAssessment, Option<PendingNotice>)> {
        let samples = self.window.snapshot();
        let assessment = self
            .classifier
            .classify(&samples, self.classification_noise.as_mut())?;

        let mut pending = None;
        if self.notification_policy.should_notify(&assessment) {
            let name = self
                .alerts
                .equipment_name(assessment.equipment_id())
                .unwrap_or(assessment.equipment_id())
                .to_string();
            let notice = HighRiskNotice::new(assessment.clone(), name);
            pending = Some(PendingNotice {
                notice: notice.clone(),
                notifications: Arc::clone(&self.notifications),
            });
            self.notice = Some(notice);

            self.alerts.raise_from_assessment(&assessment);
        }

        self.current = Some(assessment.clone());
        Ok((assessment, pending))
    }

    /// Acknowledge an alert
    ///
    /// Unknown ids are ignored unless strict acknowledgement is configured.
    pub fn acknowledge_alert(&mut self, alert_id: &str) -> Result<&[Alert]> {
        if self.strict_acknowledge {
            self.alerts.try_acknowledge(alert_id)?;
            Ok(self.alerts.alerts())
        } else {
            Ok(self.alerts.acknowledge(alert_id))
        }
    }

    /// Clear the active high-risk notice, returning it
    pub fn dismiss_notification(&mut self) -> Option<HighRiskNotice> {
        self.notice.take()
    }

    /// Catalogued equipment in display order
    pub fn equipment(&self) -> &[Equipment] {
        &self.equipment
    }

    /// Currently selected equipment
    pub fn selected_equipment(&self) -> Option<&Equipment> {
        let id = self.selected.as_deref()?;
        self.equipment.iter().find(|eq| eq.id == id)
    }

    pub fn is_monitoring(&self) -> bool {
        self.monitoring
    }

    /// Current monitoring epoch
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn window(&self) -> &RollingWindow {
        &self.window
    }

    /// Latest successful assessment
    pub fn current_assessment(&self) -> Option<&RiskAssessment> {
        self.current.as_ref()
    }

    /// Active high-risk notice
    pub fn notice(&self) -> Option<&HighRiskNotice> {
        self.notice.as_ref()
    }

    /// All alerts in insertion order
    pub fn alerts(&self) -> &[Alert] {
        self.alerts.alerts()
    }

    pub fn alert_manager(&self) -> &AlertManager {
        &self.alerts
    }
}

impl std::fmt::Debug for MonitoringSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonitoringSession")
            .field("selected", &self.selected)
            .field("monitoring", &self.monitoring)
            .field("epoch", &self.epoch)
            .field("window", &self.window.len())
            .field("alerts", &self.alerts.alerts().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Severity;
    use crate::error::{AlertError, RiskError};
    use crate::mock::{FailingCatalog, RecordingNotifier};
    use crate::providers::InMemoryCatalog;
    use crate::sampling::{FixedNoise, ScriptedNoise};
    use std::time::Duration;

    fn demo_catalog() -> InMemoryCatalog {
        InMemoryCatalog::demo().with_latency(Duration::ZERO)
    }

    fn session_with(config: &Config, sample_unit: f64, classify_unit: f64) -> MonitoringSession {
        let catalog = demo_catalog();
        MonitoringSession::load(config, &catalog, &catalog)
            .unwrap()
            .with_noise(
                Box::new(FixedNoise::new(sample_unit)),
                Box::new(FixedNoise::new(classify_unit)),
            )
    }

    fn session() -> MonitoringSession {
        session_with(&Config::default(), 0.5, 0.0)
    }

    #[test]
    fn test_load_selects_default_equipment() {
        let session = session();
        assert_eq!(session.equipment().len(), 4);
        assert_eq!(session.alerts().len(), 2);
        assert_eq!(session.selected_equipment().unwrap().id, "EQ001");
        assert!(!session.is_monitoring());
    }

    #[test]
    fn test_load_survives_failing_catalog() {
        let catalog = FailingCatalog;
        let session = MonitoringSession::load(&Config::default(), &catalog, &catalog).unwrap();
        assert!(session.equipment().is_empty());
        assert!(session.alerts().is_empty());
        assert!(session.selected_equipment().is_none());
    }

    #[test]
    fn test_select_unknown_equipment() {
        let mut session = session();
        assert!(matches!(
            session.select_equipment("EQ999"),
            Err(AppError::EquipmentNotFound(_))
        ));
        assert!(matches!(
            session.select_equipment("  "),
            Err(AppError::Domain(DomainError::EmptyEquipmentId))
        ));
        assert_eq!(session.selected_equipment().unwrap().id, "EQ001");
    }

    #[test]
    fn test_tick_requires_monitoring() {
        let mut session = session();
        assert!(session.tick().is_none());

        session.start_monitoring().unwrap();
        let outcome = session.tick().unwrap();
        assert_eq!(outcome.sample.equipment_id(), "EQ001");
        assert_eq!(outcome.window.len, 1);
        assert!(session.accepts(outcome.epoch));
    }

    #[test]
    fn test_start_requires_selection() {
        let catalog = FailingCatalog;
        let mut session = MonitoringSession::load(&Config::default(), &catalog, &catalog).unwrap();
        assert!(matches!(
            session.start_monitoring(),
            Err(AppError::NoEquipmentSelected)
        ));
    }

    #[test]
    fn test_restart_clears_window_and_bumps_epoch() {
        let mut session = session();
        session.start_monitoring().unwrap();
        session.tick();
        session.tick();
        let first_epoch = session.epoch();

        assert!(!session.start_monitoring().unwrap());
        assert_eq!(session.window().len(), 2);

        assert!(session.stop_monitoring());
        assert!(!session.accepts(first_epoch));
        assert_eq!(session.window().len(), 2);

        assert!(session.start_monitoring().unwrap());
        assert!(session.window().is_empty());
        assert!(session.epoch() > first_epoch);
    }

    #[test]
    fn test_switching_equipment_resets_window() {
        let mut session = session();
        session.start_monitoring().unwrap();
        let outcome = session.tick().unwrap();

        session.select_equipment("EQ003").unwrap();
        assert!(session.window().is_empty());
        assert!(!session.accepts(outcome.epoch));
        assert_eq!(session.tick().unwrap().sample.equipment_id(), "EQ003");

        let epoch = session.epoch();
        session.select_equipment("EQ003").unwrap();
        assert_eq!(session.epoch(), epoch);
        assert_eq!(session.window().len(), 1);
    }

    #[test]
    fn test_window_is_bounded() {
        let mut session = session();
        session.start_monitoring().unwrap();
        for _ in 0..60 {
            session.tick();
        }
        assert_eq!(session.window().len(), 50);
    }

    #[test]
    fn test_classification_on_empty_window_keeps_previous() {
        let mut session = session();
        assert!(matches!(
            session.run_classification(),
            Err(AppError::Risk(RiskError::InvalidInput(_)))
        ));
        assert!(session.current_assessment().is_none());

        session.start_monitoring().unwrap();
        session.tick();
        let assessment = session.run_classification().unwrap();
        // midpoint noise yields the baselines: 75/2.5/15 scores 35
        assert_eq!(assessment.risk_score().value(), 35);
        assert_eq!(assessment.prediction(), Severity::Medium);

        session.stop_monitoring();
        session.start_monitoring().unwrap();
        assert!(session.run_classification().is_err());
        assert_eq!(session.current_assessment(), Some(&assessment));
    }

    #[test]
    fn test_high_risk_raises_notice_without_alert() {
        let recorder = RecordingNotifier::new();
        let mut notifications = NotificationManager::new();
        notifications.add_notifier(Box::new(recorder.clone()));

        // near the top of every range: about 80/3.5/17.5 plus 19.98 noise
        let mut session = session_with(&Config::default(), 0.999, 0.999)
            .with_notifications(notifications);
        session.start_monitoring().unwrap();
        session.tick();

        let assessment = session.run_classification().unwrap();
        assert_eq!(assessment.risk_score().value(), 97);
        assert_eq!(session.notice().unwrap().equipment_name, "Compressor Unit A");
        assert_eq!(recorder.count(), 1);
        assert_eq!(session.alerts().len(), 2);

        assert!(session.dismiss_notification().is_some());
        assert!(session.notice().is_none());
        assert!(session.dismiss_notification().is_none());
    }

    #[test]
    fn test_materialized_high_risk_alert() {
        let mut config = Config::default();
        config.alerts.materialize_high_risk = true;
        let mut session = session_with(&config, 0.999, 0.999);
        session.start_monitoring().unwrap();
        session.tick();
        session.run_classification().unwrap();

        let alerts = session.alerts();
        assert_eq!(alerts.len(), 3);
        let raised = &alerts[2];
        assert_eq!(raised.equipment_id, "EQ001");
        assert_eq!(raised.severity, Severity::Critical);
        assert!(!raised.is_acknowledged());
    }

    #[test]
    fn test_medium_risk_does_not_notify() {
        let mut session = session_with(&Config::default(), 0.5, 0.0);
        session.start_monitoring().unwrap();
        session.tick();
        session.run_classification().unwrap();
        assert!(session.notice().is_none());
    }

    #[test]
    fn test_acknowledge_tolerant_by_default() {
        let mut session = session();
        let alerts = session.acknowledge_alert("alert_1").unwrap();
        assert!(alerts[0].is_acknowledged());
        assert!(!alerts[1].is_acknowledged());

        let before = session.alerts().to_vec();
        let after = session.acknowledge_alert("missing").unwrap().to_vec();
        assert_eq!(before, after);
    }

    #[test]
    fn test_acknowledge_strict() {
        let mut config = Config::default();
        config.alerts.strict_acknowledge = true;
        let mut session = session_with(&config, 0.5, 0.0);

        assert!(matches!(
            session.acknowledge_alert("missing"),
            Err(AppError::Alert(AlertError::NotFound(_)))
        ));
        assert!(session.acknowledge_alert("alert_2").is_ok());
        assert!(session.alert_manager().get("alert_2").unwrap().is_acknowledged());
    }

    #[test]
    fn test_seeded_sessions_are_reproducible() {
        let mut config = Config::default();
        config.general.seed = Some(42);
        let catalog = demo_catalog();

        let mut readings = Vec::new();
        for _ in 0..2 {
            let mut session = MonitoringSession::load(&config, &catalog, &catalog).unwrap();
            session.start_monitoring().unwrap();
            let sample = session.tick().unwrap().sample;
            let score = session.run_classification().unwrap().risk_score();
            readings.push((sample.readings(), score));
        }
        assert_eq!(readings[0], readings[1]);
    }

    #[test]
    fn test_scripted_classification_noise() {
        let catalog = demo_catalog();
        let mut session = MonitoringSession::load(&Config::default(), &catalog, &catalog)
            .unwrap()
            .with_noise(
                Box::new(FixedNoise::midpoint()),
                Box::new(ScriptedNoise::new([0.0, 0.5])),
            );
        session.start_monitoring().unwrap();
        session.tick();

        assert_eq!(session.run_classification().unwrap().risk_score().value(), 35);
        assert_eq!(session.run_classification().unwrap().risk_score().value(), 45);
    }

    /// Records whether the session lock could be taken while notifying
    struct LockCheckingNotifier {
        session: Arc<std::sync::OnceLock<SharedSession>>,
        lock_free: Arc<std::sync::Mutex<Vec<bool>>>,
    }

    impl crate::alerts::Notifier for LockCheckingNotifier {
        fn notify(&self, _notice: &HighRiskNotice) -> Result<()> {
            if let Some(session) = self.session.get() {
                let free = session.try_write().is_ok();
                self.lock_free.lock().unwrap().push(free);
            }
            Ok(())
        }

        fn name(&self) -> &str {
            "lock-check"
        }
    }

    #[test]
    fn test_shared_classification_notifies_outside_lock() {
        let slot = Arc::new(std::sync::OnceLock::new());
        let lock_free = Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut notifications = NotificationManager::new();
        notifications.add_notifier(Box::new(LockCheckingNotifier {
            session: Arc::clone(&slot),
            lock_free: Arc::clone(&lock_free),
        }));

        let mut session = session_with(&Config::default(), 0.999, 0.999)
            .with_notifications(notifications);
        session.start_monitoring().unwrap();
        session.tick();
        let shared = session.into_shared();
        slot.set(Arc::clone(&shared)).unwrap();

        let assessment = classify_shared(&shared).unwrap();
        assert_eq!(assessment.risk_score().value(), 97);
        assert_eq!(*lock_free.lock().unwrap(), vec![true]);
        assert!(read_session(&shared).notice().is_some());
    }

    #[test]
    fn test_classify_window_defers_delivery() {
        let recorder = RecordingNotifier::new();
        let mut notifications = NotificationManager::new();
        notifications.add_notifier(Box::new(recorder.clone()));

        let mut session = session_with(&Config::default(), 0.999, 0.999)
            .with_notifications(notifications);
        session.start_monitoring().unwrap();
        session.tick();

        let (_, pending) = session.classify_window().unwrap();
        let pending = pending.unwrap();
        assert_eq!(pending.notice().equipment_name, "Compressor Unit A");
        assert!(session.notice().is_some());
        assert_eq!(recorder.count(), 0);

        assert_eq!(pending.dispatch(), 1);
        assert_eq!(recorder.count(), 1);
    }
}
