//! Session controller
//!
//! User-facing actions on a shared session. Starting monitoring spawns the
//! sampling task; stopping cancels it and waits for it to wind down.

use super::monitor::{Monitor, MonitorConfig, MonitorStats};
use super::session::{classify_shared, read_session, write_session, SharedSession};
use crate::alerts::{Alert, HighRiskNotice};
use crate::domain::{Equipment, RiskAssessment};
use crate::error::Result;
use crate::providers::TelemetrySink;

use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Running sampling task
struct MonitorHandle {
    cancel: CancellationToken,
    join: JoinHandle<MonitorStats>,
}

/// Controller for one monitoring session
pub struct SessionController {
    session: SharedSession,
    sink: Arc<dyn TelemetrySink>,
    monitor_config: MonitorConfig,
    running: Option<MonitorHandle>,
}

impl SessionController {
    pub fn new(
        session: SharedSession,
        sink: Arc<dyn TelemetrySink>,
        monitor_config: MonitorConfig,
    ) -> Self {
        Self {
            session,
            sink,
            monitor_config,
            running: None,
        }
    }

    /// Shared session handle
    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    /// Whether a sampling task is running
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Select the equipment to monitor
    pub fn select_equipment(&self, equipment_id: &str) -> Result<Equipment> {
        write_session(&self.session)
            .select_equipment(equipment_id)
            .cloned()
    }

    /// Start sampling the selected equipment
    ///
    /// Returns `false` if monitoring was already running.
    pub async fn start_monitoring(&mut self) -> Result<bool> {
        let started = write_session(&self.session).start_monitoring()?;
        if !started && self.running.is_some() {
            return Ok(false);
        }

        if let Some(previous) = self.running.take() {
            previous.cancel.cancel();
        }

        let cancel = CancellationToken::new();
        let monitor = Monitor::new(self.monitor_config.clone(), Arc::clone(&self.sink));
        let join = monitor.spawn(Arc::clone(&self.session), cancel.clone());
        self.running = Some(MonitorHandle { cancel, join });
        Ok(true)
    }

    /// Stop sampling and wait for the task to finish
    ///
    /// Returns the run's counters, or `None` if nothing was running.
    pub async fn stop_monitoring(&mut self) -> Option<MonitorStats> {
        write_session(&self.session).stop_monitoring();

        let handle = self.running.take()?;
        handle.cancel.cancel();
        match handle.join.await {
            Ok(stats) => Some(stats),
            Err(e) => {
                log::warn!("Monitor task ended abnormally: {}", e);
                None
            }
        }
    }

    /// Classify the current window
    pub fn run_classification(&self) -> Result<RiskAssessment> {
        classify_shared(&self.session)
    }

    /// Acknowledge an alert, returning the updated alert list
    pub fn acknowledge_alert(&self, alert_id: &str) -> Result<Vec<Alert>> {
        write_session(&self.session)
            .acknowledge_alert(alert_id)
            .map(<[Alert]>::to_vec)
    }

    /// Clear the active high-risk notice
    pub fn dismiss_notification(&self) -> Option<HighRiskNotice> {
        write_session(&self.session).dismiss_notification()
    }

    /// Latest successful assessment
    pub fn current_assessment(&self) -> Option<RiskAssessment> {
        read_session(&self.session).current_assessment().cloned()
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        if let Some(handle) = self.running.take() {
            handle.cancel.cancel();
        }
    }
}
