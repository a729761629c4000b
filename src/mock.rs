//! Mock implementations for testing
//!
//! Provides failing and recording collaborators for unit tests that must not
//! depend on timing or on the demo data.

use crate::alerts::{Alert, HighRiskNotice, Notifier};
use crate::domain::{Equipment, SensorSample};
use crate::error::{AppError, ProviderError, Result};
use crate::providers::{AlertSource, EquipmentCatalog, SubmitReceipt, TelemetrySink};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Catalog and alert source that never answers
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingCatalog;

impl EquipmentCatalog for FailingCatalog {
    fn list_equipment(&self) -> std::result::Result<Vec<Equipment>, ProviderError> {
        Err(ProviderError::unavailable("catalog", "mock catalog is down"))
    }
}

impl AlertSource for FailingCatalog {
    fn list_alerts(&self) -> std::result::Result<Vec<Alert>, ProviderError> {
        Err(ProviderError::unavailable("alert source", "mock alert source is down"))
    }
}

/// Telemetry sink that rejects every sample, counting the attempts
#[derive(Debug, Default)]
pub struct FailingSink {
    attempts: AtomicUsize,
}

impl FailingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl TelemetrySink for FailingSink {
    fn submit(&self, _sample: &SensorSample) -> std::result::Result<SubmitReceipt, ProviderError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(ProviderError::unavailable("telemetry sink", "mock sink rejects everything"))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Notifier that records every notice it receives
///
/// Clones share the same record, so a test can keep one handle after giving
/// the other to a notification manager.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<HighRiskNotice>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.notices.lock().map(|n| n.len()).unwrap_or(0)
    }

    pub fn notices(&self) -> Vec<HighRiskNotice> {
        self.notices.lock().map(|n| n.clone()).unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &HighRiskNotice) -> Result<()> {
        self.notices
            .lock()
            .map_err(|_| AppError::Provider(ProviderError::unavailable("notifier", "poisoned")))?
            .push(notice.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SensorReadings;

    #[test]
    fn test_failing_catalog() {
        assert!(FailingCatalog.list_equipment().is_err());
        assert!(FailingCatalog.list_alerts().is_err());
    }

    #[test]
    fn test_failing_sink_counts_attempts() {
        let sink = FailingSink::new();
        let sample = SensorSample::new("s1", "EQ001", SensorReadings::default(), 0);
        assert!(sink.submit(&sample).is_err());
        assert!(sink.submit(&sample).is_err());
        assert_eq!(sink.attempts(), 2);
    }
}
