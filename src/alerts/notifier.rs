//! High-risk notification system
//!
//! Decides when an assessment deserves an operator's attention and fans the
//! resulting notice out to notification channels. A notice is transient; it
//! is not an alert record.

use crate::domain::{RiskAssessment, RiskScore, Severity};
use crate::error::Result;
use serde::Serialize;
use std::io::{self, Write};

/// Default score above which a notice is raised
pub const DEFAULT_NOTIFY_THRESHOLD: u8 = 70;

/// Transient high-risk notification
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighRiskNotice {
    pub equipment_name: String,
    pub assessment: RiskAssessment,
}

impl HighRiskNotice {
    pub fn new(assessment: RiskAssessment, equipment_name: impl Into<String>) -> Self {
        Self {
            equipment_name: equipment_name.into(),
            assessment,
        }
    }

    /// One-line summary
    pub fn message(&self) -> String {
        format!(
            "High failure risk on {} ({}): score {} [{}] from {}",
            self.equipment_name,
            self.assessment.equipment_id(),
            self.assessment.risk_score(),
            self.assessment.prediction(),
            self.assessment.factors()
        )
    }
}

/// Threshold rule for raising notices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationPolicy {
    /// Scores strictly above this raise a notice
    pub threshold: RiskScore,
}

impl Default for NotificationPolicy {
    fn default() -> Self {
        Self {
            threshold: RiskScore::new(DEFAULT_NOTIFY_THRESHOLD),
        }
    }
}

impl NotificationPolicy {
    pub fn new(threshold: RiskScore) -> Self {
        Self { threshold }
    }

    /// Whether an assessment warrants a notice
    pub fn should_notify(&self, assessment: &RiskAssessment) -> bool {
        assessment.risk_score() > self.threshold
    }
}

/// Notification channel trait
pub trait Notifier: Send + Sync {
    /// Deliver a notice
    fn notify(&self, notice: &HighRiskNotice) -> Result<()>;

    /// Channel name for identification
    fn name(&self) -> &str;
}

/// Terminal/console notifier
///
/// Outputs notices to stdout/stderr with colored formatting
pub struct TerminalNotifier {
    /// Use stderr instead of stdout
    use_stderr: bool,
    /// Use colors (ANSI escape codes)
    use_colors: bool,
}

impl TerminalNotifier {
    /// Create a new terminal notifier
    pub fn new() -> Self {
        Self {
            use_stderr: true,
            use_colors: Self::supports_color(),
        }
    }

    /// Create a notifier that uses stdout
    pub fn stdout() -> Self {
        Self {
            use_stderr: false,
            use_colors: Self::supports_color(),
        }
    }

    /// Create a notifier without colors
    pub fn no_color() -> Self {
        Self {
            use_stderr: true,
            use_colors: false,
        }
    }

    fn supports_color() -> bool {
        std::env::var("TERM")
            .map(|term| term != "dumb")
            .unwrap_or(false)
    }

    fn format_notice(&self, notice: &HighRiskNotice) -> String {
        let timestamp = notice.assessment.timestamp().format("%H:%M:%S");
        format!(
            "[{}] {} {}",
            timestamp,
            self.format_severity(notice.assessment.prediction()),
            notice.message()
        )
    }

    fn format_severity(&self, severity: Severity) -> String {
        if !self.use_colors {
            return severity.to_string();
        }

        let color_code = match severity {
            Severity::Low => "\x1b[32m",             // Green
            Severity::Medium => "\x1b[33m",          // Yellow
            Severity::High => "\x1b[38;5;208m",      // Orange
            Severity::Critical => "\x1b[31m\x1b[1m", // Bold Red
        };

        format!("{}{}\x1b[0m", color_code, severity)
    }
}

impl Default for TerminalNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: &HighRiskNotice) -> Result<()> {
        let message = self.format_notice(notice);

        if self.use_stderr {
            let mut handle = io::stderr().lock();
            writeln!(handle, "{}", message)?;
        } else {
            let mut handle = io::stdout().lock();
            writeln!(handle, "{}", message)?;
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "terminal"
    }
}

/// Notifier that only writes to the log
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &HighRiskNotice) -> Result<()> {
        log::warn!("{}", notice.message());
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}

/// Notification manager
///
/// Manages multiple notification channels and dispatches notices to them.
/// A failing channel never stops delivery to the others.
pub struct NotificationManager {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotificationManager {
    /// Create a manager with no channels
    pub fn new() -> Self {
        Self {
            notifiers: Vec::new(),
        }
    }

    /// Add a notifier
    pub fn add_notifier(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Send a notice to all channels, returning how many delivered it
    pub fn notify_all(&self, notice: &HighRiskNotice) -> usize {
        let mut delivered = 0;
        for notifier in &self.notifiers {
            match notifier.notify(notice) {
                Ok(()) => delivered += 1,
                Err(e) => log::warn!("Failed to notify via {}: {}", notifier.name(), e),
            }
        }
        delivered
    }

    /// Get number of active notifiers
    pub fn notifier_count(&self) -> usize {
        self.notifiers.len()
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        let mut manager = Self::new();
        manager.add_notifier(Box::new(LogNotifier));
        manager
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RiskThresholds, SensorReadings};
    use crate::error::{AppError, ProviderError};
    use chrono::Utc;

    fn assessment(score: u8) -> RiskAssessment {
        RiskAssessment::new(
            RiskScore::new(score),
            "EQ003",
            SensorReadings::new(92.0, 3.4, 17.0),
            &RiskThresholds::default(),
            Utc::now(),
        )
    }

    struct BrokenNotifier;

    impl Notifier for BrokenNotifier {
        fn notify(&self, _notice: &HighRiskNotice) -> Result<()> {
            Err(AppError::Provider(ProviderError::unavailable("pager", "offline")))
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    #[test]
    fn test_policy_is_strictly_above_threshold() {
        let policy = NotificationPolicy::default();
        assert!(!policy.should_notify(&assessment(70)));
        assert!(policy.should_notify(&assessment(71)));
        assert!(!policy.should_notify(&assessment(10)));
    }

    #[test]
    fn test_notice_message() {
        let notice = HighRiskNotice::new(assessment(88), "Cooling Pump C");
        let message = notice.message();
        assert!(message.contains("Cooling Pump C"));
        assert!(message.contains("88%"));
        assert!(message.contains("CRITICAL"));
    }

    #[test]
    fn test_format_severity() {
        let notifier = TerminalNotifier::no_color();
        assert_eq!(notifier.format_severity(Severity::High), "HIGH");
        assert_eq!(notifier.format_severity(Severity::Critical), "CRITICAL");
    }

    #[test]
    fn test_terminal_notifier_stdout() {
        let notifier = TerminalNotifier::stdout();
        assert!(!notifier.use_stderr);
        assert_eq!(notifier.name(), "terminal");
        let notice = HighRiskNotice::new(assessment(90), "Cooling Pump C");
        assert!(notifier.notify(&notice).is_ok());
    }

    #[test]
    fn test_notification_manager_default() {
        assert_eq!(NotificationManager::default().notifier_count(), 1);
        assert_eq!(NotificationManager::new().notifier_count(), 0);
    }

    #[test]
    fn test_failing_channel_does_not_block_others() {
        let mut manager = NotificationManager::new();
        manager.add_notifier(Box::new(BrokenNotifier));
        manager.add_notifier(Box::new(LogNotifier));
        let notice = HighRiskNotice::new(assessment(95), "Cooling Pump C");
        assert_eq!(manager.notify_all(&notice), 1);
    }
}
