//! Output formatting utilities
//!
//! Provides table and JSON output formatting for CLI commands.

use crate::alerts::Alert;
use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::domain::{Equipment, RiskAssessment, RiskThresholds, SensorSample, Severity};
use crate::sampling::WindowSummary;
use crate::services::MonitorStats;
use serde::Serialize;
use std::io::{self, Write};

/// Format and print output based on the selected format
pub fn print_output<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            writeln!(handle, "{}", data.to_table())?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());
            writeln!(handle, "{}", json)?;
        }
        OutputFormat::Compact => {
            writeln!(handle, "{}", data.to_compact())?;
        }
    }

    Ok(())
}

/// Trait for types that can be displayed as a table
pub trait TableDisplay {
    /// Format as a table string
    fn to_table(&self) -> String;

    /// Format as a compact single line
    fn to_compact(&self) -> String {
        self.to_table().replace('\n', " | ")
    }
}

/// Equipment entry for display
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentEntry {
    #[serde(flatten)]
    pub equipment: Equipment,
    /// Band of the catalog risk score
    pub risk_band: Severity,
    pub maintenance_overdue: bool,
}

impl EquipmentEntry {
    pub fn new(equipment: &Equipment, thresholds: &RiskThresholds) -> Self {
        let today = chrono::Utc::now().date_naive();
        Self {
            risk_band: equipment.risk_band(thresholds),
            maintenance_overdue: equipment.is_maintenance_overdue(today),
            equipment: equipment.clone(),
        }
    }
}

impl TableDisplay for EquipmentEntry {
    fn to_table(&self) -> String {
        let eq = &self.equipment;
        let overdue = if self.maintenance_overdue {
            " OVERDUE"
        } else {
            ""
        };
        format!(
            "[{}] {} ({}) {} risk {} [{}], next maintenance {}{}",
            eq.id,
            eq.name,
            eq.kind,
            eq.status,
            eq.risk_score,
            self.risk_band,
            eq.next_maintenance,
            overdue
        )
    }

    fn to_compact(&self) -> String {
        format!("{}:{}", self.equipment.id, self.equipment.risk_score)
    }
}

/// Equipment list for display
#[derive(Debug, Clone, Serialize)]
pub struct EquipmentList {
    pub equipment: Vec<EquipmentEntry>,
}

impl TableDisplay for EquipmentList {
    fn to_table(&self) -> String {
        let mut output = format!("Equipment: {}\n\n", self.equipment.len());
        for entry in &self.equipment {
            output.push_str(&entry.to_table());
            output.push('\n');
        }
        output
    }

    fn to_compact(&self) -> String {
        self.equipment
            .iter()
            .map(|e| e.to_compact())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Alert list for display
#[derive(Debug, Clone, Serialize)]
pub struct AlertList {
    pub alerts: Vec<Alert>,
    pub unacknowledged: usize,
}

impl AlertList {
    pub fn new(alerts: Vec<Alert>) -> Self {
        let unacknowledged = alerts.iter().filter(|a| !a.is_acknowledged()).count();
        Self {
            alerts,
            unacknowledged,
        }
    }
}

impl TableDisplay for AlertList {
    fn to_table(&self) -> String {
        if self.alerts.is_empty() {
            return "No alerts".to_string();
        }

        let mut output = format!(
            "Alerts: {} ({} unacknowledged)\n\n",
            self.alerts.len(),
            self.unacknowledged
        );
        for alert in &self.alerts {
            let mark = if alert.is_acknowledged() { "x" } else { " " };
            output.push_str(&format!(
                "[{}] {} {:<8} {} ({}): {} at {}\n",
                mark,
                alert.id,
                alert.severity,
                alert.equipment_name,
                alert.equipment_id,
                alert.message,
                alert.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }
        output
    }

    fn to_compact(&self) -> String {
        self.alerts
            .iter()
            .map(|a| format!("{}:{}:{}", a.id, a.severity, a.state()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Generated samples for display
#[derive(Debug, Clone, Serialize)]
pub struct SampleList {
    pub samples: Vec<SensorSample>,
    pub summary: Option<WindowSummary>,
}

impl SampleList {
    pub fn new(samples: Vec<SensorSample>) -> Self {
        let summary = crate::sampling::window::summarize(&samples);
        Self { samples, summary }
    }
}

impl TableDisplay for SampleList {
    fn to_table(&self) -> String {
        let mut output = String::new();
        for sample in &self.samples {
            output.push_str(&format!(
                "{} {} {}\n",
                sample.id(),
                sample.equipment_id(),
                sample.readings()
            ));
        }
        if let Some(summary) = &self.summary {
            if summary.count > 1 {
                output.push_str(&format!(
                    "\nMean of {}: {}\nMin: {}\nMax: {}\n",
                    summary.count, summary.mean, summary.min, summary.max
                ));
            }
        }
        output
    }

    fn to_compact(&self) -> String {
        self.samples
            .iter()
            .map(|s| format!("{:.1}/{:.2}/{:.1}", s.temperature(), s.vibration(), s.current()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Risk assessment for display
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    pub equipment_name: String,
    pub assessment: RiskAssessment,
    /// Samples the window held when scored
    pub samples: usize,
    /// Notice raised by this assessment, if any
    pub notice: Option<String>,
}

impl TableDisplay for AssessmentReport {
    fn to_table(&self) -> String {
        let a = &self.assessment;
        let mut output = format!(
            "Equipment: {} ({})\nRisk Score: {}\nPrediction: {}\nFactors: {}\nSamples: {}\nAssessed: {}\n",
            self.equipment_name,
            a.equipment_id(),
            a.risk_score(),
            a.prediction(),
            a.factors(),
            self.samples,
            a.timestamp().format("%Y-%m-%d %H:%M:%S UTC")
        );
        if let Some(notice) = &self.notice {
            output.push_str(&format!("\n!! {}\n", notice));
        }
        output
    }

    fn to_compact(&self) -> String {
        format!(
            "{}:{}:{}",
            self.assessment.equipment_id(),
            self.assessment.risk_score().value(),
            self.assessment.prediction()
        )
    }
}

/// Monitor run summary for display
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorReport {
    pub equipment_id: String,
    pub stats: MonitorStats,
    pub assessment: Option<RiskAssessment>,
}

impl TableDisplay for MonitorReport {
    fn to_table(&self) -> String {
        let s = &self.stats;
        let mut output = format!(
            "Monitored {}: {} samples ({} submitted, {} failed, {} discarded), {} classifications\n",
            self.equipment_id, s.samples, s.submitted, s.failed, s.discarded, s.classifications
        );
        if s.skipped > 0 {
            output.push_str(&format!(
                "{} samples not submitted while the sink was backed up\n",
                s.skipped
            ));
        }
        if let Some(a) = &self.assessment {
            output.push_str(&format!(
                "Last assessment: {} [{}]\n",
                a.risk_score(),
                a.prediction()
            ));
        }
        output
    }

    fn to_compact(&self) -> String {
        format!("{}:{}", self.equipment_id, self.stats.samples)
    }
}

impl TableDisplay for Config {
    fn to_table(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_else(|e| format!("<unprintable config: {}>", e))
    }

    fn to_compact(&self) -> String {
        format!(
            "interval={}ms window={} mode={} notify>{}",
            self.monitoring.sample_interval_ms,
            self.monitoring.window_capacity,
            self.risk.mode,
            self.alerts.notify_threshold
        )
    }
}
