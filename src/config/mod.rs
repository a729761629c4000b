//! Configuration system
//!
//! Handles TOML config file parsing and CLI argument merging.

pub mod builder;
pub mod file;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;

use crate::alerts::{AlertManagerConfig, NotificationPolicy, DEFAULT_NOTIFY_THRESHOLD};
use crate::domain::{RiskScore, RiskThresholds, SensorReadings};
use crate::error::ConfigError;
use crate::risk::{FactorWeight, RiskPolicy, ScoringMode};
use crate::sampling::{SamplingProfile, DEFAULT_WINDOW_CAPACITY};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// Live monitoring settings
    pub monitoring: MonitoringConfig,
    /// Synthetic sample settings
    pub sampling: SamplingConfig,
    /// Risk scoring policy
    pub risk: RiskConfig,
    /// Alert and notification settings
    pub alerts: AlertsConfig,
    /// Collaborator settings
    pub data: DataConfig,
}

impl Config {
    /// Reject values the core cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.monitoring.window_capacity == 0 {
            return Err(ConfigError::invalid(
                "monitoring.window_capacity",
                "must be at least 1",
            ));
        }
        if self.monitoring.sample_interval_ms == 0 {
            return Err(ConfigError::invalid(
                "monitoring.sample_interval_ms",
                "must be greater than 0",
            ));
        }
        if self.alerts.notify_threshold > 100 {
            return Err(ConfigError::invalid(
                "alerts.notify_threshold",
                format!("{} exceeds 100", self.alerts.notify_threshold),
            ));
        }
        self.risk
            .to_policy()
            .validate()
            .map_err(|e| ConfigError::invalid("risk", e.to_string()))?;
        Ok(())
    }
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,
    /// Seed for reproducible noise
    pub seed: Option<u64>,
}

impl GeneralConfig {
    /// Default log level when RUST_LOG is unset
    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        }
    }
}

/// Live monitoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    /// Interval between samples in milliseconds
    pub sample_interval_ms: u64,
    /// Number of samples kept for classification
    pub window_capacity: usize,
    /// Equipment selected when a session starts
    pub default_equipment: Option<String>,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: 1000,
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            default_equipment: Some("EQ001".to_string()),
        }
    }
}

impl MonitoringConfig {
    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }
}

/// Synthetic sample configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Centre values (°F, Hz, A)
    pub baseline: SensorReadings,
    /// Full width of the uniform noise around each baseline
    pub range: SensorReadings,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        let profile = SamplingProfile::default();
        Self {
            baseline: profile.baseline,
            range: profile.range,
        }
    }
}

impl SamplingConfig {
    pub fn to_profile(&self) -> SamplingProfile {
        SamplingProfile {
            baseline: self.baseline,
            range: self.range,
        }
    }
}

/// Risk scoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub temperature: FactorWeight,
    pub vibration: FactorWeight,
    pub current: FactorWeight,
    pub noise_max: f64,
    pub thresholds: RiskThresholds,
    pub mode: ScoringMode,
}

impl Default for RiskConfig {
    fn default() -> Self {
        let policy = RiskPolicy::default();
        Self {
            temperature: policy.temperature,
            vibration: policy.vibration,
            current: policy.current,
            noise_max: policy.noise_max,
            thresholds: policy.thresholds,
            mode: policy.mode,
        }
    }
}

impl RiskConfig {
    pub fn to_policy(&self) -> RiskPolicy {
        RiskPolicy {
            temperature: self.temperature,
            vibration: self.vibration,
            current: self.current,
            noise_max: self.noise_max,
            thresholds: self.thresholds,
            mode: self.mode,
        }
    }
}

/// Alert configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertsConfig {
    /// Scores strictly above this raise a high-risk notice
    pub notify_threshold: u8,
    /// Also record a persistent alert for each notice
    pub materialize_high_risk: bool,
    /// Fail acknowledgements of unknown alert ids instead of ignoring them
    pub strict_acknowledge: bool,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            notify_threshold: DEFAULT_NOTIFY_THRESHOLD,
            materialize_high_risk: false,
            strict_acknowledge: false,
        }
    }
}

impl AlertsConfig {
    pub fn to_policy(&self) -> NotificationPolicy {
        NotificationPolicy::new(RiskScore::new(self.notify_threshold))
    }

    pub fn to_manager_config(&self) -> AlertManagerConfig {
        AlertManagerConfig {
            materialize_high_risk: self.materialize_high_risk,
        }
    }
}

/// Collaborator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// TOML catalog file; the built-in demo fleet is used when unset
    pub catalog_path: Option<String>,
    /// JSON-lines telemetry file; samples are only logged when unset
    pub telemetry_path: Option<String>,
    /// Artificial round-trip of the in-memory collaborators in milliseconds
    pub simulated_latency_ms: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            telemetry_path: None,
            simulated_latency_ms: 100,
        }
    }
}

impl DataConfig {
    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.monitoring.sample_interval(), Duration::from_secs(1));
        assert_eq!(config.monitoring.window_capacity, 50);
        assert_eq!(config.alerts.notify_threshold, 70);
        assert!(!config.alerts.materialize_high_risk);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_verbose_raises_log_level() {
        let mut general = GeneralConfig::default();
        assert_eq!(general.log_level(), log::LevelFilter::Warn);
        general.verbose = true;
        assert_eq!(general.log_level(), log::LevelFilter::Debug);

        let config: Config = toml::from_str("[general]\nverbose = true\n").unwrap();
        assert_eq!(config.general.log_level(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_default_policy_matches_reference_formula() {
        assert_eq!(Config::default().risk.to_policy(), RiskPolicy::default());
    }

    #[test]
    fn test_partial_toml() {
        let config: Config = toml::from_str(
            r#"
[monitoring]
window_capacity = 10

[risk]
noise_max = 0.0
mode = "window_mean"

[risk.thresholds]
critical = 90
"#,
        )
        .unwrap();

        assert_eq!(config.monitoring.window_capacity, 10);
        assert_eq!(config.monitoring.sample_interval_ms, 1000);
        assert_eq!(config.risk.noise_max, 0.0);
        assert_eq!(config.risk.mode, ScoringMode::WindowMean);
        assert_eq!(config.risk.thresholds.medium, 25);
        assert_eq!(config.risk.thresholds.critical, 90);
        assert_eq!(config.risk.temperature, FactorWeight::new(70.0, 2.0));
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let mut config = Config::default();
        config.monitoring.window_capacity = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_thresholds() {
        let mut config = Config::default();
        config.risk.thresholds.high = 20;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let mut config = Config::default();
        config.monitoring.sample_interval_ms = 0;
        assert!(config.validate().is_err());
    }
}
