//! Unified error types for maintctl
//!
//! This module defines all error types used throughout the application.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from risk classification
    #[error("Risk classification error: {0}")]
    Risk(#[from] RiskError),

    /// Error from the alert lifecycle
    #[error("Alert error: {0}")]
    Alert(#[from] AlertError),

    /// Error from an external collaborator (catalog, alert source, telemetry sink)
    #[error("Collaborator error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from configuration parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from domain type validation
    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),

    /// Equipment not found in the catalog
    #[error("Equipment not found: {0}")]
    EquipmentNotFound(String),

    /// No equipment selected for monitoring
    #[error("No equipment selected")]
    NoEquipmentSelected,

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the risk classifier
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RiskError {
    /// Classifier was handed nothing to score
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Errors from the alert lifecycle manager
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlertError {
    /// No alert with this id exists in the session
    #[error("Alert not found: {0}")]
    NotFound(String),

    /// Alert references equipment missing from the catalog
    #[error("Alert {alert_id} references unknown equipment {equipment_id}")]
    UnknownEquipment {
        alert_id: String,
        equipment_id: String,
    },

    /// An alert with this id is already tracked
    #[error("Duplicate alert id: {0}")]
    Duplicate(String),
}

/// Errors from external collaborators
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Collaborator could not serve the request
    #[error("{collaborator} unavailable: {reason}")]
    Unavailable {
        collaborator: &'static str,
        reason: String,
    },

    /// Collaborator returned data that could not be decoded
    #[error("Failed to decode {collaborator} data: {reason}")]
    Decode {
        collaborator: &'static str,
        reason: String,
    },

    /// IO error while talking to a file-backed collaborator
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProviderError {
    /// Shorthand for an unavailable collaborator
    pub fn unavailable(collaborator: &'static str, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            collaborator,
            reason: reason.into(),
        }
    }
}

/// Errors from domain type validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Equipment identifiers must not be empty
    #[error("Equipment id must not be empty")]
    EmptyEquipmentId,

    /// Risk score outside 0-100
    #[error("Invalid risk score: {0} (must be 0-100)")]
    InvalidRiskScore(u32),

    /// Unknown severity label
    #[error("Unknown severity: {0}")]
    UnknownSeverity(String),

    /// Unknown equipment status label
    #[error("Unknown equipment status: {0}")]
    UnknownStatus(String),

    /// Rolling window capacity must be at least one sample
    #[error("Invalid window capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),

    /// Invalid value provided
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Errors from configuration parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Invalid config value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl ConfigError {
    /// Shorthand for an invalid value
    pub fn invalid(key: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
