//! maintctl - equipment risk monitoring library
//!
//! This library samples synthetic equipment telemetry, scores failure risk
//! from a rolling window of readings and manages the alert lifecycle for
//! predictive maintenance.
//!
//! # Modules
//!
//! - [`alerts`]: Alert records, lifecycle manager and high-risk notifications
//! - [`cli`]: Command-line interface definitions
//! - [`commands`]: Command handlers
//! - [`config`]: Configuration system
//! - [`domain`]: Domain models with validation
//! - [`error`]: Error types
//! - [`providers`]: Equipment catalog, alert source and telemetry sink collaborators
//! - [`risk`]: Risk scoring policy and classifier
//! - [`sampling`]: Sample generation, injectable noise and the rolling window
//! - [`services`]: Monitoring session, periodic monitor and controller

pub mod alerts;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod providers;
pub mod risk;
pub mod sampling;
pub mod services;

#[cfg(test)]
pub mod mock;

pub use error::{AppError, Result};
