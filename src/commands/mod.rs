//! Command handlers
//!
//! Each command handler orchestrates the execution of a CLI command.

pub mod alerts;
pub mod classify;
pub mod config;
pub mod equipment;
pub mod monitor;
pub mod sample;

pub use alerts::run_alerts;
pub use classify::run_classify;
pub use config::run_config;
pub use equipment::run_equipment;
pub use monitor::run_monitor;
pub use sample::run_sample;

use crate::alerts::Alert;
use crate::cli::args::{Cli, Commands};
use crate::config::{Config, ConfigBuilder};
use crate::domain::Equipment;
use crate::error::{ProviderError, Result};
use crate::providers::{AlertSource, EquipmentCatalog, FileCatalog, InMemoryCatalog};
use crate::services::MonitoringSession;

/// Merge the config file with global and per-command CLI overrides
pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut builder = ConfigBuilder::new()
        .with_file(cli.config.as_deref())?
        .with_verbose(cli.verbose.then_some(true))
        .with_seed(cli.seed)
        .with_catalog(cli.catalog.clone());

    builder = match &cli.command {
        Commands::Sample(args) => builder.with_equipment(args.equipment.clone()),
        Commands::Classify(args) => builder.with_equipment(args.equipment.clone()),
        Commands::Monitor(args) => builder
            .with_equipment(args.equipment.clone())
            .with_interval_ms(args.interval)
            .with_telemetry(args.telemetry.clone()),
        _ => builder,
    };

    Ok(builder.build()?)
}

/// Catalog backend selected by configuration
pub enum Catalog {
    Demo(InMemoryCatalog),
    File(FileCatalog),
}

impl Catalog {
    /// Open the configured catalog, falling back to the demo fleet
    pub fn open(config: &Config) -> Self {
        match &config.data.catalog_path {
            Some(path) => {
                log::debug!("Using catalog file {}", path);
                Self::File(FileCatalog::new(path))
            }
            None => {
                let latency = config.data.simulated_latency();
                Self::Demo(InMemoryCatalog::demo().with_latency(latency))
            }
        }
    }

    /// Build a session populated from this catalog
    pub fn load_session(&self, config: &Config) -> Result<MonitoringSession> {
        MonitoringSession::load(config, self, self)
    }
}

impl EquipmentCatalog for Catalog {
    fn list_equipment(&self) -> std::result::Result<Vec<Equipment>, ProviderError> {
        match self {
            Self::Demo(c) => c.list_equipment(),
            Self::File(c) => c.list_equipment(),
        }
    }
}

impl AlertSource for Catalog {
    fn list_alerts(&self) -> std::result::Result<Vec<Alert>, ProviderError> {
        match self {
            Self::Demo(c) => c.list_alerts(),
            Self::File(c) => c.list_alerts(),
        }
    }
}

/// Build a session with `equipment_id` selected, or the configured default
fn session_for(config: &Config, equipment_id: Option<&str>) -> Result<MonitoringSession> {
    let mut session = Catalog::open(config).load_session(config)?;
    if let Some(id) = equipment_id {
        session.select_equipment(id)?;
    } else if session.selected_equipment().is_none() {
        return Err(crate::error::AppError::NoEquipmentSelected);
    }
    Ok(session)
}
