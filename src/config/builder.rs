//! Configuration builder
//!
//! Merges configuration from files and CLI arguments.

use crate::config::{Config, ConfigFile};
use crate::error::ConfigError;

/// Builder for merging configuration sources
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Load configuration from a file
    ///
    /// An explicit path must load; without one the default locations are
    /// tried and silently skipped when absent.
    pub fn with_file(mut self, path: Option<&str>) -> Result<Self, ConfigError> {
        let file_config = match path {
            Some(path) => Some(ConfigFile::load(path)?),
            None => ConfigFile::load_default(),
        };

        if let Some(cfg) = file_config {
            self.config = cfg;
        }

        Ok(self)
    }

    /// Override with CLI verbose flag
    pub fn with_verbose(mut self, verbose: Option<bool>) -> Self {
        if let Some(v) = verbose {
            self.config.general.verbose = v;
        }
        self
    }

    /// Override with CLI noise seed
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if let Some(s) = seed {
            self.config.general.seed = Some(s);
        }
        self
    }

    /// Override with CLI sample interval
    pub fn with_interval_ms(mut self, interval: Option<u64>) -> Self {
        if let Some(i) = interval {
            self.config.monitoring.sample_interval_ms = i;
        }
        self
    }

    /// Override with CLI equipment selection
    pub fn with_equipment(mut self, equipment: Option<String>) -> Self {
        if let Some(e) = equipment {
            self.config.monitoring.default_equipment = Some(e);
        }
        self
    }

    /// Override with CLI catalog file
    pub fn with_catalog(mut self, path: Option<String>) -> Self {
        if let Some(p) = path {
            self.config.data.catalog_path = Some(p);
        }
        self
    }

    /// Override with CLI telemetry file
    pub fn with_telemetry(mut self, path: Option<String>) -> Self {
        if let Some(p) = path {
            self.config.data.telemetry_path = Some(p);
        }
        self
    }

    /// Build and validate the final configuration
    pub fn build(self) -> Result<Config, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
