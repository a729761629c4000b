//! Config command implementation
//!
//! Prints the effective configuration after merging file and CLI sources.

use crate::cli::args::OutputFormat;
use crate::cli::output::print_output;
use crate::config::Config;
use crate::error::Result;

/// Execute the config command
pub fn run_config(config: &Config, format: OutputFormat) -> Result<()> {
    print_output(config, format)?;
    Ok(())
}
