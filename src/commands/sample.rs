//! Sample command implementation
//!
//! Generates synthetic sensor samples for one piece of equipment.

use super::session_for;
use crate::cli::args::{OutputFormat, SampleArgs};
use crate::cli::output::{print_output, SampleList};
use crate::config::Config;
use crate::error::Result;

/// Execute the sample command
pub fn run_sample(args: &SampleArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let mut session = session_for(config, args.equipment.as_deref())?;
    session.start_monitoring()?;

    let samples = (0..args.count)
        .filter_map(|_| session.tick().map(|outcome| outcome.sample))
        .collect();
    session.stop_monitoring();

    print_output(&SampleList::new(samples), format)?;
    Ok(())
}
