//! Classify command implementation
//!
//! Collects samples for one piece of equipment and scores its failure risk.

use super::session_for;
use crate::cli::args::{ClassifyArgs, OutputFormat};
use crate::cli::output::{print_output, AssessmentReport};
use crate::config::Config;
use crate::error::Result;

/// Execute the classify command
pub fn run_classify(args: &ClassifyArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let mut session = session_for(config, args.equipment.as_deref())?;
    session.start_monitoring()?;
    for _ in 0..args.samples {
        session.tick();
    }
    session.stop_monitoring();

    let assessment = session.run_classification()?;
    let equipment_name = session
        .selected_equipment()
        .map(|eq| eq.name.clone())
        .unwrap_or_else(|| assessment.equipment_id().to_string());

    let report = AssessmentReport {
        equipment_name,
        samples: session.window().len(),
        notice: session.notice().map(|n| n.message()),
        assessment,
    };

    print_output(&report, format)?;
    Ok(())
}
