//! Equipment command implementation
//!
//! Lists the catalogued equipment.

use super::Catalog;
use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, EquipmentEntry, EquipmentList};
use crate::config::Config;
use crate::error::Result;
use crate::providers::EquipmentCatalog;

/// Execute the equipment command
pub fn run_equipment(config: &Config, format: OutputFormat) -> Result<()> {
    let catalog = Catalog::open(config);
    let equipment = catalog.list_equipment()?;

    let thresholds = config.risk.thresholds;
    let list = EquipmentList {
        equipment: equipment
            .iter()
            .map(|eq| EquipmentEntry::new(eq, &thresholds))
            .collect(),
    };

    print_output(&list, format)?;

    Ok(())
}
