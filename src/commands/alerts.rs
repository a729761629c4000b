//! Alert command implementation
//!
//! Handles alert-related CLI commands.

use super::Catalog;
use crate::cli::args::{AlertsArgs, AlertsCommands, OutputFormat, SeverityArg};
use crate::cli::output::{print_output, AlertList};
use crate::config::Config;
use crate::domain::Severity;
use crate::alerts::Alert;
use crate::error::{AlertError, Result};
use crate::providers::FileCatalog;

/// Execute alert commands
pub fn run_alerts(args: &AlertsArgs, config: &Config, format: OutputFormat) -> Result<()> {
    match &args.command {
        AlertsCommands::List { all, severity } => run_alert_list(config, *all, *severity, format),
        AlertsCommands::Ack { alert_id } => run_alert_ack(config, alert_id, format),
    }
}

/// List alerts in catalog order
fn run_alert_list(
    config: &Config,
    all: bool,
    severity: Option<SeverityArg>,
    format: OutputFormat,
) -> Result<()> {
    let session = Catalog::open(config).load_session(config)?;
    let severity = severity.map(Severity::from);

    let alerts = session
        .alerts()
        .iter()
        .filter(|a| all || !a.is_acknowledged())
        .filter(|a| severity.map_or(true, |s| a.severity == s))
        .cloned()
        .collect();

    print_output(&AlertList::new(alerts), format)?;
    Ok(())
}

/// Acknowledge an alert
///
/// With a catalog file only the matching entry is flipped and written back;
/// the demo catalog only lives for this invocation.
fn run_alert_ack(config: &Config, alert_id: &str, format: OutputFormat) -> Result<()> {
    let alerts = match Catalog::open(config) {
        Catalog::File(file) => ack_in_file(&file, alert_id, config.alerts.strict_acknowledge)?,
        catalog @ Catalog::Demo(_) => {
            let mut session = catalog.load_session(config)?;
            let alerts = session.acknowledge_alert(alert_id)?.to_vec();
            if session.alert_manager().get(alert_id).is_none() {
                log::warn!("No alert with id {}", alert_id);
            }
            log::info!("Demo catalog: acknowledgement is not persisted");
            alerts
        }
    };

    print_output(&AlertList::new(alerts), format)?;
    Ok(())
}

/// Acknowledge `alert_id` in a catalog file, leaving every other entry as read
///
/// The file is only rewritten when the acknowledgement changed it.
fn ack_in_file(file: &FileCatalog, alert_id: &str, strict: bool) -> Result<Vec<Alert>> {
    let mut document = file.document()?;

    match document.alerts.iter_mut().find(|a| a.id == alert_id) {
        Some(alert) => {
            if alert.acknowledge() {
                document.save(file.path())?;
                log::info!("Saved acknowledgement to {}", file.path().display());
            } else {
                log::debug!("Alert {} was already acknowledged", alert_id);
            }
        }
        None if strict => return Err(AlertError::NotFound(alert_id.to_string()).into()),
        None => log::warn!("No alert with id {}", alert_id),
    }

    Ok(document.alerts)
}
