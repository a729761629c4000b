//! Monitor command implementation
//!
//! Samples one piece of equipment at the configured interval, classifying
//! periodically, until the duration elapses or Ctrl+C is pressed.

use super::session_for;
use crate::alerts::{LogNotifier, NotificationManager, TerminalNotifier};
use crate::cli::args::{MonitorArgs, OutputFormat};
use crate::cli::output::{print_output, MonitorReport};
use crate::config::Config;
use crate::error::Result;
use crate::providers::{JsonLinesSink, LogTelemetrySink, TelemetrySink};
use crate::services::{MonitorConfig, SessionController};

use std::sync::Arc;
use std::time::Duration;

/// Execute the monitor command
pub fn run_monitor(args: &MonitorArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(monitor(args, config, format))
}

async fn monitor(args: &MonitorArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let mut notifications = NotificationManager::new();
    notifications.add_notifier(Box::new(TerminalNotifier::new()));
    notifications.add_notifier(Box::new(LogNotifier));

    let session = session_for(config, args.equipment.as_deref())?
        .with_notifications(notifications)
        .into_shared();

    let sink: Arc<dyn TelemetrySink> = match &config.data.telemetry_path {
        Some(path) => Arc::new(JsonLinesSink::open(path)?),
        None => Arc::new(LogTelemetrySink::new(config.data.simulated_latency())),
    };

    let monitor_config = MonitorConfig {
        interval: config.monitoring.sample_interval(),
        classify_every: Some(args.classify_every).filter(|n| *n > 0),
        ..MonitorConfig::default()
    };
    let mut controller = SessionController::new(session, sink, monitor_config);
    controller.start_monitoring().await?;

    let equipment_id = crate::services::read_session(controller.session())
        .selected_equipment()
        .map(|eq| eq.id.clone())
        .unwrap_or_default();

    if format == OutputFormat::Table {
        eprintln!(
            "Monitoring {} every {:?}. Press Ctrl+C to stop.",
            equipment_id,
            config.monitoring.sample_interval()
        );
    }

    let deadline = async {
        match args.duration {
            Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                log::warn!("Failed to listen for Ctrl+C: {}", e);
            }
            log::info!("Interrupted");
        }
        _ = deadline => log::info!("Monitoring duration elapsed"),
    }

    let stats = controller.stop_monitoring().await.unwrap_or_default();
    let report = MonitorReport {
        equipment_id,
        stats,
        assessment: controller.current_assessment(),
    };

    print_output(&report, format)?;
    Ok(())
}
