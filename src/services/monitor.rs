//! Periodic sampling monitor
//!
//! Drives a [`MonitoringSession`](super::MonitoringSession) at a fixed
//! interval: each tick generates and appends one sample, then hands it to the
//! telemetry sink on the blocking pool. Runs until its cancellation token fires.

use super::session::{read_session, write_session, SharedSession};
use crate::domain::SensorSample;
use crate::providers::{SubmitReceipt, TelemetrySink};

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Default cap on sink submissions awaiting a result
pub const DEFAULT_MAX_IN_FLIGHT: usize = 8;

/// Configuration for the monitor
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Interval between samples
    pub interval: Duration,
    /// Classify the window after every N samples
    pub classify_every: Option<u32>,
    /// Samples are not submitted while this many submissions are pending
    pub max_in_flight: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            classify_every: None,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }
}

/// Counters for one monitor run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonitorStats {
    /// Timer ticks observed
    pub ticks: u64,
    /// Samples appended to the window
    pub samples: u64,
    /// Samples the sink accepted
    pub submitted: u64,
    /// Samples the sink rejected
    pub failed: u64,
    /// Sink results that arrived after the run they belonged to ended
    pub discarded: u64,
    /// Samples not submitted because the sink was backed up
    pub skipped: u64,
    /// Classifications run
    pub classifications: u64,
}

/// How one submission ended
enum Submission {
    Accepted(SubmitReceipt),
    Rejected(String),
    Stale,
}

/// Periodic sampling monitor
pub struct Monitor {
    config: MonitorConfig,
    sink: Arc<dyn TelemetrySink>,
}

impl Monitor {
    /// Create a new monitor submitting samples to `sink`
    pub fn new(config: MonitorConfig, sink: Arc<dyn TelemetrySink>) -> Self {
        Self { config, sink }
    }

    /// Get the monitor configuration
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Run the monitor on the current runtime
    pub fn spawn(
        self,
        session: SharedSession,
        cancel: CancellationToken,
    ) -> JoinHandle<MonitorStats> {
        tokio::spawn(async move { self.run(session, cancel).await })
    }

    /// Run the sampling loop until `cancel` fires
    ///
    /// The first sample is taken one interval after the call. Submissions
    /// still in flight at cancellation are awaited before returning.
    pub async fn run(&self, session: SharedSession, cancel: CancellationToken) -> MonitorStats {
        let period = self.config.interval;
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut stats = MonitorStats::default();
        let mut in_flight: JoinSet<Submission> = JoinSet::new();

        log::info!(
            "Monitor started ({:?} interval, sink {})",
            period,
            self.sink.name()
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    log::info!("Monitor stopping after {} samples", stats.samples);
                    break;
                }
                Some(result) = in_flight.join_next(), if !in_flight.is_empty() => {
                    record(&mut stats, result);
                }
                _ = interval.tick() => {
                    stats.ticks += 1;
                    self.on_tick(&session, &mut stats, &mut in_flight);
                }
            }
        }

        while let Some(result) = in_flight.join_next().await {
            record(&mut stats, result);
        }

        stats
    }

    fn on_tick(
        &self,
        session: &SharedSession,
        stats: &mut MonitorStats,
        in_flight: &mut JoinSet<Submission>,
    ) {
        let outcome = write_session(session).tick();
        let Some(outcome) = outcome else {
            log::debug!("Tick skipped: session is not monitoring");
            return;
        };
        stats.samples += 1;

        if in_flight.len() >= self.config.max_in_flight {
            stats.skipped += 1;
            log::warn!(
                "Sink {} has {} submissions pending, not submitting {}",
                self.sink.name(),
                in_flight.len(),
                outcome.sample.id()
            );
        } else {
            let sink = Arc::clone(&self.sink);
            let shared = Arc::clone(session);
            in_flight.spawn_blocking(move || {
                submit(sink.as_ref(), &shared, &outcome.sample, outcome.epoch)
            });
        }

        let Some(every) = self.config.classify_every.filter(|n| *n > 0) else {
            return;
        };
        if stats.samples % u64::from(every) == 0 {
            let classified = write_session(session).classify_window();
            match classified {
                Ok((assessment, pending)) => {
                    stats.classifications += 1;
                    log::debug!(
                        "{}: {} [{}]",
                        assessment.equipment_id(),
                        assessment.risk_score(),
                        assessment.prediction()
                    );
                    if let Some(pending) = pending {
                        tokio::task::spawn_blocking(move || pending.dispatch());
                    }
                }
                Err(e) => log::warn!("Classification failed: {}", e),
            }
        }
    }
}

/// Submit one sample, then check whether its run is still current
fn submit(
    sink: &dyn TelemetrySink,
    session: &SharedSession,
    sample: &SensorSample,
    epoch: u64,
) -> Submission {
    let result = sink.submit(sample);

    if !read_session(session).accepts(epoch) {
        log::debug!(
            "Discarding {} result for {} from epoch {}",
            sink.name(),
            sample.id(),
            epoch
        );
        return Submission::Stale;
    }

    match result {
        Ok(receipt) => Submission::Accepted(receipt),
        Err(e) => Submission::Rejected(e.to_string()),
    }
}

fn record(stats: &mut MonitorStats, result: Result<Submission, tokio::task::JoinError>) {
    match result {
        Ok(Submission::Accepted(receipt)) => {
            stats.submitted += 1;
            log::debug!("Sample {} accepted by {}", receipt.sample_id, receipt.sink);
        }
        Ok(Submission::Rejected(reason)) => {
            stats.failed += 1;
            log::warn!("Telemetry submission failed: {}", reason);
        }
        Ok(Submission::Stale) => stats.discarded += 1,
        Err(e) => {
            stats.failed += 1;
            log::warn!("Telemetry submission task failed: {}", e);
        }
    }
}
