//! Alert lifecycle and notification system
//!
//! Alert records with one-way acknowledgement, plus threshold-based
//! high-risk notices dispatched to notification channels.

mod manager;
mod notifier;
mod types;

pub use manager::{AlertManager, AlertManagerConfig};
pub use notifier::{
    HighRiskNotice, LogNotifier, NotificationManager, NotificationPolicy, Notifier,
    TerminalNotifier, DEFAULT_NOTIFY_THRESHOLD,
};
pub use types::{Alert, AlertState};
