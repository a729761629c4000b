//! Service layer for monitoring sessions
//!
//! Services own the session state, drive periodic sampling and expose the
//! operator actions.

pub mod controller;
pub mod monitor;
pub mod session;

pub use controller::SessionController;
pub use monitor::{Monitor, MonitorConfig, MonitorStats};
pub use session::{
    classify_shared, read_session, write_session, LoadReport, MonitoringSession, PendingNotice,
    SharedSession, TickOutcome,
};
