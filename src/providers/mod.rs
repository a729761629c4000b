//! Collaborator abstraction layer
//!
//! Equipment catalog, seed alert source and telemetry sink, each with an
//! in-memory and a file-backed implementation.

pub mod file;
pub mod memory;
pub mod traits;

pub use file::{CatalogDocument, FileCatalog, JsonLinesSink};
pub use memory::{
    demo_alerts, demo_equipment, InMemoryCatalog, InMemoryTelemetrySink, LogTelemetrySink,
    DEFAULT_SIMULATED_LATENCY,
};
pub use traits::{AlertSource, EquipmentCatalog, SubmitReceipt, TelemetrySink};
