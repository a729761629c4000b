//! Sample generation and retention
//!
//! Synthetic readings, the injectable noise they are drawn from, and the
//! rolling window that keeps the most recent ones.

pub mod generator;
pub mod noise;
pub mod window;

pub(crate) use generator::random_suffix;
pub use generator::{SampleGenerator, SamplingProfile};
pub use noise::{FixedNoise, NoiseSource, RngNoise, ScriptedNoise};
pub use window::{RollingWindow, WindowState, WindowSummary, DEFAULT_WINDOW_CAPACITY};
