//! Risk scoring
//!
//! Turns the latest readings into a 0-100 score and a severity band:
//! - Temperature above 70°F contributes 2 points per degree
//! - Vibration above 2 Hz contributes 20 points per Hz
//! - Current above 12 A contributes 5 points per amp
//! - Up to 20 points of uniform noise are added on top

pub mod classifier;
pub mod policy;

pub use classifier::{RiskClassifier, ScoreBreakdown};
pub use policy::{FactorWeight, RiskPolicy, ScoringMode};
