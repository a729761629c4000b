//! Rolling sample window
//!
//! Bounded FIFO history of the most recent samples for the active equipment.

use crate::domain::{SensorReadings, SensorSample};
use crate::error::DomainError;
use serde::Serialize;
use std::collections::VecDeque;

/// Default number of samples retained
pub const DEFAULT_WINDOW_CAPACITY: usize = 50;

/// State of the window after a mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowState {
    /// Samples currently held
    pub len: usize,
    /// Maximum samples held
    pub capacity: usize,
    /// Samples dropped from the front by this call
    pub evicted: usize,
}

/// Per-metric aggregate over the window
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindowSummary {
    pub count: usize,
    pub mean: SensorReadings,
    pub min: SensorReadings,
    pub max: SensorReadings,
}

/// Bounded FIFO of sensor samples
#[derive(Debug, Clone)]
pub struct RollingWindow {
    samples: VecDeque<SensorSample>,
    capacity: usize,
}

impl RollingWindow {
    /// Create an empty window holding at most `capacity` samples
    pub fn new(capacity: usize) -> Result<Self, DomainError> {
        if capacity == 0 {
            return Err(DomainError::InvalidCapacity(capacity));
        }
        Ok(Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Append a sample, evicting the oldest ones past capacity
    pub fn append(&mut self, sample: SensorSample) -> WindowState {
        self.samples.push_back(sample);

        let mut evicted = 0;
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
            evicted += 1;
        }

        self.state(evicted)
    }

    /// Drop every sample
    pub fn reset(&mut self) -> WindowState {
        let evicted = self.samples.len();
        self.samples.clear();
        self.state(evicted)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recently appended sample
    pub fn latest(&self) -> Option<&SensorSample> {
        self.samples.back()
    }

    /// Samples in arrival order
    pub fn iter(&self) -> impl Iterator<Item = &SensorSample> {
        self.samples.iter()
    }

    /// Owned copy of the samples in arrival order
    pub fn snapshot(&self) -> Vec<SensorSample> {
        self.samples.iter().cloned().collect()
    }

    /// Mean, min and max per metric, or `None` when empty
    pub fn summary(&self) -> Option<WindowSummary> {
        summarize(self.samples.iter())
    }

    fn state(&self, evicted: usize) -> WindowState {
        WindowState {
            len: self.samples.len(),
            capacity: self.capacity,
            evicted,
        }
    }
}

impl Default for RollingWindow {
    fn default() -> Self {
        Self {
            samples: VecDeque::with_capacity(DEFAULT_WINDOW_CAPACITY),
            capacity: DEFAULT_WINDOW_CAPACITY,
        }
    }
}

/// Aggregate any run of samples
pub fn summarize<'a>(samples: impl IntoIterator<Item = &'a SensorSample>) -> Option<WindowSummary> {
    let mut iter = samples.into_iter();
    let first = iter.next()?.readings();

    let mut count = 1usize;
    let mut sum = first;
    let mut min = first;
    let mut max = first;

    for sample in iter {
        let r = sample.readings();
        count += 1;
        sum.temperature += r.temperature;
        sum.vibration += r.vibration;
        sum.current += r.current;
        min.temperature = min.temperature.min(r.temperature);
        min.vibration = min.vibration.min(r.vibration);
        min.current = min.current.min(r.current);
        max.temperature = max.temperature.max(r.temperature);
        max.vibration = max.vibration.max(r.vibration);
        max.current = max.current.max(r.current);
    }

    let n = count as f64;
    Some(WindowSummary {
        count,
        mean: SensorReadings::new(sum.temperature / n, sum.vibration / n, sum.current / n),
        min,
        max,
    })
}
