/*!
 * Simulation Statistics
 * Running averages of turnaround time and memory utilization
 */

use crate::memory::MemoryInfo;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Running (sum, count) accumulator
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Accumulator {
    sum: f64,
    count: u64,
}

impl Accumulator {
    pub fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    /// Mean of all samples, zero when there are none
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

/// Statistics updated by the dispatcher under the memory lock
#[derive(Debug, Clone, Default)]
pub struct Stats {
    turnaround_ms: Accumulator,
    utilization_percent: Accumulator,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the wait between arrival and allocation
    pub fn record_turnaround(&mut self, waited: Duration) {
        self.turnaround_ms.add(waited.as_secs_f64() * 1000.0);
    }

    /// Sample the current utilization of `memory`
    pub fn sample_utilization(&mut self, memory: &impl MemoryInfo) {
        self.utilization_percent.add(memory.utilization_percent());
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            avg_turnaround_ms: self.turnaround_ms.average(),
            avg_utilization_percent: self.utilization_percent.average(),
            turnaround_samples: self.turnaround_ms.count(),
            utilization_samples: self.utilization_percent.count(),
        }
    }
}

/// Read-only view of the running averages
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub avg_turnaround_ms: f64,
    pub avg_utilization_percent: f64,
    pub turnaround_samples: u64,
    pub utilization_samples: u64,
}
