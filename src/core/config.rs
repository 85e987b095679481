/*!
 * Simulation Configuration
 * Parsing and validation of the eight start-up integers
 */

use super::errors::ConfigError;
use super::limits::DEFAULT_TICK;
use super::types::{ConfigResult, Size};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Input order of the configuration record
const FIELD_NAMES: [&str; 8] = [
    "total_memory",
    "reserved_memory",
    "spawn_rate_seed",
    "mean_process_size",
    "mean_process_duration",
    "simulation_minutes",
    "queue_capacity",
    "placement_strategy",
];

/// Placement policy used by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementStrategy {
    FirstFit,
    BestFit,
    NextFit,
}

impl PlacementStrategy {
    /// Map the numeric selector (`0`, `1`, `2`) to a strategy
    pub fn from_selector(selector: i64) -> Option<Self> {
        match selector {
            0 => Some(PlacementStrategy::FirstFit),
            1 => Some(PlacementStrategy::BestFit),
            2 => Some(PlacementStrategy::NextFit),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PlacementStrategy::FirstFit => "First fit",
            PlacementStrategy::BestFit => "Best fit",
            PlacementStrategy::NextFit => "Next fit",
        }
    }
}

impl fmt::Display for PlacementStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Validated simulation configuration
///
/// Sizes are in MB, durations in seconds unless stated otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Total main memory (p)
    pub total_memory: Size,
    /// Memory reserved for the OS (q)
    pub reserved_memory: Size,
    /// Spawn-rate seed parameter (n)
    pub spawn_rate_seed: u64,
    /// Mean process size (m)
    pub mean_process_size: Size,
    /// Mean process duration in seconds (t)
    pub mean_process_duration: u64,
    /// Simulation length in minutes (T)
    pub simulation_minutes: u64,
    pub queue_capacity: usize,
    pub strategy: PlacementStrategy,
    /// Generator and dispatcher polling interval
    #[serde(skip, default = "default_tick")]
    pub tick: Duration,
}

fn default_tick() -> Duration {
    DEFAULT_TICK
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            total_memory: 1000,
            reserved_memory: 200,
            spawn_rate_seed: 10,
            mean_process_size: 10,
            mean_process_duration: 10,
            simulation_minutes: 2,
            queue_capacity: 10,
            strategy: PlacementStrategy::FirstFit,
            tick: DEFAULT_TICK,
        }
    }
}

impl SimulationConfig {
    /// Parse and validate a whitespace-separated record of eight integers
    ///
    /// Tokens after the eighth are ignored.
    pub fn parse(input: &str) -> ConfigResult<Self> {
        let mut tokens = input.split_whitespace();
        let mut raw = [0i64; 8];

        for (slot, field) in raw.iter_mut().zip(FIELD_NAMES) {
            let token = tokens.next().ok_or(ConfigError::MissingValue(field))?;
            *slot = token.parse().map_err(|_| ConfigError::NotAnInteger {
                field,
                value: token.to_string(),
            })?;
        }

        Self::from_raw(raw)
    }

    /// Validate raw integers in input order
    ///
    /// Every violated rule is reported, not only the first.
    pub fn from_raw(raw: [i64; 8]) -> ConfigResult<Self> {
        let [p, q, n, m, t, big_t, queue, algo] = raw;
        let mut violations = Vec::new();

        if p <= 0 || q < 0 || q >= p {
            violations.push(ConfigError::InvalidMemory {
                total: p,
                reserved: q,
            });
        }
        if n <= 0 || m <= 0 || t <= 0 || big_t <= 0 {
            violations.push(ConfigError::NonPositiveWorkload {
                rate: n,
                size: m,
                duration: t,
                simulation: big_t,
            });
        }
        if queue <= 0 {
            violations.push(ConfigError::InvalidQueueCapacity(queue));
        }
        let strategy = PlacementStrategy::from_selector(algo);
        if strategy.is_none() {
            violations.push(ConfigError::UnknownStrategy(algo));
        }

        if let Some(err) = ConfigError::from_violations(violations) {
            return Err(err);
        }

        Ok(Self {
            total_memory: p as Size,
            reserved_memory: q as Size,
            spawn_rate_seed: n as u64,
            mean_process_size: m as Size,
            mean_process_duration: t as u64,
            simulation_minutes: big_t as u64,
            queue_capacity: queue as usize,
            strategy: strategy.unwrap_or(PlacementStrategy::FirstFit),
            tick: DEFAULT_TICK,
        })
    }

    /// Override the actor polling interval
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Memory available to processes (p - q)
    pub fn usable_memory(&self) -> Size {
        self.total_memory.saturating_sub(self.reserved_memory)
    }

    /// Wall-clock length of the run
    pub fn simulation_duration(&self) -> Duration {
        Duration::from_secs(self.simulation_minutes.saturating_mul(60))
    }
}
