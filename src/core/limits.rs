/*!
 * System Limits and Constants
 *
 * Centralized location for simulation-wide tunables and magic numbers.
 * Organized by domain for maintainability and discoverability.
 */

use std::time::Duration;

// =============================================================================
// ACTOR TIMING
// =============================================================================

/// Generator and dispatcher polling interval (10ms)
pub const DEFAULT_TICK: Duration = Duration::from_millis(10);

// =============================================================================
// PROCESS GENERATION
// =============================================================================

/// Spawn rate is drawn once per run from [LOW * n, HIGH * n] processes/sec
pub const SPAWN_RATE_LOW_FACTOR: f64 = 0.1;
pub const SPAWN_RATE_HIGH_FACTOR: f64 = 1.2;

/// Fixed-point resolution of the spawn-rate draw (4 decimal digits)
pub const SPAWN_RATE_RESOLUTION: f64 = 1e4;

/// Bernoulli trials are drawn from [0, SPAWN_TRIAL_RANGE] per tick
pub const SPAWN_TRIAL_RANGE: u64 = 1000;

/// Process sizes are drawn from [LOW * m, HIGH * m] MB
pub const SIZE_LOW_FACTOR: f64 = 0.5;
pub const SIZE_HIGH_FACTOR: f64 = 3.0;

/// Process sizes are rounded to the nearest multiple of this (MB)
pub const SIZE_QUANTUM: u64 = 10;

/// Process durations are drawn from [LOW * t, HIGH * t] seconds
pub const DURATION_LOW_FACTOR: f64 = 0.5;
pub const DURATION_HIGH_FACTOR: f64 = 6.0;

/// Process durations are rounded to the nearest multiple of this (seconds)
pub const DURATION_QUANTUM: u64 = 5;

// =============================================================================
// OBSERVABILITY
// =============================================================================

/// Width of the size column in the rendered partition map
pub const PARTITION_MAP_SIZE_WIDTH: usize = 4;
