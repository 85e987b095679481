/*!
 * Process Generator
 *
 * Every tick runs one Bernoulli trial with success probability
 * `spawn_rate * tick_ms / 1000`; a success fabricates a random process and
 * offers it to the bounded queue. A full queue drops the process.
 */

use super::state::SharedState;
use super::types::{Process, ProcessState};
use crate::core::config::SimulationConfig;
use crate::core::limits::{
    DURATION_HIGH_FACTOR, DURATION_LOW_FACTOR, DURATION_QUANTUM, SIZE_HIGH_FACTOR,
    SIZE_LOW_FACTOR, SIZE_QUANTUM, SPAWN_RATE_HIGH_FACTOR, SPAWN_RATE_LOW_FACTOR,
    SPAWN_RATE_RESOLUTION, SPAWN_TRIAL_RANGE,
};
use crate::core::traits::UniformSource;
use crate::core::types::{Pid, Size};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

/// Workload parameters fixed for one run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Workload {
    /// Processes spawned per second (r)
    pub spawn_rate: f64,
    /// Mean process size in MB (m)
    pub mean_size: Size,
    /// Mean process duration in seconds (t)
    pub mean_duration: u64,
    /// Upper bound on any generated size (usable memory)
    pub max_size: Size,
}

impl Workload {
    /// Draw the spawn rate uniformly from `[0.1 n, 1.2 n]` per second
    pub fn draw(config: &SimulationConfig, rng: &mut impl UniformSource) -> Self {
        let n = config.spawn_rate_seed as f64;
        let lo = (SPAWN_RATE_LOW_FACTOR * n * SPAWN_RATE_RESOLUTION) as u64;
        let hi = (SPAWN_RATE_HIGH_FACTOR * n * SPAWN_RATE_RESOLUTION) as u64;
        let spawn_rate = rng.uniform(lo, hi) as f64 / SPAWN_RATE_RESOLUTION;
        Self::with_rate(config, spawn_rate)
    }

    /// Workload with an explicit spawn rate
    pub fn with_rate(config: &SimulationConfig, spawn_rate: f64) -> Self {
        Self {
            spawn_rate,
            mean_size: config.mean_process_size,
            mean_duration: config.mean_process_duration,
            max_size: config.usable_memory(),
        }
    }
}

/// Outcome of offering a new process to the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Queued(Pid),
    Rejected(Pid),
}

/// Process-generation actor
pub struct Generator<R> {
    shared: Arc<SharedState>,
    workload: Workload,
    rng: R,
    tick: Duration,
    next_pid: Pid,
}

impl<R: UniformSource> Generator<R> {
    pub fn new(shared: Arc<SharedState>, workload: Workload, rng: R, tick: Duration) -> Self {
        Self {
            shared,
            workload,
            rng,
            tick,
            next_pid: 1,
        }
    }

    /// Run one tick: maybe fabricate a process and offer it to the queue
    pub fn step(&mut self) -> Option<Admission> {
        if !self.spawn_trial() {
            return None;
        }

        let process = self.random_process();
        let pid = process.pid;
        self.shared.counters().record_generated();
        info!(
            pid,
            size_mb = process.size,
            duration_s = process.duration.as_secs(),
            state = %ProcessState::Created,
            "New process generated"
        );

        let admitted = self.shared.lock_queue().enqueue(process);
        match admitted {
            Ok(()) => {
                self.shared.counters().record_queued();
                info!(pid, state = %ProcessState::Queued, "Process queued");
                Some(Admission::Queued(pid))
            }
            Err(process) => {
                self.shared.counters().record_rejected();
                warn!(
                    pid,
                    size_mb = process.size,
                    state = %ProcessState::Rejected,
                    "Process could NOT be queued, queue full"
                );
                Some(Admission::Rejected(pid))
            }
        }
    }

    /// Generate forever on a fixed tick
    pub async fn run(mut self) {
        let mut interval = tokio::time::interval(self.tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(
            spawn_rate = self.workload.spawn_rate,
            tick_ms = self.tick.as_millis() as u64,
            "Process generator started"
        );

        loop {
            interval.tick().await;
            self.step();
        }
    }

    fn spawn_trial(&mut self) -> bool {
        let tick_ms = self.tick.as_secs_f64() * 1000.0;
        let threshold = self.workload.spawn_rate * tick_ms;
        (self.rng.uniform(0, SPAWN_TRIAL_RANGE) as f64) < threshold
    }

    fn random_process(&mut self) -> Process {
        let m = self.workload.mean_size as f64;
        let size = self.rng.uniform(
            (SIZE_LOW_FACTOR * m) as u64,
            (SIZE_HIGH_FACTOR * m) as u64,
        );
        let size = (round_to_quantum(size, SIZE_QUANTUM) as Size).clamp(1, self.workload.max_size.max(1));

        let t = self.workload.mean_duration as f64;
        let duration = self.rng.uniform(
            (DURATION_LOW_FACTOR * t) as u64,
            (DURATION_HIGH_FACTOR * t) as u64,
        );
        let duration = Duration::from_secs(round_to_quantum(duration, DURATION_QUANTUM));

        let pid = self.next_pid;
        self.next_pid = self.next_pid.wrapping_add(1);
        Process::new(pid, size, duration)
    }
}

/// Round half-up to the nearest multiple of `quantum`, saturating at `u64::MAX`
fn round_to_quantum(value: u64, quantum: u64) -> u64 {
    let down = value / quantum * quantum;
    if (value - down) * 2 >= quantum {
        down.saturating_add(quantum)
    } else {
        down
    }
}
