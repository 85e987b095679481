/*!
 * Simulation Driver
 *
 * Wires the generator, the dispatcher and the shared state together and runs
 * them for the configured wall-clock duration.
 *
 * # Shutdown
 *
 * A run ends abruptly: `SimulationTask::stop` aborts both actors and waits
 * for the aborts to land. Lifetime tasks belong to the dispatcher and are
 * aborted with it, so no memory is released after the run ends. Dropping a
 * `SimulationTask` without calling `stop` aborts the actors as a fallback.
 */

use super::dispatcher::Dispatcher;
use super::generator::{Generator, Workload};
use super::state::{CounterSnapshot, SharedState};
use super::stats::StatsSnapshot;
use crate::core::config::SimulationConfig;
use crate::core::traits::UniformSource;
use crate::memory::{MemoryInfo, MemoryStats};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

/// Final summary of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub run_id: Uuid,
    pub config: SimulationConfig,
    pub workload: Workload,
    pub stats: StatsSnapshot,
    pub memory: MemoryStats,
    pub counters: CounterSnapshot,
    /// Processes still waiting in the queue when the run ended
    pub pending: usize,
}

/// One simulation run
pub struct Simulation {
    run_id: Uuid,
    config: SimulationConfig,
    shared: Arc<SharedState>,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Self {
        let shared = Arc::new(SharedState::new(
            config.total_memory,
            config.reserved_memory,
            config.queue_capacity,
        ));
        Self {
            run_id: Uuid::new_v4(),
            config,
            shared,
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn shared(&self) -> &Arc<SharedState> {
        &self.shared
    }

    /// Draw the workload from `rng` and start both actors
    pub fn start<R>(&self, mut rng: R) -> SimulationTask
    where
        R: UniformSource + 'static,
    {
        let workload = Workload::draw(&self.config, &mut rng);
        self.start_with_workload(workload, rng)
    }

    /// Start both actors with a fixed workload
    pub fn start_with_workload<R>(&self, workload: Workload, rng: R) -> SimulationTask
    where
        R: UniformSource + 'static,
    {
        let span = info_span!("simulation", run_id = %self.run_id);
        let _entered = span.enter();
        info!(
            total_mb = self.config.total_memory,
            reserved_mb = self.config.reserved_memory,
            spawn_rate = workload.spawn_rate,
            mean_size_mb = workload.mean_size,
            mean_duration_s = workload.mean_duration,
            queue_capacity = self.config.queue_capacity,
            strategy = %self.config.strategy,
            "Starting simulation"
        );

        let generator = Generator::new(Arc::clone(&self.shared), workload, rng, self.config.tick);
        let dispatcher = Dispatcher::new(
            Arc::clone(&self.shared),
            self.config.strategy,
            self.config.tick,
        );

        SimulationTask {
            workload,
            generator: Some(tokio::spawn(generator.run().instrument(span.clone()))),
            dispatcher: Some(tokio::spawn(dispatcher.run().instrument(span.clone()))),
        }
    }

    /// Run for the configured duration, then stop and report
    pub async fn run<R>(&self, rng: R) -> SimulationReport
    where
        R: UniformSource + 'static,
    {
        let task = self.start(rng);
        tokio::time::sleep(self.config.simulation_duration()).await;
        let workload = task.stop().await;
        self.report(&workload)
    }

    /// Snapshot of the statistics, memory and counters
    pub fn report(&self, workload: &Workload) -> SimulationReport {
        let (stats, memory) = {
            let state = self.shared.lock_memory();
            (state.stats.snapshot(), state.memory.stats())
        };
        let pending = self.shared.lock_queue().len();

        SimulationReport {
            run_id: self.run_id,
            config: self.config.clone(),
            workload: *workload,
            stats,
            memory,
            counters: self.shared.counters().snapshot(),
            pending,
        }
    }
}

/// Handle to the running actors
pub struct SimulationTask {
    workload: Workload,
    generator: Option<JoinHandle<()>>,
    dispatcher: Option<JoinHandle<()>>,
}

impl SimulationTask {
    pub fn workload(&self) -> &Workload {
        &self.workload
    }

    /// Abort both actors and wait until they are gone
    ///
    /// Consumes self to prevent use-after-stop.
    pub async fn stop(mut self) -> Workload {
        for handle in [self.generator.take(), self.dispatcher.take()].into_iter().flatten() {
            handle.abort();
            match handle.await {
                Err(e) if !e.is_cancelled() => warn!("Simulation actor ended abnormally: {}", e),
                _ => {}
            }
        }
        info!("Simulation stopped");
        self.workload
    }
}

impl Drop for SimulationTask {
    fn drop(&mut self) {
        let handles: Vec<_> = [self.generator.take(), self.dispatcher.take()]
            .into_iter()
            .flatten()
            .collect();
        if handles.is_empty() {
            return;
        }

        warn!("SimulationTask dropped without calling stop() - aborting actors immediately");
        for handle in handles {
            handle.abort();
        }
    }
}
