/*!
 * Dispatcher
 *
 * Polls the queue head, places it in memory with the configured strategy,
 * and hands the partition to a lifetime task. When nothing fits, the head
 * stays queued and the dispatcher waits for a release before retrying.
 */

use super::lifetime::run_lifetime;
use super::state::{MemoryState, SharedState};
use super::types::ProcessState;
use crate::core::config::PlacementStrategy;
use crate::core::types::{Address, Pid, Size};
use crate::memory::Placement;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

/// Result of one dispatch attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Queue was empty
    Idle,
    /// Head process placed and its lifetime task started
    Allocated { pid: Pid, placement: Placement },
    /// No free partition is large enough; head left in place
    Blocked { pid: Pid, requested: Size },
    /// Head can never be placed and was dropped
    Discarded { pid: Pid },
}

/// Allocation actor
///
/// Owns the lifetime tasks it starts; dropping the dispatcher aborts them.
pub struct Dispatcher {
    shared: Arc<SharedState>,
    strategy: PlacementStrategy,
    tick: Duration,
    next_fit_cursor: Address,
    lifetimes: JoinSet<()>,
}

impl Dispatcher {
    pub fn new(shared: Arc<SharedState>, strategy: PlacementStrategy, tick: Duration) -> Self {
        Self {
            shared,
            strategy,
            tick,
            next_fit_cursor: 0,
            lifetimes: JoinSet::new(),
        }
    }

    /// Number of lifetime tasks still holding memory
    pub fn running(&self) -> usize {
        self.lifetimes.len()
    }

    /// Try once to place the queue head
    ///
    /// Must be called from within a tokio runtime.
    pub fn try_dispatch(&mut self) -> DispatchOutcome {
        while self.lifetimes.try_join_next().is_some() {}

        let head = self.shared.lock_queue().peek().map(|p| (p.pid, p.size));
        let Some((pid, requested)) = head else {
            return DispatchOutcome::Idle;
        };
        debug!(pid, size_mb = requested, "Spawning process");

        let mut state = self.shared.lock_memory();
        let placed = state
            .memory
            .allocate_with(self.strategy, requested, &mut self.next_fit_cursor);

        match placed {
            Ok(placement) => {
                // Memory lock is held: queue lock second.
                let process = self.shared.lock_queue().dequeue();
                let Some(process) = process else {
                    error!(pid, "Queue head vanished during dispatch");
                    if let Err(e) = state.memory.deallocate(placement.id) {
                        error!(pid, error = %e, "Failed to roll back placement");
                    }
                    return DispatchOutcome::Idle;
                };

                state.stats.record_turnaround(process.waited(Instant::now()));
                let shared = Arc::clone(&self.shared);
                info!(
                    pid,
                    size_mb = placement.size,
                    start = placement.address,
                    end = placement.end(),
                    state = %ProcessState::Allocated,
                    "Process {} allocated {}MB partition [{}, {}]",
                    process,
                    placement.size,
                    placement.address,
                    placement.end()
                );
                self.lifetimes.spawn(run_lifetime(shared, process, placement));
                self.shared.counters().record_allocated();

                let MemoryState { memory, stats } = &mut *state;
                stats.sample_utilization(&*memory);
                debug!("Partition map after allocation:\n{}", memory.render());
                let snapshot = stats.snapshot();
                info!(
                    avg_turnaround_ms = snapshot.avg_turnaround_ms,
                    avg_utilization_percent = snapshot.avg_utilization_percent,
                    "Avg. turnaround time: {:.2}ms, Avg. memory util: {:.2}%",
                    snapshot.avg_turnaround_ms,
                    snapshot.avg_utilization_percent
                );

                DispatchOutcome::Allocated { pid, placement }
            }
            Err(e) if e.is_recoverable() => {
                warn!(pid, size_mb = requested, strategy = %self.strategy, "Not enough memory for process");
                DispatchOutcome::Blocked { pid, requested }
            }
            Err(e) => {
                drop(state);
                self.shared.lock_queue().dequeue();
                error!(pid, error = %e, "Process can never be placed, dropping it");
                DispatchOutcome::Discarded { pid }
            }
        }
    }

    /// Place the queue head, waiting for releases until it fits
    ///
    /// Returns once the head is placed or the queue is empty.
    pub async fn dispatch_head(&mut self) -> DispatchOutcome {
        let shared = Arc::clone(&self.shared);
        loop {
            // Register before checking so a release after the check still wakes us.
            let notified = shared.memory_available().notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            match self.try_dispatch() {
                DispatchOutcome::Blocked { .. } => notified.await,
                outcome => return outcome,
            }
        }
    }

    /// Dispatch forever on a fixed tick
    pub async fn run(mut self) {
        let mut interval = tokio::time::interval(self.tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(strategy = %self.strategy, "Dispatcher started");

        loop {
            interval.tick().await;
            self.dispatch_head().await;
        }
    }
}
