/*!
 * Lifetime Task
 * Holds an allocated partition for the process run time, then releases it
 */

use super::state::SharedState;
use super::types::{Process, ProcessState};
use crate::memory::Placement;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Sleep for the process duration, free its partition and wake the dispatcher
///
/// Runs as a timer-driven task on the runtime, not a dedicated thread. The
/// task is the sole owner of `process` once started.
pub async fn run_lifetime(shared: Arc<SharedState>, process: Process, placement: Placement) {
    debug!(pid = process.pid, state = %ProcessState::Running, "Process running");
    tokio::time::sleep(process.duration).await;

    {
        let mut state = shared.lock_memory();
        match state.memory.deallocate(placement.id) {
            Ok(_) => {
                shared.counters().record_freed();
                info!(
                    pid = process.pid,
                    size_mb = placement.size,
                    start = placement.address,
                    end = placement.end(),
                    state = %ProcessState::Freed,
                    "{}MB partition [{}, {}] freed from process {}",
                    placement.size,
                    placement.address,
                    placement.end(),
                    process
                );
                debug!("Partition map after release:\n{}", state.memory.render());
            }
            Err(e) => {
                error!(pid = process.pid, error = %e, "Failed to release partition");
            }
        }
    }

    shared.memory_available().notify_waiters();
}
