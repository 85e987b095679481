/*!
 * Shared Simulation State
 *
 * ## Locking discipline
 *
 * - The memory lock guards the partition list and the statistics together.
 * - The queue lock guards the process queue.
 * - When both are needed (the dispatcher's dequeue after a successful
 *   allocation) the memory lock is taken first.
 * - Neither lock is held across an `.await`.
 *
 * `memory_available` is the broadcast a lifetime task sends after a release.
 * Waiters must register (`Notified::enable`) before checking memory under
 * the lock, so a release between the check and the wait is never missed.
 */

use super::queue::ProcessQueue;
use super::stats::Stats;
use crate::core::types::Size;
use crate::memory::Memory;
use parking_lot::{Mutex, MutexGuard};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Notify;

/// Everything protected by the memory lock
#[derive(Debug)]
pub struct MemoryState {
    pub memory: Memory,
    pub stats: Stats,
}

/// Lifecycle event counters
#[derive(Debug, Default)]
pub struct Counters {
    generated: AtomicU64,
    queued: AtomicU64,
    rejected: AtomicU64,
    allocated: AtomicU64,
    freed: AtomicU64,
}

/// Point-in-time copy of [`Counters`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterSnapshot {
    pub generated: u64,
    pub queued: u64,
    pub rejected: u64,
    pub allocated: u64,
    pub freed: u64,
}

impl Counters {
    pub(crate) fn record_generated(&self) {
        self.generated.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_queued(&self) {
        self.queued.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_allocated(&self) {
        self.allocated.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_freed(&self) {
        self.freed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            generated: self.generated.load(Ordering::Relaxed),
            queued: self.queued.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            allocated: self.allocated.load(Ordering::Relaxed),
            freed: self.freed.load(Ordering::Relaxed),
        }
    }
}

/// State shared by the generator, the dispatcher and the lifetime tasks
#[derive(Debug)]
pub struct SharedState {
    memory: Mutex<MemoryState>,
    queue: Mutex<ProcessQueue>,
    memory_available: Notify,
    counters: Counters,
}

impl SharedState {
    pub fn new(total: Size, reserved: Size, queue_capacity: usize) -> Self {
        Self {
            memory: Mutex::new(MemoryState {
                memory: Memory::new(total, reserved),
                stats: Stats::new(),
            }),
            queue: Mutex::new(ProcessQueue::new(queue_capacity)),
            memory_available: Notify::new(),
            counters: Counters::default(),
        }
    }

    /// Acquire the memory lock
    pub fn lock_memory(&self) -> MutexGuard<'_, MemoryState> {
        self.memory.lock()
    }

    /// Acquire the queue lock
    ///
    /// Never call this and then `lock_memory` on the same thread.
    pub fn lock_queue(&self) -> MutexGuard<'_, ProcessQueue> {
        self.queue.lock()
    }

    pub fn memory_available(&self) -> &Notify {
        &self.memory_available
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }
}
