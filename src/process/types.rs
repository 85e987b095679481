/*!
 * Process Types
 * Simulated process requests and their lifecycle states
 */

use crate::core::types::{Pid, Size};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

/// A request for a contiguous partition held for `duration`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub pid: Pid,
    /// Requested partition size (MB)
    pub size: Size,
    /// Simulated run time once allocated
    pub duration: Duration,
    /// When the process was generated and offered to the queue
    pub arrival: Instant,
}

impl Process {
    pub fn new(pid: Pid, size: Size, duration: Duration) -> Self {
        Self {
            pid,
            size,
            duration,
            arrival: Instant::now(),
        }
    }

    /// Time spent between arrival and `now`
    pub fn waited(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.arrival)
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pid {} (s: {}MB, d: {}s)",
            self.pid,
            self.size,
            self.duration.as_secs()
        )
    }
}

/// Process lifecycle
///
/// `Created → Queued → {Rejected | Allocated} → Running → Freed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Fabricated by the generator
    Created,
    /// Waiting in the process queue
    Queued,
    /// Dropped because the queue was full (terminal)
    Rejected,
    /// Partition assigned by the dispatcher
    Allocated,
    /// Lifetime task sleeping for the run duration
    Running,
    /// Partition released (terminal)
    Freed,
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProcessState::Created => "created",
            ProcessState::Queued => "queued",
            ProcessState::Rejected => "rejected",
            ProcessState::Allocated => "allocated",
            ProcessState::Running => "running",
            ProcessState::Freed => "freed",
        };
        f.write_str(name)
    }
}
