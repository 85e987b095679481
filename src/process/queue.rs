/*!
 * Process Queue
 * Bounded first-in-first-out queue of pending process requests
 */

use super::types::Process;
use std::collections::VecDeque;

/// Bounded FIFO queue
///
/// A full queue is an expected condition: `enqueue` hands the process back
/// instead of failing.
#[derive(Debug)]
pub struct ProcessQueue {
    entries: VecDeque<Process>,
    max_size: usize,
}

impl ProcessQueue {
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    /// Append at the tail
    ///
    /// Returns the process unchanged when the queue is already full.
    pub fn enqueue(&mut self, process: Process) -> Result<(), Process> {
        if self.is_full() {
            return Err(process);
        }
        self.entries.push_back(process);
        Ok(())
    }

    /// Remove and return the oldest entry
    pub fn dequeue(&mut self) -> Option<Process> {
        self.entries.pop_front()
    }

    /// Oldest entry, left in place
    pub fn peek(&self) -> Option<&Process> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.max_size
    }

    pub fn capacity(&self) -> usize {
        self.max_size
    }
}
