/*!
 * Memory Types
 * Common types for partition management
 */

use crate::core::config::PlacementStrategy;
use crate::core::types::{Address, Size};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
///
/// Every error leaves the partition list exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("Invalid partition: {0}")]
    InvalidPartition(PartitionId),

    #[error("Partition {0} is already occupied")]
    PartitionOccupied(PartitionId),

    #[error("Partition too small: requested {requested}MB, partition holds {available}MB")]
    InsufficientSpace { requested: Size, available: Size },

    #[error("Invalid allocation size: {0}MB")]
    InvalidSize(Size),

    #[error("No free partition fits {requested}MB ({strategy})")]
    NoFit {
        requested: Size,
        strategy: PlacementStrategy,
    },

    #[error("Partition list invariant violated: {0}")]
    InvariantViolation(String),
}

impl MemoryError {
    /// Whether the caller may simply wait for memory to be released
    pub fn is_recoverable(&self) -> bool {
        matches!(self, MemoryError::NoFit { .. })
    }
}

/// Stable handle to a partition record in the arena
///
/// A handle stays valid for as long as the partition exists. Occupied
/// partitions are never merged away, so a handle to an occupied partition is
/// valid until it is deallocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PartitionId(pub(crate) usize);

impl fmt::Display for PartitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Partition record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub size: Size,
    pub is_free: bool,
    pub(crate) prev: Option<PartitionId>,
    pub(crate) next: Option<PartitionId>,
}

impl Partition {
    pub(crate) fn new(size: Size, is_free: bool) -> Self {
        Self {
            size,
            is_free,
            prev: None,
            next: None,
        }
    }
}

/// Read-only snapshot of one partition in address order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionView {
    pub id: PartitionId,
    pub address: Address,
    pub size: Size,
    pub is_free: bool,
}

impl PartitionView {
    /// One past the last address covered by this partition
    pub fn end(&self) -> Address {
        self.address + self.size
    }

    pub fn contains(&self, address: Address) -> bool {
        self.address <= address && address < self.end()
    }
}

/// A successful placement, as reported to the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub id: PartitionId,
    pub address: Address,
    pub size: Size,
}

impl Placement {
    pub fn end(&self) -> Address {
        self.address + self.size
    }
}

/// Memory statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryStats {
    pub total_memory: Size,
    pub reserved_memory: Size,
    pub occupied_memory: Size,
    pub free_memory: Size,
    pub utilization_percent: f64,
    pub partitions: usize,
    pub free_partitions: usize,
    /// Largest single free partition (the biggest request that can succeed now)
    pub largest_free: Size,
}

impl MemoryStats {
    /// External fragmentation: share of free memory outside the largest hole
    pub fn external_fragmentation(&self) -> f64 {
        if self.free_memory == 0 {
            return 0.0;
        }
        1.0 - self.largest_free as f64 / self.free_memory as f64
    }
}
