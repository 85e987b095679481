/*!
 * Partition Allocator
 * Splitting, release with coalescing, and the compaction pass
 */

use super::PartitionList;
use crate::core::types::Size;
use crate::memory::types::{MemoryError, MemoryResult, Partition, PartitionId};

impl PartitionList {
    /// Occupy `requested` MB of the free partition `id`
    ///
    /// When the partition is larger than the request, the remainder is split
    /// off as a new free partition directly after it. On any error the list
    /// is left untouched.
    pub fn allocate(&mut self, id: PartitionId, requested: Size) -> MemoryResult<PartitionId> {
        if requested == 0 {
            return Err(MemoryError::InvalidSize(requested));
        }
        let part = self.node(id)?;
        if !part.is_free {
            return Err(MemoryError::PartitionOccupied(id));
        }
        if part.size < requested {
            return Err(MemoryError::InsufficientSpace {
                requested,
                available: part.size,
            });
        }

        let remainder = part.size - requested;
        if remainder > 0 {
            self.insert_after(id, Partition::new(remainder, true))?;
        }

        let part = self.node_mut(id)?;
        part.size = requested;
        part.is_free = false;
        Ok(id)
    }

    /// Release an occupied partition and merge it with free neighbours
    ///
    /// Returns the id of the free partition that now covers the released
    /// range. Releasing a partition that is already free is a no-op.
    pub fn deallocate(&mut self, id: PartitionId) -> MemoryResult<PartitionId> {
        let part = self.node_mut(id)?;
        if part.is_free {
            return Ok(id);
        }
        part.is_free = true;
        let next = part.next;

        // Absorb the successor first; `id` survives this step.
        if let Some(next) = next.filter(|&n| self.is_free(n)) {
            let absorbed = self.remove(next)?;
            self.node_mut(id)?.size += absorbed.size;
        }

        // Then fold into the predecessor; `id` is retired and never read again.
        let prev = self.node(id)?.prev;
        if let Some(prev) = prev.filter(|&p| self.is_free(p)) {
            let released = self.remove(id)?;
            self.node_mut(prev)?.size += released.size;
            return Ok(prev);
        }

        Ok(id)
    }

    /// Merge every run of adjacent free partitions in a single pass
    ///
    /// A run ends at the first occupied partition or at the tail. Returns the
    /// number of partitions merged away.
    pub fn compact_all_free(&mut self) -> MemoryResult<usize> {
        let mut merged = 0;
        let mut cursor = self.head;

        while let Some(id) = cursor {
            while self.is_free(id) {
                let next = self.node(id)?.next.filter(|&n| self.is_free(n));
                let Some(next) = next else { break };
                let absorbed = self.remove(next)?;
                self.node_mut(id)?.size += absorbed.size;
                merged += 1;
            }
            cursor = self.node(id)?.next;
        }

        Ok(merged)
    }
}
