/*!
 * Main Memory
 *
 * Total capacity, the OS reservation, and the partition list covering the
 * usable remainder. Placement is dispatched by strategy here so callers hold
 * a single value under the memory lock.
 */

use super::partition::PartitionList;
use super::render::PartitionMap;
use super::traits::MemoryInfo;
use super::types::{MemoryResult, MemoryStats, PartitionId, Placement};
use crate::core::config::PlacementStrategy;
use crate::core::types::{Address, Size};
use tracing::debug;

/// Simulated main memory
#[derive(Debug, Clone)]
pub struct Memory {
    total: Size,
    reserved: Size,
    partitions: PartitionList,
}

impl Memory {
    /// Create memory with one free partition of `total - reserved` MB
    ///
    /// A reservation at or above the total leaves no usable memory.
    pub fn new(total: Size, reserved: Size) -> Self {
        let usable = total.saturating_sub(reserved);
        debug!(total, reserved, usable, "Memory initialized");
        Self {
            total,
            reserved,
            partitions: PartitionList::new(usable),
        }
    }

    pub fn total_capacity(&self) -> Size {
        self.total
    }

    pub fn reserved_capacity(&self) -> Size {
        self.reserved
    }

    pub fn usable_capacity(&self) -> Size {
        self.partitions.capacity()
    }

    pub fn partitions(&self) -> &PartitionList {
        &self.partitions
    }

    pub fn allocate(&mut self, id: PartitionId, requested: Size) -> MemoryResult<PartitionId> {
        self.partitions.allocate(id, requested)
    }

    pub fn deallocate(&mut self, id: PartitionId) -> MemoryResult<PartitionId> {
        self.partitions.deallocate(id)
    }

    pub fn compact_all_free(&mut self) -> MemoryResult<usize> {
        self.partitions.compact_all_free()
    }

    pub fn first_fit(&mut self, requested: Size) -> MemoryResult<PartitionId> {
        self.partitions.first_fit(requested)
    }

    pub fn best_fit(&mut self, requested: Size) -> MemoryResult<PartitionId> {
        self.partitions.best_fit(requested)
    }

    pub fn next_fit(&mut self, requested: Size, start_address: Address) -> MemoryResult<PartitionId> {
        self.partitions.next_fit(requested, start_address)
    }

    pub fn address_of(&self, id: PartitionId) -> MemoryResult<Address> {
        self.partitions.address_of(id)
    }

    /// Place `requested` MB using `strategy`
    ///
    /// `cursor` is the next-fit resume address; it moves to the end of the
    /// new allocation on success and is ignored by the other strategies.
    pub fn allocate_with(
        &mut self,
        strategy: PlacementStrategy,
        requested: Size,
        cursor: &mut Address,
    ) -> MemoryResult<Placement> {
        let id = match strategy {
            PlacementStrategy::FirstFit => self.first_fit(requested)?,
            PlacementStrategy::BestFit => self.best_fit(requested)?,
            PlacementStrategy::NextFit => self.next_fit(requested, *cursor)?,
        };
        let placement = Placement {
            id,
            address: self.address_of(id)?,
            size: requested,
        };
        if strategy == PlacementStrategy::NextFit {
            *cursor = placement.end();
        }
        Ok(placement)
    }

    /// `100 * (reserved + occupied) / total`
    pub fn utilization_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let used = self.reserved + self.partitions.occupied();
        100.0 * used as f64 / self.total as f64
    }

    /// Verify the partition list invariants
    pub fn check_invariants(&self) -> MemoryResult<()> {
        self.partitions.check_invariants()
    }

    /// Box drawing of the current layout
    pub fn render(&self) -> PartitionMap<'_> {
        PartitionMap::new(&self.partitions)
    }
}

impl MemoryInfo for Memory {
    fn stats(&self) -> MemoryStats {
        let occupied = self.partitions.occupied();
        let (free_partitions, largest_free) = self
            .partitions
            .iter()
            .filter(|(_, p)| p.is_free)
            .fold((0, 0), |(count, largest), (_, p)| (count + 1, largest.max(p.size)));

        MemoryStats {
            total_memory: self.total,
            reserved_memory: self.reserved,
            occupied_memory: occupied,
            free_memory: self.usable_capacity() - occupied,
            utilization_percent: self.utilization_percent(),
            partitions: self.partitions.len(),
            free_partitions,
            largest_free,
        }
    }

    fn utilization_percent(&self) -> f64 {
        Memory::utilization_percent(self)
    }
}
