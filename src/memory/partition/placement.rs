/*!
 * Placement Policies
 * First-fit, best-fit and next-fit selection over the partition list
 */

use super::PartitionList;
use crate::core::config::PlacementStrategy;
use crate::core::types::{Address, Size};
use crate::memory::types::{MemoryError, MemoryResult, PartitionId};

impl PartitionList {
    /// Allocate in the lowest-address free partition that fits
    pub fn first_fit(&mut self, requested: Size) -> MemoryResult<PartitionId> {
        if requested == 0 {
            return Err(MemoryError::InvalidSize(requested));
        }
        let fit = self
            .iter()
            .find(|(_, p)| p.is_free && p.size >= requested)
            .map(|(id, _)| id);

        match fit {
            Some(id) => self.allocate(id, requested),
            None => Err(no_fit(requested, PlacementStrategy::FirstFit)),
        }
    }

    /// Allocate in the free partition leaving the smallest leftover
    ///
    /// Ties go to the lowest address.
    pub fn best_fit(&mut self, requested: Size) -> MemoryResult<PartitionId> {
        if requested == 0 {
            return Err(MemoryError::InvalidSize(requested));
        }
        // min_by_key keeps the first of equal keys
        let fit = self
            .iter()
            .filter(|(_, p)| p.is_free && p.size >= requested)
            .min_by_key(|(_, p)| p.size - requested)
            .map(|(id, _)| id);

        match fit {
            Some(id) => self.allocate(id, requested),
            None => Err(no_fit(requested, PlacementStrategy::BestFit)),
        }
    }

    /// Allocate in the first fitting partition at or after `start_address`
    ///
    /// The scan starts at the partition containing `start_address` (the head
    /// when the address lies past the end), runs to the tail, then wraps to
    /// the head and stops just before the starting partition.
    pub fn next_fit(&mut self, requested: Size, start_address: Address) -> MemoryResult<PartitionId> {
        if requested == 0 {
            return Err(MemoryError::InvalidSize(requested));
        }
        let Some(start) = self.find_containing(start_address).or(self.head) else {
            return Err(no_fit(requested, PlacementStrategy::NextFit));
        };

        let fit = self
            .iter_from(start)
            .chain(self.iter().take_while(|(id, _)| *id != start))
            .find(|(_, p)| p.is_free && p.size >= requested)
            .map(|(id, _)| id);

        match fit {
            Some(id) => self.allocate(id, requested),
            None => Err(no_fit(requested, PlacementStrategy::NextFit)),
        }
    }
}

fn no_fit(requested: Size, strategy: PlacementStrategy) -> MemoryError {
    MemoryError::NoFit {
        requested,
        strategy,
    }
}
