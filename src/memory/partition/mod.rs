/*!
 * Partition List
 *
 * Ordered sequence of contiguous memory regions kept in address order.
 *
 * ## Representation
 *
 * Partitions live in an arena (`Vec` of slots) and are linked through
 * explicit previous/next indices. Removing a partition retires its slot to a
 * vacancy list for reuse; a retired slot is never read through a link again,
 * so coalescing cannot touch a removed record.
 *
 * ## Invariants (hold whenever a public method returns)
 *
 * - sizes of all partitions sum to the usable memory size
 * - every partition has a size greater than zero
 * - no two address-adjacent partitions are both free
 */

mod allocator;
mod placement;

use super::types::{MemoryError, MemoryResult, Partition, PartitionId, PartitionView};
use crate::core::types::{Address, Size};

/// Arena-backed doubly linked partition list
#[derive(Debug, Clone)]
pub struct PartitionList {
    slots: Vec<Option<Partition>>,
    vacant: Vec<usize>,
    head: Option<PartitionId>,
    tail: Option<PartitionId>,
    len: usize,
    capacity: Size,
}

impl PartitionList {
    /// Create a list holding a single free partition of `capacity` MB
    ///
    /// A zero capacity yields an empty list on which every fit is rejected.
    pub fn new(capacity: Size) -> Self {
        let mut list = Self {
            slots: Vec::new(),
            vacant: Vec::new(),
            head: None,
            tail: None,
            len: 0,
            capacity,
        };
        if capacity > 0 {
            let id = list.store(Partition::new(capacity, true));
            list.head = Some(id);
            list.tail = Some(id);
        }
        list
    }

    /// Usable memory covered by the list
    pub fn capacity(&self) -> Size {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn head(&self) -> Option<PartitionId> {
        self.head
    }

    pub fn tail(&self) -> Option<PartitionId> {
        self.tail
    }

    pub fn get(&self, id: PartitionId) -> Option<&Partition> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    fn get_mut(&mut self, id: PartitionId) -> Option<&mut Partition> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    fn node(&self, id: PartitionId) -> MemoryResult<&Partition> {
        self.get(id).ok_or(MemoryError::InvalidPartition(id))
    }

    fn node_mut(&mut self, id: PartitionId) -> MemoryResult<&mut Partition> {
        self.get_mut(id).ok_or(MemoryError::InvalidPartition(id))
    }

    fn is_free(&self, id: PartitionId) -> bool {
        self.get(id).is_some_and(|p| p.is_free)
    }

    /// Iterate partitions in address order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    /// Iterate partitions in address order starting at `id`
    pub fn iter_from(&self, id: PartitionId) -> Iter<'_> {
        let cursor = self.get(id).map(|_| id);
        Iter { list: self, cursor }
    }

    /// Address-annotated snapshot of every partition
    pub fn views(&self) -> impl Iterator<Item = PartitionView> + '_ {
        self.iter().scan(0, |address, (id, part)| {
            let view = PartitionView {
                id,
                address: *address,
                size: part.size,
                is_free: part.is_free,
            };
            *address += part.size;
            Some(view)
        })
    }

    /// Start address of a partition: sum of the sizes before it (O(n))
    pub fn address_of(&self, id: PartitionId) -> MemoryResult<Address> {
        self.node(id)?;
        let mut address = 0;
        for (current, part) in self.iter() {
            if current == id {
                return Ok(address);
            }
            address += part.size;
        }
        Err(MemoryError::InvalidPartition(id))
    }

    /// Partition whose range covers `address`, if any
    pub fn find_containing(&self, address: Address) -> Option<PartitionId> {
        self.views().find(|v| v.contains(address)).map(|v| v.id)
    }

    /// Sum of the sizes of all occupied partitions
    pub fn occupied(&self) -> Size {
        self.iter()
            .filter(|(_, p)| !p.is_free)
            .map(|(_, p)| p.size)
            .sum()
    }

    /// Verify the structural and accounting invariants
    pub fn check_invariants(&self) -> MemoryResult<()> {
        let mut total = 0;
        let mut count = 0;
        let mut prev: Option<(PartitionId, &Partition)> = None;

        for (id, part) in self.iter() {
            if part.size == 0 {
                return Err(MemoryError::InvariantViolation(format!(
                    "partition {} has zero size",
                    id
                )));
            }
            if part.prev != prev.map(|(pid, _)| pid) {
                return Err(MemoryError::InvariantViolation(format!(
                    "partition {} has a stale predecessor link",
                    id
                )));
            }
            if let Some((pid, before)) = prev {
                if before.is_free && part.is_free {
                    return Err(MemoryError::InvariantViolation(format!(
                        "adjacent free partitions {} and {}",
                        pid, id
                    )));
                }
            }
            total += part.size;
            count += 1;
            if count > self.slots.len() {
                return Err(MemoryError::InvariantViolation(
                    "partition links form a cycle".into(),
                ));
            }
            prev = Some((id, part));
        }

        if self.tail != prev.map(|(id, _)| id) {
            return Err(MemoryError::InvariantViolation("tail is stale".into()));
        }
        if count != self.len {
            return Err(MemoryError::InvariantViolation(format!(
                "list holds {} partitions, expected {}",
                count, self.len
            )));
        }
        if total != self.capacity {
            return Err(MemoryError::InvariantViolation(format!(
                "partition sizes sum to {}MB, expected {}MB",
                total, self.capacity
            )));
        }
        Ok(())
    }

    /// Put a detached record into a slot
    fn store(&mut self, part: Partition) -> PartitionId {
        self.len += 1;
        match self.vacant.pop() {
            Some(index) => {
                self.slots[index] = Some(part);
                PartitionId(index)
            }
            None => {
                self.slots.push(Some(part));
                PartitionId(self.slots.len() - 1)
            }
        }
    }

    /// Link a new partition directly after `id`, inheriting its successor
    fn insert_after(&mut self, id: PartitionId, mut part: Partition) -> MemoryResult<PartitionId> {
        let successor = self.node(id)?.next;
        part.prev = Some(id);
        part.next = successor;
        let new_id = self.store(part);

        self.node_mut(id)?.next = Some(new_id);
        match successor {
            Some(next) => self.node_mut(next)?.prev = Some(new_id),
            None => self.tail = Some(new_id),
        }
        Ok(new_id)
    }

    /// Unlink a partition and retire its slot
    fn remove(&mut self, id: PartitionId) -> MemoryResult<Partition> {
        let part = self.node(id)?;
        let (prev, next) = (part.prev, part.next);

        match prev {
            Some(p) => self.node_mut(p)?.next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.node_mut(n)?.prev = prev,
            None => self.tail = prev,
        }

        let removed = self.slots[id.0]
            .take()
            .ok_or(MemoryError::InvalidPartition(id))?;
        self.vacant.push(id.0);
        self.len -= 1;
        Ok(removed)
    }
}

/// Address-order iterator over a [`PartitionList`]
pub struct Iter<'a> {
    list: &'a PartitionList,
    cursor: Option<PartitionId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (PartitionId, &'a Partition);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let part = self.list.get(id)?;
        self.cursor = part.next;
        Some((id, part))
    }
}
