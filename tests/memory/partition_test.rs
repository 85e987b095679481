/*!
 * Partition List Tests
 * Splitting, coalescing and addressing through the public Memory API
 */

use memsim_kernel::memory::{Memory, MemoryError, PartitionId};
use pretty_assertions::assert_eq;

fn layout(memory: &Memory) -> Vec<(usize, bool)> {
    memory
        .partitions()
        .views()
        .map(|v| (v.size, v.is_free))
        .collect()
}

fn ids(memory: &Memory) -> Vec<PartitionId> {
    memory.partitions().views().map(|v| v.id).collect()
}

#[test]
fn test_new_memory_is_single_free_partition() {
    let memory = Memory::new(100, 10);
    assert_eq!(memory.total_capacity(), 100);
    assert_eq!(memory.reserved_capacity(), 10);
    assert_eq!(layout(&memory), vec![(90, true)]);
    memory.check_invariants().unwrap();
}

#[test]
fn test_allocate_larger_than_partition_is_rejected() {
    let mut memory = Memory::new(100, 10);
    let head = memory.partitions().head().unwrap();

    let result = memory.allocate(head, 100);

    assert_eq!(
        result,
        Err(MemoryError::InsufficientSpace {
            requested: 100,
            available: 90
        })
    );
    assert_eq!(layout(&memory), vec![(90, true)]);
    memory.check_invariants().unwrap();
}

#[test]
fn test_allocate_splits_then_deallocate_restores() {
    let mut memory = Memory::new(100, 10);
    let head = memory.partitions().head().unwrap();

    let part = memory.allocate(head, 50).unwrap();
    assert_eq!(part, head);
    assert_eq!(layout(&memory), vec![(50, false), (40, true)]);
    memory.check_invariants().unwrap();

    memory.deallocate(part).unwrap();
    assert_eq!(layout(&memory), vec![(90, true)]);
    assert_eq!(memory.partitions().len(), 1);
    memory.check_invariants().unwrap();
}

#[test]
fn test_deallocate_merges_with_free_successor() {
    let mut memory = Memory::new(100, 10);
    let a = memory.first_fit(20).unwrap();
    let b = memory.first_fit(30).unwrap();
    memory.deallocate(b).unwrap();

    assert_eq!(layout(&memory), vec![(20, false), (70, true)]);
    memory.check_invariants().unwrap();
    assert!(memory.partitions().get(a).is_some());
}

#[test]
fn test_deallocate_merges_with_free_predecessor() {
    let mut memory = Memory::new(100, 10);
    let a = memory.first_fit(20).unwrap();
    let b = memory.first_fit(30).unwrap();
    memory.first_fit(40).unwrap();

    memory.deallocate(a).unwrap();
    let survivor = memory.deallocate(b).unwrap();

    assert_eq!(survivor, a);
    assert_eq!(layout(&memory), vec![(50, true), (40, false)]);
    memory.check_invariants().unwrap();
}

#[test]
fn test_deallocate_merges_both_neighbours_into_exact_sum() {
    let mut memory = Memory::new(100, 10);
    let a = memory.first_fit(10).unwrap();
    let b = memory.first_fit(20).unwrap();
    let c = memory.first_fit(30).unwrap();
    memory.first_fit(30).unwrap();

    memory.deallocate(a).unwrap();
    memory.deallocate(c).unwrap();
    assert_eq!(
        layout(&memory),
        vec![(10, true), (20, false), (30, true), (30, false)]
    );

    memory.deallocate(b).unwrap();
    assert_eq!(layout(&memory), vec![(60, true), (30, false)]);
    memory.check_invariants().unwrap();
}

#[test]
fn test_address_of_sums_preceding_sizes() {
    let mut memory = Memory::new(100, 10);
    let a = memory.first_fit(5).unwrap();
    let b = memory.first_fit(10).unwrap();
    let c = memory.first_fit(6).unwrap();

    assert_eq!(memory.address_of(a).unwrap(), 0);
    assert_eq!(memory.address_of(b).unwrap(), 5);
    assert_eq!(memory.address_of(c).unwrap(), 15);
    let tail = *ids(&memory).last().unwrap();
    assert_eq!(memory.address_of(tail).unwrap(), 21);
}

#[test]
fn test_utilization_counts_reserved_and_occupied() {
    let mut memory = Memory::new(200, 50);
    assert_eq!(memory.utilization_percent(), 25.0);
    let a = memory.first_fit(50).unwrap();
    assert_eq!(memory.utilization_percent(), 50.0);
    memory.deallocate(a).unwrap();
    assert_eq!(memory.utilization_percent(), 25.0);
}

#[test]
fn test_compact_on_coalesced_list_is_noop() {
    let mut memory = Memory::new(100, 10);
    let a = memory.first_fit(10).unwrap();
    memory.first_fit(10).unwrap();
    memory.deallocate(a).unwrap();

    assert_eq!(memory.compact_all_free().unwrap(), 0);
    assert_eq!(layout(&memory), vec![(10, true), (10, false), (70, true)]);
}

#[test]
fn test_render_matches_layout() {
    let mut memory = Memory::new(100, 10);
    memory.first_fit(50).unwrap();
    let rendered = memory.render().to_string();
    assert!(rendered.contains("│ ✓   50 │"));
    assert!(rendered.contains("│     40 │"));
}
