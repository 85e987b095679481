/*!
 * Placement Policy Tests
 * First-fit, best-fit and next-fit selection order
 */

use memsim_kernel::memory::{Memory, MemoryError, PartitionId};
use memsim_kernel::PlacementStrategy;
use pretty_assertions::assert_eq;

fn nth(memory: &Memory, index: usize) -> PartitionId {
    memory.partitions().views().nth(index).unwrap().id
}

fn layout(memory: &Memory) -> Vec<(usize, bool)> {
    memory
        .partitions()
        .views()
        .map(|v| (v.size, v.is_free))
        .collect()
}

/// Allocate 5, 10, 6, 8, 4, 20 back to back, then free the 2nd, 4th and 6th.
///
/// Resulting layout: [5][10 free][6][8 free][4][57 free]
fn fragmented_memory() -> Memory {
    let mut memory = Memory::new(100, 10);
    for (index, size) in [5, 10, 6, 8, 4, 20].into_iter().enumerate() {
        let id = nth(&memory, index);
        memory.allocate(id, size).unwrap();
    }
    assert_eq!(
        layout(&memory),
        vec![
            (5, false),
            (10, false),
            (6, false),
            (8, false),
            (4, false),
            (20, false),
            (37, true)
        ]
    );

    let second = nth(&memory, 1);
    let fourth = nth(&memory, 3);
    let sixth = nth(&memory, 5);
    memory.deallocate(second).unwrap();
    memory.deallocate(fourth).unwrap();
    memory.deallocate(sixth).unwrap();
    memory.check_invariants().unwrap();
    memory
}

#[test]
fn test_fragmented_layout_coalesces_tail() {
    let memory = fragmented_memory();
    assert_eq!(
        layout(&memory),
        vec![
            (5, false),
            (10, true),
            (6, false),
            (8, true),
            (4, false),
            (57, true)
        ]
    );
}

#[test]
fn test_first_fit_lands_on_merged_sixth_partition() {
    let mut memory = fragmented_memory();
    let sixth = nth(&memory, 5);

    let chosen = memory.first_fit(15).unwrap();

    assert_eq!(chosen, sixth);
    assert_eq!(memory.address_of(chosen).unwrap(), 33);
    let part = memory.partitions().get(chosen).unwrap();
    assert_eq!(part.size, 15);
    assert!(!part.is_free);
    memory.check_invariants().unwrap();
}

#[test]
fn test_first_fit_prefers_lowest_address() {
    let mut memory = fragmented_memory();
    let second = nth(&memory, 1);
    assert_eq!(memory.first_fit(7).unwrap(), second);
}

#[test]
fn test_best_fit_picks_smallest_leftover() {
    let mut memory = fragmented_memory();
    memory.first_fit(15).unwrap();
    let fourth = nth(&memory, 3);

    let chosen = memory.best_fit(5).unwrap();

    assert_eq!(chosen, fourth);
    assert_eq!(memory.partitions().get(chosen).unwrap().size, 5);
    assert_eq!(
        layout(&memory),
        vec![
            (5, false),
            (10, true),
            (6, false),
            (5, false),
            (3, true),
            (4, false),
            (15, false),
            (42, true)
        ]
    );
}

#[test]
fn test_best_fit_exact_match_beats_earlier_larger() {
    let mut memory = fragmented_memory();
    let fourth = nth(&memory, 3);
    assert_eq!(memory.best_fit(8).unwrap(), fourth);
    memory.check_invariants().unwrap();
}

#[test]
fn test_next_fit_resumes_from_start_address() {
    let mut memory = fragmented_memory();
    memory.first_fit(15).unwrap();
    memory.best_fit(5).unwrap();
    // [5][10 free][6][5][3 free][4][15][42 free]; address 16 is inside the 6MB partition
    let fifth = nth(&memory, 4);

    let chosen = memory.next_fit(3, 16).unwrap();

    assert_eq!(chosen, fifth);
    let part = memory.partitions().get(chosen).unwrap();
    assert_eq!(part.size, 3);
    assert!(!part.is_free);
}

#[test]
fn test_next_fit_skips_earlier_fit_until_wrap() {
    let mut memory = fragmented_memory();
    // The 10MB hole at address 5 is before the start; the tail hole is after it.
    let sixth = nth(&memory, 5);
    assert_eq!(memory.next_fit(9, 20).unwrap(), sixth);
}

#[test]
fn test_next_fit_wraps_before_start_partition() {
    let mut memory = fragmented_memory();
    memory.first_fit(57).unwrap();
    // Only the holes at addresses 5 (10MB) and 21 (8MB) remain.
    let second = nth(&memory, 1);
    assert_eq!(memory.next_fit(9, 30).unwrap(), second);
}

#[test]
fn test_no_fit_leaves_list_unchanged() {
    let mut memory = fragmented_memory();
    let before = layout(&memory);

    for strategy in [
        PlacementStrategy::FirstFit,
        PlacementStrategy::BestFit,
        PlacementStrategy::NextFit,
    ] {
        let mut cursor = 0;
        let result = memory.allocate_with(strategy, 58, &mut cursor);
        assert_eq!(
            result,
            Err(MemoryError::NoFit {
                requested: 58,
                strategy
            })
        );
        assert_eq!(cursor, 0);
    }

    assert_eq!(layout(&memory), before);
}

#[test]
fn test_zero_sized_request_is_rejected() {
    let mut memory = Memory::new(100, 10);
    assert_eq!(memory.first_fit(0), Err(MemoryError::InvalidSize(0)));
    assert_eq!(memory.best_fit(0), Err(MemoryError::InvalidSize(0)));
    assert_eq!(memory.next_fit(0, 0), Err(MemoryError::InvalidSize(0)));
}
