/*!
 * Dispatcher Tests
 * Placement, blocking on a full memory, and release by lifetime tasks
 *
 * Runs on a paused clock so process lifetimes elapse instantly.
 */

use memsim_kernel::{DispatchOutcome, Dispatcher, PlacementStrategy, Process, SharedState};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

const TICK: Duration = Duration::from_millis(10);

fn shared() -> Arc<SharedState> {
    Arc::new(SharedState::new(100, 10, 4))
}

fn submit(shared: &SharedState, pid: u32, size: usize, secs: u64) {
    shared
        .lock_queue()
        .enqueue(Process::new(pid, size, Duration::from_secs(secs)))
        .unwrap();
}

fn layout(shared: &SharedState) -> Vec<(usize, bool)> {
    shared
        .lock_memory()
        .memory
        .partitions()
        .views()
        .map(|v| (v.size, v.is_free))
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_empty_queue_is_idle() {
    let mut dispatcher = Dispatcher::new(shared(), PlacementStrategy::FirstFit, TICK);
    assert_eq!(dispatcher.try_dispatch(), DispatchOutcome::Idle);
    assert_eq!(dispatcher.running(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_dispatch_allocates_then_lifetime_releases() {
    let shared = shared();
    let mut dispatcher = Dispatcher::new(Arc::clone(&shared), PlacementStrategy::FirstFit, TICK);
    submit(&shared, 1, 50, 5);

    let outcome = dispatcher.try_dispatch();

    let DispatchOutcome::Allocated { pid, placement } = outcome else {
        panic!("expected allocation, got {:?}", outcome);
    };
    assert_eq!(pid, 1);
    assert_eq!((placement.address, placement.size), (0, 50));
    assert_eq!(layout(&shared), vec![(50, false), (40, true)]);
    assert!(shared.lock_queue().is_empty());
    assert_eq!(dispatcher.running(), 1);

    {
        let state = shared.lock_memory();
        let snapshot = state.stats.snapshot();
        assert_eq!(snapshot.turnaround_samples, 1);
        assert_eq!(snapshot.utilization_samples, 1);
        assert_eq!(snapshot.avg_turnaround_ms, 0.0);
        assert_eq!(snapshot.avg_utilization_percent, 60.0);
    }

    tokio::time::sleep(Duration::from_secs(6)).await;

    assert_eq!(layout(&shared), vec![(90, true)]);
    let counters = shared.counters().snapshot();
    assert_eq!(counters.allocated, 1);
    assert_eq!(counters.freed, 1);

    // Finished lifetime tasks are reaped on the next attempt.
    assert_eq!(dispatcher.try_dispatch(), DispatchOutcome::Idle);
    assert_eq!(dispatcher.running(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_blocked_head_is_placed_after_release() {
    let shared = shared();
    let mut dispatcher = Dispatcher::new(Arc::clone(&shared), PlacementStrategy::FirstFit, TICK);
    submit(&shared, 1, 60, 5);
    submit(&shared, 2, 50, 5);

    assert!(matches!(
        dispatcher.try_dispatch(),
        DispatchOutcome::Allocated { pid: 1, .. }
    ));
    assert_eq!(
        dispatcher.try_dispatch(),
        DispatchOutcome::Blocked {
            pid: 2,
            requested: 50
        }
    );
    assert_eq!(shared.lock_queue().len(), 1);

    let outcome = dispatcher.dispatch_head().await;

    let DispatchOutcome::Allocated { pid, placement } = outcome else {
        panic!("expected allocation, got {:?}", outcome);
    };
    assert_eq!(pid, 2);
    assert_eq!(placement.address, 0);
    assert_eq!(layout(&shared), vec![(50, false), (40, true)]);

    // The second process waited for the first one's five-second lifetime.
    let snapshot = shared.lock_memory().stats.snapshot();
    assert_eq!(snapshot.turnaround_samples, 2);
    assert!(snapshot.avg_turnaround_ms >= 2500.0);
    assert!(snapshot.avg_turnaround_ms < 2510.0);
}

#[tokio::test(start_paused = true)]
async fn test_next_fit_cursor_follows_last_allocation() {
    let shared = shared();
    let mut dispatcher = Dispatcher::new(Arc::clone(&shared), PlacementStrategy::NextFit, TICK);
    submit(&shared, 1, 20, 5);
    submit(&shared, 2, 30, 60);
    submit(&shared, 3, 10, 60);

    dispatcher.try_dispatch();
    dispatcher.try_dispatch();
    assert_eq!(layout(&shared), vec![(20, false), (30, false), (40, true)]);

    // First process ends, opening a hole before the cursor.
    tokio::time::sleep(Duration::from_secs(6)).await;
    assert_eq!(layout(&shared), vec![(20, true), (30, false), (40, true)]);

    let outcome = dispatcher.try_dispatch();
    let DispatchOutcome::Allocated { placement, .. } = outcome else {
        panic!("expected allocation, got {:?}", outcome);
    };
    assert_eq!(placement.address, 50);
}

#[tokio::test(start_paused = true)]
async fn test_unplaceable_head_is_discarded() {
    let shared = shared();
    let mut dispatcher = Dispatcher::new(Arc::clone(&shared), PlacementStrategy::BestFit, TICK);
    submit(&shared, 9, 0, 5);
    submit(&shared, 10, 10, 5);

    assert_eq!(
        dispatcher.try_dispatch(),
        DispatchOutcome::Discarded { pid: 9 }
    );
    assert!(matches!(
        dispatcher.try_dispatch(),
        DispatchOutcome::Allocated { pid: 10, .. }
    ));
}

#[tokio::test(start_paused = true)]
async fn test_run_drains_queue_over_time() {
    let shared = shared();
    for pid in 1..=4 {
        submit(&shared, pid, 40, 5);
    }
    let dispatcher = Dispatcher::new(Arc::clone(&shared), PlacementStrategy::FirstFit, TICK);
    let handle = tokio::spawn(dispatcher.run());

    tokio::time::sleep(Duration::from_secs(12)).await;

    assert!(shared.lock_queue().is_empty());
    let counters = shared.counters().snapshot();
    assert_eq!(counters.allocated, 4);
    assert_eq!(counters.freed, 4);
    assert_eq!(layout(&shared), vec![(90, true)]);
    shared.lock_memory().memory.check_invariants().unwrap();

    handle.abort();
}
