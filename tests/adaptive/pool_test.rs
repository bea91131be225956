/*!
 * Pool Manager Tests
 * Carving, slot routing, reclaim marking, and pruning
 */

use adaptive_alloc::{Arena, PoolManager};
use parking_lot::RwLock;
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn manager(total: usize) -> (PoolManager, Arc<RwLock<Arena>>) {
    let arena = Arc::new(RwLock::new(Arena::new(total)));
    (PoolManager::new(arena.clone()), arena)
}

#[test]
fn test_create_pool_carves_from_arena() {
    let (mut pools, arena) = manager(4096);

    let id = pools.create_pool(64, 10).unwrap();
    assert_eq!(id, 1);
    assert_eq!(arena.read().total_free_memory(), 4096 - 640);

    let stats = &pools.stats()[0];
    assert_eq!(stats.block_size, 64);
    assert_eq!(stats.total_slots, 10);
    assert_eq!(stats.used_slots, 0);
}

#[test]
fn test_create_pool_silently_noops_on_no_fit() {
    let (mut pools, arena) = manager(100);

    assert_eq!(pools.create_pool(64, 10), None);
    assert_eq!(pools.pool_count(), 0);
    assert_eq!(arena.read().total_free_memory(), 100);
}

#[test]
fn test_zero_sized_pools_are_rejected() {
    let (mut pools, _arena) = manager(4096);
    assert_eq!(pools.create_pool(0, 10), None);
    assert_eq!(pools.create_pool(64, 0), None);
    assert_eq!(pools.pool_count(), 0);
}

#[test]
fn test_allocation_prefers_smallest_fitting_slot() {
    let (mut pools, _arena) = manager(16 * 1024);

    let big = pools.create_pool(256, 4).unwrap();
    let small = pools.create_pool(64, 4).unwrap();

    // A 50-byte request takes a 64-byte slot even though the 256-byte pool
    // was created first
    let (pool_id, _addr) = pools.try_allocate(50).unwrap();
    assert_eq!(pool_id, small);

    // A 100-byte request does not fit a 64-byte slot
    let (pool_id, _addr) = pools.try_allocate(100).unwrap();
    assert_eq!(pool_id, big);
}

#[test]
fn test_slot_reuse_is_lifo() {
    let (mut pools, _arena) = manager(4096);
    pools.create_pool(64, 4).unwrap();

    let (_, a) = pools.try_allocate(64).unwrap();
    let (_, b) = pools.try_allocate(64).unwrap();
    assert_ne!(a, b);

    pools.try_deallocate(a).unwrap().unwrap();
    let (_, next) = pools.try_allocate(64).unwrap();
    assert_eq!(next, a);
}

#[test]
fn test_double_slot_release_is_invalid() {
    let (mut pools, _arena) = manager(4096);
    pools.create_pool(64, 4).unwrap();

    let (_, a) = pools.try_allocate(64).unwrap();
    pools.try_deallocate(a).unwrap().unwrap();

    assert_eq!(
        pools.try_deallocate(a),
        Some(Err(adaptive_alloc::AllocError::InvalidAddress(a)))
    );
}

#[test]
fn test_exhausted_pool_returns_none() {
    let (mut pools, _arena) = manager(4096);
    pools.create_pool(64, 2).unwrap();

    pools.try_allocate(64).unwrap();
    pools.try_allocate(64).unwrap();
    assert_eq!(pools.try_allocate(64), None);
}

#[test]
fn test_deallocate_outside_any_pool_is_unhandled() {
    let (mut pools, _arena) = manager(4096);
    pools.create_pool(64, 4).unwrap();

    // The pool occupies [0, 256); anything past it belongs to the arena
    assert_eq!(pools.try_deallocate(4000), None);
}

#[test]
fn test_slot_accounting_stays_balanced() {
    let (mut pools, _arena) = manager(4096);
    pools.create_pool(64, 4).unwrap();

    let (_, a) = pools.try_allocate(64).unwrap();
    pools.try_allocate(64).unwrap();
    pools.try_deallocate(a).unwrap().unwrap();

    let stats = &pools.stats()[0];
    assert_eq!(stats.used_slots, 1);
    assert_eq!(stats.total_slots, 4);
}

#[test]
fn test_prune_returns_pool_block_to_arena() {
    let (mut pools, arena) = manager(4096);
    pools.create_pool(64, 10).unwrap();
    assert_eq!(arena.read().total_free_memory(), 4096 - 640);

    pools.mark_underutilized(0.2);
    let reclaimed = pools.prune();

    assert_eq!(reclaimed, 640);
    assert_eq!(pools.pool_count(), 0);
    assert_eq!(arena.read().total_free_memory(), 4096);
    assert_eq!(arena.read().largest_free_block(), 4096);
}

#[test]
fn test_reclaim_flag_clears_when_utilisation_recovers() {
    let (mut pools, _arena) = manager(4096);
    pools.create_pool(64, 4).unwrap();

    pools.mark_underutilized(0.2);
    assert!(pools.stats()[0].marked_for_reclaim);

    pools.try_allocate(64).unwrap();
    pools.try_allocate(64).unwrap();
    pools.mark_underutilized(0.2);
    assert!(!pools.stats()[0].marked_for_reclaim);

    // Nothing flagged, nothing pruned
    assert_eq!(pools.prune(), 0);
    assert_eq!(pools.pool_count(), 1);
}

#[test]
fn test_well_utilised_pool_survives_marking() {
    let (mut pools, _arena) = manager(4096);
    pools.create_pool(64, 4).unwrap();

    pools.try_allocate(64).unwrap();
    pools.mark_underutilized(0.2);

    // 25% utilised clears the 20% floor
    assert!(!pools.stats()[0].marked_for_reclaim);
}
