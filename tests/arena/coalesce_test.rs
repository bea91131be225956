/*!
 * Coalescing Tests
 * Free-run fusion after deallocation
 */

use crate::util::assert_arena_invariants;
use adaptive_alloc::{Arena, Block};
use pretty_assertions::assert_eq;

#[test]
fn test_full_cleanup_restores_single_free_block() {
    let mut arena = Arena::new(1024);

    assert_eq!(arena.allocate(100).unwrap(), 0);
    assert_eq!(arena.allocate(100).unwrap(), 100);
    arena.deallocate(0).unwrap();
    arena.deallocate(100).unwrap();

    assert_eq!(arena.blocks(), vec![Block::free_at(0, 1024)]);
}

#[test]
fn test_free_between_allocated_neighbours_stays_split() {
    let mut arena = Arena::new(1024);
    let a = arena.allocate(100).unwrap();
    let b = arena.allocate(100).unwrap();
    let c = arena.allocate(100).unwrap();

    arena.deallocate(b).unwrap();

    // a and c pin the freed block in place
    let blocks = arena.blocks();
    assert!(blocks.iter().any(|blk| blk.address == b && blk.free && blk.size == 100));
    assert!(blocks.iter().any(|blk| blk.address == a && !blk.free));
    assert!(blocks.iter().any(|blk| blk.address == c && !blk.free));
    assert_arena_invariants(&arena);
}

#[test]
fn test_coalesce_merges_left_and_right() {
    let mut arena = Arena::new(1024);
    let a = arena.allocate(100).unwrap();
    let b = arena.allocate(100).unwrap();
    let c = arena.allocate(100).unwrap();
    arena.allocate(724).unwrap();

    arena.deallocate(a).unwrap();
    arena.deallocate(c).unwrap();
    // Freeing b bridges both gaps into [0..300)
    arena.deallocate(b).unwrap();

    let blocks = arena.blocks();
    assert!(blocks.contains(&Block::free_at(0, 300)));
    assert_eq!(blocks.iter().filter(|blk| blk.free).count(), 1);
    assert_arena_invariants(&arena);
}

#[test]
fn test_split_then_refill_keeps_coverage() {
    let mut arena = Arena::new(1024);
    let a = arena.allocate(512).unwrap();
    arena.deallocate(a).unwrap();

    // Refill the same space in smaller pieces
    assert_eq!(arena.allocate(256).unwrap(), 0);
    assert_eq!(arena.allocate(128).unwrap(), 256);
    assert_eq!(arena.allocate(128).unwrap(), 384);
    assert_eq!(arena.total_free_memory(), 512);
    assert_arena_invariants(&arena);
}
