/*!
 * Pattern Analysis Tests
 * Common sizes, lifetimes, distributions, hot spots, and predictions
 */

use adaptive_alloc::{Arena, ManualClock, PlacementStrategy, Profiler};
use parking_lot::RwLock;
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn profiler() -> (Profiler, Arc<ManualClock>) {
    profiler_with_cap(10_000)
}

fn profiler_with_cap(cap: usize) -> (Profiler, Arc<ManualClock>) {
    let arena = Arc::new(RwLock::new(Arena::new(64 * 1024)));
    let clock = Arc::new(ManualClock::new());
    let profiler = Profiler::new(arena, clock.clone(), cap, 4096);
    (profiler, clock)
}

#[test]
fn test_common_sizes_order_and_tie_break() {
    let (mut profiler, _clock) = profiler();

    for _ in 0..3 {
        profiler.record_allocation(128, 0, 0);
    }
    for _ in 0..3 {
        profiler.record_allocation(64, 0, 0);
    }
    for _ in 0..2 {
        profiler.record_allocation(256, 0, 0);
    }

    let pattern = profiler.analyze_patterns();
    // 64 and 128 tie at three observations; the smaller size leads
    assert_eq!(pattern.common_sizes, vec![64, 128, 256]);
}

#[test]
fn test_size_distribution_sums_to_one() {
    let (mut profiler, _clock) = profiler();

    for _ in 0..6 {
        profiler.record_allocation(64, 0, 0);
    }
    for _ in 0..4 {
        profiler.record_allocation(512, 0, 0);
    }

    let pattern = profiler.analyze_patterns();
    assert_eq!(pattern.size_distribution[&64], 0.6);
    assert_eq!(pattern.size_distribution[&512], 0.4);

    let total: f64 = pattern.size_distribution.values().sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[test]
fn test_average_lifetime_from_completed_records() {
    let (mut profiler, clock) = profiler();

    profiler.record_allocation(100, 0, 0);
    clock.advance_millis(500);
    profiler.record_deallocation(0);

    profiler.record_allocation(200, 4096, 0);
    clock.advance_millis(1500);
    profiler.record_deallocation(4096);

    // Still-active records contribute nothing
    profiler.record_allocation(300, 8192, 0);

    let pattern = profiler.analyze_patterns();
    assert!((pattern.average_lifetime_ms - 1000.0).abs() < 1e-9);
}

#[test]
fn test_hot_spots_bucket_by_region() {
    let (mut profiler, _clock) = profiler();

    // Three hits in region 0, one in region 1
    profiler.record_allocation(64, 0, 0);
    profiler.record_allocation(64, 128, 0);
    profiler.record_allocation(64, 4000, 0);
    profiler.record_allocation(64, 4096, 0);

    let pattern = profiler.analyze_patterns();
    assert_eq!(pattern.hot_spots[0], (0, 3));
    assert!(pattern.hot_spots.contains(&(1, 1)));
}

#[test]
fn test_hot_spots_ignore_failure_records() {
    let (mut profiler, _clock) = profiler();

    profiler.record_allocation(64, 4096, 0);
    profiler.record_failed_allocation(1 << 30);
    profiler.record_failed_allocation(1 << 30);

    let pattern = profiler.analyze_patterns();
    // The zero-address placeholders never show up as region 0 traffic
    assert_eq!(pattern.hot_spots, vec![(1, 1)]);
}

#[test]
fn test_prediction_follows_dominant_size() {
    let (mut profiler, _clock) = profiler();

    for _ in 0..9 {
        profiler.record_allocation(64, 0, 0);
    }
    profiler.record_allocation(4096, 0, 0);

    let prediction = profiler.predict_next_allocation();
    assert_eq!(prediction.next_likely_size, 64);
    // Both sizes clear the 10% pooling share... 4096 sits exactly at 10%
    assert!(prediction.recommended_pool_sizes.contains(&64));
    assert!(!prediction.recommended_pool_sizes.contains(&4096));
    // All observations are covered by the top sizes
    assert!((prediction.confidence - 1.0).abs() < 1e-9);
}

#[test]
fn test_empty_profiler_predicts_nothing() {
    let (profiler, _clock) = profiler();

    let prediction = profiler.predict_next_allocation();
    assert_eq!(prediction.next_likely_size, 0);
    assert_eq!(prediction.confidence, 0.0);
    assert!(prediction.recommended_pool_sizes.is_empty());
    assert_eq!(
        prediction.recommended_strategy,
        PlacementStrategy::FirstFit
    );
}

#[test]
fn test_consistent_sizes_recommend_best_fit() {
    let (mut profiler, clock) = profiler();

    // Uniform size, short lifetimes: variance 0 gives best-fit the edge
    for i in 0..20 {
        let addr = i * 64;
        profiler.record_allocation(64, addr, 0);
        clock.advance_millis(1);
        profiler.record_deallocation(addr);
    }

    let prediction = profiler.predict_next_allocation();
    assert_eq!(prediction.recommended_strategy, PlacementStrategy::BestFit);
}

#[test]
fn test_varied_short_lived_sizes_recommend_first_fit() {
    let (mut profiler, clock) = profiler();

    // Wildly varied sizes and sub-second lifetimes
    for (i, size) in [16usize, 4096, 16, 8192, 16, 2048].iter().enumerate() {
        let addr = i * 16;
        profiler.record_allocation(*size, addr, 0);
        clock.advance_millis(1);
        profiler.record_deallocation(addr);
    }

    let prediction = profiler.predict_next_allocation();
    assert_eq!(prediction.recommended_strategy, PlacementStrategy::FirstFit);
}

#[test]
fn test_many_hot_spots_recommend_worst_fit() {
    let (mut profiler, clock) = profiler();

    // Six distinct regions, varied sizes, long lifetimes
    for (i, size) in [16usize, 5000, 16, 5000, 16, 5000].iter().enumerate() {
        let addr = i * 4096;
        profiler.record_allocation(*size, addr, 0);
        clock.advance_millis(2000);
        profiler.record_deallocation(addr);
    }

    let prediction = profiler.predict_next_allocation();
    assert_eq!(prediction.recommended_strategy, PlacementStrategy::WorstFit);
}

#[test]
fn test_should_create_pool_threshold() {
    let (mut profiler, _clock) = profiler();

    for i in 0..99 {
        profiler.record_allocation(64, i * 64, 0);
    }
    assert!(!profiler.should_create_pool_for_size(64, 100.0));

    profiler.record_allocation(64, 99 * 64, 0);
    assert!(profiler.should_create_pool_for_size(64, 100.0));

    // A size never observed is never pooled
    assert!(!profiler.should_create_pool_for_size(128, 1.0));
}

#[test]
fn test_history_cap_evicts_fifo() {
    let (mut profiler, _clock) = profiler_with_cap(5);

    for i in 0..7 {
        profiler.record_allocation(64, i * 64, 0);
    }

    assert_eq!(profiler.history_len(), 5);
    // The two oldest records are gone
    assert_eq!(profiler.history().front().map(|r| r.address), Some(2 * 64));
    // Frequency counters are monotone and unaffected by eviction
    assert_eq!(profiler.total_observations(), 7);
}

#[test]
fn test_telemetry_totals_balance() {
    let (mut profiler, clock) = profiler();

    // Three successful allocations at the same address over time
    for _ in 0..3 {
        profiler.record_allocation(64, 512, 0);
        clock.advance_millis(10);
        profiler.record_deallocation(512);
    }
    profiler.record_allocation(64, 512, 0);

    let successes = profiler
        .history()
        .iter()
        .filter(|r| r.address == 512 && !r.is_failure())
        .count();
    let active = profiler
        .history()
        .iter()
        .filter(|r| r.address == 512 && r.active)
        .count();
    let deallocated = profiler
        .history()
        .iter()
        .filter(|r| r.address == 512 && r.deallocation_time.is_some())
        .count();

    assert_eq!(successes, active + deallocated);
    assert_eq!(active, 1);
    assert_eq!(deallocated, 3);
}

#[test]
fn test_unknown_deallocation_is_absorbed() {
    let (mut profiler, _clock) = profiler();
    profiler.record_allocation(64, 0, 0);

    // Observational subsystem: no panic, no state damage
    profiler.record_deallocation(99999);
    assert_eq!(profiler.history_len(), 1);
    assert!(profiler.history()[0].active);
}

#[test]
fn test_pool_configuration_recommendation_groups_by_power_of_two() {
    let (mut profiler, _clock) = profiler();

    for _ in 0..10 {
        profiler.record_allocation(100, 0, 0); // rounds up to 128
    }

    let recommendation = profiler.recommend_pool_configuration();
    assert_eq!(recommendation.optimal_sizes, vec![128]);
    assert_eq!(recommendation.counts, vec![100]);
}
