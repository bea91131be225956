/*!
 * Adaptation Step
 * Telemetry-driven strategy swaps, pool optimisation, and parameter tuning
 */

use super::AdaptiveAllocator;
use crate::core::limits::{
    CONFIDENCE_SLOT_SCALE, FAILED_ALLOCATION_CUTOFF, HIT_RATE_RELAX_BELOW,
    HIT_RATE_TIGHTEN_ABOVE, MAX_ADAPTATION_INTERVAL, MAX_FRAGMENTATION_THRESHOLD,
    MIN_ADAPTATION_INTERVAL, MIN_FRAGMENTATION_THRESHOLD, MIN_PREDICTED_POOL_SLOTS,
    SLOW_ALLOCATION_US,
};
use crate::profiler::{PerformanceMetrics, Prediction};
use log::info;

impl AdaptiveAllocator {
    /// One adaptation pass: read telemetry, mutate strategy, pools, and
    /// parameters, then reset the operation counter.
    pub(super) fn adapt(&mut self) {
        if !self.adaptive_mode {
            return;
        }

        let metrics = self.profiler.performance_metrics();
        let prediction = self.profiler.predict_next_allocation();

        let active = self.arena.read().strategy();
        self.profiler
            .record_strategy_metrics(active, metrics.clone());

        if metrics.fragmentation_ratio > self.params.fragmentation_threshold {
            info!(
                "fragmentation {:.2} over threshold {:.2}: switching {} -> {}",
                metrics.fragmentation_ratio,
                self.params.fragmentation_threshold,
                active,
                prediction.recommended_strategy
            );
            self.arena
                .write()
                .set_strategy(prediction.recommended_strategy);
        }

        self.optimize_pools(&prediction);
        self.adjust_parameters(&metrics);
        self.params.operations_since_last_adaptation = 0;
    }

    /// Prune flagged pools, then create pools for predicted hot sizes that
    /// lack one. Slot counts scale with prediction confidence.
    fn optimize_pools(&mut self, prediction: &Prediction) {
        let reclaimed = self.pools.prune();
        if reclaimed > 0 {
            info!("pool pruning returned {} bytes to the arena", reclaimed);
        }

        for &size in &prediction.recommended_pool_sizes {
            if self.pools.has_pool_for(size) {
                continue;
            }
            let slots = ((prediction.confidence * CONFIDENCE_SLOT_SCALE).round() as usize)
                .max(MIN_PREDICTED_POOL_SLOTS);
            self.pools.create_pool(size, slots);
        }
    }

    fn adjust_parameters(&mut self, metrics: &PerformanceMetrics) {
        if metrics.hit_rate < HIT_RATE_RELAX_BELOW {
            self.params.fragmentation_threshold *= 1.1;
        } else if metrics.hit_rate > HIT_RATE_TIGHTEN_ABOVE {
            self.params.fragmentation_threshold *= 0.9;
        }
        self.params.fragmentation_threshold = self
            .params
            .fragmentation_threshold
            .clamp(MIN_FRAGMENTATION_THRESHOLD, MAX_FRAGMENTATION_THRESHOLD);

        if metrics.failed_allocations > FAILED_ALLOCATION_CUTOFF {
            self.params.pool_creation_threshold =
                (self.params.pool_creation_threshold * 0.9).max(1.0);
        }

        let interval = self.params.adaptation_interval as f64;
        let interval = if metrics.average_allocation_time_us > SLOW_ALLOCATION_US {
            interval * 1.2
        } else {
            interval * 0.8
        };
        self.params.adaptation_interval =
            (interval.round() as usize).clamp(MIN_ADAPTATION_INTERVAL, MAX_ADAPTATION_INTERVAL);
    }
}
