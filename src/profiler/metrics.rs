/*!
 * Performance Metrics
 * Hit rate, timing, and per-strategy efficiency scoring
 */

use super::types::PerformanceMetrics;
use super::Profiler;
use std::collections::HashMap;

impl Profiler {
    /// Snapshot the engine-level performance metrics
    pub fn performance_metrics(&self) -> PerformanceMetrics {
        let fragmentation_ratio = self.arena.read().fragmentation_ratio();

        let total = self.history.len() as u64;
        let successful = self
            .history
            .iter()
            .filter(|record| record.active || record.deallocation_time.is_some())
            .count() as u64;
        // No attempts means no misses
        let hit_rate = if total == 0 {
            1.0
        } else {
            successful as f64 / total as f64
        };

        let strategy_efficiency: HashMap<_, _> = self
            .strategy_metrics
            .iter()
            .map(|(strategy, metrics)| (*strategy, Self::efficiency_score(metrics)))
            .collect();

        PerformanceMetrics {
            fragmentation_ratio,
            average_allocation_time_us: self.average_inter_arrival_us(),
            hit_rate,
            failed_allocations: total - successful,
            strategy_efficiency,
        }
    }

    /// Mean gap between consecutive history records, in microseconds.
    /// Preserves the inter-arrival definition rather than true latency.
    fn average_inter_arrival_us(&self) -> f64 {
        if self.history.len() < 2 {
            return 0.0;
        }
        let mut sum = 0.0;
        let mut previous = None;
        for record in &self.history {
            if let Some(prev) = previous {
                sum += record.allocation_time.saturating_sub(prev) as f64;
            }
            previous = Some(record.allocation_time);
        }
        sum / (self.history.len() - 1) as f64
    }

    /// `0.4*hit_rate + 0.4*(1 - fragmentation) + 0.2*(1 / (1 + avg_time))`
    fn efficiency_score(metrics: &PerformanceMetrics) -> f64 {
        metrics.hit_rate * 0.4
            + (1.0 - metrics.fragmentation_ratio) * 0.4
            + (1.0 / (1.0 + metrics.average_allocation_time_us)) * 0.2
    }
}
