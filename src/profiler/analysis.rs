/*!
 * Pattern Analysis
 * Derives patterns and predictions from the recorded history
 */

use super::types::{AllocationPattern, PoolRecommendation, Prediction};
use super::Profiler;
use crate::arena::PlacementStrategy;
use crate::core::limits::{
    HOT_SPOT_STRATEGY_CUTOFF, MAX_HOT_SPOTS, POOL_GROUP_SHARE_PCT, POOL_RECOMMEND_SHARE,
    SHORT_LIFETIME_MS, SIZE_VARIANCE_CUTOFF, TOP_COMMON_SIZES,
};
use crate::core::types::Size;
use std::collections::BTreeMap;

impl Profiler {
    /// Summarise the recorded history into a pattern
    pub fn analyze_patterns(&self) -> AllocationPattern {
        let mut by_frequency: Vec<(Size, u64)> = self
            .size_frequency
            .iter()
            .map(|(size, count)| (*size, *count))
            .collect();
        by_frequency.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let common_sizes = by_frequency
            .iter()
            .take(TOP_COMMON_SIZES)
            .map(|(size, _)| *size)
            .collect();

        let mut lifetime_total = 0.0;
        let mut lifetime_count = 0usize;
        for samples in self.lifetimes_ms.values() {
            lifetime_total += samples.iter().sum::<f64>();
            lifetime_count += samples.len();
        }
        let average_lifetime_ms = if lifetime_count > 0 {
            lifetime_total / lifetime_count as f64
        } else {
            0.0
        };

        let total_observations: u64 = by_frequency.iter().map(|(_, count)| count).sum();
        let size_distribution = if total_observations > 0 {
            by_frequency
                .iter()
                .map(|(size, count)| (*size, *count as f64 / total_observations as f64))
                .collect()
        } else {
            BTreeMap::new()
        };

        AllocationPattern {
            common_sizes,
            average_lifetime_ms,
            size_distribution,
            hot_spots: self.identify_hot_spots(),
        }
    }

    /// Top regions by allocation count. Failure records carry a placeholder
    /// address and are excluded from bucketing.
    fn identify_hot_spots(&self) -> Vec<(usize, u64)> {
        let mut by_region: BTreeMap<usize, u64> = BTreeMap::new();
        for record in &self.history {
            if record.is_failure() {
                continue;
            }
            let region = record.address / self.hotspot_region_bytes;
            *by_region.entry(region).or_insert(0) += 1;
        }

        let mut regions: Vec<(usize, u64)> = by_region.into_iter().collect();
        regions.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        regions.truncate(MAX_HOT_SPOTS);
        regions
    }

    /// Forward-looking recommendation for the adaptation loop
    pub fn predict_next_allocation(&self) -> Prediction {
        let pattern = self.analyze_patterns();

        let next_likely_size = pattern.common_sizes.first().copied().unwrap_or(0);
        let recommended_strategy = Self::determine_optimal_strategy(&pattern);
        let confidence = self.pattern_confidence(&pattern.common_sizes);
        let recommended_pool_sizes = pattern
            .size_distribution
            .iter()
            .filter(|(_, share)| **share > POOL_RECOMMEND_SHARE)
            .map(|(size, _)| *size)
            .collect();

        Prediction {
            next_likely_size,
            recommended_strategy,
            recommended_pool_sizes,
            confidence,
        }
    }

    /// Score the three placement strategies against the pattern.
    /// Ties resolve first-fit, then best-fit, then worst-fit.
    fn determine_optimal_strategy(pattern: &AllocationPattern) -> PlacementStrategy {
        let mut first_fit = 0.0;
        let mut best_fit = 0.0;
        let mut worst_fit = 0.0;

        if let Some(&anchor) = pattern.common_sizes.first() {
            let mut size_variance = 0.0;
            for (&size, &share) in &pattern.size_distribution {
                let delta = size as f64 - anchor as f64;
                size_variance += delta * delta * share;
            }

            if size_variance < SIZE_VARIANCE_CUTOFF {
                best_fit += 0.5; // consistent sizes pack tightly
            } else {
                first_fit += 0.3; // varied sizes need flexibility
            }

            if pattern.hot_spots.len() > HOT_SPOT_STRATEGY_CUTOFF {
                worst_fit += 0.4; // spread contended regions apart
            }

            if pattern.average_lifetime_ms < SHORT_LIFETIME_MS {
                first_fit += 0.4;
            } else {
                best_fit += 0.3;
            }
        }

        if first_fit >= best_fit && first_fit >= worst_fit {
            PlacementStrategy::FirstFit
        } else if best_fit >= worst_fit {
            PlacementStrategy::BestFit
        } else {
            PlacementStrategy::WorstFit
        }
    }

    /// Share of all observations covered by the given sizes
    fn pattern_confidence(&self, sizes: &[Size]) -> f64 {
        let total = self.total_observations();
        if sizes.is_empty() || total == 0 {
            return 0.0;
        }
        let covered: u64 = sizes
            .iter()
            .filter_map(|size| self.size_frequency.get(size))
            .sum();
        covered as f64 / total as f64
    }

    /// Group sizes by power of two and suggest pools for the heavy groups
    pub fn recommend_pool_configuration(&self) -> PoolRecommendation {
        let pattern = self.analyze_patterns();

        let mut groups: BTreeMap<Size, u64> = BTreeMap::new();
        for (&size, &share) in &pattern.size_distribution {
            let rounded = size.max(1).next_power_of_two();
            *groups.entry(rounded).or_insert(0) += (share * 100.0).round() as u64;
        }

        let mut optimal_sizes = Vec::new();
        let mut counts = Vec::new();
        for (&size, &pct) in &groups {
            if pct >= POOL_GROUP_SHARE_PCT {
                optimal_sizes.push(size);
                counts.push(pct);
            }
        }

        let current = self.arena.read().fragmentation_ratio();
        let expected = current * 0.7;
        let expected_improvement_pct = if current > 0.0 {
            (current - expected) / current * 100.0
        } else {
            0.0
        };

        PoolRecommendation {
            optimal_sizes,
            counts,
            expected_improvement_pct,
        }
    }
}
