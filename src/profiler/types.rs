/*!
 * Profiler Types
 * Allocation records, patterns, predictions, and performance metrics
 */

use crate::arena::PlacementStrategy;
use crate::core::types::{Address, PoolId, Size, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One entry in the profiler's bounded history.
///
/// Failed allocation attempts are recorded too: an inactive record with
/// address 0 and no deallocation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationRecord {
    pub size: Size,
    pub address: Address,
    pub allocation_time: Timestamp,
    pub deallocation_time: Option<Timestamp>,
    pub active: bool,
    /// Pool that served the allocation; `DIRECT_ALLOCATION` (0) for the arena
    pub pool_id: PoolId,
}

impl AllocationRecord {
    /// A record that never became a live allocation
    pub fn is_failure(&self) -> bool {
        !self.active && self.deallocation_time.is_none()
    }
}

/// Summarised view of recent allocation behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationPattern {
    /// Top sizes by observed frequency, descending; ties go to the smaller size
    pub common_sizes: Vec<Size>,
    /// Unweighted mean of all completed lifetimes, in milliseconds
    pub average_lifetime_ms: f64,
    /// Frequency share per observed size; sums to 1 when non-empty
    pub size_distribution: BTreeMap<Size, f64>,
    /// Top `(region, count)` pairs by allocation count, descending
    pub hot_spots: Vec<(usize, u64)>,
}

/// Forward-looking recommendation derived from the current pattern
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Most common observed size, or 0 with no history
    pub next_likely_size: Size,
    pub recommended_strategy: PlacementStrategy,
    /// Sizes whose distribution share exceeds the pooling cutoff
    pub recommended_pool_sizes: Vec<Size>,
    /// Share of observations covered by the common sizes, 0..1
    pub confidence: f64,
}

/// Engine-level performance snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub fragmentation_ratio: f64,
    /// Mean inter-arrival of allocation records, in microseconds.
    /// A proxy for allocation latency, not a true latency measurement.
    pub average_allocation_time_us: f64,
    /// Successful allocations over total recorded attempts; 1.0 with no history
    pub hit_rate: f64,
    pub failed_allocations: u64,
    pub strategy_efficiency: HashMap<PlacementStrategy, f64>,
}

/// Suggested pool configuration from size grouping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolRecommendation {
    pub optimal_sizes: Vec<Size>,
    pub counts: Vec<u64>,
    pub expected_improvement_pct: f64,
}
