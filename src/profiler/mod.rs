/*!
 * Allocation Profiler
 *
 * Observational subsystem: a bounded ring of allocation records plus
 * per-size frequency and lifetime aggregates. Produces patterns,
 * predictions, and performance metrics that drive the adaptation loop.
 *
 * Recording never fails and unknown deallocations are absorbed silently;
 * the profiler watches the engine, it does not gate it.
 */

mod analysis;
mod metrics;
mod types;

pub use types::{
    AllocationPattern, AllocationRecord, PerformanceMetrics, PoolRecommendation, Prediction,
};

use crate::arena::{Arena, PlacementStrategy};
use crate::core::clock::Clock;
use crate::core::types::{Address, PoolId, Size};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Arc;

/// Bounded allocation history with derived telemetry
pub struct Profiler {
    // Non-owning: read-only access, solely for the fragmentation ratio
    arena: Arc<RwLock<Arena>>,
    clock: Arc<dyn Clock>,
    history: VecDeque<AllocationRecord>,
    history_cap: usize,
    hotspot_region_bytes: usize,
    // Monotone counters, never decremented on deallocation
    size_frequency: BTreeMap<Size, u64>,
    // Completed lifetimes in milliseconds, keyed by size
    lifetimes_ms: BTreeMap<Size, Vec<f64>>,
    // Metric snapshots stored per strategy by the adaptation loop
    strategy_metrics: HashMap<PlacementStrategy, PerformanceMetrics>,
}

impl Profiler {
    pub fn new(
        arena: Arc<RwLock<Arena>>,
        clock: Arc<dyn Clock>,
        history_cap: usize,
        hotspot_region_bytes: usize,
    ) -> Self {
        Self {
            arena,
            clock,
            history: VecDeque::new(),
            history_cap,
            hotspot_region_bytes,
            size_frequency: BTreeMap::new(),
            lifetimes_ms: BTreeMap::new(),
            strategy_metrics: HashMap::new(),
        }
    }

    /// Record a successful allocation
    pub fn record_allocation(&mut self, size: Size, address: Address, pool_id: PoolId) {
        let record = AllocationRecord {
            size,
            address,
            allocation_time: self.clock.now_micros(),
            deallocation_time: None,
            active: true,
            pool_id,
        };
        self.push_record(record);
        *self.size_frequency.entry(size).or_insert(0) += 1;
    }

    /// Record a failed allocation attempt as an inactive zero-address record.
    /// Demand for a size is observed even when placement fails.
    pub fn record_failed_allocation(&mut self, size: Size) {
        let record = AllocationRecord {
            size,
            address: 0,
            allocation_time: self.clock.now_micros(),
            deallocation_time: None,
            active: false,
            pool_id: 0,
        };
        self.push_record(record);
        *self.size_frequency.entry(size).or_insert(0) += 1;
    }

    /// Close out the most recent active record for `address` and fold its
    /// lifetime into the per-size statistics. Unknown addresses are ignored.
    pub fn record_deallocation(&mut self, address: Address) {
        let now = self.clock.now_micros();
        let mut completed: Option<(Size, f64)> = None;

        if let Some(record) = self
            .history
            .iter_mut()
            .rev()
            .find(|record| record.active && record.address == address)
        {
            record.active = false;
            record.deallocation_time = Some(now);
            let lifetime_ms = now.saturating_sub(record.allocation_time) as f64 / 1000.0;
            completed = Some((record.size, lifetime_ms));
        }

        if let Some((size, lifetime_ms)) = completed {
            self.lifetimes_ms.entry(size).or_default().push(lifetime_ms);
        }
    }

    fn push_record(&mut self, record: AllocationRecord) {
        self.history.push_back(record);
        if self.history.len() > self.history_cap {
            self.history.pop_front();
        }
    }

    /// Total observations across all sizes (monotone, unaffected by the
    /// history cap)
    pub fn total_observations(&self) -> u64 {
        self.size_frequency.values().sum()
    }

    /// True when the observed demand for `size` justifies a dedicated pool
    pub fn should_create_pool_for_size(&self, size: Size, threshold: f64) -> bool {
        let total = self.total_observations();
        if total == 0 {
            return false;
        }
        let share = match self.size_frequency.get(&size) {
            Some(count) => *count as f64 / total as f64,
            None => return false,
        };
        (share * total as f64).floor() >= threshold
    }

    /// Store the metric snapshot the per-strategy efficiency map is
    /// computed from
    pub fn record_strategy_metrics(
        &mut self,
        strategy: PlacementStrategy,
        metrics: PerformanceMetrics,
    ) {
        self.strategy_metrics.insert(strategy, metrics);
    }

    pub fn history(&self) -> &VecDeque<AllocationRecord> {
        &self.history
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}
