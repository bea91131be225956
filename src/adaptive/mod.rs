/*!
 * Adaptive Controller
 *
 * The outermost allocate/deallocate surface. Routes requests through the
 * pool manager before the arena, feeds every outcome to the profiler and
 * leak tracker, and periodically mutates its own placement strategy, pool
 * set, and tuning parameters from the profiler's predictions.
 */

mod adapt;
mod allocator;
mod config;
mod types;

pub use config::EngineConfig;
pub use types::AdaptiveParameters;

use crate::arena::{Arena, ArenaStats, PlacementStrategy};
use crate::core::clock::{Clock, MonotonicClock};
use crate::core::errors::AllocResult;
use crate::core::types::{Address, Size};
use crate::leak::LeakTracker;
use crate::pool::{PoolManager, PoolStats};
use crate::profiler::{PerformanceMetrics, Prediction, Profiler};
use crate::traits::{Allocator, MemoryInfo};
use parking_lot::RwLock;
use std::sync::Arc;

/// Adaptive allocation engine over a simulated arena
pub struct AdaptiveAllocator {
    // Owned here; pool manager and profiler hold non-owning clones
    arena: Arc<RwLock<Arena>>,
    pools: PoolManager,
    profiler: Profiler,
    leaks: LeakTracker,
    params: AdaptiveParameters,
    config: EngineConfig,
    adaptive_mode: bool,
}

impl AdaptiveAllocator {
    /// Create an engine with default tuning over `total_size` bytes
    pub fn new(total_size: Size) -> Self {
        Self::with_config(EngineConfig::new(total_size))
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_config_and_clock(config, Arc::new(MonotonicClock::new()))
    }

    /// Construct with an injected clock (deterministic tests, simulations)
    pub fn with_config_and_clock(config: EngineConfig, clock: Arc<dyn Clock>) -> Self {
        let arena = Arc::new(RwLock::new(Arena::new(config.total_size)));
        let pools = PoolManager::new(Arc::clone(&arena));
        let profiler = Profiler::new(
            Arc::clone(&arena),
            Arc::clone(&clock),
            config.history_cap,
            config.hotspot_region_bytes,
        );
        let leaks = LeakTracker::new(Arc::clone(&clock));
        let params = AdaptiveParameters::from_config(&config);

        Self {
            arena,
            pools,
            profiler,
            leaks,
            params,
            config,
            adaptive_mode: true,
        }
    }

    /// Toggle adaptive behaviour. Enabling resets the operation counter and
    /// runs an immediate adaptation pass.
    pub fn enable_adaptive_mode(&mut self, enable: bool) {
        self.adaptive_mode = enable;
        if enable {
            self.params.operations_since_last_adaptation = 0;
            self.adapt();
        }
    }

    pub fn adaptive_mode(&self) -> bool {
        self.adaptive_mode
    }

    pub fn performance_metrics(&self) -> PerformanceMetrics {
        self.profiler.performance_metrics()
    }

    pub fn prediction(&self) -> Prediction {
        self.profiler.predict_next_allocation()
    }

    pub fn fragmentation_ratio(&self) -> f64 {
        self.arena.read().fragmentation_ratio()
    }

    pub fn total_free_memory(&self) -> Size {
        self.arena.read().total_free_memory()
    }

    pub fn largest_free_block(&self) -> Size {
        self.arena.read().largest_free_block()
    }

    pub fn total_memory(&self) -> Size {
        self.arena.read().total_memory()
    }

    pub fn strategy(&self) -> PlacementStrategy {
        self.arena.read().strategy()
    }

    /// Manual strategy override; adaptation may swap it again later
    pub fn set_strategy(&mut self, strategy: PlacementStrategy) {
        self.arena.write().set_strategy(strategy);
    }

    pub fn arena_stats(&self) -> ArenaStats {
        self.arena.read().stats()
    }

    pub fn pool_stats(&self) -> Vec<PoolStats> {
        self.pools.stats()
    }

    pub fn parameters(&self) -> &AdaptiveParameters {
        &self.params
    }

    pub fn leak_tracker(&self) -> &LeakTracker {
        &self.leaks
    }

    pub fn profiler(&self) -> &Profiler {
        &self.profiler
    }
}

// Implement trait interfaces
impl Allocator for AdaptiveAllocator {
    fn allocate(&mut self, size: Size) -> AllocResult<Address> {
        AdaptiveAllocator::allocate(self, size)
    }

    fn deallocate(&mut self, address: Address) -> AllocResult<()> {
        AdaptiveAllocator::deallocate(self, address)
    }
}

impl MemoryInfo for AdaptiveAllocator {
    fn total_memory(&self) -> Size {
        AdaptiveAllocator::total_memory(self)
    }

    fn total_free_memory(&self) -> Size {
        AdaptiveAllocator::total_free_memory(self)
    }

    fn largest_free_block(&self) -> Size {
        AdaptiveAllocator::largest_free_block(self)
    }

    fn fragmentation_ratio(&self) -> f64 {
        AdaptiveAllocator::fragmentation_ratio(self)
    }
}
