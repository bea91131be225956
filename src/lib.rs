/*!
 * Adaptive Allocation Engine
 *
 * Simulates a user-space memory allocator over a single contiguous address
 * range of fixed total size:
 * - Free-list arena with split-on-allocate, coalesce-on-free, and
 *   first/best/worst-fit placement policies
 * - Fixed-size slot pools carved out of the arena for hot sizes
 * - A profiler that classifies allocation patterns and emits predictions
 * - An adaptive controller that reconfigures strategy, pools, and its own
 *   tuning parameters from that telemetry
 * - A leak-tracking sidecar recording every outstanding allocation with
 *   its capture site
 *
 * Addresses are abstract offsets into the simulated arena and are never
 * dereferenced. The engine is single-threaded cooperative; callers that
 * share it across threads must serialise every public call.
 */

pub mod adaptive;
pub mod arena;
pub mod core;
pub mod leak;
pub mod pool;
pub mod profiler;
pub mod traits;

// Re-export for convenience
pub use crate::adaptive::{AdaptiveAllocator, AdaptiveParameters, EngineConfig};
pub use crate::arena::{Arena, ArenaStats, Block, PlacementStrategy};
pub use crate::core::clock::{Clock, ManualClock, MonotonicClock};
pub use crate::core::errors::{AllocError, AllocResult};
pub use crate::core::types::{Address, PoolId, Size, Timestamp, DIRECT_ALLOCATION};
pub use crate::leak::{CaptureSite, LeakEntry, LeakStats, LeakTracker};
pub use crate::pool::{Pool, PoolManager, PoolStats};
pub use crate::profiler::{
    AllocationPattern, AllocationRecord, PerformanceMetrics, PoolRecommendation, Prediction,
    Profiler,
};
pub use crate::traits::{Allocator, MemoryInfo};
