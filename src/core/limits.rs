/*!
 * Engine Limits and Constants
 *
 * Centralized location for tuning defaults, thresholds, and magic numbers.
 * Values the adaptation loop mutates at runtime start from these defaults
 * and stay inside the clamp ranges defined here.
 */

// =============================================================================
// ARENA DEFAULTS
// =============================================================================

/// Total simulated arena size (16MB)
/// Used as default capacity when no explicit size is configured
pub const DEFAULT_TOTAL_MEMORY: usize = 16 * 1024 * 1024;

// =============================================================================
// ADAPTATION DEFAULTS
// =============================================================================

/// Fragmentation ratio above which the controller swaps placement strategy
pub const DEFAULT_FRAGMENTATION_THRESHOLD: f64 = 0.30;

/// Minimum observed allocations of a size before a pool is justified
pub const DEFAULT_POOL_CREATION_THRESHOLD: u64 = 100;

/// Operations between adaptation steps
pub const DEFAULT_ADAPTATION_INTERVAL: usize = 1000;

/// Hit rate below which the fragmentation threshold is relaxed
pub const HIT_RATE_RELAX_BELOW: f64 = 0.8;

/// Hit rate above which the fragmentation threshold is tightened
pub const HIT_RATE_TIGHTEN_ABOVE: f64 = 0.95;

/// Failed-allocation count that makes pool creation more aggressive
pub const FAILED_ALLOCATION_CUTOFF: u64 = 100;

/// Mean allocation time (microseconds) above which adaptation slows down
pub const SLOW_ALLOCATION_US: f64 = 1000.0;

/// Clamp range for the runtime fragmentation threshold
/// Unbounded multiplication by 1.1/0.9 would otherwise drift into
/// degenerate always-adapt or never-adapt states
pub const MIN_FRAGMENTATION_THRESHOLD: f64 = 0.05;
pub const MAX_FRAGMENTATION_THRESHOLD: f64 = 0.95;

/// Clamp range for the runtime adaptation interval (operations)
pub const MIN_ADAPTATION_INTERVAL: usize = 10;
pub const MAX_ADAPTATION_INTERVAL: usize = 1_000_000;

// =============================================================================
// POOL DEFAULTS
// =============================================================================

/// Slot count for pools created on the allocation fast path
pub const DEFAULT_POOL_SLOT_COUNT: usize = 10;

/// Utilisation floor below which a pool is flagged for reclamation
pub const DEFAULT_POOL_PRUNE_UTILISATION: f64 = 0.20;

/// Minimum slot count for pools created from a prediction
pub const MIN_PREDICTED_POOL_SLOTS: usize = 5;

/// Slots granted per unit of prediction confidence
pub const CONFIDENCE_SLOT_SCALE: f64 = 20.0;

// =============================================================================
// PROFILER DEFAULTS
// =============================================================================

/// Bounded allocation history length (FIFO eviction past this)
pub const DEFAULT_HISTORY_CAP: usize = 10_000;

/// Hot-spot bucketing granularity (4KB regions)
pub const DEFAULT_HOTSPOT_REGION_BYTES: usize = 4096;

/// How many top sizes a pattern reports
pub const TOP_COMMON_SIZES: usize = 5;

/// How many hot regions a pattern reports
pub const MAX_HOT_SPOTS: usize = 10;

/// Distribution share above which a size is recommended for pooling
pub const POOL_RECOMMEND_SHARE: f64 = 0.1;

/// Size variance below which best-fit placement scores higher
pub const SIZE_VARIANCE_CUTOFF: f64 = 1000.0;

/// Hot-spot count above which worst-fit placement scores higher
pub const HOT_SPOT_STRATEGY_CUTOFF: usize = 5;

/// Mean lifetime (milliseconds) below which allocations count as short-lived
pub const SHORT_LIFETIME_MS: f64 = 1000.0;

/// Percentage share cutoff for pool configuration recommendations
pub const POOL_GROUP_SHARE_PCT: u64 = 5;
