/*!
 * Core Types
 * Common aliases used across the engine
 */

/// Abstract offset into the simulated arena.
///
/// Addresses are never dereferenced; they only identify blocks and slots.
pub type Address = usize;

/// Size in bytes
pub type Size = usize;

/// Microseconds since the engine clock's epoch
pub type Timestamp = u64;

/// Pool identifier assigned by the pool manager (1-based)
pub type PoolId = u64;

/// Telemetry marker for allocations served directly by the arena
pub const DIRECT_ALLOCATION: PoolId = 0;
