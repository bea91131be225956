/*!
 * Engine Configuration
 * Construction-time tuning knobs and their defaults
 */

use crate::core::limits;
use crate::core::types::Size;
use serde::{Deserialize, Serialize};

/// Construction-time configuration for the adaptive engine.
///
/// `total_size` is the simulated arena capacity; everything else seeds the
/// runtime-mutable adaptive parameters and telemetry bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub total_size: Size,
    pub fragmentation_threshold: f64,
    pub pool_creation_threshold: u64,
    pub adaptation_interval: usize,
    pub history_cap: usize,
    pub pool_default_slot_count: usize,
    pub pool_prune_utilisation: f64,
    pub hotspot_region_bytes: usize,
}

impl EngineConfig {
    pub fn new(total_size: Size) -> Self {
        Self {
            total_size,
            fragmentation_threshold: limits::DEFAULT_FRAGMENTATION_THRESHOLD,
            pool_creation_threshold: limits::DEFAULT_POOL_CREATION_THRESHOLD,
            adaptation_interval: limits::DEFAULT_ADAPTATION_INTERVAL,
            history_cap: limits::DEFAULT_HISTORY_CAP,
            pool_default_slot_count: limits::DEFAULT_POOL_SLOT_COUNT,
            pool_prune_utilisation: limits::DEFAULT_POOL_PRUNE_UTILISATION,
            hotspot_region_bytes: limits::DEFAULT_HOTSPOT_REGION_BYTES,
        }
    }

    pub fn with_fragmentation_threshold(mut self, threshold: f64) -> Self {
        self.fragmentation_threshold = threshold;
        self
    }

    pub fn with_pool_creation_threshold(mut self, threshold: u64) -> Self {
        self.pool_creation_threshold = threshold;
        self
    }

    pub fn with_adaptation_interval(mut self, interval: usize) -> Self {
        self.adaptation_interval = interval;
        self
    }

    pub fn with_history_cap(mut self, cap: usize) -> Self {
        self.history_cap = cap;
        self
    }

    pub fn with_pool_default_slot_count(mut self, slots: usize) -> Self {
        self.pool_default_slot_count = slots;
        self
    }

    pub fn with_pool_prune_utilisation(mut self, floor: f64) -> Self {
        self.pool_prune_utilisation = floor;
        self
    }

    pub fn with_hotspot_region_bytes(mut self, bytes: usize) -> Self {
        self.hotspot_region_bytes = bytes;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(limits::DEFAULT_TOTAL_MEMORY)
    }
}
