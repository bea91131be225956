/*!
 * Adaptive Parameters
 * Runtime-mutable tuning state for the adaptation loop
 */

use super::config::EngineConfig;
use serde::{Deserialize, Serialize};

/// Tuning state the adaptation step mutates.
///
/// `pool_creation_threshold` is kept as a float so repeated 0.9 multipliers
/// stay smooth; comparisons against observation counts floor it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptiveParameters {
    pub fragmentation_threshold: f64,
    pub pool_creation_threshold: f64,
    pub adaptation_interval: usize,
    pub operations_since_last_adaptation: usize,
}

impl AdaptiveParameters {
    pub(super) fn from_config(config: &EngineConfig) -> Self {
        Self {
            fragmentation_threshold: config.fragmentation_threshold,
            pool_creation_threshold: config.pool_creation_threshold as f64,
            adaptation_interval: config.adaptation_interval,
            operations_since_last_adaptation: 0,
        }
    }
}
