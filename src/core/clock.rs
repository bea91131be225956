/*!
 * Clock Service
 * Injected monotonic time source with microsecond resolution
 */

use crate::core::types::Timestamp;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Monotonic time source injected at engine construction.
///
/// Lifetime statistics and inter-arrival metrics assume monotonicity, so
/// implementations must never go backwards.
pub trait Clock: Send + Sync {
    /// Microseconds since the clock's epoch
    fn now_micros(&self) -> Timestamp;
}

/// Default clock anchored to its own construction time
#[derive(Debug)]
pub struct MonotonicClock {
    epoch: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_micros(&self) -> Timestamp {
        self.epoch.elapsed().as_micros() as Timestamp
    }
}

/// Hand-driven clock for deterministic tests and simulations
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: AtomicU64::new(0),
        }
    }

    pub fn advance_micros(&self, delta: Timestamp) {
        self.now.fetch_add(delta, Ordering::SeqCst);
    }

    pub fn advance_millis(&self, delta: u64) {
        self.advance_micros(delta * 1000);
    }
}

impl Clock for ManualClock {
    fn now_micros(&self) -> Timestamp {
        self.now.load(Ordering::SeqCst)
    }
}
