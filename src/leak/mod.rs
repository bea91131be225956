/*!
 * Leak Tracker
 *
 * Records every outstanding allocation with its capture site. A context
 * object threaded through the controller rather than a process-wide
 * singleton; clones share the same underlying containers.
 *
 * Diagnostics here are observational: an unmatched deallocation warns, it
 * never fails the engine.
 */

mod types;

pub use types::{CaptureSite, LeakEntry, LeakStats};

use crate::core::clock::Clock;
use crate::core::types::{Address, Size};
use ahash::RandomState;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use log::warn;
use parking_lot::Mutex;
use std::sync::Arc;

/// Tracks live allocations and keeps an append-only allocation history
pub struct LeakTracker {
    active: Arc<DashMap<Address, LeakEntry, RandomState>>,
    history: Arc<Mutex<Vec<(Address, LeakEntry)>>>,
    clock: Arc<dyn Clock>,
}

impl LeakTracker {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            active: Arc::new(DashMap::with_hasher(RandomState::new())),
            history: Arc::new(Mutex::new(Vec::new())),
            clock,
        }
    }

    /// Track a new allocation. A duplicate active address is an invariant
    /// violation upstream; it is rejected and surfaced, never overwritten.
    pub fn record_allocation(&self, address: Address, size: Size, site: Option<CaptureSite>) {
        let entry = LeakEntry {
            address,
            size,
            allocation_time: self.clock.now_micros(),
            site,
        };
        self.history.lock().push((address, entry.clone()));

        match self.active.entry(address) {
            Entry::Occupied(_) => {
                warn!(
                    "duplicate active allocation at 0x{:x}; keeping the original entry",
                    address
                );
            }
            Entry::Vacant(vacant) => {
                vacant.insert(entry);
            }
        }
    }

    /// Untrack an allocation; unknown addresses get a diagnostic only
    pub fn record_deallocation(&self, address: Address) {
        if self.active.remove(&address).is_none() {
            warn!("deallocation of untracked address 0x{:x}", address);
        }
    }

    pub fn has_leaks(&self) -> bool {
        !self.active.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Sum of sizes still in the active set
    pub fn leaked_bytes(&self) -> Size {
        self.active.iter().map(|entry| entry.value().size).sum()
    }

    /// Active entries ordered by address
    pub fn active_entries(&self) -> Vec<LeakEntry> {
        let mut entries: Vec<LeakEntry> =
            self.active.iter().map(|entry| entry.value().clone()).collect();
        entries.sort_by_key(|entry| entry.address);
        entries
    }

    /// Every allocation ever recorded, including deallocated ones
    pub fn total_allocations(&self) -> usize {
        self.history.lock().len()
    }

    pub fn reset(&self) {
        self.active.clear();
        self.history.lock().clear();
    }

    pub fn stats(&self) -> LeakStats {
        let active_count = self.active.len();
        let leaked_bytes = self.leaked_bytes();
        LeakStats {
            total_allocations: self.total_allocations(),
            active_count,
            leaked_bytes,
            average_active_size: if active_count > 0 {
                leaked_bytes as f64 / active_count as f64
            } else {
                0.0
            },
        }
    }
}

impl Clone for LeakTracker {
    fn clone(&self) -> Self {
        Self {
            active: Arc::clone(&self.active),
            history: Arc::clone(&self.history),
            clock: Arc::clone(&self.clock),
        }
    }
}
