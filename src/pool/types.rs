/*!
 * Pool Types
 * Fixed-size slot pool metadata and statistics
 */

use crate::core::types::{Address, PoolId, Size};
use serde::{Deserialize, Serialize};

/// A contiguous arena region partitioned into equal-sized slots.
///
/// The pool owns its backing arena block for its whole lifetime; pruning
/// returns the block to the arena.
#[derive(Debug, Clone)]
pub struct Pool {
    id: PoolId,
    block_size: Size,
    base_address: Address,
    total_slots: usize,
    used_slots: usize,
    // LIFO: the most recently freed slot is handed out next
    free_slots: Vec<Address>,
    reclaim: bool,
}

impl Pool {
    pub(super) fn new(id: PoolId, block_size: Size, base_address: Address, total_slots: usize) -> Self {
        // Reverse order so the first allocations come out ascending from base
        let free_slots = (0..total_slots)
            .rev()
            .map(|k| base_address + k * block_size)
            .collect();
        Self {
            id,
            block_size,
            base_address,
            total_slots,
            used_slots: 0,
            free_slots,
            reclaim: false,
        }
    }

    pub fn id(&self) -> PoolId {
        self.id
    }

    pub fn block_size(&self) -> Size {
        self.block_size
    }

    pub fn base_address(&self) -> Address {
        self.base_address
    }

    pub fn total_slots(&self) -> usize {
        self.total_slots
    }

    pub fn used_slots(&self) -> usize {
        self.used_slots
    }

    pub fn free_slot_count(&self) -> usize {
        self.free_slots.len()
    }

    /// Bytes of the backing arena block
    pub fn region_bytes(&self) -> Size {
        self.block_size * self.total_slots
    }

    pub fn utilization(&self) -> f64 {
        self.used_slots as f64 / self.total_slots as f64
    }

    pub fn contains(&self, address: Address) -> bool {
        address >= self.base_address && address < self.base_address + self.region_bytes()
    }

    pub(super) fn has_free_slot(&self) -> bool {
        !self.free_slots.is_empty()
    }

    pub(super) fn take_slot(&mut self) -> Option<Address> {
        let address = self.free_slots.pop()?;
        self.used_slots += 1;
        Some(address)
    }

    /// Return a slot; false when `address` is not a live slot of this pool
    pub(super) fn release_slot(&mut self, address: Address) -> bool {
        let offset = address - self.base_address;
        if offset % self.block_size != 0
            || self.used_slots == 0
            || self.free_slots.contains(&address)
        {
            return false;
        }
        self.free_slots.push(address);
        self.used_slots -= 1;
        true
    }

    pub(super) fn marked_for_reclaim(&self) -> bool {
        self.reclaim
    }

    pub(super) fn set_reclaim(&mut self, reclaim: bool) {
        self.reclaim = reclaim;
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            id: self.id,
            block_size: self.block_size,
            base_address: self.base_address,
            total_slots: self.total_slots,
            used_slots: self.used_slots,
            utilization: self.utilization(),
            marked_for_reclaim: self.reclaim,
        }
    }
}

/// Per-pool statistics snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolStats {
    pub id: PoolId,
    pub block_size: Size,
    pub base_address: Address,
    pub total_slots: usize,
    pub used_slots: usize,
    pub utilization: f64,
    pub marked_for_reclaim: bool,
}
