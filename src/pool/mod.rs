/*!
 * Pool Manager
 *
 * Carves fixed-size-block pools out of the arena and routes small hot-size
 * requests to them before they ever reach the free list. Pools own their
 * backing arena block; pruning an underutilised pool returns the block.
 */

mod types;

pub use types::{Pool, PoolStats};

use crate::arena::Arena;
use crate::core::errors::{AllocError, AllocResult};
use crate::core::types::{Address, PoolId, Size};
use log::{debug, info, warn};
use parking_lot::RwLock;
use std::sync::Arc;

/// Manages fixed-size slot pools layered above the arena
pub struct PoolManager {
    // Non-owning: the controller owns the arena, pools only carve from it
    arena: Arc<RwLock<Arena>>,
    pools: Vec<Pool>,
    next_pool_id: PoolId,
}

impl PoolManager {
    pub fn new(arena: Arc<RwLock<Arena>>) -> Self {
        Self {
            arena,
            pools: Vec::new(),
            next_pool_id: 1,
        }
    }

    /// Carve a pool of `slot_count` slots of `block_size` bytes out of the
    /// arena. Silently no-ops when the arena cannot satisfy the request.
    pub fn create_pool(&mut self, block_size: Size, slot_count: usize) -> Option<PoolId> {
        if block_size == 0 || slot_count == 0 {
            return None;
        }
        let region_bytes = block_size.checked_mul(slot_count)?;

        let base_address = match self.arena.write().allocate(region_bytes) {
            Ok(address) => address,
            Err(err) => {
                warn!(
                    "pool creation skipped ({} slots of {} bytes): {}",
                    slot_count, block_size, err
                );
                return None;
            }
        };

        let id = self.next_pool_id;
        self.next_pool_id += 1;
        self.pools.push(Pool::new(id, block_size, base_address, slot_count));

        info!(
            "created pool {} at 0x{:x}: {} slots of {} bytes",
            id, base_address, slot_count, block_size
        );
        Some(id)
    }

    /// Serve `size` from the pool with the smallest slot size that fits and
    /// has a free slot. `None` sends the caller to the arena.
    pub fn try_allocate(&mut self, size: Size) -> Option<(PoolId, Address)> {
        if size == 0 {
            return None;
        }

        let mut chosen: Option<usize> = None;
        for (idx, pool) in self.pools.iter().enumerate() {
            if pool.block_size() < size || !pool.has_free_slot() {
                continue;
            }
            let better = match chosen {
                Some(current) => pool.block_size() < self.pools[current].block_size(),
                None => true,
            };
            if better {
                chosen = Some(idx);
            }
        }

        let pool = &mut self.pools[chosen?];
        let address = pool.take_slot()?;
        debug!(
            "pool {} served {} bytes at 0x{:x} (slot size {})",
            pool.id(),
            size,
            address,
            pool.block_size()
        );
        Some((pool.id(), address))
    }

    /// Return a slot to the pool whose region contains `address`.
    ///
    /// `None` means the address is not pool-managed and belongs to the arena.
    /// An in-range address that is not a live slot is rejected here rather
    /// than falling through, where it could free the pool's backing block.
    pub fn try_deallocate(&mut self, address: Address) -> Option<AllocResult<PoolId>> {
        let pool = self.pools.iter_mut().find(|pool| pool.contains(address))?;
        if !pool.release_slot(address) {
            warn!(
                "rejected release of 0x{:x}: not a live slot of pool {}",
                address,
                pool.id()
            );
            return Some(Err(AllocError::InvalidAddress(address)));
        }
        debug!("pool {} reclaimed slot 0x{:x}", pool.id(), address);
        Some(Ok(pool.id()))
    }

    /// Recompute each pool's reclamation flag against the utilisation floor.
    /// A pool that regains utilisation is unmarked again.
    pub fn mark_underutilized(&mut self, floor: f64) {
        for pool in &mut self.pools {
            let mark = pool.utilization() < floor;
            if mark && !pool.marked_for_reclaim() {
                debug!(
                    "pool {} flagged for reclaim ({:.0}% utilised)",
                    pool.id(),
                    pool.utilization() * 100.0
                );
            }
            pool.set_reclaim(mark);
        }
    }

    /// Remove every flagged pool and return its backing block to the arena.
    /// Returns the total bytes handed back.
    pub fn prune(&mut self) -> Size {
        let mut reclaimed = 0;
        let mut kept = Vec::with_capacity(self.pools.len());

        let mut arena = self.arena.write();
        for pool in self.pools.drain(..) {
            if !pool.marked_for_reclaim() {
                kept.push(pool);
                continue;
            }
            match arena.deallocate(pool.base_address()) {
                Ok(()) => {
                    reclaimed += pool.region_bytes();
                    info!(
                        "pruned pool {} ({} bytes returned to arena)",
                        pool.id(),
                        pool.region_bytes()
                    );
                }
                Err(err) => {
                    warn!("failed to return pool {} to arena: {}", pool.id(), err);
                }
            }
        }
        drop(arena);

        self.pools = kept;
        reclaimed
    }

    /// Whether a pool with exactly this slot size exists
    pub fn has_pool_for(&self, block_size: Size) -> bool {
        self.pools.iter().any(|pool| pool.block_size() == block_size)
    }

    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    pub fn pools(&self) -> &[Pool] {
        &self.pools
    }

    pub fn stats(&self) -> Vec<PoolStats> {
        self.pools.iter().map(Pool::stats).collect()
    }
}
