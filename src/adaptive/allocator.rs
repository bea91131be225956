/*!
 * Controller Allocation Paths
 * Pool-first routing with arena fallback and full telemetry recording
 */

use super::AdaptiveAllocator;
use crate::core::errors::{AllocError, AllocResult};
use crate::core::types::{Address, Size, DIRECT_ALLOCATION};
use crate::leak::CaptureSite;
use log::debug;

impl AdaptiveAllocator {
    /// Allocate `size` bytes without a capture site
    pub fn allocate(&mut self, size: Size) -> AllocResult<Address> {
        self.allocate_inner(size, None)
    }

    /// Allocate `size` bytes, recording the caller's capture site in the
    /// leak tracker. Pair with [`capture_site!`](crate::capture_site).
    pub fn allocate_at(&mut self, size: Size, site: CaptureSite) -> AllocResult<Address> {
        self.allocate_inner(size, Some(site))
    }

    fn allocate_inner(&mut self, size: Size, site: Option<CaptureSite>) -> AllocResult<Address> {
        if size == 0 {
            self.profiler.record_failed_allocation(size);
            return Err(AllocError::ZeroSize);
        }

        if self.adaptive_mode {
            if let Some(address) = self.try_pool_allocate(size, site.clone()) {
                return Ok(address);
            }

            // Enough observed demand for this size justifies a pool now
            if self
                .profiler
                .should_create_pool_for_size(size, self.params.pool_creation_threshold)
            {
                self.pools
                    .create_pool(size, self.config.pool_default_slot_count);
                if let Some(address) = self.try_pool_allocate(size, site.clone()) {
                    return Ok(address);
                }
            }
        }

        let address = match self.arena.write().allocate(size) {
            Ok(address) => address,
            Err(err) => {
                self.profiler.record_failed_allocation(size);
                return Err(err);
            }
        };

        self.profiler
            .record_allocation(size, address, DIRECT_ALLOCATION);
        self.leaks.record_allocation(address, size, site);

        self.params.operations_since_last_adaptation += 1;
        if self.params.operations_since_last_adaptation >= self.params.adaptation_interval {
            self.adapt();
        }

        Ok(address)
    }

    fn try_pool_allocate(&mut self, size: Size, site: Option<CaptureSite>) -> Option<Address> {
        let (pool_id, address) = self.pools.try_allocate(size)?;
        self.profiler.record_allocation(size, address, pool_id);
        self.leaks.record_allocation(address, size, site);
        Some(address)
    }

    /// Release `address`, whichever layer owns it.
    ///
    /// Failures propagate with nothing recorded; on success both telemetry
    /// sinks see the deallocation and pool reclaim flags are refreshed.
    pub fn deallocate(&mut self, address: Address) -> AllocResult<()> {
        match self.pools.try_deallocate(address) {
            Some(Ok(pool_id)) => {
                debug!("released slot 0x{:x} back to pool {}", address, pool_id);
            }
            Some(Err(err)) => return Err(err),
            None => {
                self.arena.write().deallocate(address)?;
            }
        }

        self.profiler.record_deallocation(address);
        self.leaks.record_deallocation(address);
        self.pools
            .mark_underutilized(self.config.pool_prune_utilisation);
        Ok(())
    }
}
