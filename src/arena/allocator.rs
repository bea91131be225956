/*!
 * Arena Allocator Implementation
 * Split-on-allocate and coalesce-on-free over the ordered block list
 */

use super::types::Block;
use super::Arena;
use crate::core::errors::{AllocError, AllocResult};
use crate::core::types::{Address, Size};
use log::{debug, warn};

impl Arena {
    /// Allocate `size` bytes and return the base address of an exact-fit block.
    ///
    /// The chosen free block is split when larger than the request: the
    /// leading part becomes the allocation, the trailing remainder stays free.
    /// Failures leave the arena unchanged.
    pub fn allocate(&mut self, size: Size) -> AllocResult<Address> {
        if size == 0 {
            warn!("rejected zero-byte allocation");
            return Err(AllocError::ZeroSize);
        }

        let (address, block_size) = self
            .find_suitable_block(size)
            .ok_or(AllocError::NoFit { requested: size })?;

        if let Some(block) = self.blocks.get_mut(&address) {
            block.size = size;
            block.free = false;
        }
        if block_size > size {
            let remainder = Block::free_at(address + size, block_size - size);
            self.blocks.insert(remainder.address, remainder);
        }

        debug!("allocated {} bytes at 0x{:x} ({})", size, address, self.strategy);
        Ok(address)
    }

    /// Deallocate the block based at `address` and coalesce adjacent free runs.
    ///
    /// The address must be the base of a currently allocated block; anything
    /// else, including a block that is already free, is `InvalidAddress`.
    pub fn deallocate(&mut self, address: Address) -> AllocResult<()> {
        match self.blocks.get_mut(&address) {
            Some(block) if !block.free => {
                block.free = true;
            }
            _ => {
                warn!("invalid or already freed address: 0x{:x}", address);
                return Err(AllocError::InvalidAddress(address));
            }
        }

        self.coalesce();
        debug!("deallocated block at 0x{:x}", address);
        Ok(())
    }

    /// Fuse every run of adjacent free blocks into a single block in one
    /// ordered pass. The fused block keeps the leftmost address; swallowed
    /// entries disappear from the lookup.
    pub(super) fn coalesce(&mut self) {
        let addresses: Vec<Address> = self.blocks.keys().copied().collect();
        let mut run_head: Option<Address> = None;

        for address in addresses {
            let (free, size) = match self.blocks.get(&address) {
                Some(block) => (block.free, block.size),
                None => continue,
            };

            if !free {
                run_head = None;
                continue;
            }

            match run_head {
                Some(head) => {
                    self.blocks.remove(&address);
                    if let Some(head_block) = self.blocks.get_mut(&head) {
                        debug_assert_eq!(head_block.end(), address);
                        head_block.size += size;
                    }
                }
                None => run_head = Some(address),
            }
        }
    }
}
