/*!
 * Free-List Arena
 *
 * Owns the abstract address range `[0, total_size)` as an ordered sequence
 * of contiguous blocks, each free or allocated. Allocation splits blocks,
 * deallocation coalesces adjacent free runs, and three placement policies
 * decide where a request lands.
 *
 * The block map is keyed by base address, so it doubles as the fast lookup
 * from a live allocated address to its owning block.
 */

mod allocator;
mod placement;
mod types;

pub use placement::PlacementStrategy;
pub use types::{ArenaStats, Block};

use crate::core::errors::AllocResult;
use crate::core::types::{Address, Size};
use crate::traits::{Allocator, MemoryInfo};
use std::collections::BTreeMap;

/// Free-list allocator over a simulated contiguous address range
#[derive(Debug, Clone)]
pub struct Arena {
    blocks: BTreeMap<Address, Block>,
    total_size: Size,
    strategy: PlacementStrategy,
}

impl Arena {
    /// Create an arena with a single free block covering the whole range
    pub fn new(total_size: Size) -> Self {
        Self::with_strategy(total_size, PlacementStrategy::FirstFit)
    }

    pub fn with_strategy(total_size: Size, strategy: PlacementStrategy) -> Self {
        let mut blocks = BTreeMap::new();
        if total_size > 0 {
            blocks.insert(0, Block::free_at(0, total_size));
        }
        Self {
            blocks,
            total_size,
            strategy,
        }
    }

    /// Swap the placement policy for future allocations.
    /// Existing blocks never move.
    pub fn set_strategy(&mut self, strategy: PlacementStrategy) {
        self.strategy = strategy;
    }

    pub fn strategy(&self) -> PlacementStrategy {
        self.strategy
    }

    pub fn total_memory(&self) -> Size {
        self.total_size
    }

    pub fn total_free_memory(&self) -> Size {
        self.blocks
            .values()
            .filter(|block| block.free)
            .map(|block| block.size)
            .sum()
    }

    pub fn largest_free_block(&self) -> Size {
        self.blocks
            .values()
            .filter(|block| block.free)
            .map(|block| block.size)
            .max()
            .unwrap_or(0)
    }

    /// `1 - largest_free / total_free`; 0.0 when nothing is free
    pub fn fragmentation_ratio(&self) -> f64 {
        let total_free = self.total_free_memory();
        if total_free == 0 {
            return 0.0;
        }
        1.0 - self.largest_free_block() as f64 / total_free as f64
    }

    /// Ordered snapshot of the current block layout
    pub fn blocks(&self) -> Vec<Block> {
        self.blocks.values().cloned().collect()
    }

    /// Whether `address` is the base of a currently allocated block
    pub fn is_allocated(&self, address: Address) -> bool {
        self.blocks
            .get(&address)
            .map_or(false, |block| !block.free)
    }

    pub fn stats(&self) -> ArenaStats {
        ArenaStats {
            total_memory: self.total_size,
            free_memory: self.total_free_memory(),
            largest_free_block: self.largest_free_block(),
            fragmentation_ratio: self.fragmentation_ratio(),
            block_count: self.blocks.len(),
            free_block_count: self.blocks.values().filter(|b| b.free).count(),
        }
    }
}

// Implement trait interfaces
impl Allocator for Arena {
    fn allocate(&mut self, size: Size) -> AllocResult<Address> {
        Arena::allocate(self, size)
    }

    fn deallocate(&mut self, address: Address) -> AllocResult<()> {
        Arena::deallocate(self, address)
    }
}

impl MemoryInfo for Arena {
    fn total_memory(&self) -> Size {
        Arena::total_memory(self)
    }

    fn total_free_memory(&self) -> Size {
        Arena::total_free_memory(self)
    }

    fn largest_free_block(&self) -> Size {
        Arena::largest_free_block(self)
    }

    fn fragmentation_ratio(&self) -> f64 {
        Arena::fragmentation_ratio(self)
    }
}
