/*!
 * Arena Types
 * Block metadata and arena statistics
 */

use crate::core::types::{Address, Size};
use serde::{Deserialize, Serialize};

/// One contiguous run of the arena in a single free/allocated state.
///
/// Blocks tile the arena exactly: for adjacent blocks `b`, `b'` it always
/// holds that `b.address + b.size == b'.address`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub address: Address,
    pub size: Size,
    pub free: bool,
}

impl Block {
    pub fn free_at(address: Address, size: Size) -> Self {
        Self {
            address,
            size,
            free: true,
        }
    }

    pub fn end(&self) -> Address {
        self.address + self.size
    }
}

/// Arena statistics snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaStats {
    pub total_memory: Size,
    pub free_memory: Size,
    pub largest_free_block: Size,
    pub fragmentation_ratio: f64,
    pub block_count: usize,
    pub free_block_count: usize,
}
