/*!
 * Placement Policies
 * Free-block selection strategies over the ordered block list
 */

use super::Arena;
use crate::core::types::{Address, Size};
use serde::{Deserialize, Serialize};

/// Free-block choice rule for future allocations.
///
/// Swapping the strategy never moves existing blocks; it only changes which
/// free block the next allocation lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementStrategy {
    /// First free block large enough, in address order
    FirstFit,
    /// Free block with the smallest leftover; earliest address wins ties
    BestFit,
    /// Free block with the largest leftover; earliest address wins ties
    WorstFit,
}

impl std::fmt::Display for PlacementStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            PlacementStrategy::FirstFit => write!(f, "first-fit"),
            PlacementStrategy::BestFit => write!(f, "best-fit"),
            PlacementStrategy::WorstFit => write!(f, "worst-fit"),
        }
    }
}

impl Arena {
    /// Scan the ordered block list once and pick a free block for `size`
    /// under the active strategy. Returns the block's address and size.
    pub(super) fn find_suitable_block(&self, size: Size) -> Option<(Address, Size)> {
        match self.strategy {
            PlacementStrategy::FirstFit => self
                .blocks
                .values()
                .find(|block| block.free && block.size >= size)
                .map(|block| (block.address, block.size)),

            PlacementStrategy::BestFit => {
                let mut best: Option<(Address, Size)> = None;
                for block in self.blocks.values() {
                    if !block.free || block.size < size {
                        continue;
                    }
                    let better = match best {
                        Some((_, best_size)) => block.size < best_size,
                        None => true,
                    };
                    if better {
                        best = Some((block.address, block.size));
                    }
                }
                best
            }

            PlacementStrategy::WorstFit => {
                // An exact fit is still a fit: the comparison is strict so the
                // earliest block wins ties, but a sole candidate always wins.
                let mut worst: Option<(Address, Size)> = None;
                for block in self.blocks.values() {
                    if !block.free || block.size < size {
                        continue;
                    }
                    let better = match worst {
                        Some((_, worst_size)) => block.size > worst_size,
                        None => true,
                    };
                    if better {
                        worst = Some((block.address, block.size));
                    }
                }
                worst
            }
        }
    }
}
