/*!
 * Engine Traits
 * Allocation and introspection abstractions
 */

use crate::core::errors::AllocResult;
use crate::core::types::{Address, Size};

/// Allocator interface shared by the arena and the adaptive controller
pub trait Allocator {
    /// Allocate `size` bytes and return the base address
    fn allocate(&mut self, size: Size) -> AllocResult<Address>;

    /// Release the allocation based at `address`
    fn deallocate(&mut self, address: Address) -> AllocResult<()>;
}

/// Memory statistics provider
pub trait MemoryInfo {
    fn total_memory(&self) -> Size;

    fn total_free_memory(&self) -> Size;

    fn largest_free_block(&self) -> Size;

    fn fragmentation_ratio(&self) -> f64;
}
