/*!
 * Error Types
 * Centralized error handling with thiserror and serde support
 */

use crate::core::types::{Address, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Allocation operation result
pub type AllocResult<T> = Result<T, AllocError>;

/// Allocation errors
///
/// Every variant fails fast: the operation that produced it leaves the
/// engine state unchanged.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum AllocError {
    #[error("cannot allocate zero bytes")]
    ZeroSize,

    #[error("no suitable free block for {requested} bytes")]
    NoFit { requested: Size },

    #[error("invalid address for deallocation: 0x{0:x}")]
    InvalidAddress(Address),
}
