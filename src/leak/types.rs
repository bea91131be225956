/*!
 * Leak Tracking Types
 * Call-site capture and per-allocation leak entries
 */

use crate::core::types::{Address, Size, Timestamp};
use serde::{Deserialize, Serialize};

/// Source location injected by the call site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureSite {
    pub file: String,
    pub line: u32,
    /// Serialized call stack when the caller has one to offer
    pub call_stack: Option<String>,
}

impl CaptureSite {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
            call_stack: None,
        }
    }

    pub fn with_call_stack(mut self, call_stack: impl Into<String>) -> Self {
        self.call_stack = Some(call_stack.into());
        self
    }
}

impl std::fmt::Display for CaptureSite {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Capture the current source location as a [`CaptureSite`]
#[macro_export]
macro_rules! capture_site {
    () => {
        $crate::leak::CaptureSite::new(file!(), line!())
    };
}

/// One tracked allocation; still present in the active set means leaked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeakEntry {
    pub address: Address,
    pub size: Size,
    pub allocation_time: Timestamp,
    /// `None` when the call site offered no capture hook
    pub site: Option<CaptureSite>,
}

/// Leak tracker statistics snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeakStats {
    pub total_allocations: usize,
    pub active_count: usize,
    pub leaked_bytes: Size,
    pub average_active_size: f64,
}
