use std::num::NonZeroUsize;

/// Shortest zero run that is split out of a region as a [`NullSegment`](crate::NullSegment).
///
/// Shorter runs stay inline in the surrounding data segment; a separate
/// segment would cost more in per-segment encoding overhead than it saves.
pub const DEFAULT_NULL_RUN_THRESHOLD: usize = 14;

/// Hard limit on active data segments per linear memory in the target format.
pub const MAX_DATA_SEGMENTS: u32 = 100_000;

/// Options for splitting regions into segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackOptions {
    /// Zero runs at least this long become null segments (default 14)
    pub null_run_threshold: NonZeroUsize,
}

impl PackOptions {
    /// Options with the given threshold. A zero threshold falls back to 1,
    /// so every zero byte becomes implicit fill.
    pub fn with_null_run_threshold(threshold: usize) -> Self {
        Self {
            null_run_threshold: NonZeroUsize::new(threshold).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl Default for PackOptions {
    fn default() -> Self {
        Self::with_null_run_threshold(DEFAULT_NULL_RUN_THRESHOLD)
    }
}

/// Number of segments left for the merge planner once `reserved` segments
/// have been claimed elsewhere in the module, optionally capped by the caller.
pub fn segment_budget(reserved: u32, caller_budget: Option<u32>) -> u32 {
    let available = MAX_DATA_SEGMENTS.saturating_sub(reserved);
    match caller_budget {
        Some(budget) => available.min(budget),
        None => available,
    }
}
