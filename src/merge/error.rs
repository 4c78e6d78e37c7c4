use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("segment budget must allow at least one segment, got {max_segments}")]
pub struct BudgetError {
    pub max_segments: u32,
}
