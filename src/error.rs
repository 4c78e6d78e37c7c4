use thiserror::Error;

use crate::{BudgetError, OverlapError, RangeError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Overlap(#[from] OverlapError),

    #[error(transparent)]
    Budget(#[from] BudgetError),

    #[error(transparent)]
    Range(#[from] RangeError),
}
