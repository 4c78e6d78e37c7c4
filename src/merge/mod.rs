mod error;
mod materialize;
mod plan;

pub use error::BudgetError;
pub use materialize::merge_data_segments;
pub use plan::MergePlan;
