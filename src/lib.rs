pub mod error;
pub mod image;
pub mod merge;
pub mod options;
pub mod range;
pub mod registry;
pub mod segment;
pub mod split;

pub use error::Error;
pub use image::ImageSegments;
pub use merge::{BudgetError, MergePlan, merge_data_segments};
pub use options::{DEFAULT_NULL_RUN_THRESHOLD, MAX_DATA_SEGMENTS, PackOptions, segment_budget};
pub use range::{Range, RangeError};
pub use registry::{OverlapError, RegistryStats, SegmentRegistry};
pub use segment::{DataSegment, MergedSegment, NullSegment, Segment};
pub use split::split_region;
