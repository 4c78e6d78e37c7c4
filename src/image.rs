use crate::merge::{BudgetError, MergePlan};
use crate::{
    MergedSegment, OverlapError, PackOptions, Range, RegistryStats, SegmentRegistry, split_region,
};

/// Segments of one sparse memory image.
///
/// Regions are added with [`add_data`](Self::add_data) in any order; once the
/// image is complete, [`construct_data_segments`](Self::construct_data_segments)
/// produces the initializer segments and empties the image. Not internally
/// synchronized: use one instance per image, owned by the layout pass.
#[derive(Debug, Clone, Default)]
pub struct ImageSegments {
    registry: SegmentRegistry,
    options: PackOptions,
}

impl ImageSegments {
    pub fn new() -> Self {
        Self::with_options(PackOptions::default())
    }

    pub fn with_options(options: PackOptions) -> Self {
        Self {
            registry: SegmentRegistry::new(),
            options,
        }
    }

    pub fn options(&self) -> &PackOptions {
        &self.options
    }

    pub fn registry(&self) -> &SegmentRegistry {
        &self.registry
    }

    pub fn stats(&self) -> RegistryStats {
        self.registry.stats()
    }

    /// Logical byte at `addr`, `None` if no region covers it.
    pub fn read_byte(&self, addr: u64) -> Option<u8> {
        self.registry.read_byte(addr)
    }

    /// Split `data` at `offset` into data and null segments and register them.
    ///
    /// Fails without registering anything if the region intersects a region
    /// added earlier or runs past the end of the address space. Empty `data`
    /// is ignored.
    pub fn add_data(&mut self, offset: u64, data: &[u8]) -> Result<(), OverlapError> {
        if data.is_empty() {
            tracing::trace!(offset, "ignoring empty region");
            return Ok(());
        }

        let region = Range::from_start_length(offset, data.len() as u64)?;
        let segments = split_region(offset, data, self.options.null_run_threshold);
        let data_segments = segments.iter().filter(|s| s.is_data()).count();
        let null_segments = segments.len() - data_segments;
        self.registry.insert_region(region, segments)?;

        tracing::debug!(
            offset,
            len = data.len(),
            data_segments,
            null_segments,
            "registered region"
        );
        Ok(())
    }

    /// Produce at most `max_segments` initializer segments covering every
    /// registered data byte, fusing neighbours across the smallest gaps when
    /// the image has more data segments than the budget allows.
    ///
    /// Empties the image on success. A zero budget is rejected and leaves the
    /// image untouched.
    ///
    /// Each fused segment is allocated as one buffer spanning its members and
    /// the gaps between them, so fused spans must fit in memory.
    pub fn construct_data_segments(
        &mut self,
        max_segments: u32,
    ) -> Result<Vec<MergedSegment>, BudgetError> {
        if max_segments < 1 {
            return Err(BudgetError { max_segments });
        }

        let segments = self.registry.drain_data_segments();
        let plan = MergePlan::new(&segments, max_segments)?;
        tracing::debug!(
            data_segments = segments.len(),
            max_segments,
            closed_gaps = plan.closed_gap_count(),
            filler_bytes = plan.filler_bytes(),
            "constructing data segments"
        );

        Ok(plan.materialize(segments))
    }
}
