use super::{BudgetError, MergePlan};
use crate::{DataSegment, MergedSegment};

impl MergePlan {
    /// Build the output segments for the `segments` this plan was made from.
    ///
    /// Unfused segments keep their buffers; each fused run gets one fresh
    /// zero-initialized buffer spanning the run with member bytes copied in.
    /// Segments the plan has no run for are dropped.
    pub fn materialize(&self, segments: Vec<DataSegment>) -> Vec<MergedSegment> {
        if self.closed_gaps().len() != segments.len().saturating_sub(1) {
            tracing::warn!(
                planned = self.closed_gaps().len() + 1,
                given = segments.len(),
                "materializing a plan built for a different segment list"
            );
        }

        let runs = self.run_lengths(segments.len());
        let mut output = Vec::with_capacity(runs.len());
        let mut members = segments.into_iter();

        for run_len in runs {
            if run_len == 1 {
                output.extend(members.next().map(MergedSegment::from));
                continue;
            }
            let run: Vec<DataSegment> = members.by_ref().take(run_len).collect();
            output.extend(fuse(&run));
        }

        output
    }
}

fn fuse(run: &[DataSegment]) -> Option<MergedSegment> {
    let (Some(first), Some(last)) = (run.first(), run.last()) else {
        return None;
    };
    let start = first.offset;
    let end = last.end();
    let mut bytes = vec![0u8; (end - start) as usize];

    for seg in run {
        let at = (seg.offset - start) as usize;
        bytes[at..at + seg.data.len()].copy_from_slice(&seg.data);
    }

    tracing::trace!(
        offset = start,
        len = bytes.len(),
        members = run.len(),
        "fused data segments"
    );
    Some(MergedSegment::new(start, bytes))
}

/// Reduce sorted, non-overlapping `segments` to at most `max_segments` outputs
/// while adding as few filler bytes as possible.
pub fn merge_data_segments(
    segments: Vec<DataSegment>,
    max_segments: u32,
) -> Result<Vec<MergedSegment>, BudgetError> {
    let plan = MergePlan::new(&segments, max_segments)?;
    Ok(plan.materialize(segments))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_keeps_segments_verbatim() {
        let segments = vec![
            DataSegment::new(0x10, vec![1, 2]),
            DataSegment::new(0x40, vec![3]),
        ];
        let merged = merge_data_segments(segments, 5).unwrap();
        assert_eq!(
            merged,
            vec![
                MergedSegment::new(0x10, vec![1, 2]),
                MergedSegment::new(0x40, vec![3]),
            ]
        );
    }

    #[test]
    fn test_fuse_fills_gap_with_zeros() {
        let segments = vec![
            DataSegment::new(0, vec![1; 5]),
            DataSegment::new(19, vec![2; 5]),
        ];
        let merged = merge_data_segments(segments, 1).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].offset, 0);
        assert_eq!(merged[0].len(), 24);
        assert_eq!(&merged[0].bytes[..5], &[1; 5]);
        assert_eq!(&merged[0].bytes[5..19], &[0; 14]);
        assert_eq!(&merged[0].bytes[19..], &[2; 5]);
    }

    #[test]
    fn test_mixed_runs() {
        // Gaps: 100, 5, 20. Budget 2 closes 5 and 20.
        let segments = vec![
            DataSegment::new(0, vec![0xA]),
            DataSegment::new(101, vec![0xB]),
            DataSegment::new(107, vec![0xC, 0xC]),
            DataSegment::new(129, vec![0xD]),
        ];
        let merged = merge_data_segments(segments, 2).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0], MergedSegment::new(0, vec![0xA]));
        assert_eq!(merged[1].offset, 101);
        assert_eq!(merged[1].end(), 130);
        assert_eq!(merged[1].read_byte(101), Some(0xB));
        assert_eq!(merged[1].read_byte(102), Some(0));
        assert_eq!(merged[1].read_byte(107), Some(0xC));
        assert_eq!(merged[1].read_byte(108), Some(0xC));
        assert_eq!(merged[1].read_byte(109), Some(0));
        assert_eq!(merged[1].read_byte(129), Some(0xD));
    }

    #[test]
    fn test_adjacent_segments_fuse_without_filler() {
        let segments = vec![
            DataSegment::new(0, vec![1, 2]),
            DataSegment::new(2, vec![3, 4]),
        ];
        let plan = MergePlan::new(&segments, 1).unwrap();
        assert_eq!(plan.filler_bytes(), 0);
        let merged = plan.materialize(segments);
        assert_eq!(merged, vec![MergedSegment::new(0, vec![1, 2, 3, 4])]);
    }

    #[test]
    fn test_plan_for_longer_list_skips_missing_runs() {
        let planned = vec![
            DataSegment::new(0, vec![1]),
            DataSegment::new(101, vec![2]),
            DataSegment::new(107, vec![3]),
        ];
        let plan = MergePlan::new(&planned, 2).unwrap();
        assert_eq!(plan.closed_gaps(), &[false, true]);

        let merged = plan.materialize(vec![DataSegment::new(0, vec![1])]);
        assert_eq!(merged, vec![MergedSegment::new(0, vec![1])]);

        let merged = plan.materialize(planned[..2].to_vec());
        assert_eq!(
            merged,
            vec![
                MergedSegment::new(0, vec![1]),
                MergedSegment::new(101, vec![2]),
            ]
        );
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(merge_data_segments(Vec::new(), 3).unwrap().is_empty());
    }

    #[test]
    fn test_zero_budget_error() {
        let segments = vec![DataSegment::new(0, vec![1])];
        assert_eq!(
            merge_data_segments(segments, 0),
            Err(BudgetError { max_segments: 0 })
        );
    }
}
