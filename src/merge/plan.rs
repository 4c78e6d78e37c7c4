use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::BudgetError;
use crate::DataSegment;

/// Which gaps between consecutive data segments get filled with zeros so the
/// segment count fits the budget.
///
/// Closing a gap costs exactly its size in filler bytes regardless of how the
/// closed gaps group into runs, so closing the `n - max_segments` smallest gaps
/// is optimal. Equal gaps are closed lowest index first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePlan {
    /// `closed[i]` fuses segment `i` with segment `i + 1`.
    closed: Vec<bool>,
    filler_bytes: u64,
    output_len: usize,
}

impl MergePlan {
    /// Plan merges for `segments`, which must be sorted by offset and
    /// pairwise non-overlapping.
    pub fn new(segments: &[DataSegment], max_segments: u32) -> Result<Self, BudgetError> {
        if max_segments < 1 {
            return Err(BudgetError { max_segments });
        }
        debug_assert!(segments.windows(2).all(|w| w[0].end() <= w[1].offset));

        let count = segments.len();
        let mut closed = vec![false; count.saturating_sub(1)];
        let budget = max_segments as usize;
        if count <= budget {
            return Ok(Self {
                closed,
                filler_bytes: 0,
                output_len: count,
            });
        }

        let mut gaps: BinaryHeap<Reverse<(u64, usize)>> = segments
            .windows(2)
            .enumerate()
            .map(|(index, pair)| Reverse((pair[0].gap_to(&pair[1]), index)))
            .collect();

        let mut filler_bytes = 0;
        for _ in 0..count - budget {
            let Some(Reverse((gap, index))) = gaps.pop() else {
                break;
            };
            tracing::trace!(index, gap, "closing gap");
            closed[index] = true;
            filler_bytes += gap;
        }

        Ok(Self {
            closed,
            filler_bytes,
            output_len: budget,
        })
    }

    /// Per gap, whether it is filled in.
    pub fn closed_gaps(&self) -> &[bool] {
        &self.closed
    }

    pub fn closed_gap_count(&self) -> usize {
        self.closed.iter().filter(|&&c| c).count()
    }

    /// Zero bytes the merged output materializes beyond the original data.
    pub fn filler_bytes(&self) -> u64 {
        self.filler_bytes
    }

    /// Number of segments the plan produces.
    pub fn output_len(&self) -> usize {
        self.output_len
    }

    pub fn is_identity(&self) -> bool {
        !self.closed.contains(&true)
    }

    /// Sizes of the fused runs, in offset order.
    pub(crate) fn run_lengths(&self, segment_count: usize) -> Vec<usize> {
        let mut runs = Vec::with_capacity(self.output_len);
        if segment_count == 0 {
            return runs;
        }
        let mut len = 1;
        for &closed in &self.closed {
            if closed {
                len += 1;
            } else {
                runs.push(len);
                len = 1;
            }
        }
        runs.push(len);
        runs
    }
}
