use std::num::NonZeroUsize;

use crate::{DataSegment, NullSegment, Segment};

/// Partition the region `data` placed at `offset` into data and null segments.
///
/// Zero runs of at least `threshold` bytes become [`NullSegment`]s; shorter runs
/// between non-zero bytes are kept inline. Zeros trailing the last non-zero byte
/// are never materialized. The returned segments are in offset order, cover
/// `[offset, offset + data.len())` without gaps, and reproduce `data` exactly.
///
/// The caller must ensure `offset + data.len()` does not overflow.
pub fn split_region(offset: u64, data: &[u8], threshold: NonZeroUsize) -> Vec<Segment> {
    let threshold = threshold.get();
    let mut segments = Vec::new();

    // Start of the stretch not emitted yet: either pending data or an open null run.
    let mut run_start = 0usize;
    let mut zeros = 0usize;
    let mut in_null = false;

    for (index, &byte) in data.iter().enumerate() {
        if byte == 0 {
            zeros += 1;
            if !in_null && zeros == threshold {
                let null_start = index + 1 - threshold;
                if null_start > run_start {
                    segments.push(data_segment(offset, data, run_start, null_start));
                }
                run_start = null_start;
                in_null = true;
            }
        } else {
            if in_null {
                segments.push(null_segment(offset, run_start, index));
                run_start = index;
                in_null = false;
            }
            // Short zero runs become part of the pending data.
            zeros = 0;
        }
    }

    if in_null {
        segments.push(null_segment(offset, run_start, data.len()));
    } else {
        let pending_end = data.len() - zeros;
        if pending_end > run_start {
            segments.push(data_segment(offset, data, run_start, pending_end));
        }
        if zeros > 0 {
            segments.push(null_segment(offset, pending_end, data.len()));
        }
    }

    segments
}

fn data_segment(base: u64, data: &[u8], start: usize, end: usize) -> Segment {
    DataSegment::new(base + start as u64, data[start..end].to_vec()).into()
}

fn null_segment(base: u64, start: usize, end: usize) -> Segment {
    NullSegment::new(base + start as u64, (end - start) as u64).into()
}
