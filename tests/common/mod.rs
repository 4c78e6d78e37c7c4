#![allow(dead_code)]

use segpack::{DataSegment, MergedSegment};

/// Byte an initializer list puts at `addr`, zero where nothing is listed.
pub fn merged_byte(merged: &[MergedSegment], addr: u64) -> u8 {
    merged
        .iter()
        .find_map(|seg| seg.read_byte(addr))
        .unwrap_or(0)
}

/// Byte the un-merged data segments put at `addr`, zero in gaps.
pub fn original_byte(segments: &[DataSegment], addr: u64) -> u8 {
    segments
        .iter()
        .find(|seg| addr >= seg.offset && addr < seg.end())
        .map(|seg| seg.data[(addr - seg.offset) as usize])
        .unwrap_or(0)
}

/// Lay out data segments with the given gaps before each one.
pub fn layout(parts: &[(u64, Vec<u8>)]) -> Vec<DataSegment> {
    let mut segments: Vec<DataSegment> = Vec::with_capacity(parts.len());
    let mut next = 0;
    for (gap, data) in parts {
        let offset = next + gap;
        let seg = DataSegment::new(offset, data.clone());
        next = seg.end();
        segments.push(seg);
    }
    segments
}

pub fn assert_sorted_disjoint(merged: &[MergedSegment]) {
    for pair in merged.windows(2) {
        assert!(
            pair[0].end() <= pair[1].offset,
            "{} overlaps {}",
            pair[0],
            pair[1]
        );
    }
}

pub fn total_len(merged: &[MergedSegment]) -> u64 {
    merged.iter().map(|seg| seg.len() as u64).sum()
}
