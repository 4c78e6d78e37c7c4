use std::collections::BTreeMap;

use thiserror::Error;

use crate::{DataSegment, Range, RangeError, Segment};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverlapError {
    #[error(
        "region {new_start:#X}..{new_end:#X} overlaps registered segment {existing_start:#X}..{existing_end:#X}"
    )]
    OverlappingSegments {
        new_start: u64,
        new_end: u64,
        existing_start: u64,
        existing_end: u64,
    },

    #[error(transparent)]
    InvalidRegion(#[from] RangeError),
}

/// Snapshot of what the registry holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryStats {
    pub data_segments: usize,
    pub null_segments: usize,
    pub data_bytes: u64,
    pub null_bytes: u64,
}

/// Non-overlapping segments of one image, keyed by offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentRegistry {
    segments: BTreeMap<u64, Segment>,
}

impl SegmentRegistry {
    pub fn new() -> Self {
        Self {
            segments: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// All segments in offset order.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.values()
    }

    /// Data segments in offset order, skipping null segments.
    pub fn data_segments(&self) -> impl Iterator<Item = &DataSegment> {
        self.segments.values().filter_map(|seg| match seg {
            Segment::Data(data) => Some(data),
            Segment::Null(_) => None,
        })
    }

    pub fn data_segment_count(&self) -> usize {
        self.data_segments().count()
    }

    /// Registered segment intersecting `range`, if any.
    pub fn find_overlap(&self, range: Range) -> Option<&Segment> {
        // Segments never overlap, so only the last one starting before
        // `range.end()` can reach into it.
        self.segments
            .range(..range.end())
            .next_back()
            .map(|(_, seg)| seg)
            .filter(|seg| seg.range().overlaps(&range))
    }

    /// Register the segments of one region covering `region`.
    ///
    /// The whole region is checked before anything is inserted, so a rejected
    /// call leaves the registry unchanged.
    pub fn insert_region(
        &mut self,
        region: Range,
        segments: Vec<Segment>,
    ) -> Result<(), OverlapError> {
        if let Some(existing) = self.find_overlap(region) {
            return Err(OverlapError::OverlappingSegments {
                new_start: region.start(),
                new_end: region.end(),
                existing_start: existing.offset(),
                existing_end: existing.end(),
            });
        }

        for segment in segments {
            debug_assert!(region.start() <= segment.offset() && segment.end() <= region.end());
            self.segments.insert(segment.offset(), segment);
        }
        Ok(())
    }

    /// Logical byte at `addr`: the stored byte inside a data segment, zero inside
    /// a null segment, `None` outside every registered region.
    pub fn read_byte(&self, addr: u64) -> Option<u8> {
        self.segments
            .range(..=addr)
            .next_back()
            .and_then(|(_, seg)| seg.read_byte(addr))
    }

    pub fn stats(&self) -> RegistryStats {
        let mut stats = RegistryStats::default();
        for seg in self.segments.values() {
            match seg {
                Segment::Data(data) => {
                    stats.data_segments += 1;
                    stats.data_bytes += data.size();
                }
                Segment::Null(null) => {
                    stats.null_segments += 1;
                    stats.null_bytes += null.size;
                }
            }
        }
        stats
    }

    /// Remove every segment, returning the data segments in offset order.
    pub fn drain_data_segments(&mut self) -> Vec<DataSegment> {
        std::mem::take(&mut self.segments)
            .into_values()
            .filter_map(|seg| match seg {
                Segment::Data(data) => Some(data),
                Segment::Null(_) => None,
            })
            .collect()
    }
}
