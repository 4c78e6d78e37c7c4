use std::fmt;

use crate::Range;

/// A run of bytes with explicit content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSegment {
    pub offset: u64,
    pub data: Vec<u8>,
}

impl DataSegment {
    pub fn new(offset: u64, data: Vec<u8>) -> Self {
        debug_assert!(!data.is_empty(), "data segment must carry bytes");
        Self { offset, data }
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn end(&self) -> u64 {
        self.offset + self.size()
    }

    /// Number of implicit zero bytes between this segment and `next`.
    pub fn gap_to(&self, next: &DataSegment) -> u64 {
        debug_assert!(self.end() <= next.offset);
        next.offset - self.end()
    }
}

/// A run of zero bytes left to the target's implicit zero-initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NullSegment {
    pub offset: u64,
    pub size: u64,
}

impl NullSegment {
    pub fn new(offset: u64, size: u64) -> Self {
        debug_assert!(size > 0, "null segment must not be empty");
        Self { offset, size }
    }

    pub fn end(&self) -> u64 {
        self.offset + self.size
    }
}

/// A registered piece of the image, ordered by offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Data(DataSegment),
    Null(NullSegment),
}

impl Segment {
    pub fn offset(&self) -> u64 {
        match self {
            Segment::Data(seg) => seg.offset,
            Segment::Null(seg) => seg.offset,
        }
    }

    pub fn size(&self) -> u64 {
        match self {
            Segment::Data(seg) => seg.size(),
            Segment::Null(seg) => seg.size,
        }
    }

    pub fn end(&self) -> u64 {
        self.offset() + self.size()
    }

    pub fn range(&self) -> Range {
        Range::from_bounds(self.offset(), self.end())
    }

    pub fn is_data(&self) -> bool {
        matches!(self, Segment::Data(_))
    }

    /// Logical value at `addr`, or `None` if the address lies outside this segment.
    pub fn read_byte(&self, addr: u64) -> Option<u8> {
        if !self.range().contains(addr) {
            return None;
        }
        match self {
            Segment::Data(seg) => Some(seg.data[(addr - seg.offset) as usize]),
            Segment::Null(_) => Some(0),
        }
    }
}

impl From<DataSegment> for Segment {
    fn from(seg: DataSegment) -> Self {
        Segment::Data(seg)
    }
}

impl From<NullSegment> for Segment {
    fn from(seg: NullSegment) -> Self {
        Segment::Null(seg)
    }
}

/// A materialized initializer segment handed to the module assembler.
///
/// Either a single [`DataSegment`] or several of them fused together with the
/// gaps between them filled with zeros. Owns its bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedSegment {
    pub offset: u64,
    pub bytes: Vec<u8>,
}

impl MergedSegment {
    pub fn new(offset: u64, bytes: Vec<u8>) -> Self {
        Self { offset, bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn end(&self) -> u64 {
        self.offset + self.bytes.len() as u64
    }

    pub fn read_byte(&self, addr: u64) -> Option<u8> {
        if addr < self.offset || addr >= self.end() {
            return None;
        }
        Some(self.bytes[(addr - self.offset) as usize])
    }
}

impl From<DataSegment> for MergedSegment {
    fn from(seg: DataSegment) -> Self {
        Self {
            offset: seg.offset,
            bytes: seg.data,
        }
    }
}

impl fmt::Display for MergedSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bytes at {:#X}", self.bytes.len(), self.offset)
    }
}
