use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("range at {start:#X} with length {length:#X} overflows the address space")]
    AddressOverflow { start: u64, length: u64 },

    #[error("zero length range at {start:#X}")]
    ZeroLength { start: u64 },
}

/// A half-open byte address range `[start, end)` inside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Range {
    start: u64,
    end: u64, // exclusive
}

impl Range {
    /// Create range from start address and length.
    pub fn from_start_length(start: u64, length: u64) -> Result<Self, RangeError> {
        if length == 0 {
            return Err(RangeError::ZeroLength { start });
        }
        let end = start
            .checked_add(length)
            .ok_or(RangeError::AddressOverflow { start, length })?;
        Ok(Self { start, end })
    }

    /// Range over already validated bounds.
    pub(crate) fn from_bounds(start: u64, end: u64) -> Self {
        debug_assert!(start < end);
        Self { start, end }
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn length(&self) -> u64 {
        self.end - self.start
    }

    pub fn contains(&self, addr: u64) -> bool {
        addr >= self.start && addr < self.end
    }

    pub fn overlaps(&self, other: &Range) -> bool {
        self.start < other.end && other.start < self.end
    }
}
