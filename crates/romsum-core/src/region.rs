//! Checksum region: an inclusive byte range plus the byte reserved for the
//! corrective value.

use crate::error::{BoundsViolation, Error, Result};
use std::fmt;
use std::ops::RangeInclusive;

/// Inclusive byte range `[start, end]` whose bytes must sum to zero mod 256,
/// with `correction_offset` holding the value that makes it so.
///
/// Construction guarantees `start <= correction_offset <= end`; whether the
/// region fits a given buffer is checked with [`Region::check_bounds`].
/// Overlapping regions are allowed and are not detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    start: usize,
    end: usize,
    correction_offset: usize,
}

impl Region {
    pub fn new(start: usize, end: usize, correction_offset: usize) -> Result<Self> {
        let violation = if start > end {
            Some(BoundsViolation::StartAfterEnd)
        } else if correction_offset < start || correction_offset > end {
            Some(BoundsViolation::OffsetOutsideRange)
        } else {
            None
        };
        match violation {
            Some(violation) => Err(Error::RegionOutOfBounds {
                start,
                end,
                correction_offset,
                violation,
            }),
            None => Ok(Region {
                start,
                end,
                correction_offset,
            }),
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn correction_offset(&self) -> usize {
        self.correction_offset
    }

    pub fn range(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }

    /// Check that `end < len`.
    pub fn check_bounds(&self, len: usize) -> Result<()> {
        if self.end >= len {
            return Err(Error::RegionOutOfBounds {
                start: self.start,
                end: self.end,
                correction_offset: self.correction_offset,
                violation: BoundsViolation::PastEndOfImage { len },
            });
        }
        Ok(())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "0x{:X}..=0x{:X} @ 0x{:X}",
            self.start, self.end, self.correction_offset
        )
    }
}
