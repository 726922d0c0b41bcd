//! Error taxonomy shared by the core engine and the CLI.
//!
//! Every failure the tool can hit maps to exactly one variant, and every
//! variant maps to one process exit status (see [`Error::exit_status`]).

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Why a region was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsViolation {
    StartAfterEnd,
    OffsetOutsideRange,
    /// `end` is at or past the image length.
    PastEndOfImage { len: usize },
    /// The header's size byte is 0, so the declared ROM has no bytes.
    EmptyDeclaredRom,
}

impl fmt::Display for BoundsViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundsViolation::StartAfterEnd => write!(f, "start is after end"),
            BoundsViolation::OffsetOutsideRange => {
                write!(f, "correction offset is outside the range")
            }
            BoundsViolation::PastEndOfImage { len } => {
                write!(f, "end is beyond image length {len}")
            }
            BoundsViolation::EmptyDeclaredRom => {
                write!(f, "declared ROM size is 0 (size byte is 0x00)")
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// Wrong parameter count or a malformed hex value.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("failed to access input '{}'", path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("short read from '{}': expected {expected} bytes, got {actual}", path.display())]
    InputTruncated {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },

    #[error("image is too short: {len} bytes (minimum {min})")]
    BufferTooShort { len: usize, min: usize },

    #[error(
        "region out of bounds: {violation} (start=0x{start:X} end=0x{end:X} offset=0x{correction_offset:X})"
    )]
    RegionOutOfBounds {
        start: usize,
        end: usize,
        correction_offset: usize,
        violation: BoundsViolation,
    },

    #[error("failed to create output '{}'", path.display())]
    OutputUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("short write to '{}': wrote {written} of {expected} bytes", path.display())]
    OutputTruncated {
        path: PathBuf,
        expected: u64,
        written: u64,
        #[source]
        source: Option<io::Error>,
    },

    #[error("checksum mismatch in 0x{start:X}..=0x{end:X}: sum is 0x{sum:02X}")]
    ChecksumMismatch { start: usize, end: usize, sum: u8 },

    #[error("config: {0}")]
    Config(String),
}

impl Error {
    /// Process exit status for this failure class.
    ///
    /// 1 = invocation or configuration, 2 = input side, 3 = output side,
    /// 4 = an existing checksum did not verify.
    pub fn exit_status(&self) -> i32 {
        match self {
            Error::InvalidArguments(_) | Error::Config(_) => 1,
            Error::InputUnavailable { .. }
            | Error::InputTruncated { .. }
            | Error::BufferTooShort { .. }
            | Error::RegionOutOfBounds { .. } => 2,
            Error::OutputUnavailable { .. } | Error::OutputTruncated { .. } => 3,
            Error::ChecksumMismatch { .. } => 4,
        }
    }
}
