//! 8-bit byte-sum checksum correction.
//!
//! Option ROMs are accepted only if all bytes of the image sum to zero mod
//! 256. A single reserved byte per region absorbs whatever value makes that
//! true. All arithmetic is unsigned 8-bit wraparound.

use crate::error::{Error, Result};
use crate::region::Region;

/// Outcome of correcting one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Correction {
    pub region: Region,
    /// Byte found at the correction offset before it was overwritten.
    pub previous: u8,
    /// Sum of every byte in the region except the correction byte.
    pub partial_sum: u8,
    /// Value stored at the correction offset.
    pub value: u8,
    /// Sum of the whole region after the write; always zero.
    pub final_sum: u8,
}

/// Wrapping sum of `bytes`.
pub fn byte_sum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// Sum of `buf[start..=end]` after checking the region fits `buf`.
pub fn region_sum(buf: &[u8], region: &Region) -> Result<u8> {
    region.check_bounds(buf.len())?;
    Ok(byte_sum(&buf[region.range()]))
}

/// Store the corrective byte for `region` so that the region sums to zero.
///
/// The region is bounds-checked before any byte is read; on error `buf` is
/// untouched. On success exactly one byte, at the correction offset, has
/// been written.
pub fn correct(buf: &mut [u8], region: &Region) -> Result<Correction> {
    region.check_bounds(buf.len())?;

    let offset = region.correction_offset();
    let previous = buf[offset];
    let partial_sum = byte_sum(&buf[region.start()..offset])
        .wrapping_add(byte_sum(&buf[offset + 1..=region.end()]));
    let value = partial_sum.wrapping_neg();
    buf[offset] = value;

    let final_sum = byte_sum(&buf[region.range()]);
    debug_assert_eq!(final_sum, 0, "region {region} does not sum to zero");

    tracing::debug!(
        %region,
        previous = format_args!("0x{previous:02X}"),
        value = format_args!("0x{value:02X}"),
        "corrected region"
    );

    Ok(Correction {
        region: *region,
        previous,
        partial_sum,
        value,
        final_sum,
    })
}

/// Correct `regions` in order against the same buffer.
///
/// Each region sees the writes of the ones before it. Stops at the first
/// invalid region; corrections already applied stay applied.
pub fn correct_all(buf: &mut [u8], regions: &[Region]) -> Result<Vec<Correction>> {
    let mut out = Vec::with_capacity(regions.len());
    for region in regions {
        out.push(correct(buf, region)?);
    }
    Ok(out)
}

/// Check that `region` currently sums to zero.
pub fn verify(buf: &[u8], region: &Region) -> Result<()> {
    let sum = region_sum(buf, region)?;
    if sum != 0 {
        return Err(Error::ChecksumMismatch {
            start: region.start(),
            end: region.end(),
            sum,
        });
    }
    Ok(())
}
