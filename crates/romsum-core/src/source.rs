//! Where checksum regions come from.
//!
//! Three invocation styles produce the same `Vec<Region>`:
//! - no parameters: the whole declared ROM, correction byte fixed at 5;
//! - one hex offset: the whole declared ROM, correction byte at that offset;
//! - hex `start end offset` triples: explicit regions, no header lookup.

use crate::error::{BoundsViolation, Error, Result};
use crate::image::RomImage;
use crate::region::Region;

/// Correction byte used when no parameters are given.
pub const LEGACY_CORRECTION_OFFSET: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionSource {
    Legacy,
    Offset(usize),
    Explicit(Vec<Region>),
}

impl RegionSource {
    /// Interpret positional parameters. Any count other than 0, 1 or a
    /// positive multiple of 3 is rejected, as is a triple whose offset is
    /// not inside its own range.
    pub fn from_params<S: AsRef<str>>(params: &[S]) -> Result<Self> {
        match params.len() {
            0 => Ok(RegionSource::Legacy),
            1 => Ok(RegionSource::Offset(parse_hex(params[0].as_ref())?)),
            n if n % 3 == 0 => {
                let regions = params
                    .chunks_exact(3)
                    .map(|t| {
                        Region::new(
                            parse_hex(t[0].as_ref())?,
                            parse_hex(t[1].as_ref())?,
                            parse_hex(t[2].as_ref())?,
                        )
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(RegionSource::Explicit(regions))
            }
            n => Err(Error::InvalidArguments(format!(
                "expected no parameters, one offset, or start/end/offset triples; got {n} values"
            ))),
        }
    }

    /// Turn this source into concrete regions for `image`.
    ///
    /// Every region is validated against the image, so an oversized
    /// declared ROM or explicit range is rejected here and never truncated.
    pub fn resolve(&self, image: &RomImage) -> Result<Vec<Region>> {
        let regions = match self {
            RegionSource::Legacy => vec![declared_region(image, LEGACY_CORRECTION_OFFSET)?],
            RegionSource::Offset(offset) => vec![declared_region(image, *offset)?],
            RegionSource::Explicit(regions) => regions.clone(),
        };
        for region in &regions {
            region.check_bounds(image.len())?;
        }
        Ok(regions)
    }
}

/// Region covering the ROM code size declared in the header.
fn declared_region(image: &RomImage, correction_offset: usize) -> Result<Region> {
    let size = image.declared_size();
    tracing::info!("ROM code size is {} bytes", size);
    if size == 0 {
        return Err(Error::RegionOutOfBounds {
            start: 0,
            end: 0,
            correction_offset,
            violation: BoundsViolation::EmptyDeclaredRom,
        });
    }
    Region::new(0, size - 1, correction_offset)
}

/// Parse a base-16 value with an optional `0x` prefix.
pub fn parse_hex(s: &str) -> Result<usize> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return Err(Error::InvalidArguments(format!("not a hex value: '{s}'")));
    }
    usize::from_str_radix(digits, 16)
        .map_err(|e| Error::InvalidArguments(format!("not a hex value: '{s}' ({e})")))
}
