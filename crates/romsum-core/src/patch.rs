//! Whole-image operations: resolve regions, then correct or check them.

use crate::checksum::{self, Correction};
use crate::error::Result;
use crate::image::RomImage;
use crate::region::Region;
use crate::source::RegionSource;

/// Current checksum of one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionStatus {
    pub region: Region,
    pub sum: u8,
}

impl RegionStatus {
    pub fn is_valid(&self) -> bool {
        self.sum == 0
    }
}

/// Resolve `source` against `image` and correct every region in order.
///
/// With `verify`, all regions are re-summed once the last correction is in;
/// a region broken by a later overlapping one is logged as a warning.
pub fn fix_image(
    image: &mut RomImage,
    source: &RegionSource,
    verify: bool,
) -> Result<Vec<Correction>> {
    let regions = source.resolve(image)?;
    let fixes = checksum::correct_all(image.as_bytes_mut(), &regions)?;
    for fix in &fixes {
        tracing::info!(
            "region {}: original checksum 0x{:02X}, stored 0x{:02X} (was 0x{:02X}), fixed checksum 0x{:02X}",
            fix.region,
            fix.partial_sum,
            fix.value,
            fix.previous,
            fix.final_sum
        );
    }

    if verify {
        for region in &regions {
            if let Err(e) = checksum::verify(image.as_bytes(), region) {
                tracing::warn!("overlapping regions: {}", e);
            }
        }
    }
    Ok(fixes)
}

/// Resolve `source` against `image` and report each region's current sum.
pub fn check_image(image: &RomImage, source: &RegionSource) -> Result<Vec<RegionStatus>> {
    source
        .resolve(image)?
        .into_iter()
        .map(|region| {
            let sum = checksum::region_sum(image.as_bytes(), &region)?;
            Ok(RegionStatus { region, sum })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::byte_sum;
    use crate::error::Error;

    fn region(start: usize, end: usize, offset: usize) -> Region {
        Region::new(start, end, offset).unwrap()
    }

    fn rom(blocks: u8, len: usize, fill: u8) -> RomImage {
        let mut bytes = vec![fill; len];
        bytes[0] = 0x55;
        bytes[1] = 0xAA;
        bytes[2] = blocks;
        RomImage::new(bytes).unwrap()
    }

    #[test]
    fn legacy_fix_touches_only_byte_five() {
        let mut img = rom(1, 1024, 0x3C);
        let before = img.clone();
        let fixes = fix_image(&mut img, &RegionSource::Legacy, true).unwrap();
        assert_eq!(fixes.len(), 1);
        assert_eq!(byte_sum(&img.as_bytes()[..512]), 0);
        for (i, (a, b)) in before.as_bytes().iter().zip(img.as_bytes()).enumerate() {
            if i != 5 {
                assert_eq!(a, b, "byte {i}");
            }
        }
    }

    #[test]
    fn check_reports_before_and_after() {
        let mut img = rom(2, 1024, 0x01);
        let status = check_image(&img, &RegionSource::Offset(0x10)).unwrap();
        assert_eq!(status.len(), 1);
        assert!(!status[0].is_valid());

        fix_image(&mut img, &RegionSource::Offset(0x10), false).unwrap();
        let status = check_image(&img, &RegionSource::Offset(0x10)).unwrap();
        assert!(status[0].is_valid());
        assert_eq!(status[0].region, region(0, 0x3FF, 0x10));
    }

    #[test]
    fn oversized_rom_is_rejected_without_mutation() {
        let mut img = RomImage::new(vec![0x00, 0x00, 0x01, 0x00, 0x00, 0xAA]).unwrap();
        let before = img.clone();
        let err = fix_image(&mut img, &RegionSource::Legacy, true).unwrap_err();
        assert!(matches!(err, Error::RegionOutOfBounds { end: 511, .. }));
        assert_eq!(img, before);
    }

    #[test]
    fn explicit_region_error_leaves_nothing_half_validated() {
        // Resolution validates every region before any correction runs.
        let mut img = rom(1, 512, 0x11);
        let before = img.clone();
        let src = RegionSource::Explicit(vec![region(0, 255, 5), region(256, 600, 300)]);
        assert!(fix_image(&mut img, &src, true).is_err());
        assert_eq!(img, before);
    }
}
