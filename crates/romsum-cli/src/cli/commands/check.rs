//! `romsum check` – report region checksums without modifying anything.

use anyhow::Result;
use romsum_core::image::RomImage;
use romsum_core::patch::check_image;
use romsum_core::source::RegionSource;
use romsum_core::Error;
use std::path::Path;

pub fn run_check(source: &RegionSource, input: &Path) -> Result<()> {
    let image = RomImage::load(input)?;
    let statuses = check_image(&image, source)?;

    println!("{:<24} {:<6} {}", "REGION", "SUM", "STATUS");
    for s in &statuses {
        println!(
            "{:<24} 0x{:02X}   {}",
            s.region.to_string(),
            s.sum,
            if s.is_valid() { "ok" } else { "bad" }
        );
    }

    // First failing region decides the error.
    if let Some(bad) = statuses.iter().find(|s| !s.is_valid()) {
        return Err(Error::ChecksumMismatch {
            start: bad.region.start(),
            end: bad.region.end(),
            sum: bad.sum,
        }
        .into());
    }
    Ok(())
}
