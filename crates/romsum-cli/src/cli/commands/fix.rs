//! `romsum fix` – correct checksum regions and write the patched image.

use anyhow::{Context, Result};
use romsum_core::config::RomsumConfig;
use romsum_core::image::RomImage;
use romsum_core::patch::fix_image;
use romsum_core::source::RegionSource;
use std::path::Path;

/// Load `input`, correct the regions selected by `source`, write `output`.
///
/// `output` is only created once every region has been corrected.
pub fn run_fix(
    cfg: &RomsumConfig,
    source: &RegionSource,
    input: &Path,
    output: &Path,
) -> Result<()> {
    let mut image = RomImage::load(input)?;
    let fixes = fix_image(&mut image, source, cfg.verify)
        .with_context(|| format!("fixing {}", input.display()))?;
    image.write_to(output, cfg.output_mode)?;
    tracing::info!(
        "wrote {} ({} bytes, {} region(s) corrected)",
        output.display(),
        image.len(),
        fixes.len()
    );
    Ok(())
}
