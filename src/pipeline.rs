//! Read, dither and write a single image.

use std::path::Path;

use anyhow::Context;
use palette_dither::DitherStats;

use crate::image_io::{self, WriteOptions};
use crate::progress::ProgressLog;
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertOptions {
    pub write: WriteOptions,
    /// Log progress every 10% of rows
    pub progress: bool,
}

/// Dither the PNG at `input` and write the result to `output`.
pub fn convert(
    input: &Path,
    output: &Path,
    settings: &Settings,
    options: ConvertOptions,
) -> anyhow::Result<DitherStats> {
    let mut image = image_io::read_png(input)
        .with_context(|| format!("Failed to load input image {}", input.display()))?;

    tracing::info!(
        input = %input.display(),
        width = image.width(),
        height = image.height(),
        kernel = %settings.kernel_name,
        norm = %settings.options.norm,
        color_space = %settings.options.color_space,
        colors = settings.palette.len(),
        "Dithering"
    );

    let ditherer = settings.ditherer();
    let stats = if options.progress {
        ditherer.dither_observed(&mut image, &mut ProgressLog::default())?
    } else {
        ditherer.dither(&mut image)?
    };

    image_io::write_png(output, &image, &settings.palette, options.write)
        .with_context(|| format!("Failed to write output image {}", output.display()))?;

    tracing::info!(
        output = %output.display(),
        pixels = stats.pixels,
        remapped = stats.remapped,
        "Wrote dithered image"
    );
    Ok(stats)
}
