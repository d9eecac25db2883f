//! Error-diffusion dithering.
//!
//! The scan visits pixels in strict row-major order. For each pixel it reads
//! the accumulated value, commits the nearest palette entry, and spreads the
//! signed difference over the forward neighbors named by the kernel. A final
//! pass then re-matches every pixel without propagation so the output only
//! ever contains palette members.
//!
//! # Kernels
//!
//! - **Floyd-Steinberg**: four taps, one row ahead (default)
//! - **Jarvis-Judice-Ninke**, **Stucki**: twelve taps over two rows
//! - **Burkes**, **Sierra family**: lighter variants
//! - **Atkinson**: six taps, normalized to full propagation
//! - **Stevenson-Arce**: twelve sparse taps over three rows
//!
//! See [`kernel_for`] for names and aliases.

mod error;
mod kernel;
mod observer;
mod options;
mod window;

pub use error::KernelError;
pub use kernel::*;
pub use observer::{ScanObserver, ScanStep};
pub use options::{DitherOptions, KernelChoice};

use window::RowWindow;

use crate::api::DitherError;
use crate::color::{ColorSpace, Pixel};
use crate::image::Image;
use crate::metric::Norm;
use crate::palette::{Palette, PaletteMatcher, SearchOrder};

/// Summary of one dithering run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DitherStats {
    /// Pixels processed
    pub pixels: usize,
    /// Output pixel count per palette entry, in palette order
    pub usage: Vec<usize>,
    /// Pixels the final remap pass changed
    pub remapped: usize,
}

/// Error-diffusion pass over `image`, committing palette entries in place.
///
/// The kernel, palette and matcher are already validated; nothing here can
/// fail.
pub(crate) fn diffuse<O: ScanObserver + ?Sized>(
    image: &mut Image,
    matcher: &PaletteMatcher<'_>,
    kernel: &DiffusionKernel,
    order: &mut SearchOrder,
    observer: &mut O,
) {
    let width = image.width();
    let height = image.height();
    let palette = matcher.palette();
    let mut window = RowWindow::new(image, kernel.max_dy() + 1);

    for y in 0..height {
        for x in 0..width {
            let accumulated = window.get(x);
            let palette_index = matcher.nearest_in_order(accumulated, order.next_order());
            let quantized = palette[palette_index];
            let target = quantized.to_f32();
            let error = [
                accumulated[0] - target[0],
                accumulated[1] - target[1],
                accumulated[2] - target[2],
            ];

            image[(x, y)] = quantized;

            for entry in kernel.entries() {
                let nx = x as i64 + entry.dx as i64;
                let ny = y + entry.dy as usize;
                if nx >= 0 && (nx as usize) < width && ny < height {
                    let w = entry.weight as f32;
                    window.add_clamped(
                        nx as usize,
                        entry.dy as usize,
                        [error[0] * w, error[1] * w, error[2] * w],
                    );
                }
            }

            observer.on_pixel(&ScanStep {
                x,
                y,
                accumulated,
                quantized,
                palette_index,
                error,
            });
        }

        window.advance(image);
        observer.on_row_complete(y + 1, height);
        tracing::trace!(row = y + 1, rows = height, "Row diffused");
    }
}

/// Re-match every pixel to its nearest palette entry, without propagation.
///
/// Returns the number of pixels that changed and fills `usage` with the
/// per-entry output counts.
pub(crate) fn remap(
    image: &mut Image,
    matcher: &PaletteMatcher<'_>,
    order: &mut SearchOrder,
    usage: &mut [usize],
) -> usize {
    let palette = matcher.palette();
    let mut changed = 0;
    for pixel in image.pixels_mut() {
        let idx = matcher.nearest_in_order(pixel.to_f32(), order.next_order());
        let mapped = palette[idx];
        if mapped != *pixel {
            *pixel = mapped;
            changed += 1;
        }
        usage[idx] += 1;
    }
    changed
}

/// Dither `image` in place with a catalog kernel given by name.
///
/// Uses CIE Lab comparison and first-in-order tie-breaking. For full
/// control use [`Ditherer`](crate::Ditherer).
///
/// # Errors
///
/// [`KernelError::UnknownKernel`] for a name outside the catalog, and the
/// [`Palette::new`] errors for `palette`. In both cases `image` is not
/// modified.
///
/// # Example
///
/// ```
/// use palette_dither::{dither_image, Image, Norm, Pixel};
///
/// let mut image = Image::filled(4, 4, Pixel::new(128, 128, 128));
/// let bw = [Pixel::new(0, 0, 0), Pixel::new(255, 255, 255)];
/// dither_image(&mut image, &bw, "floyd-steinberg", Norm::L2).unwrap();
/// assert!(image.pixels().iter().all(|p| bw.contains(p)));
/// ```
pub fn dither_image(
    image: &mut Image,
    palette: &[Pixel],
    kernel: &str,
    norm: Norm,
) -> Result<DitherStats, DitherError> {
    let kernel = kernel_for(kernel)?;
    let palette = Palette::new(palette)?;
    let matcher = PaletteMatcher::new(&palette, ColorSpace::default(), norm);
    let mut order = SearchOrder::new(palette.len(), Default::default());
    Ok(run(image, &matcher, kernel, &mut order, &mut ()))
}

/// Full run: diffusion pass, then remap pass.
pub(crate) fn run<O: ScanObserver + ?Sized>(
    image: &mut Image,
    matcher: &PaletteMatcher<'_>,
    kernel: &DiffusionKernel,
    order: &mut SearchOrder,
    observer: &mut O,
) -> DitherStats {
    tracing::debug!(
        kernel = kernel.name(),
        norm = %matcher.norm(),
        color_space = %matcher.space(),
        width = image.width(),
        height = image.height(),
        colors = matcher.palette().len(),
        "Dithering image"
    );

    diffuse(image, matcher, kernel, order, observer);

    let mut usage = vec![0; matcher.palette().len()];
    let remapped = remap(image, matcher, order, &mut usage);

    tracing::debug!(remapped, "Final remap pass complete");

    DitherStats {
        pixels: image.pixels().len(),
        usage,
        remapped,
    }
}
