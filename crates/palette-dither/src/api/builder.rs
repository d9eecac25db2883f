//! Ditherer builder -- the main entry point of the crate.
//!
//! [`Ditherer`] owns a validated [`Palette`] and a set of
//! [`DitherOptions`], and can be reused across any number of images.

use rayon::prelude::*;

use super::error::DitherError;
use crate::color::ColorSpace;
use crate::dither::{
    self, DiffusionKernel, DitherOptions, DitherStats, KernelChoice, ScanObserver,
};
use crate::image::Image;
use crate::metric::Norm;
use crate::palette::{Palette, PaletteMatcher, SearchOrder, TieBreak};

/// Error-diffusion ditherer for a fixed palette.
///
/// - Constructor requires a [`Palette`], so an empty palette cannot reach a scan
/// - Configuration methods consume and return `self`
/// - [`dither()`](Self::dither) takes `&self`, so one ditherer serves many images
///
/// # Example
///
/// ```
/// use palette_dither::{Ditherer, Image, KernelKind, Norm, Palette, Pixel};
///
/// let palette = Palette::from_hex(&["#000", "#fff"]).unwrap();
/// let ditherer = Ditherer::new(palette)
///     .kernel(KernelKind::Atkinson)
///     .norm(Norm::L1);
///
/// let mut image = Image::filled(8, 8, Pixel::new(100, 100, 100));
/// let stats = ditherer.dither(&mut image).unwrap();
/// assert_eq!(stats.pixels, 64);
/// ```
#[derive(Debug, Clone)]
pub struct Ditherer {
    palette: Palette,
    options: DitherOptions,
}

impl Ditherer {
    /// Ditherer with default options (Floyd-Steinberg, L2, Lab).
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            options: DitherOptions::default(),
        }
    }

    /// Ditherer with explicit options.
    pub fn with_options(palette: Palette, options: DitherOptions) -> Self {
        Self { palette, options }
    }

    /// Set the diffusion kernel.
    #[inline]
    pub fn kernel(mut self, kernel: impl Into<KernelChoice>) -> Self {
        self.options.kernel = kernel.into();
        self
    }

    /// Set a caller-defined kernel.
    #[inline]
    pub fn custom_kernel(mut self, kernel: DiffusionKernel) -> Self {
        self.options.kernel = KernelChoice::Custom(kernel);
        self
    }

    #[inline]
    pub fn norm(mut self, norm: Norm) -> Self {
        self.options.norm = norm;
        self
    }

    #[inline]
    pub fn color_space(mut self, space: ColorSpace) -> Self {
        self.options.color_space = space;
        self
    }

    #[inline]
    pub fn tie_break(mut self, tie_break: TieBreak) -> Self {
        self.options.tie_break = tie_break;
        self
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn options(&self) -> &DitherOptions {
        &self.options
    }

    /// Dither `image` in place.
    ///
    /// # Errors
    ///
    /// Kernel validation errors from the catalog. The image is not touched
    /// when an error is returned.
    pub fn dither(&self, image: &mut Image) -> Result<DitherStats, DitherError> {
        self.dither_observed(image, &mut ())
    }

    /// Dither `image` in place, reporting every step to `observer`.
    pub fn dither_observed<O: ScanObserver + ?Sized>(
        &self,
        image: &mut Image,
        observer: &mut O,
    ) -> Result<DitherStats, DitherError> {
        let kernel = self.options.kernel.resolve()?;
        let matcher = self.matcher();
        let mut order = SearchOrder::new(self.palette.len(), self.options.tie_break);
        Ok(dither::run(image, &matcher, kernel, &mut order, observer))
    }

    /// Only the final remap pass: snap every pixel to its nearest palette
    /// entry without diffusing any error. Returns the number of pixels
    /// changed.
    pub fn remap(&self, image: &mut Image) -> usize {
        let matcher = self.matcher();
        let mut order = SearchOrder::new(self.palette.len(), self.options.tie_break);
        let mut usage = vec![0; self.palette.len()];
        dither::remap(image, &matcher, &mut order, &mut usage)
    }

    /// Dither several independent images in parallel.
    ///
    /// Each image is scanned sequentially on its own worker. With a shuffled
    /// tie-break, image `i` uses seed `seed + i` (wrapping), so the result
    /// for a given batch position does not depend on scheduling.
    pub fn dither_batch(&self, images: &mut [Image]) -> Result<Vec<DitherStats>, DitherError> {
        let kernel = self.options.kernel.resolve()?;
        let matcher = self.matcher();

        tracing::debug!(images = images.len(), "Dithering batch");

        let stats = images
            .par_iter_mut()
            .enumerate()
            .map(|(i, image)| {
                let tie_break = match self.options.tie_break {
                    TieBreak::Shuffled { seed } => TieBreak::Shuffled {
                        seed: seed.wrapping_add(i as u64),
                    },
                    other => other,
                };
                let mut order = SearchOrder::new(self.palette.len(), tie_break);
                dither::run(image, &matcher, kernel, &mut order, &mut ())
            })
            .collect();

        Ok(stats)
    }

    fn matcher(&self) -> PaletteMatcher<'_> {
        PaletteMatcher::new(&self.palette, self.options.color_space, self.options.norm)
    }
}
