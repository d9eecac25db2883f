//! Hooks for watching a scan as it runs.

use crate::color::Pixel;

/// What happened at one pixel of the error-diffusion pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanStep {
    pub x: usize,
    pub y: usize,
    /// Original value plus all error diffused into it, clamped to `[0, 255]`
    pub accumulated: [f32; 3],
    /// Palette entry committed to the image
    pub quantized: Pixel,
    /// Index of `quantized` in the palette
    pub palette_index: usize,
    /// `accumulated - quantized`, per channel
    pub error: [f32; 3],
}

/// Receives scan events. Observers can only watch; they cannot change the
/// result.
///
/// Both methods default to doing nothing, so an observer implements only
/// what it needs.
pub trait ScanObserver {
    /// Called after each pixel is committed and its error diffused.
    fn on_pixel(&mut self, _step: &ScanStep) {}

    /// Called after each row of the error-diffusion pass.
    fn on_row_complete(&mut self, _rows_done: usize, _rows_total: usize) {}
}

/// The no-op observer.
impl ScanObserver for () {}

impl<O: ScanObserver + ?Sized> ScanObserver for &mut O {
    fn on_pixel(&mut self, step: &ScanStep) {
        (**self).on_pixel(step);
    }

    fn on_row_complete(&mut self, rows_done: usize, rows_total: usize) {
        (**self).on_row_complete(rows_done, rows_total);
    }
}
