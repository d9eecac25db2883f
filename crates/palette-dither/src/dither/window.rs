//! Sliding accumulation window.

use crate::image::Image;

/// Accumulated channel values for the rows a kernel can still reach.
///
/// `rows[0]` is the row being scanned, `rows[k]` the row `k` below it. Each
/// row is loaded from the image when it enters the window, so values start
/// as the original pixel and collect diffused error on top. Rows past the
/// bottom edge stay zeroed and are never read.
pub(crate) struct RowWindow {
    rows: Vec<Vec<[f32; 3]>>,
    width: usize,
    top: usize,
}

impl RowWindow {
    /// Window of `depth` rows starting at row 0 of `image`.
    ///
    /// Never holds more rows than the image has; taps landing further down
    /// fall off the bottom edge anyway.
    pub(crate) fn new(image: &Image, depth: usize) -> Self {
        let width = image.width();
        let depth = depth.min(image.height()).max(1);
        let mut rows = vec![vec![[0.0; 3]; width]; depth];
        for (y, row) in rows.iter_mut().enumerate() {
            Self::load(image, y, row);
        }
        Self {
            rows,
            width,
            top: 0,
        }
    }

    fn load(image: &Image, y: usize, row: &mut [[f32; 3]]) {
        if y < image.height() {
            for (slot, pixel) in row.iter_mut().zip(image.row(y)) {
                *slot = pixel.to_f32();
            }
        } else {
            row.fill([0.0; 3]);
        }
    }

    /// Accumulated value at column `x` of the current row.
    #[inline]
    pub(crate) fn get(&self, x: usize) -> [f32; 3] {
        self.rows[0][x]
    }

    /// Add `delta` to the pixel at `x`, `row_offset` rows below the current
    /// one, clamping every channel to `[0, 255]`.
    ///
    /// Silently ignores targets outside the window.
    #[inline]
    pub(crate) fn add_clamped(&mut self, x: usize, row_offset: usize, delta: [f32; 3]) {
        if x < self.width && row_offset < self.rows.len() {
            let slot = &mut self.rows[row_offset][x];
            for c in 0..3 {
                slot[c] = (slot[c] + delta[c]).clamp(0.0, 255.0);
            }
        }
    }

    /// Move down one row, loading the newly reachable row from `image`.
    ///
    /// Rows below the scan line are still untouched in `image`, so loading
    /// them here reads original values.
    pub(crate) fn advance(&mut self, image: &Image) {
        self.rows.rotate_left(1);
        self.top += 1;
        let incoming = self.top + self.rows.len() - 1;
        if let Some(last) = self.rows.last_mut() {
            Self::load(image, incoming, last);
        }
    }
}
