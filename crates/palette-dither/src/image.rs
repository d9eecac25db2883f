//! Owned RGB raster.

use std::ops::{Index, IndexMut};

use crate::api::DitherError;
use crate::color::Pixel;

/// A row-major `width x height` grid of pixels.
///
/// The pixel buffer length always equals `width * height`; the constructors
/// enforce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
}

impl Image {
    /// Wrap an existing pixel buffer.
    ///
    /// # Errors
    ///
    /// [`DitherError::DimensionMismatch`] when `pixels.len() != width * height`.
    pub fn new(width: usize, height: usize, pixels: Vec<Pixel>) -> Result<Self, DitherError> {
        let expected = pixel_count(width, height);
        if expected != Some(pixels.len()) {
            return Err(DitherError::DimensionMismatch {
                width,
                height,
                expected: expected.unwrap_or(usize::MAX),
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Image with every pixel set to `pixel`.
    ///
    /// # Panics
    ///
    /// When `width * height` overflows `usize`.
    pub fn filled(width: usize, height: usize, pixel: Pixel) -> Self {
        Self {
            width,
            height,
            pixels: vec![pixel; pixel_count(width, height).unwrap_or(usize::MAX)],
        }
    }

    /// Build from packed `R, G, B` bytes.
    ///
    /// # Errors
    ///
    /// [`DitherError::DimensionMismatch`] when `bytes` does not hold exactly
    /// `width * height` pixels. `actual` reports whole pixels, rounded down.
    pub fn from_rgb8(width: usize, height: usize, bytes: &[u8]) -> Result<Self, DitherError> {
        let expected = pixel_count(width, height);
        if expected.and_then(|n| n.checked_mul(3)) != Some(bytes.len()) {
            return Err(DitherError::DimensionMismatch {
                width,
                height,
                expected: expected.unwrap_or(usize::MAX),
                actual: bytes.len() / 3,
            });
        }
        let pixels = bytes
            .chunks_exact(3)
            .map(|c| Pixel::new(c[0], c[1], c[2]))
            .collect();
        Self::new(width, height, pixels)
    }

    /// Packed `R, G, B` bytes.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_bytes()).collect()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside the image.
    pub fn get(&self, x: usize, y: usize) -> Option<Pixel> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Row `y` as a slice.
    pub fn row(&self, y: usize) -> &[Pixel] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }
}

/// `width * height`, or `None` on overflow.
fn pixel_count(width: usize, height: usize) -> Option<usize> {
    width.checked_mul(height)
}

impl Index<(usize, usize)> for Image {
    type Output = Pixel;

    fn index(&self, (x, y): (usize, usize)) -> &Pixel {
        &self.pixels[x + y * self.width]
    }
}

impl IndexMut<(usize, usize)> for Image {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Pixel {
        &mut self.pixels[x + y * self.width]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch() {
        assert_eq!(
            Image::new(2, 2, vec![Pixel::default(); 3]),
            Err(DitherError::DimensionMismatch {
                width: 2,
                height: 2,
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_rgb8_round_trip() {
        let bytes = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
        let image = Image::from_rgb8(2, 2, &bytes).unwrap();
        assert_eq!(image[(1, 0)], Pixel::new(4, 5, 6));
        assert_eq!(image[(0, 1)], Pixel::new(7, 8, 9));
        assert_eq!(image.to_rgb8(), bytes);
    }

    #[test]
    fn test_rgb8_wrong_length() {
        assert!(matches!(
            Image::from_rgb8(2, 1, &[0; 5]),
            Err(DitherError::DimensionMismatch { expected: 2, .. })
        ));
    }

    #[test]
    fn test_index_mut_and_rows() {
        let mut image = Image::filled(3, 2, Pixel::new(0, 0, 0));
        image[(2, 1)] = Pixel::new(9, 9, 9);
        assert_eq!(image.row(1)[2], Pixel::new(9, 9, 9));
        assert_eq!(image.get(2, 1), Some(Pixel::new(9, 9, 9)));
        assert_eq!(image.get(3, 0), None);
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        assert_eq!(
            Image::new(usize::MAX, 2, Vec::new()),
            Err(DitherError::DimensionMismatch {
                width: usize::MAX,
                height: 2,
                expected: usize::MAX,
                actual: 0
            })
        );
        assert!(matches!(
            Image::from_rgb8(usize::MAX / 2, 1, &[0; 6]),
            Err(DitherError::DimensionMismatch { actual: 2, .. })
        ));
    }

    #[test]
    fn test_empty_image_is_valid() {
        let image = Image::new(0, 5, Vec::new()).unwrap();
        assert!(image.pixels().is_empty());
    }
}
