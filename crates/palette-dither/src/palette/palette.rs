//! Validated, ordered palette.

use std::collections::HashSet;
use std::ops::Index;

use super::error::PaletteError;
use crate::color::Pixel;

/// An ordered set of distinct colors that every output pixel is drawn from.
///
/// Order matters: it is the iteration order used for tie-breaking and the
/// index order reported in [`DitherStats`](crate::DitherStats) and indexed
/// PNG output.
///
/// # Example
///
/// ```
/// use palette_dither::{Palette, Pixel};
///
/// let palette = Palette::new(&[Pixel::new(0, 0, 0), Pixel::new(255, 255, 255)]).unwrap();
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.index_of(Pixel::new(255, 255, 255)), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Pixel>,
}

impl Palette {
    /// Create a palette from colors in declared order.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::EmptyPalette`] when `colors` is empty
    /// - [`PaletteError::DuplicateColor`] when a color appears twice; `index`
    ///   is the position of the second occurrence
    pub fn new(colors: &[Pixel]) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }

        let mut seen = HashSet::with_capacity(colors.len());
        for (index, color) in colors.iter().enumerate() {
            if !seen.insert(*color) {
                return Err(PaletteError::DuplicateColor {
                    index,
                    color: *color,
                });
            }
        }

        Ok(Self {
            colors: colors.to_vec(),
        })
    }

    /// Create a palette from hex strings (`#RRGGBB` or `#RGB`).
    ///
    /// ```
    /// use palette_dither::Palette;
    ///
    /// let palette = Palette::from_hex(&["#000", "#FFFFFF", "ff0000"]).unwrap();
    /// assert_eq!(palette.len(), 3);
    /// ```
    pub fn from_hex(colors: &[&str]) -> Result<Self, PaletteError> {
        let parsed = colors
            .iter()
            .map(|s| s.parse::<Pixel>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&parsed)
    }

    /// Number of colors.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a constructed palette.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Pixel> {
        self.colors.get(index).copied()
    }

    /// Colors in declared order.
    #[inline]
    pub fn colors(&self) -> &[Pixel] {
        &self.colors
    }

    pub fn iter(&self) -> impl Iterator<Item = Pixel> + '_ {
        self.colors.iter().copied()
    }

    /// Position of `color` in the palette, if it is a member.
    pub fn index_of(&self, color: Pixel) -> Option<usize> {
        self.colors.iter().position(|c| *c == color)
    }

    #[inline]
    pub fn contains(&self, color: Pixel) -> bool {
        self.index_of(color).is_some()
    }
}

impl Index<usize> for Palette {
    type Output = Pixel;

    fn index(&self, index: usize) -> &Pixel {
        &self.colors[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::ParseColorError;

    #[test]
    fn test_empty_palette_rejected() {
        assert_eq!(Palette::new(&[]), Err(PaletteError::EmptyPalette));
    }

    #[test]
    fn test_duplicate_reports_second_index() {
        let colors = [
            Pixel::new(0, 0, 0),
            Pixel::new(255, 255, 255),
            Pixel::new(0, 0, 0),
        ];
        assert_eq!(
            Palette::new(&colors),
            Err(PaletteError::DuplicateColor {
                index: 2,
                color: Pixel::new(0, 0, 0),
            })
        );
    }

    #[test]
    fn test_declared_order_preserved() {
        let colors = [
            Pixel::new(255, 0, 0),
            Pixel::new(0, 255, 0),
            Pixel::new(0, 0, 255),
        ];
        let palette = Palette::new(&colors).unwrap();
        assert_eq!(palette.colors(), &colors);
        assert_eq!(palette[1], Pixel::new(0, 255, 0));
        assert_eq!(palette.get(3), None);
    }

    #[test]
    fn test_from_hex_propagates_parse_error() {
        assert_eq!(
            Palette::from_hex(&["#000", "#12"]),
            Err(PaletteError::ParseColor(ParseColorError::InvalidLength))
        );
    }

    #[test]
    fn test_from_hex_detects_shorthand_duplicate() {
        assert!(matches!(
            Palette::from_hex(&["#fff", "#FFFFFF"]),
            Err(PaletteError::DuplicateColor { index: 1, .. })
        ));
    }

    #[test]
    fn test_membership() {
        let palette = Palette::from_hex(&["#000", "#fff"]).unwrap();
        assert!(palette.contains(Pixel::new(255, 255, 255)));
        assert!(!palette.contains(Pixel::new(128, 128, 128)));
    }
}
