//! 8-bit RGB pixel type
//!
//! [`Pixel`] is the storage type for both images and palettes. Channels are
//! kept in R, G, B order.

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// A pixel with three 8-bit channels in R, G, B order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pixel {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Pixel {
    /// Create a pixel from its three channels.
    ///
    /// # Example
    /// ```
    /// use palette_dither::Pixel;
    /// let orange = Pixel::new(255, 128, 0);
    /// assert_eq!(orange.to_bytes(), [255, 128, 0]);
    /// ```
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a pixel from a byte array `[R, G, B]`.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array `[R, G, B]`.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Channel values widened to `f32`, as used by the accumulation buffer.
    #[inline]
    pub fn to_f32(self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }

    /// Channel values widened to `f64`, as used by the color space converter.
    #[inline]
    pub fn to_f64(self) -> [f64; 3] {
        [self.r as f64, self.g as f64, self.b as f64]
    }
}

impl From<[u8; 3]> for Pixel {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Pixel> for [u8; 3] {
    fn from(pixel: Pixel) -> Self {
        pixel.to_bytes()
    }
}

impl fmt::Display for Pixel {
    /// Formats as lowercase `#rrggbb`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Pixel {
    type Err = ParseColorError;

    /// Parse a pixel from a hex string.
    ///
    /// Accepts `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`, case-insensitive, with
    /// surrounding whitespace trimmed. Shorthand digits are expanded
    /// (`F` becomes `FF`).
    ///
    /// ```
    /// use palette_dither::Pixel;
    ///
    /// let red: Pixel = "#F00".parse().unwrap();
    /// assert_eq!(red, Pixel::new(255, 0, 0));
    ///
    /// let teal: Pixel = "008080".parse().unwrap();
    /// assert_eq!(teal, Pixel::new(0, 128, 128));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::NonAscii);
        }

        match s.len() {
            3 => {
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
