//! Comparison color spaces
//!
//! Palette matching never compares raw RGB bytes directly. Both the
//! candidate pixel and every palette entry are first mapped into a
//! [`ColorSpace`], and the distance metric runs on the mapped vectors.
//!
//! Input channels are on the 0..=255 scale but may be fractional, so an
//! accumulated value carrying diffused error can be matched without being
//! rounded first.
//!
//! # References
//!
//! - CIE L\*a\*b\*: sRGB primaries, D65 reference white
//! - Oklab: Björn Ottosson, "A perceptual color space for image processing"
//!   <https://bottosson.github.io/posts/oklab/>

use std::fmt;
use std::str::FromStr;

use super::Pixel;
use crate::api::DitherError;

/// D65 reference white in XYZ (Y normalized to 1).
const D65_WHITE: [f64; 3] = [0.95047, 1.0, 1.08883];

/// Space in which candidate pixels and palette entries are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorSpace {
    /// Raw channel values, no transform.
    Rgb,
    /// 8-bit YUV (BT.601 luma, offset chroma).
    Yuv,
    /// CIE L\*a\*b\* under D65.
    #[default]
    Lab,
    /// Oklab perceptual space.
    Oklab,
}

impl ColorSpace {
    /// Every supported space, in documentation order.
    pub const ALL: [ColorSpace; 4] = [Self::Rgb, Self::Yuv, Self::Lab, Self::Oklab];

    /// Canonical lowercase identifier.
    pub fn name(self) -> &'static str {
        match self {
            Self::Rgb => "rgb",
            Self::Yuv => "yuv",
            Self::Lab => "lab",
            Self::Oklab => "oklab",
        }
    }

    /// Map an 8-bit pixel into this space.
    #[inline]
    pub fn to_comparison_space(self, pixel: Pixel) -> [f64; 3] {
        self.convert(pixel.to_f64())
    }

    /// Map fractional RGB channels (0..=255 scale) into this space.
    ///
    /// Pure and deterministic: equal inputs always produce bit-identical
    /// outputs.
    pub fn convert(self, rgb: [f64; 3]) -> [f64; 3] {
        match self {
            Self::Rgb => rgb,
            Self::Yuv => rgb_to_yuv(rgb),
            Self::Lab => rgb_to_lab(rgb),
            Self::Oklab => rgb_to_oklab(rgb),
        }
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorSpace {
    type Err = DitherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rgb" | "srgb" => Ok(Self::Rgb),
            "yuv" => Ok(Self::Yuv),
            "lab" | "cielab" | "cie-lab" => Ok(Self::Lab),
            "oklab" => Ok(Self::Oklab),
            _ => Err(DitherError::UnknownColorSpace(s.to_string())),
        }
    }
}

/// sRGB transfer function, input and output in 0..=1.
#[inline]
fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linearize(rgb: [f64; 3]) -> [f64; 3] {
    rgb.map(|c| srgb_to_linear(c / 255.0))
}

fn rgb_to_yuv([r, g, b]: [f64; 3]) -> [f64; 3] {
    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let u = (b - y) * 0.492 + 128.0;
    let v = (r - y) * 0.877 + 128.0;
    [y, u, v]
}

fn rgb_to_lab(rgb: [f64; 3]) -> [f64; 3] {
    let [r, g, b] = linearize(rgb);

    let x = 0.4124564 * r + 0.3575761 * g + 0.1804375 * b;
    let y = 0.2126729 * r + 0.7151522 * g + 0.0721750 * b;
    let z = 0.0193339 * r + 0.1191920 * g + 0.9503041 * b;

    let fx = lab_f(x / D65_WHITE[0]);
    let fy = lab_f(y / D65_WHITE[1]);
    let fz = lab_f(z / D65_WHITE[2]);

    [116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

#[inline]
fn lab_f(t: f64) -> f64 {
    const DELTA: f64 = 6.0 / 29.0;
    if t > DELTA * DELTA * DELTA {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

fn rgb_to_oklab(rgb: [f64; 3]) -> [f64; 3] {
    let [r, g, b] = linearize(rgb);

    // Linear sRGB to LMS
    let l = 0.4122214708 * r + 0.5363325363 * g + 0.0514459929 * b;
    let m = 0.2119034982 * r + 0.6806995451 * g + 0.1073969566 * b;
    let s = 0.0883024619 * r + 0.2817188376 * g + 0.6299787005 * b;

    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    [
        0.2104542553 * l_ + 0.7936177850 * m_ - 0.0040720468 * s_,
        1.9779984951 * l_ - 2.4285922050 * m_ + 0.4505937099 * s_,
        0.0259040371 * l_ + 0.7827717662 * m_ - 0.8086757660 * s_,
    ]
}
