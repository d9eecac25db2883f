//! Unified error type for the palette-dither public API.

use thiserror::Error;

use crate::dither::KernelError;
use crate::palette::{PaletteError, ParseColorError};

/// Unified error type for the palette-dither public API.
///
/// Every variant is raised before a scan starts; an image passed to a
/// failing call is left untouched.
///
/// # Example
///
/// ```
/// use palette_dither::{DitherError, Palette};
///
/// fn bw() -> Result<Palette, DitherError> {
///     Ok(Palette::from_hex(&["#000000", "#FFFFFF"])?)
/// }
/// # bw().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DitherError {
    /// Palette validation error (empty, duplicate or unparsable color)
    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),

    /// Kernel lookup or validation error
    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),

    #[error("unknown distance norm `{0}` (expected l1, l2 or linf)")]
    UnknownNorm(String),

    #[error("unknown color space `{0}` (expected rgb, yuv, lab or oklab)")]
    UnknownColorSpace(String),

    /// Pixel buffer length disagrees with the declared dimensions
    #[error("{width}x{height} image needs {expected} pixels, got {actual}")]
    DimensionMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
}

impl From<ParseColorError> for DitherError {
    fn from(err: ParseColorError) -> Self {
        DitherError::Palette(PaletteError::ParseColor(err))
    }
}
