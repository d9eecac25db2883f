//! Error types for color parsing and palette validation.

use std::num::ParseIntError;

use thiserror::Error;

use crate::color::Pixel;

/// Error returned when a hex color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,
    /// Input contains non-ASCII characters
    #[error("hex color contains non-ASCII characters")]
    NonAscii,
    /// Invalid hexadecimal character encountered
    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] ParseIntError),
}

/// Error returned when a palette is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// No colors provided in palette
    #[error("palette cannot be empty")]
    EmptyPalette,
    /// Duplicate color found at the specified index
    #[error("duplicate color {color} at palette index {index}")]
    DuplicateColor {
        /// Index where the duplicate was found
        index: usize,
        /// The repeated color
        color: Pixel,
    },
    /// Invalid hex color string
    #[error("invalid color: {0}")]
    ParseColor(#[from] ParseColorError),
}
