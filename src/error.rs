use std::path::PathBuf;

use palette_dither::{DitherError, KernelError, PaletteError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageIoError {
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PNG decode error: {0}")]
    Decode(#[from] png::DecodingError),

    #[error("PNG encode error: {0}")]
    Encode(#[from] png::EncodingError),

    #[error("Unsupported image: {0}")]
    UnsupportedFormat(String),

    #[error("Image error: {0}")]
    Image(#[from] DitherError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Invalid dithering settings from flags or config.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Unknown color `{0}` (expected a name such as `red` or a hex value such as `#ff0000`)")]
    UnknownColor(String),

    #[error(transparent)]
    Dither(#[from] DitherError),
}

impl From<KernelError> for SettingsError {
    fn from(e: KernelError) -> Self {
        SettingsError::Dither(e.into())
    }
}

impl From<PaletteError> for SettingsError {
    fn from(e: PaletteError) -> Self {
        SettingsError::Dither(e.into())
    }
}
