//! Palette definition and nearest-color matching.

mod error;
mod matcher;
#[allow(clippy::module_inception)]
mod palette;

pub use error::{PaletteError, ParseColorError};
pub use matcher::{closest, PaletteMatcher, TieBreak};
pub(crate) use matcher::SearchOrder;
pub use palette::Palette;
