//! Pixel storage and comparison color spaces.

mod pixel;
mod space;

pub use pixel::Pixel;
pub use space::ColorSpace;
