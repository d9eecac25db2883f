//! Public API: the [`Ditherer`] builder and the unified [`DitherError`].

mod builder;
mod error;

pub use builder::Ditherer;
pub use error::DitherError;
