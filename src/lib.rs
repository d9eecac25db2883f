//! inkframe - dither photos for e-ink picture frames
//!
//! Command-line front end for the `palette-dither` engine.
//! This library exposes modules for integration testing.

pub mod config;
pub mod error;
pub mod image_io;
pub mod palettes;
pub mod pipeline;
pub mod progress;
pub mod settings;
