#![allow(clippy::excessive_precision, clippy::needless_range_loop)]

//! palette-dither: error-diffusion dithering to small fixed palettes
//!
//! Reduces a full-color RGB raster to a caller-supplied palette (typically
//! 2-16 colors) while keeping tonal detail, by spreading each pixel's
//! quantization error over its unvisited neighbors.
//!
//! # Quick Start
//!
//! ```
//! use palette_dither::{Ditherer, Image, KernelKind, Norm, Palette, Pixel};
//!
//! let palette = Palette::from_hex(&["#000000", "#ffffff", "#ff0000"]).unwrap();
//! let ditherer = Ditherer::new(palette)
//!     .kernel(KernelKind::StevensonArce)
//!     .norm(Norm::L1);
//!
//! let mut image = Image::filled(16, 16, Pixel::new(200, 80, 80));
//! ditherer.dither(&mut image).unwrap();
//!
//! assert!(image.pixels().iter().all(|p| ditherer.palette().contains(*p)));
//! ```
//!
//! # Pipeline
//!
//! - **Kernel catalog** ([`kernel_for`], [`KernelKind`]): nine classic
//!   kernels, validated once on first use; custom kernels via
//!   [`DiffusionKernel::new`]
//! - **Color space** ([`ColorSpace`]): RGB, YUV, CIE Lab (default) or Oklab
//! - **Distance** ([`Norm`]): L1, L2 or L-infinity
//! - **Matcher** ([`PaletteMatcher`], [`closest`]): nearest entry, ties to
//!   the first candidate in search order
//! - **Engine** ([`Ditherer`]): row-major diffusion with clamped `f32`
//!   accumulation, followed by a remap pass that guarantees every output
//!   pixel is a palette member
//!
//! # Determinism
//!
//! With the default [`TieBreak::FirstInOrder`] a run is a pure function of
//! image, palette and options. [`TieBreak::Shuffled`] randomizes the search
//! order from an explicit seed; no global random state is involved.
//!
//! # Concurrency
//!
//! A single scan is sequential, since every pixel depends on all earlier
//! ones. [`Ditherer::dither_batch`] spreads independent images over the
//! rayon thread pool.

pub mod api;
pub mod color;
pub mod dither;
pub mod image;
pub mod metric;
pub mod palette;


pub use api::{DitherError, Ditherer};
pub use color::{ColorSpace, Pixel};
pub use dither::{
    dither_image, kernel_for, DiffusionKernel, DitherOptions, DitherStats, KernelCatalog,
    KernelChoice, KernelEntry, KernelError, KernelKind, ScanObserver, ScanStep,
};
pub use image::Image;
pub use metric::{distance, Norm};
pub use palette::{closest, Palette, PaletteError, PaletteMatcher, ParseColorError, TieBreak};
