//! Nearest-palette-entry search.
//!
//! [`PaletteMatcher`] converts the palette into the comparison space once and
//! then answers nearest-entry queries with a linear scan. Ties go to the
//! candidate visited first; the visiting order is the palette's declared
//! order unless a [`TieBreak::Shuffled`] policy supplies a seeded shuffle.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::error::PaletteError;
use super::palette::Palette;
use crate::color::{ColorSpace, Pixel};
use crate::metric::Norm;

/// How equally distant candidates are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TieBreak {
    /// Always search in declared palette order; the earliest entry wins.
    #[default]
    FirstInOrder,
    /// Shuffle the search order before every query using a generator seeded
    /// with `seed`. Reproducible for a fixed seed and input.
    Shuffled {
        /// Seed for the per-run generator
        seed: u64,
    },
}

/// Palette precomputed in a comparison space, ready for nearest queries.
#[derive(Debug, Clone)]
pub struct PaletteMatcher<'a> {
    palette: &'a Palette,
    space: ColorSpace,
    norm: Norm,
    converted: Vec<[f64; 3]>,
}

impl<'a> PaletteMatcher<'a> {
    pub fn new(palette: &'a Palette, space: ColorSpace, norm: Norm) -> Self {
        let converted = palette
            .iter()
            .map(|c| space.to_comparison_space(c))
            .collect();
        Self {
            palette,
            space,
            norm,
            converted,
        }
    }

    #[inline]
    pub fn palette(&self) -> &'a Palette {
        self.palette
    }

    #[inline]
    pub fn space(&self) -> ColorSpace {
        self.space
    }

    #[inline]
    pub fn norm(&self) -> Norm {
        self.norm
    }

    /// Closest palette entry to `pixel`, first in declared order on ties.
    pub fn closest(&self, pixel: Pixel) -> Pixel {
        self.palette[self.closest_index(pixel)]
    }

    /// Index of the closest palette entry to `pixel`.
    pub fn closest_index(&self, pixel: Pixel) -> usize {
        let target = self.space.to_comparison_space(pixel);
        self.scan(&target, 0..self.converted.len())
    }

    /// Index of the closest entry to a fractional RGB value, visiting
    /// candidates in `order`.
    ///
    /// `order` must be non-empty and hold valid palette indices.
    pub fn nearest_in_order(&self, rgb: [f32; 3], order: &[usize]) -> usize {
        let target = self
            .space
            .convert([rgb[0] as f64, rgb[1] as f64, rgb[2] as f64]);
        self.scan(&target, order.iter().copied())
    }

    fn scan(&self, target: &[f64; 3], order: impl IntoIterator<Item = usize>) -> usize {
        let mut best_idx = 0;
        let mut best_dist = f64::INFINITY;
        for idx in order {
            let dist = self.norm.distance(target, &self.converted[idx]);
            // Strict comparison keeps the earliest visited candidate on ties
            if dist < best_dist {
                best_dist = dist;
                best_idx = idx;
            }
        }
        best_idx
    }
}

/// Search order over palette indices for one run.
///
/// Holds its own generator so no random state is shared between runs or
/// threads.
#[derive(Debug)]
pub(crate) struct SearchOrder {
    indices: Vec<usize>,
    rng: Option<StdRng>,
}

impl SearchOrder {
    pub(crate) fn new(len: usize, tie_break: TieBreak) -> Self {
        let rng = match tie_break {
            TieBreak::FirstInOrder => None,
            TieBreak::Shuffled { seed } => Some(StdRng::seed_from_u64(seed)),
        };
        Self {
            indices: (0..len).collect(),
            rng,
        }
    }

    /// Order for the next query.
    pub(crate) fn next_order(&mut self) -> &[usize] {
        if let Some(rng) = self.rng.as_mut() {
            self.indices.shuffle(rng);
        }
        &self.indices
    }
}

/// Closest entry of `palette` to `pixel` in `space` under `norm`.
///
/// The slice is searched in order and the first minimizing entry wins, so a
/// slice with repeated colors is accepted.
///
/// # Errors
///
/// [`PaletteError::EmptyPalette`] when `palette` is empty.
///
/// ```
/// use palette_dither::{closest, ColorSpace, Norm, Pixel};
///
/// let bw = [Pixel::new(0, 0, 0), Pixel::new(255, 255, 255)];
/// let out = closest(&bw, Pixel::new(200, 200, 200), ColorSpace::Lab, Norm::L2).unwrap();
/// assert_eq!(out, Pixel::new(255, 255, 255));
/// ```
pub fn closest(
    palette: &[Pixel],
    pixel: Pixel,
    space: ColorSpace,
    norm: Norm,
) -> Result<Pixel, PaletteError> {
    let target = space.to_comparison_space(pixel);
    let mut best: Option<(Pixel, f64)> = None;
    for &candidate in palette {
        let dist = norm.distance(&target, &space.to_comparison_space(candidate));
        if best.map_or(true, |(_, d)| dist < d) {
            best = Some((candidate, dist));
        }
    }
    best.map(|(p, _)| p).ok_or(PaletteError::EmptyPalette)
}
