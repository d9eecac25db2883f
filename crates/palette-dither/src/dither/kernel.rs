//! Diffusion kernel catalog.
//!
//! A kernel lists where the quantization error of the current pixel goes:
//! `(dx, dy, weight)` relative to the pixel, only ever forward in scan order.
//! Built-in kernels are integer tables normalized by a divisor; they are
//! converted and validated once, the first time the catalog is used.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use super::error::KernelError;

/// Weights must sum to one within this tolerance.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Integer kernel table: each tap receives `error * weight / divisor`.
#[derive(Debug, Clone, Copy)]
pub struct KernelTable {
    pub taps: &'static [(i32, i32, u8)],
    pub divisor: u8,
}

/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: KernelTable = KernelTable {
    taps: &[(1, 0, 7), (-1, 1, 3), (0, 1, 5), (1, 1, 1)],
    divisor: 16,
};

/// ```text
///            X   7   5
///    3   5   7   5   3
///    1   3   5   3   1
/// ```
pub const JARVIS_JUDICE_NINKE: KernelTable = KernelTable {
    taps: &[
        (1, 0, 7),
        (2, 0, 5),
        (-2, 1, 3),
        (-1, 1, 5),
        (0, 1, 7),
        (1, 1, 5),
        (2, 1, 3),
        (-2, 2, 1),
        (-1, 2, 3),
        (0, 2, 5),
        (1, 2, 3),
        (2, 2, 1),
    ],
    divisor: 48,
};

/// ```text
///            X   8   4
///    2   4   8   4   2
///    1   2   4   2   1
/// ```
pub const STUCKI: KernelTable = KernelTable {
    taps: &[
        (1, 0, 8),
        (2, 0, 4),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 8),
        (1, 1, 4),
        (2, 1, 2),
        (-2, 2, 1),
        (-1, 2, 2),
        (0, 2, 4),
        (1, 2, 2),
        (2, 2, 1),
    ],
    divisor: 42,
};

/// Two-row reduction of Stucki.
///
/// ```text
///            X   8   4
///    2   4   8   4   2
/// ```
pub const BURKES: KernelTable = KernelTable {
    taps: &[
        (1, 0, 8),
        (2, 0, 4),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 8),
        (1, 1, 4),
        (2, 1, 2),
    ],
    divisor: 32,
};

/// Full three-row Sierra.
///
/// ```text
///            X   5   3
///    2   4   5   4   2
///        2   3   2
/// ```
pub const SIERRA: KernelTable = KernelTable {
    taps: &[
        (1, 0, 5),
        (2, 0, 3),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 5),
        (1, 1, 4),
        (2, 1, 2),
        (-1, 2, 2),
        (0, 2, 3),
        (1, 2, 2),
    ],
    divisor: 32,
};

/// ```text
///            X   4   3
///    1   2   3   2   1
/// ```
pub const SIERRA_TWO_ROW: KernelTable = KernelTable {
    taps: &[
        (1, 0, 4),
        (2, 0, 3),
        (-2, 1, 1),
        (-1, 1, 2),
        (0, 1, 3),
        (1, 1, 2),
        (2, 1, 1),
    ],
    divisor: 16,
};

/// ```text
///        X   2
///    1   1
/// ```
pub const SIERRA_LITE: KernelTable = KernelTable {
    taps: &[(1, 0, 2), (-1, 1, 1), (0, 1, 1)],
    divisor: 4,
};

/// Atkinson's six taps, normalized so the full error is propagated.
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
pub const ATKINSON: KernelTable = KernelTable {
    taps: &[
        (1, 0, 1),
        (2, 0, 1),
        (-1, 1, 1),
        (0, 1, 1),
        (1, 1, 1),
        (0, 2, 1),
    ],
    divisor: 6,
};

/// Stevenson-Arce, designed for hexagonal grids; reaches three rows ahead.
///
/// ```text
///                    X       32
///    12      26      30      16
///        12      26      12
///     5      12      12       5
/// ```
pub const STEVENSON_ARCE: KernelTable = KernelTable {
    taps: &[
        (2, 0, 32),
        (-3, 1, 12),
        (-1, 1, 26),
        (1, 1, 30),
        (3, 1, 16),
        (-2, 2, 12),
        (0, 2, 26),
        (2, 2, 12),
        (-3, 3, 5),
        (-1, 3, 12),
        (1, 3, 12),
        (3, 3, 5),
    ],
    divisor: 200,
};

/// Identifier of a built-in kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KernelKind {
    #[default]
    FloydSteinberg,
    JarvisJudiceNinke,
    Stucki,
    Burkes,
    Sierra,
    SierraTwoRow,
    SierraLite,
    Atkinson,
    StevensonArce,
}

impl KernelKind {
    /// All built-ins, in catalog order.
    pub const ALL: [KernelKind; 9] = [
        Self::FloydSteinberg,
        Self::JarvisJudiceNinke,
        Self::Stucki,
        Self::Burkes,
        Self::Sierra,
        Self::SierraTwoRow,
        Self::SierraLite,
        Self::Atkinson,
        Self::StevensonArce,
    ];

    /// Canonical name, as accepted by [`kernel_for`].
    pub fn name(self) -> &'static str {
        match self {
            Self::FloydSteinberg => "floyd-steinberg",
            Self::JarvisJudiceNinke => "jarvis-judice-ninke",
            Self::Stucki => "stucki",
            Self::Burkes => "burkes",
            Self::Sierra => "sierra",
            Self::SierraTwoRow => "sierra-2",
            Self::SierraLite => "sierra-lite",
            Self::Atkinson => "atkinson",
            Self::StevensonArce => "stevenson-arce",
        }
    }

    pub fn table(self) -> &'static KernelTable {
        match self {
            Self::FloydSteinberg => &FLOYD_STEINBERG,
            Self::JarvisJudiceNinke => &JARVIS_JUDICE_NINKE,
            Self::Stucki => &STUCKI,
            Self::Burkes => &BURKES,
            Self::Sierra => &SIERRA,
            Self::SierraTwoRow => &SIERRA_TWO_ROW,
            Self::SierraLite => &SIERRA_LITE,
            Self::Atkinson => &ATKINSON,
            Self::StevensonArce => &STEVENSON_ARCE,
        }
    }

    /// Validated kernel from the process-wide catalog.
    pub fn kernel(self) -> Result<&'static DiffusionKernel, KernelError> {
        Ok(KernelCatalog::builtin()?.get(self))
    }
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KernelKind {
    type Err = KernelError;

    /// Case-insensitive; `_` and spaces count as `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '_' | ' ' => '-',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        match normalized.as_str() {
            "floyd-steinberg" | "fs" => Ok(Self::FloydSteinberg),
            "jarvis-judice-ninke" | "jjn" => Ok(Self::JarvisJudiceNinke),
            "stucki" => Ok(Self::Stucki),
            "burkes" => Ok(Self::Burkes),
            "sierra" => Ok(Self::Sierra),
            "sierra-2" | "sierra-two-row" => Ok(Self::SierraTwoRow),
            "sierra-lite" | "sierra-3" => Ok(Self::SierraLite),
            "atkinson" => Ok(Self::Atkinson),
            "stevenson-arce" => Ok(Self::StevensonArce),
            _ => Err(KernelError::UnknownKernel {
                name: s.to_string(),
            }),
        }
    }
}

/// One tap of a kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelEntry {
    pub dx: i32,
    pub dy: i32,
    pub weight: f64,
}

impl KernelEntry {
    pub const fn new(dx: i32, dy: i32, weight: f64) -> Self {
        Self { dx, dy, weight }
    }
}

impl From<(i32, i32, f64)> for KernelEntry {
    fn from((dx, dy, weight): (i32, i32, f64)) -> Self {
        Self::new(dx, dy, weight)
    }
}

/// A validated diffusion kernel.
///
/// Construction guarantees that every tap points forward in scan order
/// (`dy > 0`, or `dy == 0` with `dx > 0`), that weights are finite and
/// non-negative, and that they sum to one within [`WEIGHT_TOLERANCE`].
#[derive(Debug, Clone, PartialEq)]
pub struct DiffusionKernel {
    name: String,
    entries: Vec<KernelEntry>,
    max_dy: usize,
}

impl DiffusionKernel {
    /// Build and validate a caller-defined kernel.
    ///
    /// ```
    /// use palette_dither::{DiffusionKernel, KernelEntry};
    ///
    /// let half_right_half_down = DiffusionKernel::new(
    ///     "split",
    ///     vec![KernelEntry::new(1, 0, 0.5), KernelEntry::new(0, 1, 0.5)],
    /// )
    /// .unwrap();
    /// assert_eq!(half_right_half_down.max_dy(), 1);
    /// ```
    ///
    /// # Errors
    ///
    /// - [`KernelError::BackwardOffset`] for a tap at or behind the current pixel
    /// - [`KernelError::NegativeWeight`] for a negative or non-finite weight
    /// - [`KernelError::InvalidKernelWeights`] when the weights do not sum to one
    pub fn new(name: impl Into<String>, entries: Vec<KernelEntry>) -> Result<Self, KernelError> {
        let name = name.into();

        for entry in &entries {
            if entry.dy < 0 || (entry.dy == 0 && entry.dx <= 0) {
                return Err(KernelError::BackwardOffset {
                    kernel: name,
                    dx: entry.dx,
                    dy: entry.dy,
                });
            }
            if !entry.weight.is_finite() || entry.weight < 0.0 {
                return Err(KernelError::NegativeWeight {
                    kernel: name,
                    dx: entry.dx,
                    dy: entry.dy,
                    weight: entry.weight,
                });
            }
        }

        let sum: f64 = entries.iter().map(|e| e.weight).sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(KernelError::InvalidKernelWeights { kernel: name, sum });
        }

        let max_dy = entries.iter().map(|e| e.dy as usize).max().unwrap_or(0);

        Ok(Self {
            name,
            entries,
            max_dy,
        })
    }

    /// Convert an integer table, validating it like any other kernel.
    pub fn from_table(name: impl Into<String>, table: &KernelTable) -> Result<Self, KernelError> {
        let divisor = table.divisor as f64;
        let entries = table
            .taps
            .iter()
            .map(|&(dx, dy, w)| KernelEntry::new(dx, dy, w as f64 / divisor))
            .collect();
        Self::new(name, entries)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[KernelEntry] {
        &self.entries
    }

    /// Rows of look-ahead; the accumulation window needs `max_dy + 1` rows.
    pub fn max_dy(&self) -> usize {
        self.max_dy
    }

    pub fn weight_sum(&self) -> f64 {
        self.entries.iter().map(|e| e.weight).sum()
    }
}

/// Every built-in kernel, validated.
#[derive(Debug)]
pub struct KernelCatalog {
    kernels: Vec<DiffusionKernel>,
}

impl KernelCatalog {
    /// The process-wide catalog, validated on first use.
    ///
    /// A table that fails validation makes every lookup fail with the same
    /// error rather than panicking.
    pub fn builtin() -> Result<&'static KernelCatalog, KernelError> {
        static CATALOG: OnceLock<Result<KernelCatalog, KernelError>> = OnceLock::new();
        CATALOG
            .get_or_init(Self::build)
            .as_ref()
            .map_err(Clone::clone)
    }

    fn build() -> Result<Self, KernelError> {
        let kernels = KernelKind::ALL
            .iter()
            .map(|kind| DiffusionKernel::from_table(kind.name(), kind.table()))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(kernels = kernels.len(), "Kernel catalog validated");
        Ok(Self { kernels })
    }

    /// Kernel for `kind`.
    pub fn get(&self, kind: KernelKind) -> &DiffusionKernel {
        // ALL and the catalog share the same order
        &self.kernels[kind as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiffusionKernel> {
        self.kernels.iter()
    }
}

/// Look up a built-in kernel by name or alias.
///
/// ```
/// use palette_dither::kernel_for;
///
/// let fs = kernel_for("Floyd_Steinberg").unwrap();
/// assert_eq!(fs.name(), "floyd-steinberg");
/// assert!(kernel_for("nope").is_err());
/// ```
pub fn kernel_for(name: &str) -> Result<&'static DiffusionKernel, KernelError> {
    name.parse::<KernelKind>()?.kernel()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_builtin_sums_to_one() {
        let catalog = KernelCatalog::builtin().unwrap();
        for kernel in catalog.iter() {
            assert!(
                (kernel.weight_sum() - 1.0).abs() < WEIGHT_TOLERANCE,
                "{} weights sum to {}",
                kernel.name(),
                kernel.weight_sum()
            );
        }
    }

    #[test]
    fn test_integer_tables_match_divisors() {
        for kind in KernelKind::ALL {
            let table = kind.table();
            let sum: u32 = table.taps.iter().map(|&(_, _, w)| w as u32).sum();
            assert_eq!(
                sum, table.divisor as u32,
                "{kind}: taps should sum to the divisor"
            );
        }
    }

    #[test]
    fn test_catalog_order_matches_kinds() {
        for kind in KernelKind::ALL {
            assert_eq!(kind.kernel().unwrap().name(), kind.name());
        }
    }

    #[test]
    fn test_max_dy() {
        let expected = [
            (KernelKind::FloydSteinberg, 1),
            (KernelKind::JarvisJudiceNinke, 2),
            (KernelKind::Stucki, 2),
            (KernelKind::Burkes, 1),
            (KernelKind::Sierra, 2),
            (KernelKind::SierraTwoRow, 1),
            (KernelKind::SierraLite, 1),
            (KernelKind::Atkinson, 2),
            (KernelKind::StevensonArce, 3),
        ];
        for (kind, max_dy) in expected {
            assert_eq!(kind.kernel().unwrap().max_dy(), max_dy, "{kind}");
        }
    }

    #[test]
    fn test_floyd_steinberg_weights() {
        let fs = kernel_for("floyd-steinberg").unwrap();
        let weights: Vec<f64> = fs.entries().iter().map(|e| e.weight).collect();
        assert_eq!(weights, vec![7.0 / 16.0, 3.0 / 16.0, 5.0 / 16.0, 1.0 / 16.0]);
    }

    #[test]
    fn test_aliases() {
        assert_eq!("FS".parse::<KernelKind>().unwrap(), KernelKind::FloydSteinberg);
        assert_eq!("jjn".parse::<KernelKind>().unwrap(), KernelKind::JarvisJudiceNinke);
        assert_eq!(
            "Sierra Two Row".parse::<KernelKind>().unwrap(),
            KernelKind::SierraTwoRow
        );
        assert_eq!("sierra_3".parse::<KernelKind>().unwrap(), KernelKind::SierraLite);
        assert_eq!(
            "STEVENSON_ARCE".parse::<KernelKind>().unwrap(),
            KernelKind::StevensonArce
        );
    }

    #[test]
    fn test_unknown_kernel() {
        assert_eq!(
            kernel_for("bayer"),
            Err(KernelError::UnknownKernel {
                name: "bayer".to_string()
            })
        );
    }

    #[test]
    fn test_custom_kernel_bad_sum() {
        let err = DiffusionKernel::new(
            "lossy",
            vec![KernelEntry::new(1, 0, 0.5), KernelEntry::new(0, 1, 0.25)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            KernelError::InvalidKernelWeights {
                kernel: "lossy".to_string(),
                sum: 0.75
            }
        );
    }

    #[test]
    fn test_custom_kernel_empty_is_invalid() {
        assert!(matches!(
            DiffusionKernel::new("empty", Vec::new()),
            Err(KernelError::InvalidKernelWeights { sum, .. }) if sum == 0.0
        ));
    }

    #[test]
    fn test_custom_kernel_negative_weight() {
        let err = DiffusionKernel::new(
            "neg",
            vec![KernelEntry::new(1, 0, 1.5), KernelEntry::new(0, 1, -0.5)],
        )
        .unwrap_err();
        assert!(matches!(err, KernelError::NegativeWeight { dx: 0, dy: 1, .. }));
    }

    #[test]
    fn test_custom_kernel_backward_offsets() {
        for (dx, dy) in [(0, 0), (-1, 0), (0, -1), (3, -1)] {
            let err = DiffusionKernel::new("back", vec![KernelEntry::new(dx, dy, 1.0)]).unwrap_err();
            assert_eq!(
                err,
                KernelError::BackwardOffset {
                    kernel: "back".to_string(),
                    dx,
                    dy
                }
            );
        }
    }
}
