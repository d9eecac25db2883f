//! Vector norms used as the palette distance metric.

use std::fmt;
use std::str::FromStr;

use crate::api::DitherError;

/// Norm applied to the difference of two comparison-space vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Norm {
    /// Sum of absolute differences (Manhattan).
    L1,
    /// Euclidean length.
    #[default]
    L2,
    /// Largest absolute difference (Chebyshev).
    LInf,
}

impl Norm {
    /// Every supported norm.
    pub const ALL: [Norm; 3] = [Self::L1, Self::L2, Self::LInf];

    /// Canonical lowercase identifier.
    pub fn name(self) -> &'static str {
        match self {
            Self::L1 => "l1",
            Self::L2 => "l2",
            Self::LInf => "linf",
        }
    }

    /// Distance between `a` and `b` under this norm.
    #[inline]
    pub fn distance(self, a: &[f64; 3], b: &[f64; 3]) -> f64 {
        let d = [a[0] - b[0], a[1] - b[1], a[2] - b[2]];
        match self {
            Self::L1 => d[0].abs() + d[1].abs() + d[2].abs(),
            Self::L2 => (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt(),
            Self::LInf => d[0].abs().max(d[1].abs()).max(d[2].abs()),
        }
    }
}

/// Free-function form of [`Norm::distance`].
#[inline]
pub fn distance(a: &[f64; 3], b: &[f64; 3], norm: Norm) -> f64 {
    norm.distance(a, b)
}

impl fmt::Display for Norm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Norm {
    type Err = DitherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l1" | "manhattan" => Ok(Self::L1),
            "l2" | "euclidean" => Ok(Self::L2),
            "linf" | "l-inf" | "inf" | "max" | "chebyshev" => Ok(Self::LInf),
            _ => Err(DitherError::UnknownNorm(s.to_string())),
        }
    }
}
