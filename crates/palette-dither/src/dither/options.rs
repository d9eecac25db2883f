//! Dithering options.

use super::error::KernelError;
use super::kernel::{DiffusionKernel, KernelKind};
use crate::color::ColorSpace;
use crate::metric::Norm;
use crate::palette::TieBreak;

/// Which kernel a run diffuses error with.
#[derive(Debug, Clone, PartialEq)]
pub enum KernelChoice {
    /// A catalog kernel
    Builtin(KernelKind),
    /// A caller-defined kernel, already validated
    Custom(DiffusionKernel),
}

impl KernelChoice {
    /// The validated kernel this choice refers to.
    pub fn resolve(&self) -> Result<&DiffusionKernel, KernelError> {
        match self {
            Self::Builtin(kind) => kind.kernel(),
            Self::Custom(kernel) => Ok(kernel),
        }
    }
}

impl Default for KernelChoice {
    fn default() -> Self {
        Self::Builtin(KernelKind::default())
    }
}

impl From<KernelKind> for KernelChoice {
    fn from(kind: KernelKind) -> Self {
        Self::Builtin(kind)
    }
}

impl From<DiffusionKernel> for KernelChoice {
    fn from(kernel: DiffusionKernel) -> Self {
        Self::Custom(kernel)
    }
}

/// Configuration for error-diffusion dithering.
///
/// # Defaults
///
/// - Kernel: Floyd-Steinberg
/// - Norm: L2
/// - Color space: CIE Lab
/// - Tie-break: first in declared palette order
///
/// # Example
///
/// ```
/// use palette_dither::{DitherOptions, KernelKind, Norm, TieBreak};
///
/// let options = DitherOptions::new()
///     .kernel(KernelKind::Stucki)
///     .norm(Norm::L1)
///     .tie_break(TieBreak::Shuffled { seed: 7 });
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DitherOptions {
    pub kernel: KernelChoice,
    pub norm: Norm,
    pub color_space: ColorSpace,
    pub tie_break: TieBreak,
}

impl DitherOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the kernel, either a [`KernelKind`] or a custom [`DiffusionKernel`].
    #[inline]
    pub fn kernel(mut self, kernel: impl Into<KernelChoice>) -> Self {
        self.kernel = kernel.into();
        self
    }

    #[inline]
    pub fn norm(mut self, norm: Norm) -> Self {
        self.norm = norm;
        self
    }

    #[inline]
    pub fn color_space(mut self, space: ColorSpace) -> Self {
        self.color_space = space;
        self
    }

    #[inline]
    pub fn tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }
}
