//! Resolution of dithering settings from flags, config and defaults.

use palette_dither::{
    ColorSpace, DitherOptions, Ditherer, KernelChoice, KernelKind, Norm, Palette, TieBreak,
};

use crate::config::AppConfig;
use crate::error::SettingsError;
use crate::palettes::{parse_palette, parse_palette_list, DEFAULT_PALETTE};

pub const DEFAULT_KERNEL: &str = "stevenson-arce";
pub const DEFAULT_NORM: Norm = Norm::L1;
pub const DEFAULT_COLOR_SPACE: ColorSpace = ColorSpace::Lab;

/// Values given on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub kernel: Option<String>,
    pub norm: Option<String>,
    pub color_space: Option<String>,
    /// Comma-separated color list
    pub palette: Option<String>,
    pub seed: Option<u64>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub palette: Palette,
    pub kernel_name: String,
    pub options: DitherOptions,
}

impl Settings {
    /// Resolve each setting: flag first, then config file, then default.
    pub fn resolve(flags: &Overrides, config: &AppConfig) -> Result<Self, SettingsError> {
        let palette = match (&flags.palette, &config.palette) {
            (Some(list), _) => parse_palette_list(list)?,
            (None, Some(tokens)) => parse_palette(tokens.as_slice())?,
            (None, None) => parse_palette(&DEFAULT_PALETTE[..])?,
        };

        let kernel_name = flags
            .kernel
            .clone()
            .or_else(|| config.kernel.clone())
            .unwrap_or_else(|| DEFAULT_KERNEL.to_string());
        let kernel = resolve_kernel(&kernel_name, config)?;

        let norm = match flags.norm.as_deref().or(config.norm.as_deref()) {
            Some(name) => name.parse()?,
            None => DEFAULT_NORM,
        };

        let color_space = match flags
            .color_space
            .as_deref()
            .or(config.color_space.as_deref())
        {
            Some(name) => name.parse()?,
            None => DEFAULT_COLOR_SPACE,
        };

        let tie_break = match flags.seed.or(config.seed) {
            Some(seed) => TieBreak::Shuffled { seed },
            None => TieBreak::FirstInOrder,
        };

        Ok(Self {
            palette,
            kernel_name,
            options: DitherOptions {
                kernel,
                norm,
                color_space,
                tie_break,
            },
        })
    }

    pub fn ditherer(&self) -> Ditherer {
        Ditherer::with_options(self.palette.clone(), self.options.clone())
    }
}

/// A kernel defined in the config takes precedence over a catalog kernel of
/// the same name.
fn resolve_kernel(name: &str, config: &AppConfig) -> Result<KernelChoice, SettingsError> {
    if let Some(custom) = config.custom_kernel(name) {
        return Ok(KernelChoice::Custom(custom?));
    }
    let kind: KernelKind = name.parse()?;
    // Surface catalog validation errors here rather than at dither time
    kind.kernel()?;
    Ok(KernelChoice::Builtin(kind))
}
