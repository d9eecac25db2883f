use std::collections::HashMap;
use std::path::Path;

use palette_dither::{DiffusionKernel, KernelEntry, KernelError};
use serde::Deserialize;

use crate::error::ConfigError;

/// Optional settings loaded from a YAML file.
///
/// Every field may be omitted; command-line flags override whatever is set
/// here.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Palette as color names or hex values, in output order
    #[serde(default)]
    pub palette: Option<Vec<String>>,

    /// Kernel name (catalog or one of `kernels`)
    #[serde(default)]
    pub kernel: Option<String>,

    #[serde(default)]
    pub norm: Option<String>,

    #[serde(default)]
    pub color_space: Option<String>,

    /// Enables the shuffled tie-break with this seed
    #[serde(default)]
    pub seed: Option<u64>,

    /// Custom kernels: name to `[dx, dy, weight]` taps
    #[serde(default)]
    pub kernels: HashMap<String, Vec<(i32, i32, f64)>>,
}

impl AppConfig {
    /// Load and parse a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content)?;
        tracing::info!(
            path = %path.display(),
            custom_kernels = config.kernels.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse config from YAML text. An empty document is the default config.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Build the custom kernel `name`, if the config defines one.
    ///
    /// Names match the way catalog names do: case-insensitive, with `_` and
    /// spaces equal to `-`.
    pub fn custom_kernel(&self, name: &str) -> Option<Result<DiffusionKernel, KernelError>> {
        let wanted = kernel_key(name);
        self.kernels
            .iter()
            .find(|(declared, _)| kernel_key(declared) == wanted)
            .map(|(declared, taps)| {
                let entries = taps.iter().map(|&t| KernelEntry::from(t)).collect();
                DiffusionKernel::new(declared.as_str(), entries)
            })
    }
}

fn kernel_key(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '_' | ' ' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}
