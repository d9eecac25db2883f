use thiserror::Error;

/// Error raised while looking up or validating a diffusion kernel.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KernelError {
    #[error("unknown diffusion kernel `{name}`")]
    UnknownKernel { name: String },

    #[error("kernel `{kernel}` weights sum to {sum}, expected 1.0")]
    InvalidKernelWeights { kernel: String, sum: f64 },

    #[error("kernel `{kernel}` has invalid weight {weight} at ({dx}, {dy})")]
    NegativeWeight {
        kernel: String,
        dx: i32,
        dy: i32,
        weight: f64,
    },

    #[error("kernel `{kernel}` entry ({dx}, {dy}) points at an already processed pixel")]
    BackwardOffset { kernel: String, dx: i32, dy: i32 },
}
