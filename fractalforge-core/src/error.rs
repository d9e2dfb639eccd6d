//! Configuration error types.

use thiserror::Error;

/// Fatal configuration errors.
///
/// These indicate a programming error (the set of fractal types and their
/// parameter shapes is fixed at build time) and are surfaced immediately
/// rather than silently substituted.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("fractal type not registered: {0}")]
    UnknownFractalType(String),

    #[error("params shape does not match fractal type {fractal_type}: expected {expected} params")]
    ParamsMismatch {
        fractal_type: String,
        expected: &'static str,
    },

    #[error("viewport scale must be positive, got {0}")]
    InvalidViewportScale(f64),
}
