//! Error type for scene construction and rendering.

use pathlight_core::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("sphere {index} references unknown material `{name}`")]
    UnknownMaterial { index: usize, name: String },

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;
