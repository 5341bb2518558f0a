//! Error types for the gl-quad bootstrap.

use crate::shader::ShaderError;
use thiserror::Error;

/// Errors that end the startup sequence.
///
/// Every variant is terminal: the bootstrap logs it and returns without
/// drawing.
#[derive(Debug, Error)]
pub enum QuadError {
    /// The surface could not produce a rendering context.
    #[error("unable to initialize WebGL: {0}")]
    ContextUnavailable(String),

    /// Shader compilation, program link, or location lookup failed.
    #[error(transparent)]
    Shader(#[from] ShaderError),

    /// The driver returned no buffer object.
    #[error("failed to create vertex buffer: {0}")]
    BufferCreate(String),

    /// Width or height was zero, so no aspect ratio exists.
    #[error("invalid surface dimensions {width}x{height}: width and height must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// A scene configuration value was out of range or unparsable.
    #[error("invalid scene config: {0}")]
    InvalidConfig(String),
}
