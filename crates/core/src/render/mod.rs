//! Live GL backend.
//!
//! This module is only available when the `render` feature is enabled.
//! It wraps a `glow::Context` so the bootstrap can draw through WebGL2 in
//! the browser or OpenGL natively.

pub mod context;

pub use context::GpuContext;
