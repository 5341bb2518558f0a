#![deny(unsafe_code)]
//! Core of the gl-quad WebGL2 bootstrap.
//!
//! Compiles a fixed shader pair, uploads one quad's positions, and draws a
//! single frame: a white square on black. All GL traffic goes through the
//! [`Gl`] trait; `render::GpuContext` (feature `render`) implements it over
//! glow, and [`RecordingGl`] implements it headlessly for tests.

pub mod bootstrap;
pub mod buffers;
pub mod config;
pub mod error;
pub mod gl;
pub mod program;
pub mod recording;
pub mod scene;
pub mod shader;
pub mod shaders;
pub mod surface;
pub mod transform;

#[cfg(feature = "render")]
pub mod render;

pub use bootstrap::run;
pub use buffers::{init_buffers, PositionBuffers, QUAD_POSITIONS};
pub use config::SceneConfig;
pub use error::QuadError;
pub use gl::Gl;
pub use program::{init_shader_program, ProgramInfo};
pub use recording::{GlCall, RecordingGl, RecordingSurface};
pub use scene::draw_scene;
pub use shader::ShaderError;
pub use surface::{Surface, SurfaceSize};
pub use transform::TransformMatrices;
