//! The narrow GL surface this crate draws through.
//!
//! [`Gl`] lists exactly the calls the bootstrap issues, with typed handles
//! instead of raw integers. `render::GpuContext` forwards them to glow;
//! [`RecordingGl`](crate::recording::RecordingGl) records them for tests and
//! headless inspection.
//!
//! Enum discriminants are the WebGL2 / OpenGL constant values so backends can
//! pass them straight through.

use std::fmt;

/// A programmable pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// GL enum for `createShader`.
    pub fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => 0x8B31,
            ShaderStage::Fragment => 0x8B30,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Depth comparison used by the depth test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthFunc {
    /// Nearer or equal fragments pass.
    LessOrEqual,
}

impl DepthFunc {
    pub fn gl_enum(self) -> u32 {
        match self {
            DepthFunc::LessOrEqual => 0x0203,
        }
    }
}

/// Primitive topology for `drawArrays`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    TriangleStrip,
}

impl Primitive {
    pub fn gl_enum(self) -> u32 {
        match self {
            Primitive::TriangleStrip => 0x0005,
        }
    }
}

/// Bitmask of framebuffers to clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearMask(u32);

impl ClearMask {
    pub const COLOR: ClearMask = ClearMask(0x0000_4000);
    pub const DEPTH: ClearMask = ClearMask(0x0000_0100);

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, other: ClearMask) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for ClearMask {
    type Output = ClearMask;

    fn bitor(self, rhs: ClearMask) -> ClearMask {
        ClearMask(self.0 | rhs.0)
    }
}

/// Layout of one float vertex attribute inside the bound array buffer.
///
/// A `stride` of 0 means tightly packed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatAttribLayout {
    pub components: i32,
    pub normalized: bool,
    pub stride: i32,
    pub offset: i32,
}

/// The GL calls issued by the bootstrap.
///
/// Creation calls return `Err(reason)` when the driver hands back no object,
/// which in practice only happens on a lost context.
pub trait Gl {
    type Shader: Copy + fmt::Debug;
    type Program: Copy + fmt::Debug;
    type Buffer: Copy + fmt::Debug;
    type UniformLocation: Clone + fmt::Debug;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn link_program(&self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn delete_program(&self, program: Self::Program);
    fn use_program(&self, program: Self::Program);

    /// Returns `None` when the linked program has no active attribute `name`.
    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;
    /// Returns `None` when the linked program has no active uniform `name`.
    fn uniform_location(&self, program: Self::Program, name: &str)
        -> Option<Self::UniformLocation>;

    fn create_buffer(&self) -> Result<Self::Buffer, String>;
    fn bind_array_buffer(&self, buffer: Option<Self::Buffer>);
    /// Uploads `data` to the bound array buffer with `STATIC_DRAW` usage.
    fn array_buffer_data_f32(&self, data: &[f32]);
    fn delete_buffer(&self, buffer: Self::Buffer);

    fn clear_color(&self, rgba: [f32; 4]);
    fn clear_depth(&self, depth: f32);
    fn enable_depth_test(&self);
    fn depth_func(&self, func: DepthFunc);
    fn clear(&self, mask: ClearMask);

    fn vertex_attrib_pointer_f32(&self, index: u32, layout: FloatAttribLayout);
    fn enable_vertex_attrib_array(&self, index: u32);
    /// Uploads a column-major 4x4 matrix.
    fn uniform_matrix4(
        &self,
        location: &Self::UniformLocation,
        transpose: bool,
        value: &[f32; 16],
    );
    fn draw_arrays(&self, mode: Primitive, first: i32, count: i32);
}
