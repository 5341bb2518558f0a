//! GPU context wrapper: [`Gl`] over a live `glow::Context`.
//!
//! `GpuContext` owns the `glow::Context` and forwards each [`Gl`] call to
//! the matching glow method. All raw GL calls in the crate live here.

#![allow(unsafe_code)]

use crate::gl::{ClearMask, DepthFunc, FloatAttribLayout, Gl, Primitive, ShaderStage};
use glow::HasContext;

/// Wraps a `glow::Context` (WebGL2 in the browser, OpenGL natively).
///
/// Created once at startup from the platform context.
pub struct GpuContext {
    gl: glow::Context,
}

impl GpuContext {
    /// Wraps the given GL context and logs the version it reports.
    pub fn new(gl: glow::Context) -> Self {
        let version = gl.version();
        log::debug!(
            "GL context {}.{} (embedded: {}) {}",
            version.major,
            version.minor,
            version.is_embedded,
            version.vendor_info
        );
        Self { gl }
    }
}

// SAFETY (all impls below): glow marks raw GL entry points unsafe. Every
// handle passed in was produced by this same context through the `Gl`
// creation methods, and every enum is a valid GL constant from `crate::gl`.
impl Gl for GpuContext {
    type Shader = glow::Shader;
    type Program = glow::Program;
    type Buffer = glow::Buffer;
    type UniformLocation = glow::UniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Result<glow::Shader, String> {
        unsafe { self.gl.create_shader(stage.gl_enum()) }
    }

    fn shader_source(&self, shader: glow::Shader, source: &str) {
        unsafe { self.gl.shader_source(shader, source) }
    }

    fn compile_shader(&self, shader: glow::Shader) {
        unsafe { self.gl.compile_shader(shader) }
    }

    fn shader_compile_status(&self, shader: glow::Shader) -> bool {
        unsafe { self.gl.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: glow::Shader) -> String {
        unsafe { self.gl.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: glow::Shader) {
        unsafe { self.gl.delete_shader(shader) }
    }

    fn create_program(&self) -> Result<glow::Program, String> {
        unsafe { self.gl.create_program() }
    }

    fn attach_shader(&self, program: glow::Program, shader: glow::Shader) {
        unsafe { self.gl.attach_shader(program, shader) }
    }

    fn detach_shader(&self, program: glow::Program, shader: glow::Shader) {
        unsafe { self.gl.detach_shader(program, shader) }
    }

    fn link_program(&self, program: glow::Program) {
        unsafe { self.gl.link_program(program) }
    }

    fn program_link_status(&self, program: glow::Program) -> bool {
        unsafe { self.gl.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: glow::Program) -> String {
        unsafe { self.gl.get_program_info_log(program) }
    }

    fn delete_program(&self, program: glow::Program) {
        unsafe { self.gl.delete_program(program) }
    }

    fn use_program(&self, program: glow::Program) {
        unsafe { self.gl.use_program(Some(program)) }
    }

    fn attrib_location(&self, program: glow::Program, name: &str) -> Option<u32> {
        unsafe { self.gl.get_attrib_location(program, name) }
    }

    fn uniform_location(&self, program: glow::Program, name: &str) -> Option<glow::UniformLocation> {
        unsafe { self.gl.get_uniform_location(program, name) }
    }

    fn create_buffer(&self) -> Result<glow::Buffer, String> {
        unsafe { self.gl.create_buffer() }
    }

    fn bind_array_buffer(&self, buffer: Option<glow::Buffer>) {
        unsafe { self.gl.bind_buffer(glow::ARRAY_BUFFER, buffer) }
    }

    fn array_buffer_data_f32(&self, data: &[f32]) {
        unsafe {
            self.gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(data),
                glow::STATIC_DRAW,
            )
        }
    }

    fn delete_buffer(&self, buffer: glow::Buffer) {
        unsafe { self.gl.delete_buffer(buffer) }
    }

    fn clear_color(&self, [r, g, b, a]: [f32; 4]) {
        unsafe { self.gl.clear_color(r, g, b, a) }
    }

    fn clear_depth(&self, depth: f32) {
        // WebGL has no f64 clear depth.
        unsafe { self.gl.clear_depth_f32(depth) }
    }

    fn enable_depth_test(&self) {
        unsafe { self.gl.enable(glow::DEPTH_TEST) }
    }

    fn depth_func(&self, func: DepthFunc) {
        unsafe { self.gl.depth_func(func.gl_enum()) }
    }

    fn clear(&self, mask: ClearMask) {
        unsafe { self.gl.clear(mask.bits()) }
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, layout: FloatAttribLayout) {
        unsafe {
            self.gl.vertex_attrib_pointer_f32(
                index,
                layout.components,
                glow::FLOAT,
                layout.normalized,
                layout.stride,
                layout.offset,
            )
        }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(index) }
    }

    fn uniform_matrix4(&self, location: &glow::UniformLocation, transpose: bool, value: &[f32; 16]) {
        unsafe {
            self.gl
                .uniform_matrix_4_f32_slice(Some(location), transpose, value)
        }
    }

    fn draw_arrays(&self, mode: Primitive, first: i32, count: i32) {
        unsafe { self.gl.draw_arrays(mode.gl_enum(), first, count) }
    }
}
