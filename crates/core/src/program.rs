//! The linked shader program and its resolved locations.

use crate::gl::Gl;
use crate::shader::{compile_program, ShaderError};
use crate::shaders::{MODEL_VIEW_MATRIX_UNIFORM, PROJECTION_MATRIX_UNIFORM, VERTEX_POSITION_ATTRIB};

/// A linked program plus the attribute slot and uniform locations the
/// scene draws through. Immutable once built.
pub struct ProgramInfo<G: Gl> {
    pub program: G::Program,
    /// Slot of `aVertexPosition`.
    pub vertex_position: u32,
    /// Location of `uProjectionMatrix`.
    pub projection_matrix: G::UniformLocation,
    /// Location of `uModelViewMatrix`.
    pub model_view_matrix: G::UniformLocation,
}

impl<G: Gl> ProgramInfo<G> {
    /// Deletes the program.
    pub fn destroy(&self, gl: &G) {
        gl.delete_program(self.program);
    }
}

impl<G: Gl> std::fmt::Debug for ProgramInfo<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgramInfo")
            .field("program", &self.program)
            .field("vertex_position", &self.vertex_position)
            .field("projection_matrix", &self.projection_matrix)
            .field("model_view_matrix", &self.model_view_matrix)
            .finish()
    }
}

/// Compiles and links the shader pair, then resolves `aVertexPosition`,
/// `uProjectionMatrix` and `uModelViewMatrix`.
///
/// Nothing is looked up unless the program linked. A name the program does
/// not expose is an error and the program is deleted, so a mismatch between
/// the shader source and these names fails at startup instead of drawing
/// through an invalid slot.
///
/// # Errors
///
/// Any error from [`compile_program`], or `MissingAttribute` /
/// `MissingUniform`.
pub fn init_shader_program<G: Gl>(
    gl: &G,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<ProgramInfo<G>, ShaderError> {
    let program = compile_program(gl, vertex_src, fragment_src)?;

    match resolve_locations(gl, program) {
        Ok(info) => {
            log::debug!("shader program linked: {:?}", info);
            Ok(info)
        }
        Err(e) => {
            log::error!("{e}");
            gl.delete_program(program);
            Err(e)
        }
    }
}

fn resolve_locations<G: Gl>(gl: &G, program: G::Program) -> Result<ProgramInfo<G>, ShaderError> {
    let vertex_position = gl
        .attrib_location(program, VERTEX_POSITION_ATTRIB)
        .ok_or_else(|| ShaderError::MissingAttribute(VERTEX_POSITION_ATTRIB.to_string()))?;
    let projection_matrix = gl
        .uniform_location(program, PROJECTION_MATRIX_UNIFORM)
        .ok_or_else(|| ShaderError::MissingUniform(PROJECTION_MATRIX_UNIFORM.to_string()))?;
    let model_view_matrix = gl
        .uniform_location(program, MODEL_VIEW_MATRIX_UNIFORM)
        .ok_or_else(|| ShaderError::MissingUniform(MODEL_VIEW_MATRIX_UNIFORM.to_string()))?;

    Ok(ProgramInfo {
        program,
        vertex_position,
        projection_matrix,
        model_view_matrix,
    })
}
