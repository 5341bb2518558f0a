//! Draws the single frame: clear, transform, one triangle strip.

use crate::buffers::{PositionBuffers, POSITION_COMPONENTS, QUAD_VERTEX_COUNT};
use crate::config::SceneConfig;
use crate::error::QuadError;
use crate::gl::{ClearMask, DepthFunc, FloatAttribLayout, Gl, Primitive};
use crate::program::ProgramInfo;
use crate::surface::SurfaceSize;
use crate::transform::TransformMatrices;

/// Renders one frame of the quad.
///
/// The matrices are built before the first GL call, so a zero-sized surface
/// fails without touching GL state. After that the call sequence is fixed:
/// clear state, clear, bind positions, use program, upload projection then
/// model-view, draw a 4-vertex triangle strip.
///
/// # Errors
///
/// `QuadError::InvalidDimensions` if `size` has a zero side.
pub fn draw_scene<G: Gl>(
    gl: &G,
    config: &SceneConfig,
    size: SurfaceSize,
    program: &ProgramInfo<G>,
    buffers: &PositionBuffers<G>,
) -> Result<(), QuadError> {
    let matrices = TransformMatrices::new(config, size)?;

    gl.clear_color(config.clear_color);
    gl.clear_depth(config.clear_depth);
    gl.enable_depth_test();
    gl.depth_func(DepthFunc::LessOrEqual);
    gl.clear(ClearMask::COLOR | ClearMask::DEPTH);

    set_position_attribute(gl, buffers, program);

    gl.use_program(program.program);
    gl.uniform_matrix4(&program.projection_matrix, false, &matrices.projection_cols());
    gl.uniform_matrix4(&program.model_view_matrix, false, &matrices.model_view_cols());

    gl.draw_arrays(Primitive::TriangleStrip, 0, QUAD_VERTEX_COUNT);
    log::debug!(
        "drew quad at {}x{} (aspect {:.4})",
        size.width,
        size.height,
        matrices.aspect
    );
    Ok(())
}

/// Points the position attribute at the tightly packed 2D positions.
fn set_position_attribute<G: Gl>(gl: &G, buffers: &PositionBuffers<G>, program: &ProgramInfo<G>) {
    gl.bind_array_buffer(Some(buffers.position));
    gl.vertex_attrib_pointer_f32(
        program.vertex_position,
        FloatAttribLayout {
            components: POSITION_COMPONENTS,
            normalized: false,
            stride: 0,
            offset: 0,
        },
    );
    gl.enable_vertex_attrib_array(program.vertex_position);
}
