//! The quad's vertex buffer.

use crate::error::QuadError;
use crate::gl::Gl;

/// Corners of the [-1, 1] square as (x, y) pairs, in triangle-strip order:
/// top-left, top-right, bottom-left, bottom-right.
pub const QUAD_POSITIONS: [f32; 8] = [-1.0, 1.0, 1.0, 1.0, -1.0, -1.0, 1.0, -1.0];

/// Components per vertex in [`QUAD_POSITIONS`].
pub const POSITION_COMPONENTS: i32 = 2;

/// Number of vertices in [`QUAD_POSITIONS`].
pub const QUAD_VERTEX_COUNT: i32 = QUAD_POSITIONS.len() as i32 / POSITION_COMPONENTS;

/// GPU buffers feeding the vertex shader. Only positions for now.
pub struct PositionBuffers<G: Gl> {
    pub position: G::Buffer,
}

impl<G: Gl> PositionBuffers<G> {
    /// Deletes the position buffer.
    pub fn destroy(&self, gl: &G) {
        gl.delete_buffer(self.position);
    }
}

impl<G: Gl> std::fmt::Debug for PositionBuffers<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PositionBuffers")
            .field("position", &self.position)
            .finish()
    }
}

/// Creates the position buffer, binds it as the array buffer, and uploads
/// [`QUAD_POSITIONS`]. The buffer stays bound.
///
/// # Errors
///
/// `QuadError::BufferCreate` if the context hands back no buffer.
pub fn init_buffers<G: Gl>(gl: &G) -> Result<PositionBuffers<G>, QuadError> {
    let position = gl.create_buffer().map_err(|reason| {
        log::error!("failed to create vertex buffer: {reason}");
        QuadError::BufferCreate(reason)
    })?;

    gl.bind_array_buffer(Some(position));
    gl.array_buffer_data_f32(&QUAD_POSITIONS);
    log::debug!("uploaded {} quad vertices", QUAD_VERTEX_COUNT);

    Ok(PositionBuffers { position })
}
