//! Projection and model-view matrices for the frame.

use crate::config::SceneConfig;
use crate::error::QuadError;
use crate::surface::SurfaceSize;
use glam::{Mat4, Vec3};

/// The two matrices uploaded as uniforms, rebuilt on every draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformMatrices {
    /// Perspective projection in OpenGL clip space (depth in [-1, 1]).
    pub projection: Mat4,
    /// Identity translated by the configured offset.
    pub model_view: Mat4,
    /// Width / height of the surface the projection was built for.
    pub aspect: f32,
}

impl TransformMatrices {
    /// Builds both matrices for a surface of `size`.
    ///
    /// # Errors
    ///
    /// `QuadError::InvalidDimensions` if the surface has a zero side.
    pub fn new(config: &SceneConfig, size: SurfaceSize) -> Result<Self, QuadError> {
        let aspect = size.aspect_ratio()?;
        let projection =
            Mat4::perspective_rh_gl(config.fov_y_radians(), aspect, config.z_near, config.z_far);
        let model_view = Mat4::from_translation(Vec3::from_array(config.translation));
        Ok(Self {
            projection,
            model_view,
            aspect,
        })
    }

    /// Projection as a column-major array, ready for `uniformMatrix4fv`.
    pub fn projection_cols(&self) -> [f32; 16] {
        self.projection.to_cols_array()
    }

    /// Model-view as a column-major array, ready for `uniformMatrix4fv`.
    pub fn model_view_cols(&self) -> [f32; 16] {
        self.model_view.to_cols_array()
    }
}
