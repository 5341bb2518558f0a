//! Rendering surfaces: something with a pixel size that can yield a context.

use crate::error::QuadError;
use crate::gl::Gl;
use serde::{Deserialize, Serialize};

/// Drawing-buffer size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width divided by height.
    ///
    /// # Errors
    ///
    /// `QuadError::InvalidDimensions` if either side is zero.
    pub fn aspect_ratio(&self) -> Result<f32, QuadError> {
        if self.width == 0 || self.height == 0 {
            return Err(QuadError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.width as f32 / self.height as f32)
    }
}

/// A canvas-like surface.
pub trait Surface {
    type Context: Gl;

    fn size(&self) -> SurfaceSize;

    /// Acquires the rendering context.
    ///
    /// Returns `Err(reason)` when the platform cannot provide one.
    fn context(&self) -> Result<Self::Context, String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn aspect_ratio_of_800_by_600() {
        let aspect = SurfaceSize::new(800, 600).aspect_ratio().unwrap();
        assert_eq!(aspect, 800.0 / 600.0);
    }

    #[test]
    fn zero_height_is_rejected() {
        let err = SurfaceSize::new(800, 0).aspect_ratio().unwrap_err();
        assert!(matches!(
            err,
            QuadError::InvalidDimensions {
                width: 800,
                height: 0
            }
        ));
    }

    #[test]
    fn zero_width_is_rejected() {
        assert!(SurfaceSize::new(0, 600).aspect_ratio().is_err());
    }

    proptest! {
        #[test]
        fn aspect_ratio_is_exact_quotient(w in 1u32..=8192, h in 1u32..=8192) {
            let aspect = SurfaceSize::new(w, h).aspect_ratio().unwrap();
            prop_assert_eq!(aspect, w as f32 / h as f32);
        }
    }
}
