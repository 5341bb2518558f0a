//! Scene constants: camera, placement, and clear state.
//!
//! A [`SceneConfig`] captures every constant the single frame depends on.
//! [`SceneConfig::default`] is the stock scene; a JSON object may override
//! any subset of fields.

use crate::error::QuadError;
use serde::{Deserialize, Serialize};

/// Constants for the one-frame scene.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
    /// Model-view translation applied to the quad.
    pub translation: [f32; 3],
    pub clear_color: [f32; 4],
    pub clear_depth: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            z_near: 0.1,
            z_far: 100.0,
            translation: [0.0, 0.0, -6.0],
            clear_color: [0.0, 0.0, 0.0, 1.0],
            clear_depth: 1.0,
        }
    }
}

impl SceneConfig {
    /// Parses a JSON object, filling missing fields from the default scene,
    /// and validates the result.
    pub fn from_json(json: &str) -> Result<Self, QuadError> {
        let config: SceneConfig =
            serde_json::from_str(json).map_err(|e| QuadError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Vertical field of view in radians.
    pub fn fov_y_radians(&self) -> f32 {
        self.fov_y_degrees.to_radians()
    }

    /// Checks that the projection is well formed and every value is finite.
    pub fn validate(&self) -> Result<(), QuadError> {
        let all_finite = [self.fov_y_degrees, self.z_near, self.z_far, self.clear_depth]
            .iter()
            .chain(self.translation.iter())
            .chain(self.clear_color.iter())
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(QuadError::InvalidConfig(
                "all values must be finite".to_string(),
            ));
        }
        if !(self.fov_y_degrees > 0.0 && self.fov_y_degrees < 180.0) {
            return Err(QuadError::InvalidConfig(format!(
                "fov_y_degrees must be in (0, 180), got {}",
                self.fov_y_degrees
            )));
        }
        if self.z_near <= 0.0 {
            return Err(QuadError::InvalidConfig(format!(
                "z_near must be positive, got {}",
                self.z_near
            )));
        }
        if self.z_far <= self.z_near {
            return Err(QuadError::InvalidConfig(format!(
                "z_far ({}) must exceed z_near ({})",
                self.z_far, self.z_near
            )));
        }
        Ok(())
    }
}
