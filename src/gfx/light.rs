//! Point light state.

use cgmath::{Matrix4, Vector3};

/// Scale of the cube drawn at the light's position.
pub const LIGHT_MARKER_SCALE: f32 = 0.5;

/// A point light positioned in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vector3<f32>,
}

impl PointLight {
    pub fn new(position: Vector3<f32>) -> Self {
        Self { position }
    }

    pub fn set_x(&mut self, x: f32) -> bool {
        let changed = self.position.x != x;
        self.position.x = x;
        changed
    }

    pub fn set_y(&mut self, y: f32) -> bool {
        let changed = self.position.y != y;
        self.position.y = y;
        changed
    }

    pub fn set_z(&mut self, z: f32) -> bool {
        let changed = self.position.z != z;
        self.position.z = z;
        changed
    }

    /// `view * translate(position) * scale(0.5)`.
    ///
    /// This matrix is both the model matrix of the light marker and the
    /// `light_model` uniform; shaders take its translation column as the
    /// camera-space light position.
    pub fn transform(&self, view: Matrix4<f32>) -> Matrix4<f32> {
        view * Matrix4::from_translation(self.position) * Matrix4::from_scale(LIGHT_MARKER_SCALE)
    }
}
