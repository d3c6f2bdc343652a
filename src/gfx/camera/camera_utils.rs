use cgmath::{Deg, Matrix4};

/// Maps OpenGL clip space (z in -1..1) onto wgpu clip space (z in 0..1).
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fovy: Deg<f32>,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fovy: Deg(90.0),
            aspect: 1.0,
            znear: 0.1,
            zfar: 30.0,
        }
    }
}

impl Projection {
    /// Updates the aspect ratio. Returns `false` for a zero-sized viewport,
    /// which leaves the projection unchanged.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.aspect = width as f32 / height as f32;
        true
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * cgmath::perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;

    #[test]
    fn test_near_and_far_map_to_wgpu_depth_range() {
        let projection = Projection::default();
        let m = projection.matrix();

        let near = m * Vector4::new(0.0, 0.0, -0.1, 1.0);
        let far = m * Vector4::new(0.0, 0.0, -30.0, 1.0);
        assert!((near.z / near.w).abs() < 1e-5);
        assert!((far.z / far.w - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_ninety_degree_fov() {
        let mut projection = Projection::default();
        assert!(projection.resize(800, 400));
        assert_eq!(projection.aspect, 2.0);

        // a point 45 degrees above the view axis lands on the top edge
        let m = projection.matrix();
        let top = m * Vector4::new(0.0, 5.0, -5.0, 1.0);
        assert!((top.y / top.w - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_sized_viewport_is_ignored() {
        let mut projection = Projection::default();
        assert!(!projection.resize(0, 600));
        assert!(!projection.resize(800, 0));
        assert_eq!(projection.aspect, 1.0);
    }
}
