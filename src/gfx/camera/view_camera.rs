use cgmath::*;

/// Camera orbiting the origin, driven by a zoom distance and two angles.
///
/// The eye starts at `(0, 0, zoom)` looking at the origin with `+Y` up, and
/// both eye and up vector are turned by `rotate_y(yaw) * rotate_x(pitch)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewCamera {
    pub zoom: f32,
    /// Rotation about the X axis, in degrees.
    pub pitch: f32,
    /// Rotation about the Y axis, in degrees.
    pub yaw: f32,
    pub bounds: ViewCameraBounds,
}

impl ViewCamera {
    pub fn new(zoom: f32, pitch: f32, yaw: f32) -> Self {
        let bounds = ViewCameraBounds::default();
        Self {
            zoom: bounds.clamp_zoom(zoom),
            pitch,
            yaw,
            bounds,
        }
    }

    /// Sets the zoom distance, clamped to the bounds. Returns whether it changed.
    pub fn set_zoom(&mut self, zoom: f32) -> bool {
        let zoom = self.bounds.clamp_zoom(zoom);
        let changed = zoom != self.zoom;
        self.zoom = zoom;
        changed
    }

    pub fn set_pitch(&mut self, degrees: f32) -> bool {
        let changed = degrees != self.pitch;
        self.pitch = degrees;
        changed
    }

    pub fn set_yaw(&mut self, degrees: f32) -> bool {
        let changed = degrees != self.yaw;
        self.yaw = degrees;
        changed
    }

    pub fn add_yaw(&mut self, delta: f32) -> bool {
        self.set_yaw(self.yaw + delta)
    }

    fn orientation(&self) -> Matrix4<f32> {
        Matrix4::from_angle_y(Deg(self.yaw)) * Matrix4::from_angle_x(Deg(self.pitch))
    }

    pub fn eye(&self) -> Point3<f32> {
        Point3::from_homogeneous(self.orientation() * Vector4::new(0.0, 0.0, self.zoom, 1.0))
    }

    pub fn up(&self) -> Vector3<f32> {
        (self.orientation() * Vector4::unit_y()).truncate()
    }

    /// World-to-camera matrix looking at the origin.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.eye(), Point3::origin(), self.up())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewCameraBounds {
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl Default for ViewCameraBounds {
    fn default() -> Self {
        Self {
            min_zoom: 0.1,
            max_zoom: 30.0,
        }
    }
}

impl ViewCameraBounds {
    fn clamp_zoom(&self, zoom: f32) -> f32 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).magnitude() < 1e-5
    }

    #[test]
    fn test_default_orientation_looks_down_negative_z() {
        let camera = ViewCamera::new(10.0, 0.0, 0.0);
        assert!(close(camera.eye().to_vec(), Vector3::new(0.0, 0.0, 10.0)));

        let origin = camera.view_matrix() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!(close(origin.truncate(), Vector3::new(0.0, 0.0, -10.0)));
    }

    #[test]
    fn test_pitch_raises_or_lowers_eye() {
        // -45 degrees about X tilts the eye above the floor
        let camera = ViewCamera::new(10.0, -45.0, 0.0);
        let eye = camera.eye();
        let h = 10.0 * std::f32::consts::FRAC_1_SQRT_2;
        assert!(close(eye.to_vec(), Vector3::new(0.0, h, h)));
        assert!(close(camera.up(), Vector3::new(0.0, h / 10.0, -h / 10.0)));
    }

    #[test]
    fn test_yaw_orbits_around_y() {
        let camera = ViewCamera::new(4.0, 0.0, 90.0);
        assert!(close(camera.eye().to_vec(), Vector3::new(4.0, 0.0, 0.0)));
        assert!(close(camera.up(), Vector3::unit_y()));
    }

    #[test]
    fn test_view_keeps_distance_to_origin() {
        let camera = ViewCamera::new(7.5, -30.0, 135.0);
        let origin = camera.view_matrix() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!((origin.truncate().magnitude() - 7.5).abs() < 1e-4);
    }

    #[test]
    fn test_setters_report_changes() {
        let mut camera = ViewCamera::new(10.0, -45.0, 0.0);
        assert!(!camera.set_pitch(-45.0));
        assert!(camera.set_pitch(-30.0));
        assert!(camera.add_yaw(0.1));
        assert!(!camera.set_zoom(10.0));
        assert!(camera.set_zoom(0.0));
        assert_eq!(camera.zoom, 0.1);
        assert!(!camera.set_zoom(-5.0));
    }
}
