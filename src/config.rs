//! Viewer configuration.
//!
//! Every knob has a default matching the stock viewer; override with the
//! `with_*` builder methods.

use std::path::PathBuf;

use cgmath::{Deg, Vector3};

use crate::gfx::camera::Projection;

#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub title: String,
    pub window_size: (u32, u32),
    pub scene_path: PathBuf,
    pub vertex_shader_path: PathBuf,
    pub fragment_shader_path: PathBuf,
    pub clear_color: wgpu::Color,
    /// Initial camera as (zoom, pitch degrees, yaw degrees).
    pub camera: (f32, f32, f32),
    /// Yaw step for `rotate_camera_left` / `rotate_camera_right`, in degrees.
    pub camera_step: f32,
    pub light_position: Vector3<f32>,
    pub projection: Projection,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Furnish".to_string(),
            window_size: (1024, 768),
            scene_path: PathBuf::from("assets/testSceneHW1.txt"),
            vertex_shader_path: PathBuf::from("shaders/lambert.vert.wgsl"),
            fragment_shader_path: PathBuf::from("shaders/lambert.frag.wgsl"),
            clear_color: wgpu::Color::WHITE,
            camera: (10.0, -45.0, 0.0),
            camera_step: 0.1,
            light_position: Vector3::new(0.0, 5.5, 10.0),
            projection: Projection {
                fovy: Deg(90.0),
                aspect: 1.0,
                znear: 0.1,
                zfar: 30.0,
            },
        }
    }
}

impl ViewerConfig {
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_owned();
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    pub fn with_scene(mut self, path: impl Into<PathBuf>) -> Self {
        self.scene_path = path.into();
        self
    }

    pub fn with_shaders(mut self, vertex: impl Into<PathBuf>, fragment: impl Into<PathBuf>) -> Self {
        self.vertex_shader_path = vertex.into();
        self.fragment_shader_path = fragment.into();
        self
    }

    pub fn with_camera(mut self, zoom: f32, pitch: f32, yaw: f32) -> Self {
        self.camera = (zoom, pitch, yaw);
        self
    }

    pub fn with_light(mut self, position: Vector3<f32>) -> Self {
        self.light_position = position;
        self
    }

    pub fn with_clear_color(mut self, color: wgpu::Color) -> Self {
        self.clear_color = color;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_viewer() {
        let config = ViewerConfig::default();
        assert_eq!(config.camera, (10.0, -45.0, 0.0));
        assert_eq!(config.light_position, Vector3::new(0.0, 5.5, 10.0));
        assert_eq!(config.projection, Projection::default());
        assert_eq!(config.clear_color, wgpu::Color::WHITE);
    }

    #[test]
    fn test_builders_override_fields() {
        let config = ViewerConfig::default()
            .with_title("Showroom")
            .with_scene("assets/other.txt")
            .with_shaders("a.wgsl", "b.wgsl")
            .with_camera(5.0, -30.0, 45.0);

        assert_eq!(config.title, "Showroom");
        assert_eq!(config.scene_path, PathBuf::from("assets/other.txt"));
        assert_eq!(config.vertex_shader_path, PathBuf::from("a.wgsl"));
        assert_eq!(config.fragment_shader_path, PathBuf::from("b.wgsl"));
        assert_eq!(config.camera, (5.0, -30.0, 45.0));
    }
}
