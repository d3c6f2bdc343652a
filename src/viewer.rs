//! The scene viewer: camera, light, scene and renderer tied together.
//!
//! Everything up to [`SceneViewer::build_frame`] is plain CPU state, so the
//! viewer can be driven and inspected without a window. The GPU side is
//! attached by [`SceneViewer::initialize`].

use std::path::Path;

use cgmath::Matrix4;

use crate::config::ViewerConfig;
use crate::error::{RenderError, Result};
use crate::gfx::{
    camera::{Projection, ViewCamera},
    geometry::{Cube, FurnitureKit, Geometry, MeshLibrary, PaletteColor},
    light::PointLight,
    rendering::{PipelineConfig, RenderEngine},
    scene::{load_scene_file, DrawList, Scene},
};

/// Camera and light state driven by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub camera: ViewCamera,
    pub light: PointLight,
}

/// Everything needed to render one frame.
#[derive(Debug)]
pub struct Frame {
    pub view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
    pub light_model: Matrix4<f32>,
    pub draws: DrawList,
}

pub struct SceneViewer {
    config: ViewerConfig,
    state: ViewState,
    projection: Projection,
    meshes: MeshLibrary,
    kit: FurnitureKit,
    light_marker: Cube,
    scene: Option<Scene>,
    engine: Option<RenderEngine>,
}

/// Slider positions map to world units at ten steps per unit.
fn from_slider(value: i32) -> f32 {
    value as f32 / 10.0
}

impl SceneViewer {
    pub fn new(config: ViewerConfig) -> Self {
        let meshes = MeshLibrary::with_palette();
        let kit = FurnitureKit::new(&meshes);
        let light_marker = Cube::new("light", meshes.cube(PaletteColor::White));
        let (zoom, pitch, yaw) = config.camera;

        Self {
            state: ViewState {
                camera: ViewCamera::new(zoom, pitch, yaw),
                light: PointLight::new(config.light_position),
            },
            projection: config.projection,
            meshes,
            kit,
            light_marker,
            scene: None,
            engine: None,
            config,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn meshes(&self) -> &MeshLibrary {
        &self.meshes
    }

    pub fn is_initialized(&self) -> bool {
        self.engine.is_some()
    }

    /// Attaches the GPU, uploads meshes, loads the configured scene and
    /// builds the shader program.
    ///
    /// A scene that fails to load is logged and leaves the viewer empty. A
    /// shader build failure is returned, but the viewer stays initialized so
    /// [`reload_shaders`](Self::reload_shaders) can retry.
    pub fn initialize(
        &mut self,
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> Result<()> {
        let pipeline = PipelineConfig::default()
            .with_shaders(&self.config.vertex_shader_path, &self.config.fragment_shader_path);
        let engine = pollster::block_on(RenderEngine::new(
            window,
            width,
            height,
            pipeline,
            self.config.clear_color,
        ))?;

        self.meshes.init_gpu_resources(engine.device());
        self.engine = Some(engine);
        self.resize(width, height);

        let scene_path = self.config.scene_path.clone();
        if let Err(err) = self.load_new_scene(&scene_path) {
            log::error!("Initial scene load failed: {err}");
        }

        self.reload_shaders()?;
        Ok(())
    }

    /// Updates the projection for a new viewport. Zero-sized viewports are
    /// ignored and return `false`.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if !self.projection.resize(width, height) {
            log::warn!("Ignoring resize to {width}x{height}");
            return false;
        }
        if let Some(engine) = self.engine.as_mut() {
            engine.resize(width, height);
        }
        true
    }

    /// Assembles the draws for the current state: the light marker first,
    /// then the scene with the camera view as its root transform.
    pub fn build_frame(&self) -> Frame {
        let view = self.state.camera.view_matrix();
        let light_model = self.state.light.transform(view);

        let mut draws = DrawList::new();
        self.light_marker.draw(light_model, &mut draws);
        if let Some(scene) = &self.scene {
            scene.traverse(view, &mut draws);
        }

        Frame {
            view,
            projection: self.projection.matrix(),
            light_model,
            draws,
        }
    }

    pub fn paint(&mut self) -> Result<()> {
        let frame = self.build_frame();
        let engine = self.engine.as_mut().ok_or(RenderError::NotInitialized)?;
        engine.render(&self.meshes, &frame.draws, frame.projection, frame.light_model)?;
        Ok(())
    }

    /// Rebuilds the shader program from its files.
    pub fn reload_shaders(&mut self) -> Result<bool> {
        let engine = self.engine.as_mut().ok_or(RenderError::NotInitialized)?;
        engine.rebuild_shaders()?;
        Ok(true)
    }

    /// Replaces the current scene with the one in `path`. On failure the
    /// current scene is left untouched.
    pub fn load_new_scene(&mut self, path: impl AsRef<Path>) -> Result<bool> {
        let scene = load_scene_file(path, &self.kit)?;
        log::debug!(
            "Scene graph: {} nodes, {} skipped items",
            scene.root().node_count(),
            scene.skipped().len()
        );
        self.scene = Some(scene);
        Ok(true)
    }

    /// Sets the camera pitch in degrees.
    pub fn rotate_camera_x(&mut self, degrees: i32) -> bool {
        self.state.camera.set_pitch(degrees as f32)
    }

    /// Sets the camera yaw in degrees.
    pub fn rotate_camera_y(&mut self, degrees: i32) -> bool {
        self.state.camera.set_yaw(degrees as f32)
    }

    pub fn rotate_camera_left(&mut self) -> bool {
        self.state.camera.add_yaw(-self.config.camera_step)
    }

    pub fn rotate_camera_right(&mut self) -> bool {
        self.state.camera.add_yaw(self.config.camera_step)
    }

    /// Sets the camera distance to `value / 10`.
    pub fn zoom_camera(&mut self, value: i32) -> bool {
        self.state.camera.set_zoom(from_slider(value))
    }

    /// Sets the light's X coordinate to `value / 10`.
    pub fn light_x(&mut self, value: i32) -> bool {
        self.state.light.set_x(from_slider(value))
    }

    pub fn light_y(&mut self, value: i32) -> bool {
        self.state.light.set_y(from_slider(value))
    }

    pub fn light_z(&mut self, value: i32) -> bool {
        self.state.light.set_z(from_slider(value))
    }
}
