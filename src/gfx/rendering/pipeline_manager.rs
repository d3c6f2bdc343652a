//! Shader program management for the Lambert pipeline
//!
//! Reads the vertex and fragment stages from disk, builds them into a render
//! pipeline and reports toolchain diagnostics as [`ShaderError`]s. Rebuilding
//! replaces the pipeline in place, so edited shaders can be picked up while
//! the viewer is running.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use wgpu::*;

use crate::error::{ShaderError, ShaderStage};
use crate::gfx::scene::vertex::Vertex3D;

/// Configuration for the render pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub label: String,
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    pub bind_group_layouts: Vec<BindGroupLayout>,
    pub color_format: TextureFormat,
    pub depth_format: Option<TextureFormat>,
    pub cull_mode: Option<Face>,
    pub depth_compare: CompareFunction,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            label: "Lambert".to_string(),
            vertex_shader: PathBuf::from("shaders/lambert.vert.wgsl"),
            fragment_shader: PathBuf::from("shaders/lambert.frag.wgsl"),
            bind_group_layouts: Vec::new(),
            color_format: TextureFormat::Bgra8Unorm,
            depth_format: None,
            // scene files may carry negative scales, which flip winding
            cull_mode: None,
            depth_compare: CompareFunction::LessEqual,
        }
    }
}

impl PipelineConfig {
    pub fn with_shaders(mut self, vertex: &Path, fragment: &Path) -> Self {
        self.vertex_shader = vertex.to_path_buf();
        self.fragment_shader = fragment.to_path_buf();
        self
    }

    pub fn with_bind_group_layouts(mut self, layouts: Vec<BindGroupLayout>) -> Self {
        self.bind_group_layouts = layouts;
        self
    }

    pub fn with_color_format(mut self, format: TextureFormat) -> Self {
        self.color_format = format;
        self
    }

    pub fn with_depth_format(mut self, format: TextureFormat) -> Self {
        self.depth_format = Some(format);
        self
    }
}

/// WGSL source of both shader stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    /// Reads both stages named by `config`.
    pub fn load(config: &PipelineConfig) -> Result<Self, ShaderError> {
        Ok(Self {
            vertex: read_stage(ShaderStage::Vertex, &config.vertex_shader)?,
            fragment: read_stage(ShaderStage::Fragment, &config.fragment_shader)?,
        })
    }
}

fn read_stage(stage: ShaderStage, path: &Path) -> Result<String, ShaderError> {
    std::fs::read_to_string(path).map_err(|source| ShaderError::Source {
        stage,
        path: path.to_path_buf(),
        source,
    })
}

/// Owns the render pipeline and rebuilds it on demand.
///
/// When a build fails the previous pipeline is dropped, so [`pipeline`]
/// returns `None` until a later build succeeds.
///
/// [`pipeline`]: PipelineManager::pipeline
pub struct PipelineManager {
    device: Arc<Device>,
    config: PipelineConfig,
    pipeline: Option<RenderPipeline>,
}

impl PipelineManager {
    pub fn new(device: Arc<Device>, config: PipelineConfig) -> Self {
        Self {
            device,
            config,
            pipeline: None,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Reads the shader files and rebuilds the pipeline.
    pub fn build(&mut self) -> Result<(), ShaderError> {
        self.pipeline = None;
        let sources = ShaderSources::load(&self.config)?;
        self.build_from_sources(&sources)
    }

    /// Rebuilds the pipeline from in-memory sources.
    pub fn build_from_sources(&mut self, sources: &ShaderSources) -> Result<(), ShaderError> {
        self.pipeline = None;

        let vertex = self.compile_stage(ShaderStage::Vertex, &sources.vertex)?;
        let fragment = self.compile_stage(ShaderStage::Fragment, &sources.fragment)?;
        let pipeline = self.link(&vertex, &fragment)?;

        self.pipeline = Some(pipeline);
        log::info!(
            "Built '{}' pipeline from {} and {}",
            self.config.label,
            self.config.vertex_shader.display(),
            self.config.fragment_shader.display()
        );
        Ok(())
    }

    /// Runs `f` inside a validation error scope and turns any captured
    /// error into build diagnostics for `stage`.
    fn with_diagnostics<T>(
        &self,
        stage: ShaderStage,
        f: impl FnOnce(&Device) -> T,
    ) -> Result<T, ShaderError> {
        self.device.push_error_scope(ErrorFilter::Validation);
        let value = f(&self.device);
        match pollster::block_on(self.device.pop_error_scope()) {
            Some(error) => Err(ShaderError::Build {
                stage,
                diagnostics: error.to_string(),
            }),
            None => Ok(value),
        }
    }

    fn compile_stage(&self, stage: ShaderStage, source: &str) -> Result<ShaderModule, ShaderError> {
        let label = format!("{} {} shader", self.config.label, stage);
        self.with_diagnostics(stage, |device| {
            device.create_shader_module(ShaderModuleDescriptor {
                label: Some(&label),
                source: ShaderSource::Wgsl(source.into()),
            })
        })
    }

    fn link(&self, vertex: &ShaderModule, fragment: &ShaderModule) -> Result<RenderPipeline, ShaderError> {
        let config = &self.config;
        let bind_group_layout_refs: Vec<&BindGroupLayout> = config.bind_group_layouts.iter().collect();

        self.with_diagnostics(ShaderStage::Link, |device| {
            let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
                label: Some(&format!("{} Layout", config.label)),
                bind_group_layouts: &bind_group_layout_refs,
                push_constant_ranges: &[],
            });

            let depth_stencil = config.depth_format.map(|format| DepthStencilState {
                format,
                depth_write_enabled: true,
                depth_compare: config.depth_compare,
                stencil: StencilState::default(),
                bias: DepthBiasState::default(),
            });

            device.create_render_pipeline(&RenderPipelineDescriptor {
                label: Some(&config.label),
                layout: Some(&pipeline_layout),
                vertex: VertexState {
                    module: vertex,
                    entry_point: Some("vs_main"),
                    buffers: &[Vertex3D::desc()],
                    compilation_options: PipelineCompilationOptions::default(),
                },
                fragment: Some(FragmentState {
                    module: fragment,
                    entry_point: Some("fs_main"),
                    targets: &[Some(ColorTargetState {
                        format: config.color_format,
                        blend: Some(BlendState::REPLACE),
                        write_mask: ColorWrites::ALL,
                    })],
                    compilation_options: PipelineCompilationOptions::default(),
                }),
                primitive: PrimitiveState {
                    topology: PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: FrontFace::Ccw,
                    cull_mode: config.cull_mode,
                    polygon_mode: PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil,
                multisample: MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        })
    }

    /// The current pipeline, if the last build succeeded.
    pub fn pipeline(&self) -> Option<&RenderPipeline> {
        self.pipeline.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_lambert_files() {
        let config = PipelineConfig::default();
        assert_eq!(config.vertex_shader, PathBuf::from("shaders/lambert.vert.wgsl"));
        assert_eq!(config.fragment_shader, PathBuf::from("shaders/lambert.frag.wgsl"));
        assert_eq!(config.depth_compare, CompareFunction::LessEqual);
    }

    #[test]
    fn test_missing_shader_reports_stage_and_path() {
        let config = PipelineConfig::default().with_shaders(
            Path::new("shaders/does-not-exist.vert.wgsl"),
            Path::new("shaders/lambert.frag.wgsl"),
        );
        match ShaderSources::load(&config) {
            Err(ShaderError::Source { stage, path, .. }) => {
                assert_eq!(stage, ShaderStage::Vertex);
                assert_eq!(path, PathBuf::from("shaders/does-not-exist.vert.wgsl"));
            }
            other => panic!("expected a source error, got {other:?}"),
        }
    }

    #[test]
    fn test_bundled_shaders_are_readable() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        let config = PipelineConfig::default().with_shaders(
            &root.join("shaders/lambert.vert.wgsl"),
            &root.join("shaders/lambert.frag.wgsl"),
        );
        let sources = ShaderSources::load(&config).unwrap();
        assert!(sources.vertex.contains("fn vs_main"));
        assert!(sources.fragment.contains("fn fs_main"));
    }

    const PLAIN_VERTEX: &str = "@vertex
fn vs_main(@builtin(vertex_index) index: u32) -> @builtin(position) vec4<f32> {
    return vec4<f32>(f32(index), 0.0, 0.0, 1.0);
}
";
    const PLAIN_FRAGMENT: &str = "@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 1.0, 1.0, 1.0);
}
";

    /// Software device for pipeline tests, or `None` on hosts without one.
    fn fallback_device() -> Option<Arc<Device>> {
        let instance = Instance::new(&InstanceDescriptor::default());
        let adapter = pollster::block_on(instance.request_adapter(&RequestAdapterOptions {
            power_preference: PowerPreference::default(),
            compatible_surface: None,
            force_fallback_adapter: true,
        }))
        .ok()?;
        let (device, _queue) = pollster::block_on(adapter.request_device(&DeviceDescriptor {
            label: Some("test device"),
            required_features: Features::empty(),
            required_limits: Limits::downlevel_defaults(),
            memory_hints: MemoryHints::default(),
            trace: Trace::Off,
        }))
        .ok()?;
        Some(Arc::new(device))
    }

    #[test]
    fn test_broken_vertex_stage_reports_diagnostics() {
        let Some(device) = fallback_device() else {
            eprintln!("no fallback adapter, skipping");
            return;
        };
        let mut manager = PipelineManager::new(device, PipelineConfig::default());
        let sources = ShaderSources {
            vertex: "@vertex fn vs_main( -> {".to_string(),
            fragment: PLAIN_FRAGMENT.to_string(),
        };

        match manager.build_from_sources(&sources) {
            Err(ShaderError::Build { stage: ShaderStage::Vertex, diagnostics }) => {
                assert!(!diagnostics.is_empty());
            }
            other => panic!("expected a vertex build error, got {other:?}"),
        }
        assert!(manager.pipeline().is_none());
    }

    #[test]
    fn test_failed_rebuild_drops_previous_pipeline() {
        let Some(device) = fallback_device() else {
            eprintln!("no fallback adapter, skipping");
            return;
        };
        let mut manager = PipelineManager::new(device, PipelineConfig::default());
        let good = ShaderSources {
            vertex: PLAIN_VERTEX.to_string(),
            fragment: PLAIN_FRAGMENT.to_string(),
        };
        manager.build_from_sources(&good).unwrap();
        assert!(manager.pipeline().is_some());

        let broken = ShaderSources {
            vertex: PLAIN_VERTEX.to_string(),
            fragment: "@fragment fn fs_main() -> @location(0) vec4<f32> { return 1; }".to_string(),
        };
        assert!(matches!(
            manager.build_from_sources(&broken),
            Err(ShaderError::Build { stage: ShaderStage::Fragment, .. })
        ));
        assert!(manager.pipeline().is_none());
    }
}
