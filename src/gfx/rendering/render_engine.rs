//! WGPU-based rendering engine
//!
//! Owns the surface, device and per-frame uniforms, and replays a
//! [`DrawList`] with the Lambert pipeline into a single depth-tested pass.

use std::sync::Arc;
use cgmath::Matrix4;
use wgpu::TextureFormat;

use crate::error::{RenderError, ShaderError};
use crate::gfx::{
    geometry::MeshLibrary,
    resources::{GlobalBindings, GlobalUBO, GlobalsContent, ModelBindings, ModelUBO, TextureResource},
    scene::DrawList,
};

use super::pipeline_manager::{PipelineConfig, PipelineManager};

/// Initial number of per-draw model slots; grows on demand.
const INITIAL_MODEL_SLOTS: usize = 128;

/// Fills `staging` with each draw's model matrix in column-major order, one
/// entry per model buffer slot.
fn stage_models(draws: &DrawList, staging: &mut Vec<[[f32; 4]; 4]>) {
    staging.clear();
    staging.extend(draws.iter().map(|call| -> [[f32; 4]; 4] { call.model.into() }));
}

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    pub pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    model_ubo: ModelUBO,
    model_bindings: ModelBindings,
    model_staging: Vec<[[f32; 4]; 4]>,
    clear_color: wgpu::Color,
}

impl RenderEngine {
    /// Creates a new render engine for the given window.
    ///
    /// The shader program is not built here; call [`rebuild_shaders`] once
    /// the engine exists so build failures can be reported separately.
    ///
    /// [`rebuild_shaders`]: RenderEngine::rebuild_shaders
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        pipeline: PipelineConfig,
        clear_color: wgpu::Color,
    ) -> Result<RenderEngine, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;
        let device = Arc::new(device);
        let queue = Arc::new(queue);

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .unwrap_or(TextureFormat::Bgra8Unorm);
        let alpha_mode = surface_capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture = TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let global_ubo = GlobalUBO::new(&device);
        let global_bindings = GlobalBindings::new(&device, &global_ubo);
        let model_ubo = ModelUBO::new(&device, INITIAL_MODEL_SLOTS);
        let model_bindings = ModelBindings::new(&device, &model_ubo);

        let pipeline = pipeline
            .with_bind_group_layouts(vec![
                global_bindings.bind_group_layout().clone(),
                model_bindings.bind_group_layout().clone(),
            ])
            .with_color_format(format)
            .with_depth_format(TextureResource::DEPTH_FORMAT);
        let pipeline_manager = PipelineManager::new(device.clone(), pipeline);

        log::info!(
            "Render engine ready: {:?} surface {}x{}",
            format,
            config.width,
            config.height
        );

        Ok(RenderEngine {
            surface,
            device,
            queue,
            config,
            depth_texture,
            pipeline_manager,
            global_ubo,
            global_bindings,
            model_ubo,
            model_bindings,
            model_staging: Vec::new(),
            clear_color,
        })
    }

    /// Rebuilds the shader program from its files on disk.
    pub fn rebuild_shaders(&mut self) -> Result<(), ShaderError> {
        self.pipeline_manager.build()
    }

    /// Renders one frame.
    ///
    /// Every draw call uploads its model matrix into its own slot of the
    /// model buffer; `light_model` and `projection` are shared by all draws.
    pub fn render(
        &mut self,
        meshes: &MeshLibrary,
        draws: &DrawList,
        projection: Matrix4<f32>,
        light_model: Matrix4<f32>,
    ) -> Result<(), RenderError> {
        if self.pipeline_manager.pipeline().is_none() {
            return Err(RenderError::NoProgram);
        }

        self.global_ubo
            .update_content(&self.queue, GlobalsContent::new(projection, light_model));

        stage_models(draws, &mut self.model_staging);
        if self
            .model_ubo
            .write(&self.device, &self.queue, &self.model_staging)
        {
            log::debug!("Model buffer grew to {} slots", self.model_ubo.capacity());
            self.model_bindings.rebind(&self.device, &self.model_ubo);
        }

        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(err @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                self.surface.configure(&self.device, &self.config);
                return Err(err.into());
            }
            Err(err) => return Err(err.into()),
        };
        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let Some(pipeline) = self.pipeline_manager.pipeline() {
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

                for (slot, call) in draws.iter().enumerate() {
                    let Some(mesh) = meshes.get(call.mesh) else {
                        log::warn!("Draw references unknown mesh {:?}", call.mesh);
                        continue;
                    };
                    let Some(buffer) = mesh.vertex_buffer() else {
                        log::warn!("Skipping '{}' - mesh has no GPU resources", mesh.label());
                        continue;
                    };

                    render_pass.set_bind_group(
                        1,
                        self.model_bindings.bind_group(),
                        &[self.model_ubo.offset(slot)],
                    );
                    render_pass.set_vertex_buffer(0, buffer.slice(..));
                    render_pass.draw(0..mesh.vertex_count(), 0..1);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    /// Resizes the surface and recreates the depth buffer.
    ///
    /// Zero-sized requests (minimized windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }
}
