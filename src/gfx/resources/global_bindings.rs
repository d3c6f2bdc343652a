//! Uniform bindings for the Lambert pipeline
//!
//! Group 0 holds per-frame globals (projection and light transform), group 1
//! holds the model matrix of the current draw, selected by dynamic offset.

use crate::wgpu_utils::{binding_types, DynamicUniformBuffer, UniformBuffer};

/// Per-frame uniforms.
///
/// MUST match the `Globals` struct in both Lambert shader stages.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalsContent {
    pub proj: [[f32; 4]; 4],
    /// `view * translate(light) * scale(0.5)`; shaders use its translation
    /// column as the camera-space light position.
    pub light_model: [[f32; 4]; 4],
}

impl GlobalsContent {
    pub fn new(proj: cgmath::Matrix4<f32>, light_model: cgmath::Matrix4<f32>) -> Self {
        Self {
            proj: proj.into(),
            light_model: light_model.into(),
        }
    }
}

pub type GlobalUBO = UniformBuffer<GlobalsContent>;
pub type ModelUBO = DynamicUniformBuffer<[[f32; 4]; 4]>;

const MODEL_SIZE: u64 = std::mem::size_of::<[[f32; 4]; 4]>() as u64;

/// Bind group layout and bind group for the per-frame globals.
pub struct GlobalBindings {
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Globals Bind Group Layout"),
            entries: &[binding_types::rendering_entry(0, binding_types::uniform())],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Globals Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.binding_resource(),
            }],
        });

        GlobalBindings {
            bind_group_layout,
            bind_group,
        }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

/// Bind group for the per-draw model matrix.
pub struct ModelBindings {
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl ModelBindings {
    pub fn new(device: &wgpu::Device, ubo: &ModelUBO) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Model Bind Group Layout"),
            entries: &[binding_types::rendering_entry(
                0,
                binding_types::uniform_dynamic(MODEL_SIZE),
            )],
        });
        let bind_group = Self::create_bind_group(device, &bind_group_layout, ubo);

        ModelBindings {
            bind_group_layout,
            bind_group,
        }
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        ubo: &ModelUBO,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Model Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.binding_resource(),
            }],
        })
    }

    /// Rebinds after the model buffer was reallocated.
    pub fn rebind(&mut self, device: &wgpu::Device, ubo: &ModelUBO) {
        self.bind_group = Self::create_bind_group(device, &self.bind_group_layout, ubo);
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}
