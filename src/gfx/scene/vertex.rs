//! # Vertex Data Structures
//!
//! GPU-compatible vertex format shared by every mesh in the viewer.

/// A vertex with position, flat color and normal.
///
/// # Memory Layout
///
/// `#[repr(C)]` keeps the field order stable so [`Vertex3D::desc`] can
/// describe it to the pipeline:
///
/// - location 0: `position` (`vs_position`)
/// - location 1: `color` (`vs_color`)
/// - location 2: `normal` (`vs_normal`)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex3D {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x3];

    /// Returns the vertex buffer layout used by the Lambert pipeline.
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex3D>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}
