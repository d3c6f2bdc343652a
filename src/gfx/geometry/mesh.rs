//! Colored cube meshes and the library that owns them.
//!
//! Meshes are arena-indexed: scene geometry refers to a mesh by [`MeshId`]
//! and never owns vertex data itself, so one GPU buffer serves every
//! placement of the same color.

use wgpu::util::DeviceExt;

use super::primitives::generate_cube;
use crate::gfx::scene::vertex::Vertex3D;

/// Index of a mesh inside a [`MeshLibrary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(pub usize);

/// The fixed cube colors the viewer draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteColor {
    Blue,
    Red,
    Green,
    Orange,
    Purple,
    White,
}

impl PaletteColor {
    pub const ALL: [PaletteColor; 6] = [
        PaletteColor::Blue,
        PaletteColor::Red,
        PaletteColor::Green,
        PaletteColor::Orange,
        PaletteColor::Purple,
        PaletteColor::White,
    ];

    pub fn rgb(self) -> [f32; 3] {
        match self {
            PaletteColor::Blue => [0.0, 0.0, 1.0],
            PaletteColor::Red => [1.0, 0.0, 0.0],
            PaletteColor::Green => [0.0, 1.0, 0.0],
            PaletteColor::Orange => [1.0, 0.45, 0.0],
            PaletteColor::Purple => [1.0, 0.0, 1.0],
            PaletteColor::White => [1.0, 1.0, 1.0],
        }
    }

    fn label(self) -> &'static str {
        match self {
            PaletteColor::Blue => "blue cube",
            PaletteColor::Red => "red cube",
            PaletteColor::Green => "green cube",
            PaletteColor::Orange => "orange cube",
            PaletteColor::Purple => "purple cube",
            PaletteColor::White => "white cube",
        }
    }
}

/// A tinted unit cube and, once uploaded, its vertex buffer.
pub struct Mesh {
    label: &'static str,
    vertices: Vec<Vertex3D>,
    vertex_buffer: Option<wgpu::Buffer>,
}

impl Mesh {
    /// Builds the vertex data of a unit cube tinted with `color`.
    pub fn colored_cube(label: &'static str, color: [f32; 3]) -> Self {
        Self {
            label,
            vertices: generate_cube().to_colored_vertices(color),
            vertex_buffer: None,
        }
    }

    pub fn label(&self) -> &str {
        self.label
    }

    pub fn vertices(&self) -> &[Vertex3D] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    /// Uploads the vertex data. Calling it again replaces the buffer.
    pub fn init_gpu_resources(&mut self, device: &wgpu::Device) {
        self.vertex_buffer = Some(
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(self.label),
                contents: bytemuck::cast_slice(&self.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            }),
        );
    }

    pub fn vertex_buffer(&self) -> Option<&wgpu::Buffer> {
        self.vertex_buffer.as_ref()
    }
}

/// Owns every mesh the viewer can draw.
pub struct MeshLibrary {
    meshes: Vec<Mesh>,
    palette: Vec<(PaletteColor, MeshId)>,
}

impl MeshLibrary {
    /// Creates a library holding one cube per palette color.
    pub fn with_palette() -> Self {
        let mut library = Self {
            meshes: Vec::new(),
            palette: Vec::new(),
        };
        for color in PaletteColor::ALL {
            let id = library.add(Mesh::colored_cube(color.label(), color.rgb()));
            library.palette.push((color, id));
        }
        library
    }

    pub fn add(&mut self, mesh: Mesh) -> MeshId {
        self.meshes.push(mesh);
        MeshId(self.meshes.len() - 1)
    }

    /// The cube mesh for a palette color.
    pub fn cube(&self, color: PaletteColor) -> MeshId {
        self.palette
            .iter()
            .find(|(c, _)| *c == color)
            .map(|(_, id)| *id)
            .unwrap_or(MeshId(0))
    }

    pub fn get(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Uploads every mesh to the GPU.
    pub fn init_gpu_resources(&mut self, device: &wgpu::Device) {
        for mesh in &mut self.meshes {
            mesh.init_gpu_resources(device);
        }
        log::debug!("uploaded {} cube meshes", self.meshes.len());
    }
}
