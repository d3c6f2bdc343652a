//! # Geometry
//!
//! Procedural cube data, the colored cube meshes built from it, and the
//! furniture shapes composed out of those cubes.
//!
//! Every drawable implements [`Geometry`]. Drawing never touches the GPU
//! directly: it records [`DrawCall`](crate::gfx::scene::DrawCall)s into a
//! [`DrawList`] that the render engine replays. The same geometry instance
//! is shared by every scene node that places it.
//!
//! ```rust
//! use cgmath::{Matrix4, SquareMatrix};
//! use furnish::gfx::geometry::{FurnitureKit, Geometry, MeshLibrary};
//! use furnish::gfx::scene::DrawList;
//!
//! let library = MeshLibrary::with_palette();
//! let kit = FurnitureKit::new(&library);
//!
//! let mut draws = DrawList::new();
//! kit.table.draw(Matrix4::identity(), &mut draws);
//! assert_eq!(draws.len(), 5); // top + four legs
//! ```

pub mod cube;
pub mod furniture;
pub mod mesh;
pub mod primitives;

pub use cube::Cube;
pub use furniture::{Furniture, FurnitureKind, FurnitureKit};
pub use mesh::{Mesh, MeshId, MeshLibrary, PaletteColor};
pub use primitives::*;

use cgmath::Matrix4;

use crate::gfx::scene::DrawList;

/// Anything that can be placed by a scene node.
pub trait Geometry {
    /// Short name used in logs and diagnostics.
    fn name(&self) -> &str;

    /// Records the draw calls for this geometry with the given model matrix.
    fn draw(&self, model: Matrix4<f32>, draws: &mut DrawList);
}

/// Generated geometry data ready to be tinted and uploaded.
///
/// Positions and normals are stored per vertex, unindexed: every three
/// consecutive vertices form one counter-clockwise triangle.
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Builds GPU vertices with every vertex tinted `color`.
    pub fn to_colored_vertices(&self, color: [f32; 3]) -> Vec<crate::gfx::scene::vertex::Vertex3D> {
        use crate::gfx::scene::vertex::Vertex3D;

        self.vertices
            .iter()
            .enumerate()
            .map(|(i, &position)| Vertex3D {
                position,
                color,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect()
    }
}
