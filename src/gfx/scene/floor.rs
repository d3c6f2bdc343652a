//! The placement grid and its tiled geometry.

use cgmath::{Matrix4, Vector3};

use crate::error::GridError;
use crate::gfx::geometry::{Geometry, MeshId};
use crate::gfx::scene::DrawList;

/// Thickness of a floor tile; its top face sits at `y = 0`.
const TILE_THICKNESS: f32 = 0.1;

/// Largest floor side, in cells.
///
/// A full floor of furnished cells stays within the model uniform buffer a
/// downlevel device can allocate.
pub const MAX_FLOOR_SIDE: i32 = 256;

/// A `width x depth` grid of unit cells centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Floor {
    width: u32,
    depth: u32,
}

impl Floor {
    pub fn new(width: i32, depth: i32) -> Result<Self, GridError> {
        if width < 1 || depth < 1 {
            return Err(GridError::InvalidDimensions { width, depth });
        }
        if width > MAX_FLOOR_SIDE || depth > MAX_FLOOR_SIDE {
            return Err(GridError::TooLarge {
                width,
                depth,
                max: MAX_FLOOR_SIDE,
            });
        }
        Ok(Self {
            width: width as u32,
            depth: depth as u32,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn contains(&self, x: i32, z: i32) -> bool {
        x >= 0 && z >= 0 && (x as u32) < self.width && (z as u32) < self.depth
    }

    /// World-space center of cell `(x, z)`.
    ///
    /// The grid is centered on the origin: on a 3x3 floor cell (1, 1) maps
    /// to the origin, on a 2x2 floor cell (0, 0) maps to (-0.5, 0, -0.5).
    pub fn grid_to_world(&self, x: i32, z: i32) -> Result<Vector3<f32>, GridError> {
        if !self.contains(x, z) {
            return Err(GridError::OutOfBounds {
                x,
                z,
                width: self.width,
                depth: self.depth,
            });
        }
        Ok(Vector3::new(
            x as f32 - (self.width as f32 - 1.0) * 0.5,
            0.0,
            z as f32 - (self.depth as f32 - 1.0) * 0.5,
        ))
    }

    /// Iterates every cell in row-major `(x, z)` order.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> {
        let (width, depth) = (self.width as i32, self.depth as i32);
        (0..width).flat_map(move |x| (0..depth).map(move |z| (x, z)))
    }
}

/// Draws one flattened cube per floor cell.
#[derive(Debug, Clone)]
pub struct FloorTiles {
    floor: Floor,
    tile: MeshId,
}

impl FloorTiles {
    pub fn new(floor: Floor, tile: MeshId) -> Self {
        Self { floor, tile }
    }

    pub fn floor(&self) -> Floor {
        self.floor
    }
}

impl Geometry for FloorTiles {
    fn name(&self) -> &str {
        "floor"
    }

    fn draw(&self, model: Matrix4<f32>, draws: &mut DrawList) {
        let tile = Matrix4::from_translation(Vector3::new(0.0, -TILE_THICKNESS * 0.5, 0.0))
            * Matrix4::from_nonuniform_scale(1.0, TILE_THICKNESS, 1.0);

        for (x, z) in self.floor.cells() {
            // cells() only yields in-range coordinates
            if let Ok(center) = self.floor.grid_to_world(x, z) {
                draws.push(self.tile, model * Matrix4::from_translation(center) * tile);
            }
        }
    }
}
