use cgmath::Matrix4;

use super::{Geometry, MeshId};
use crate::gfx::scene::DrawList;

/// A single colored unit cube, drawn as-is with the model matrix it is given.
#[derive(Debug, Clone)]
pub struct Cube {
    name: String,
    mesh: MeshId,
}

impl Cube {
    pub fn new(name: impl Into<String>, mesh: MeshId) -> Self {
        Self {
            name: name.into(),
            mesh,
        }
    }

    pub fn mesh(&self) -> MeshId {
        self.mesh
    }
}

impl Geometry for Cube {
    fn name(&self) -> &str {
        &self.name
    }

    fn draw(&self, model: Matrix4<f32>, draws: &mut DrawList) {
        draws.push(self.mesh, model);
    }
}
