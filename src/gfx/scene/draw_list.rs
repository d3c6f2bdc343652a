//! Per-frame list of recorded draws.

use cgmath::Matrix4;

use crate::gfx::geometry::MeshId;

/// One recorded draw: a mesh and the model matrix it is drawn with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub mesh: MeshId,
    pub model: Matrix4<f32>,
}

/// Draw calls collected during scene traversal, in submission order.
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    calls: Vec<DrawCall>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mesh: MeshId, model: Matrix4<f32>) {
        self.calls.push(DrawCall { mesh, model });
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawCall> {
        self.calls.iter()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }
}

impl<'a> IntoIterator for &'a DrawList {
    type Item = &'a DrawCall;
    type IntoIter = std::slice::Iter<'a, DrawCall>;

    fn into_iter(self) -> Self::IntoIter {
        self.calls.iter()
    }
}
