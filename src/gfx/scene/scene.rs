use cgmath::Matrix4;

use super::{DrawList, Floor, SceneNode};

/// An item line that was read but produced no node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    pub line: usize,
    pub tag: String,
}

/// A loaded scene: the floor, the graph rooted on it, and what was skipped.
#[derive(Debug)]
pub struct Scene {
    floor: Floor,
    root: SceneNode,
    skipped: Vec<SkippedItem>,
}

impl Scene {
    pub fn new(floor: Floor, root: SceneNode, skipped: Vec<SkippedItem>) -> Self {
        Self {
            floor,
            root,
            skipped,
        }
    }

    pub fn floor(&self) -> Floor {
        self.floor
    }

    pub fn root(&self) -> &SceneNode {
        &self.root
    }

    pub fn skipped(&self) -> &[SkippedItem] {
        &self.skipped
    }

    /// Number of placed items (the root's direct children).
    pub fn item_count(&self) -> usize {
        self.root.child_count()
    }

    /// Records the whole scene's draws with `camera` as the root transform.
    pub fn traverse(&self, camera: Matrix4<f32>, draws: &mut DrawList) {
        self.root.traverse(camera, draws);
    }
}
