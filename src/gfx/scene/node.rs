//! Scene graph nodes and top-down transform composition.
//!
//! A node's local transform is always evaluated as
//! `translate(cell) * rotate_y(rot_y) * scale(sx, sy, sz)`, and the matrix
//! it draws with is the inherited parent matrix times that local transform.
//! Children are keyed by the floor cell they stand on, one child per cell.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use cgmath::{Deg, Matrix4, SquareMatrix, Vector3, Zero};

use super::{DrawList, Floor};
use crate::error::SceneError;
use crate::gfx::geometry::Geometry;

/// A transform node with optional shared geometry.
pub struct SceneNode {
    floor: Option<Floor>,
    cell: Option<(i32, i32)>,
    offset: Vector3<f32>,
    rot_y: f32,
    scale: Vector3<f32>,
    geometry: Option<Rc<dyn Geometry>>,
    children: BTreeMap<(i32, i32), SceneNode>,
}

impl Default for SceneNode {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneNode {
    /// A detached node with identity transform and no floor of its own.
    pub fn new() -> Self {
        Self {
            floor: None,
            cell: None,
            offset: Vector3::zero(),
            rot_y: 0.0,
            scale: Vector3::new(1.0, 1.0, 1.0),
            geometry: None,
            children: BTreeMap::new(),
        }
    }

    /// A root node whose children are placed on `floor`.
    pub fn with_floor(floor: Floor) -> Self {
        Self {
            floor: Some(floor),
            ..Self::new()
        }
    }

    pub fn set_floor_size(&mut self, floor: Floor) {
        self.floor = Some(floor);
    }

    pub fn floor(&self) -> Option<Floor> {
        self.floor
    }

    pub fn link_geometry(&mut self, geometry: Rc<dyn Geometry>) {
        self.geometry = Some(geometry);
    }

    pub fn geometry(&self) -> Option<&Rc<dyn Geometry>> {
        self.geometry.as_ref()
    }

    /// Rotation about the vertical axis, in degrees.
    ///
    /// The angle is reduced modulo 360 before building the transform, so
    /// `θ` and `θ + 360` give identical matrices when both reduce to the same
    /// `f32` (whole degrees, halves, quarters). Other fractional angles agree
    /// only to within `f32` rounding of the sum.
    pub fn set_rot_y(&mut self, degrees: f32) {
        self.rot_y = degrees;
    }

    pub fn rot_y(&self) -> f32 {
        self.rot_y
    }

    pub fn set_scale_x(&mut self, x: f32) {
        self.scale.x = x;
    }

    pub fn set_scale_y(&mut self, y: f32) {
        self.scale.y = y;
    }

    pub fn set_scale_z(&mut self, z: f32) {
        self.scale.z = z;
    }

    pub fn scale(&self) -> Vector3<f32> {
        self.scale
    }

    /// The cell this node occupies in its parent, if attached.
    pub fn cell(&self) -> Option<(i32, i32)> {
        self.cell
    }

    /// Attaches `child` at cell `(x, z)` of this node's floor.
    ///
    /// The cell must be on the floor and empty; on error the existing child
    /// stays in place. A child without a floor of its own inherits this one.
    pub fn add_child(&mut self, mut child: SceneNode, x: i32, z: i32) -> Result<(), SceneError> {
        let floor = self.floor.ok_or(SceneError::MissingFloor)?;
        let offset = floor.grid_to_world(x, z)?;

        if self.children.contains_key(&(x, z)) {
            return Err(SceneError::CellOccupied { x, z });
        }

        child.cell = Some((x, z));
        child.offset = offset;
        if child.floor.is_none() {
            child.floor = Some(floor);
        }
        self.children.insert((x, z), child);
        Ok(())
    }

    pub fn child(&self, x: i32, z: i32) -> Option<&SceneNode> {
        self.children.get(&(x, z))
    }

    /// Children in ascending `(x, z)` order.
    pub fn children(&self) -> impl Iterator<Item = &SceneNode> {
        self.children.values()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.values().map(SceneNode::node_count).sum::<usize>()
    }

    pub fn local_transform(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.offset)
            * Matrix4::from_angle_y(Deg(self.rot_y.rem_euclid(360.0)))
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    /// Draws this subtree with `parent` as the accumulated transform.
    pub fn traverse(&self, parent: Matrix4<f32>, draws: &mut DrawList) {
        let world = parent * self.local_transform();

        if let Some(geometry) = &self.geometry {
            geometry.draw(world, draws);
        }

        for child in self.children.values() {
            child.traverse(world, draws);
        }
    }

    /// Draws this subtree as a root, starting from the identity.
    pub fn traverse_from_identity(&self, draws: &mut DrawList) {
        self.traverse(Matrix4::identity(), draws);
    }
}

impl fmt::Debug for SceneNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneNode")
            .field("cell", &self.cell)
            .field("rot_y", &self.rot_y)
            .field("scale", &self.scale)
            .field("geometry", &self.geometry.as_ref().map(|g| g.name().to_string()))
            .field("children", &self.children.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;
    use crate::gfx::geometry::{Cube, MeshId};
    use rand::Rng;

    fn cube(id: usize) -> Rc<dyn Geometry> {
        Rc::new(Cube::new("cube", MeshId(id)))
    }

    fn approx_eq(a: Matrix4<f32>, b: Matrix4<f32>) -> bool {
        let a: &[f32; 16] = a.as_ref();
        let b: &[f32; 16] = b.as_ref();
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn test_child_transform_composes_translate_rotate_scale() {
        let floor = Floor::new(3, 3).unwrap();
        let mut root = SceneNode::with_floor(floor);

        let mut child = SceneNode::new();
        child.link_geometry(cube(1));
        child.set_rot_y(30.0);
        child.set_scale_x(2.0);
        child.set_scale_y(0.5);
        child.set_scale_z(1.5);
        root.add_child(child, 1, 1).unwrap();

        let mut draws = DrawList::new();
        root.traverse_from_identity(&mut draws);

        let expected = Matrix4::from_translation(floor.grid_to_world(1, 1).unwrap())
            * Matrix4::from_angle_y(Deg(30.0))
            * Matrix4::from_nonuniform_scale(2.0, 0.5, 1.5);
        assert_eq!(draws.len(), 1);
        assert!(approx_eq(draws.calls()[0].model, expected));
    }

    #[test]
    fn test_parent_transform_is_inherited() {
        let floor = Floor::new(2, 2).unwrap();
        let mut root = SceneNode::with_floor(floor);
        root.link_geometry(cube(0));

        let mut child = SceneNode::new();
        child.link_geometry(cube(1));
        root.add_child(child, 0, 1).unwrap();

        let parent = Matrix4::from_translation(Vector3::new(0.0, 0.0, -10.0));
        let mut draws = DrawList::new();
        root.traverse(parent, &mut draws);

        assert_eq!(draws.len(), 2);
        assert_eq!(draws.calls()[0].mesh, MeshId(0));
        assert!(approx_eq(draws.calls()[0].model, parent));
        let expected = parent * Matrix4::from_translation(Vector3::new(-0.5, 0.0, 0.5));
        assert!(approx_eq(draws.calls()[1].model, expected));
    }

    #[test]
    fn test_nested_nodes_compose_parent_rotation() {
        let floor = Floor::new(3, 3).unwrap();
        let mut root = SceneNode::with_floor(floor);

        let mut middle = SceneNode::new();
        middle.set_rot_y(90.0);
        let mut leaf = SceneNode::new();
        leaf.link_geometry(cube(2));
        middle.add_child(leaf, 2, 1).unwrap_err();

        let mut middle = SceneNode::new();
        middle.set_floor_size(floor);
        middle.set_rot_y(90.0);
        let mut leaf = SceneNode::new();
        leaf.link_geometry(cube(2));
        middle.add_child(leaf, 2, 1).unwrap();
        root.add_child(middle, 0, 1).unwrap();

        assert_eq!(root.node_count(), 3);
        let middle = root.child(0, 1).unwrap();
        assert_eq!(middle.child(2, 1).unwrap().floor(), Some(floor));

        let mut draws = DrawList::new();
        root.traverse_from_identity(&mut draws);

        // middle sits at (-1, 0, 0) and turns +X into -Z
        let p = draws.calls()[0].model.w;
        assert!((p.x - -1.0).abs() < 1e-5);
        assert!((p.z - -1.0).abs() < 1e-5);
    }

    #[test]
    fn test_attached_child_inherits_floor() {
        let floor = Floor::new(4, 4).unwrap();
        let mut root = SceneNode::with_floor(floor);
        root.add_child(SceneNode::new(), 3, 3).unwrap();
        assert_eq!(root.child(3, 3).unwrap().floor(), Some(floor));
        assert_eq!(root.child(3, 3).unwrap().cell(), Some((3, 3)));
    }

    #[test]
    fn test_rotation_wraps_every_full_turn() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let theta = rng.random_range(-720i32..720) as f32;
            let mut a = SceneNode::new();
            a.set_rot_y(theta);
            let mut b = SceneNode::new();
            b.set_rot_y(theta + 360.0);
            assert_eq!(a.local_transform(), b.local_transform(), "theta = {}", theta);
        }
    }

    #[test]
    fn test_fractional_rotation_wraps_within_rounding() {
        let at = |theta: f32| {
            let mut node = SceneNode::new();
            node.set_rot_y(theta);
            node.local_transform()
        };

        assert_eq!(at(37.5), at(397.5));
        assert_eq!(at(-90.0), at(270.0));
        assert!(approx_eq(at(0.1), at(360.1)));

        let mut rng = rand::rng();
        for _ in 0..100 {
            let theta: f32 = rng.random_range(-720.0..720.0);
            assert!(approx_eq(at(theta), at(theta + 360.0)), "theta = {}", theta);
        }
    }

    #[test]
    fn test_occupied_cell_is_rejected_and_first_child_kept() {
        let mut root = SceneNode::with_floor(Floor::new(2, 2).unwrap());
        let mut first = SceneNode::new();
        first.link_geometry(cube(1));
        root.add_child(first, 1, 0).unwrap();

        let mut second = SceneNode::new();
        second.link_geometry(cube(2));
        let err = root.add_child(second, 1, 0).unwrap_err();

        assert!(matches!(err, SceneError::CellOccupied { x: 1, z: 0 }));
        assert_eq!(root.child_count(), 1);
        let kept = root.child(1, 0).unwrap().geometry().unwrap();
        let mut draws = DrawList::new();
        kept.draw(Matrix4::identity(), &mut draws);
        assert_eq!(draws.calls()[0].mesh, MeshId(1));
    }

    #[test]
    fn test_out_of_floor_child_is_rejected() {
        let mut root = SceneNode::with_floor(Floor::new(2, 2).unwrap());
        let err = root.add_child(SceneNode::new(), 2, 0).unwrap_err();
        assert!(matches!(
            err,
            SceneError::Grid(GridError::OutOfBounds { x: 2, z: 0, .. })
        ));
        assert_eq!(root.child_count(), 0);
    }

    #[test]
    fn test_children_traversed_in_cell_order() {
        let mut root = SceneNode::with_floor(Floor::new(3, 3).unwrap());
        for (i, (x, z)) in [(2, 0), (0, 2), (1, 1), (0, 0)].into_iter().enumerate() {
            let mut node = SceneNode::new();
            node.link_geometry(cube(i));
            root.add_child(node, x, z).unwrap();
        }

        let mut draws = DrawList::new();
        root.traverse_from_identity(&mut draws);
        let order: Vec<usize> = draws.iter().map(|d| d.mesh.0).collect();
        assert_eq!(order, vec![3, 1, 2, 0]);
    }
}
