//! Furniture shapes composed from unit cubes.
//!
//! Each piece is a list of cube parts whose offsets are baked in when the
//! piece is built. Placement space has its origin at the center of the
//! floor cell with `y = 0` on the floor surface; one cell is one unit wide.

use std::rc::Rc;

use cgmath::{Matrix4, Vector3};

use super::{Cube, Geometry, MeshId, MeshLibrary, PaletteColor};
use crate::gfx::scene::DrawList;

/// The furniture types a scene file can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FurnitureKind {
    Table,
    Chair,
    Box,
}

impl FurnitureKind {
    /// Maps a scene-file type tag to a kind. Tags are case-sensitive.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "table" => Some(FurnitureKind::Table),
            "chair" => Some(FurnitureKind::Chair),
            "box" => Some(FurnitureKind::Box),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            FurnitureKind::Table => "table",
            FurnitureKind::Chair => "chair",
            FurnitureKind::Box => "box",
        }
    }

    /// Cube parts as (center, size) pairs in placement space.
    fn parts(self) -> Vec<([f32; 3], [f32; 3])> {
        match self {
            FurnitureKind::Table => {
                let mut parts = vec![([0.0, 0.75, 0.0], [1.0, 0.1, 1.0])];
                parts.extend(legs(0.4, 0.7, 0.1));
                parts
            }
            FurnitureKind::Chair => {
                let mut parts = vec![([0.0, 0.45, 0.0], [0.6, 0.1, 0.6])];
                parts.extend(legs(0.25, 0.4, 0.08));
                parts.push(([0.0, 0.8, -0.27], [0.6, 0.6, 0.06]));
                parts
            }
            FurnitureKind::Box => vec![([0.0, 0.5, 0.0], [1.0, 1.0, 1.0])],
        }
    }

    fn color(self) -> PaletteColor {
        match self {
            FurnitureKind::Table => PaletteColor::Orange,
            FurnitureKind::Chair => PaletteColor::Blue,
            FurnitureKind::Box => PaletteColor::Red,
        }
    }
}

/// Four legs standing on the floor at `(±inset, ±inset)`.
fn legs(inset: f32, height: f32, thickness: f32) -> Vec<([f32; 3], [f32; 3])> {
    [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)]
        .iter()
        .map(|(sx, sz)| {
            (
                [sx * inset, height * 0.5, sz * inset],
                [thickness, height, thickness],
            )
        })
        .collect()
}

/// A piece of furniture: one shared cube drawn once per part.
#[derive(Debug, Clone)]
pub struct Furniture {
    kind: FurnitureKind,
    cube: Cube,
    parts: Vec<Matrix4<f32>>,
}

impl Furniture {
    pub fn new(kind: FurnitureKind, cube: Cube) -> Self {
        let parts = kind
            .parts()
            .into_iter()
            .map(|(center, size)| {
                Matrix4::from_translation(Vector3::from(center))
                    * Matrix4::from_nonuniform_scale(size[0], size[1], size[2])
            })
            .collect();

        Self { kind, cube, parts }
    }

    pub fn parts(&self) -> &[Matrix4<f32>] {
        &self.parts
    }
}

impl Geometry for Furniture {
    fn name(&self) -> &str {
        self.kind.tag()
    }

    fn draw(&self, model: Matrix4<f32>, draws: &mut DrawList) {
        for part in &self.parts {
            self.cube.draw(model * *part, draws);
        }
    }
}

/// The shared geometry instances every scene is built from.
///
/// One instance per furniture kind; scene nodes hold `Rc` clones of these.
#[derive(Clone)]
pub struct FurnitureKit {
    pub table: Rc<Furniture>,
    pub chair: Rc<Furniture>,
    pub storage_box: Rc<Furniture>,
    pub floor_tile: MeshId,
}

impl FurnitureKit {
    pub fn new(library: &MeshLibrary) -> Self {
        let build = |kind: FurnitureKind| {
            let color = kind.color();
            Rc::new(Furniture::new(
                kind,
                Cube::new(kind.tag(), library.cube(color)),
            ))
        };

        Self {
            table: build(FurnitureKind::Table),
            chair: build(FurnitureKind::Chair),
            storage_box: build(FurnitureKind::Box),
            floor_tile: library.cube(PaletteColor::Purple),
        }
    }

    pub fn get(&self, kind: FurnitureKind) -> Rc<Furniture> {
        match kind {
            FurnitureKind::Table => Rc::clone(&self.table),
            FurnitureKind::Chair => Rc::clone(&self.chair),
            FurnitureKind::Box => Rc::clone(&self.storage_box),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{SquareMatrix, Vector4};

    #[test]
    fn test_tags_round_trip() {
        for kind in [FurnitureKind::Table, FurnitureKind::Chair, FurnitureKind::Box] {
            assert_eq!(FurnitureKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(FurnitureKind::from_tag("lamp"), None);
        assert_eq!(FurnitureKind::from_tag("Table"), None);
    }

    #[test]
    fn test_part_counts() {
        let library = MeshLibrary::with_palette();
        let kit = FurnitureKit::new(&library);
        assert_eq!(kit.table.parts().len(), 5);
        assert_eq!(kit.chair.parts().len(), 6);
        assert_eq!(kit.storage_box.parts().len(), 1);
    }

    #[test]
    fn test_parts_rest_on_floor() {
        let library = MeshLibrary::with_palette();
        let kit = FurnitureKit::new(&library);

        for furniture in [&kit.table, &kit.chair, &kit.storage_box] {
            let lowest = furniture
                .parts()
                .iter()
                .map(|p| (*p * Vector4::new(0.0, -0.5, 0.0, 1.0)).y)
                .fold(f32::MAX, f32::min);
            assert!(lowest.abs() < 1e-6, "{} floats at {}", furniture.name(), lowest);
        }
    }

    #[test]
    fn test_furniture_draws_every_part_with_its_color() {
        let library = MeshLibrary::with_palette();
        let kit = FurnitureKit::new(&library);
        let mut draws = DrawList::new();

        kit.chair.draw(Matrix4::identity(), &mut draws);

        assert_eq!(draws.len(), kit.chair.parts().len());
        let blue = library.cube(PaletteColor::Blue);
        assert!(draws.iter().all(|d| d.mesh == blue));
        for (call, part) in draws.iter().zip(kit.chair.parts()) {
            assert_eq!(call.model, *part);
        }
    }

    #[test]
    fn test_kit_shares_instances() {
        let library = MeshLibrary::with_palette();
        let kit = FurnitureKit::new(&library);
        assert!(Rc::ptr_eq(&kit.get(FurnitureKind::Table), &kit.table));
        assert!(Rc::ptr_eq(&kit.get(FurnitureKind::Box), &kit.storage_box));
    }
}
