//! Scene description parser.
//!
//! The format is line oriented, whitespace separated:
//!
//! ```text
//! <floorWidth> <floorDepth> <itemCount>
//! <type> <gridX> <gridZ> <rotationDeg> <scaleX> <scaleY> <scaleZ>
//! ...
//! ```
//!
//! Blank lines are ignored. Unknown item types are skipped with a warning
//! and reported through [`Scene::skipped`]. Every other deviation is a
//! [`SceneError::Parse`] naming the 1-based line it occurred on.

use std::path::Path;
use std::rc::Rc;
use std::str::FromStr;

use super::{Floor, FloorTiles, Scene, SceneNode, SkippedItem};
use crate::error::SceneError;
use crate::gfx::geometry::{FurnitureKind, FurnitureKit};

const HEADER_FIELDS: usize = 3;
const ITEM_FIELDS: usize = 7;

/// Reads and parses a scene file.
pub fn load_scene_file(path: impl AsRef<Path>, kit: &FurnitureKit) -> Result<Scene, SceneError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let scene = parse_scene(&source, kit)?;
    log::info!(
        "loaded scene '{}': {}x{} floor, {} items, {} skipped",
        path.display(),
        scene.floor().width(),
        scene.floor().depth(),
        scene.item_count(),
        scene.skipped().len()
    );
    Ok(scene)
}

/// Parses a scene description, building nodes from the shared `kit`.
pub fn parse_scene(source: &str, kit: &FurnitureKit) -> Result<Scene, SceneError> {
    let mut lines = source
        .lines()
        .enumerate()
        .map(|(i, text)| (i + 1, text))
        .filter(|(_, text)| !text.trim().is_empty());

    let (header_line, header) = lines.next().ok_or_else(|| SceneError::Parse {
        line: 1,
        message: "missing header '<width> <depth> <itemCount>'".to_string(),
    })?;

    let tokens = tokenize(header, HEADER_FIELDS, header_line)?;
    let width: i32 = field(&tokens, 0, "floor width", header_line)?;
    let depth: i32 = field(&tokens, 1, "floor depth", header_line)?;
    let item_count: usize = field(&tokens, 2, "item count", header_line)?;

    let floor = Floor::new(width, depth).map_err(|e| parse_error(header_line, e))?;
    let mut root = SceneNode::with_floor(floor);
    root.link_geometry(Rc::new(FloorTiles::new(floor, kit.floor_tile)));

    let mut skipped = Vec::new();
    let mut last_line = header_line;

    for read in 0..item_count {
        let (line, text) = lines.next().ok_or_else(|| SceneError::Parse {
            line: last_line,
            message: format!("expected {} item lines, found {}", item_count, read),
        })?;
        last_line = line;

        let tokens = tokenize(text, ITEM_FIELDS, line)?;
        let tag = tokens[0];
        let x: i32 = field(&tokens, 1, "grid x", line)?;
        let z: i32 = field(&tokens, 2, "grid z", line)?;
        let rotation: i32 = field(&tokens, 3, "rotation", line)?;
        let scale_x: f32 = scale_field(&tokens, 4, "scale x", line)?;
        let scale_y: f32 = scale_field(&tokens, 5, "scale y", line)?;
        let scale_z: f32 = scale_field(&tokens, 6, "scale z", line)?;

        let Some(kind) = FurnitureKind::from_tag(tag) else {
            log::warn!("scene line {}: skipping unknown item type '{}'", line, tag);
            skipped.push(SkippedItem {
                line,
                tag: tag.to_string(),
            });
            continue;
        };

        let mut node = SceneNode::new();
        node.link_geometry(kit.get(kind));
        node.set_floor_size(floor);
        node.set_rot_y(rotation as f32);
        node.set_scale_x(scale_x);
        node.set_scale_y(scale_y);
        node.set_scale_z(scale_z);

        root.add_child(node, x, z)
            .map_err(|e| parse_error(line, e))?;
    }

    if let Some((line, _)) = lines.next() {
        return Err(SceneError::Parse {
            line,
            message: format!("unexpected content after {} item lines", item_count),
        });
    }

    Ok(Scene::new(floor, root, skipped))
}

fn tokenize(text: &str, expected: usize, line: usize) -> Result<Vec<&str>, SceneError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != expected {
        return Err(SceneError::Parse {
            line,
            message: format!("expected {} fields, found {}", expected, tokens.len()),
        });
    }
    Ok(tokens)
}

fn field<T: FromStr>(tokens: &[&str], index: usize, name: &str, line: usize) -> Result<T, SceneError> {
    tokens[index].parse().map_err(|_| SceneError::Parse {
        line,
        message: format!("invalid {} '{}'", name, tokens[index]),
    })
}

fn scale_field(tokens: &[&str], index: usize, name: &str, line: usize) -> Result<f32, SceneError> {
    let value: f32 = field(tokens, index, name, line)?;
    if !value.is_finite() {
        return Err(SceneError::Parse {
            line,
            message: format!("{} must be finite, got '{}'", name, tokens[index]),
        });
    }
    Ok(value)
}

fn parse_error(line: usize, err: impl std::fmt::Display) -> SceneError {
    SceneError::Parse {
        line,
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::{Geometry, MeshLibrary};
    use crate::gfx::scene::DrawList;
    use cgmath::{Matrix4, SquareMatrix};

    fn kit() -> FurnitureKit {
        FurnitureKit::new(&MeshLibrary::with_palette())
    }

    fn parse_line_of(err: SceneError) -> usize {
        match err {
            SceneError::Parse { line, .. } => line,
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_single_table() {
        let kit = kit();
        let scene = parse_scene("3 3 1\ntable 1 1 0 1.0 1.0 1.0", &kit).unwrap();

        assert_eq!(scene.floor(), Floor::new(3, 3).unwrap());
        assert_eq!(scene.item_count(), 1);
        assert!(scene.skipped().is_empty());

        let table = scene.root().child(1, 1).unwrap();
        let linked = table.geometry().unwrap();
        let expected: Rc<dyn Geometry> = kit.table.clone();
        assert!(Rc::ptr_eq(linked, &expected));
        assert_eq!(table.rot_y(), 0.0);
        assert_eq!(table.scale(), cgmath::Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(table.child_count(), 0);
    }

    #[test]
    fn test_zero_items_leaves_only_the_floor() {
        let kit = kit();
        let scene = parse_scene("4 2 0\n", &kit).unwrap();

        assert_eq!(scene.item_count(), 0);
        assert_eq!(scene.root().node_count(), 1);
        assert_eq!(scene.root().geometry().unwrap().name(), "floor");

        let mut draws = DrawList::new();
        scene.traverse(Matrix4::identity(), &mut draws);
        assert_eq!(draws.len(), 8);
        assert!(draws.iter().all(|d| d.mesh == kit.floor_tile));
    }

    #[test]
    fn test_unknown_type_is_skipped() {
        let kit = kit();
        let scene = parse_scene("2 2 2\nlamp 0 0 0 1 1 1\nbox 0 0 0 1 1 1\n", &kit).unwrap();

        assert_eq!(scene.item_count(), 1);
        assert_eq!(
            scene.skipped(),
            &[SkippedItem {
                line: 2,
                tag: "lamp".to_string()
            }]
        );
        assert_eq!(scene.root().child(0, 0).unwrap().geometry().unwrap().name(), "box");
    }

    #[test]
    fn test_item_fields_are_applied() {
        let kit = kit();
        let scene = parse_scene("5 5 2\nchair 4 0 450 0.5 2 1.25\nbox 0 4 -90 1 1 1", &kit).unwrap();

        let chair = scene.root().child(4, 0).unwrap();
        assert_eq!(chair.rot_y(), 450.0);
        assert_eq!(chair.scale(), cgmath::Vector3::new(0.5, 2.0, 1.25));
        assert_eq!(chair.geometry().unwrap().name(), "chair");
        assert_eq!(scene.root().child(0, 4).unwrap().rot_y(), -90.0);
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let kit = kit();
        let scene = parse_scene("\n3 3 1\n\n  \ntable 2 2 0 1 1 1\n\n", &kit).unwrap();
        assert_eq!(scene.item_count(), 1);
    }

    #[test]
    fn test_malformed_header() {
        let kit = kit();
        assert_eq!(parse_line_of(parse_scene("", &kit).unwrap_err()), 1);
        assert_eq!(parse_line_of(parse_scene("3 3", &kit).unwrap_err()), 1);
        assert_eq!(parse_line_of(parse_scene("3 x 0", &kit).unwrap_err()), 1);
        assert_eq!(parse_line_of(parse_scene("3 3 -1", &kit).unwrap_err()), 1);
        assert_eq!(parse_line_of(parse_scene("\n\n0 3 0", &kit).unwrap_err()), 3);
    }

    #[test]
    fn test_oversized_floor_is_rejected_on_header() {
        let kit = kit();
        assert_eq!(parse_line_of(parse_scene("1100 1100 0", &kit).unwrap_err()), 1);
        assert_eq!(
            parse_line_of(parse_scene("2147483647 2147483647 0", &kit).unwrap_err()),
            1
        );
        assert!(parse_scene("256 256 0", &kit).is_ok());
    }

    #[test]
    fn test_malformed_item_names_its_line() {
        let kit = kit();
        let cases = [
            ("3 3 2\nbox 0 0 0 1 1 1\nbox 1 1 zero 1 1 1", 3),
            ("3 3 1\ntable 1 1 0 1.0 1.0", 2),
            ("3 3 1\ntable 1 1 0 1 1 1 1", 2),
            ("3 3 1\ntable 1 1 0 1 NaN 1", 2),
            ("3 3 1\ntable 1 1 0.5 1 1 1", 2),
            ("3 3 1\n\n\nchair 3 0 0 1 1 1", 4),
        ];
        for (source, line) in cases {
            assert_eq!(parse_line_of(parse_scene(source, &kit).unwrap_err()), line, "{}", source);
        }
    }

    #[test]
    fn test_missing_and_extra_item_lines() {
        let kit = kit();
        assert_eq!(parse_line_of(parse_scene("3 3 3\nbox 0 0 0 1 1 1", &kit).unwrap_err()), 2);
        assert_eq!(
            parse_line_of(parse_scene("3 3 1\nbox 0 0 0 1 1 1\nbox 1 1 0 1 1 1", &kit).unwrap_err()),
            3
        );
    }

    #[test]
    fn test_duplicate_cell_is_a_parse_error() {
        let kit = kit();
        let err = parse_scene("3 3 2\nbox 1 1 0 1 1 1\nchair 1 1 0 1 1 1", &kit).unwrap_err();
        match err {
            SceneError::Parse { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("(1, 1)"), "{}", message);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_unreadable_file_is_recoverable() {
        let kit = kit();
        let err = load_scene_file("definitely/not/a/scene.txt", &kit).unwrap_err();
        assert!(matches!(err, SceneError::Io { .. }));
    }

    #[test]
    fn test_bundled_scene_loads() {
        let kit = kit();
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/testSceneHW1.txt");
        let scene = load_scene_file(path, &kit).unwrap();
        assert!(scene.item_count() > 0);
    }
}
