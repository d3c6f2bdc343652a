//! # Primitive Shape Generation
//!
//! The viewer only needs one primitive: the unit cube every piece of
//! furniture and every floor tile is built from.

use super::GeometryData;

/// Corner positions of each face, counter-clockwise seen from outside.
const FACES: [([f32; 3], [[f32; 3]; 4]); 6] = [
    // Front (+Z)
    (
        [0.0, 0.0, 1.0],
        [[-0.5, -0.5, 0.5], [0.5, -0.5, 0.5], [0.5, 0.5, 0.5], [-0.5, 0.5, 0.5]],
    ),
    // Back (-Z)
    (
        [0.0, 0.0, -1.0],
        [[0.5, -0.5, -0.5], [-0.5, -0.5, -0.5], [-0.5, 0.5, -0.5], [0.5, 0.5, -0.5]],
    ),
    // Left (-X)
    (
        [-1.0, 0.0, 0.0],
        [[-0.5, -0.5, -0.5], [-0.5, -0.5, 0.5], [-0.5, 0.5, 0.5], [-0.5, 0.5, -0.5]],
    ),
    // Right (+X)
    (
        [1.0, 0.0, 0.0],
        [[0.5, -0.5, 0.5], [0.5, -0.5, -0.5], [0.5, 0.5, -0.5], [0.5, 0.5, 0.5]],
    ),
    // Top (+Y)
    (
        [0.0, 1.0, 0.0],
        [[-0.5, 0.5, 0.5], [0.5, 0.5, 0.5], [0.5, 0.5, -0.5], [-0.5, 0.5, -0.5]],
    ),
    // Bottom (-Y)
    (
        [0.0, -1.0, 0.0],
        [[-0.5, -0.5, -0.5], [0.5, -0.5, -0.5], [0.5, -0.5, 0.5], [-0.5, -0.5, 0.5]],
    ),
];

/// Generate a unit cube centered at the origin
///
/// Returns 36 unindexed vertices (two triangles per face) spanning -0.5 to
/// 0.5 on every axis, with outward face normals.
pub fn generate_cube() -> GeometryData {
    let mut data = GeometryData::new();

    for (normal, corners) in FACES.iter() {
        for &i in &[0usize, 1, 2, 2, 3, 0] {
            data.vertices.push(corners[i]);
            data.normals.push(*normal);
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    #[test]
    fn test_cube_generation() {
        let cube = generate_cube();
        assert_eq!(cube.vertices.len(), 36);
        assert_eq!(cube.normals.len(), 36);
        assert_eq!(cube.vertex_count(), 36);
        assert_eq!(cube.triangle_count(), 12);
    }

    #[test]
    fn test_cube_spans_unit_extent() {
        let cube = generate_cube();
        for v in &cube.vertices {
            for c in v {
                assert_eq!(c.abs(), 0.5);
            }
        }
    }

    #[test]
    fn test_cube_winding_matches_normals() {
        let cube = generate_cube();
        for (tri, normals) in cube.vertices.chunks(3).zip(cube.normals.chunks(3)) {
            let face = cross(sub(tri[1], tri[0]), sub(tri[2], tri[0]));
            let n = normals[0];
            let dot = face[0] * n[0] + face[1] * n[1] + face[2] * n[2];
            assert!(dot > 0.0, "triangle {:?} winds against its normal {:?}", tri, n);
        }
    }
}
