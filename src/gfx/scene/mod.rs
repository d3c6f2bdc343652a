//! # Scene Management Module
//!
//! The floor grid, the scene graph built on top of it, and the text loader
//! that produces both.
//!
//! ## Key Components
//!
//! - [`Floor`] - grid dimensions and grid-to-world mapping
//! - [`SceneNode`] - transform node with shared geometry and per-cell children
//! - [`Scene`] - a loaded floor plus its graph
//! - [`parse_scene`] / [`load_scene_file`] - the scene description reader
//! - [`DrawList`] - draws recorded by traversal, replayed by the renderer
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::{Matrix4, SquareMatrix};
//! use furnish::gfx::geometry::{FurnitureKit, MeshLibrary};
//! use furnish::gfx::scene::{parse_scene, DrawList};
//!
//! let library = MeshLibrary::with_palette();
//! let kit = FurnitureKit::new(&library);
//! let scene = parse_scene("3 3 1\nbox 1 1 0 1 1 1", &kit).unwrap();
//!
//! let mut draws = DrawList::new();
//! scene.traverse(Matrix4::identity(), &mut draws);
//! assert_eq!(draws.len(), 9 + 1); // floor tiles + the box
//! ```

pub mod draw_list;
pub mod floor;
pub mod loader;
pub mod node;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use draw_list::{DrawCall, DrawList};
pub use floor::{Floor, FloorTiles};
pub use loader::{load_scene_file, parse_scene};
pub use node::SceneNode;
pub use scene::{Scene, SkippedItem};
pub use vertex::Vertex3D;
