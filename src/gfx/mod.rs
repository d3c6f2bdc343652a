//! # Graphics Module
//!
//! Everything the viewer needs to turn a scene description into pixels.
//!
//! ## Architecture Overview
//!
//! - **Camera System** ([`camera`]) - orbiting view camera and perspective projection
//! - **Geometry** ([`geometry`]) - cube meshes and the furniture built from them
//! - **Light** ([`light`]) - the movable point light
//! - **Scene Management** ([`scene`]) - floor grid, scene graph and scene loader
//! - **Rendering Pipeline** ([`rendering`]) - Lambert pipeline and frame rendering
//! - **Resource Management** ([`resources`]) - uniform bindings and depth buffers
//!
//! Scene traversal only records draw calls; the [`RenderEngine`] replays them.
//! Everything above [`rendering`] and [`resources`] runs without a GPU.
//!
//! ```no_run
//! use furnish::gfx::{RenderEngine, rendering::PipelineConfig};
//!
//! // Created by the viewer once a window exists:
//! // let engine = RenderEngine::new(window, width, height, PipelineConfig::default(), wgpu::Color::WHITE).await?;
//! ```

pub mod camera;
pub mod geometry;
pub mod light;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::{Projection, ViewCamera};
pub use light::PointLight;
pub use rendering::render_engine::RenderEngine;
