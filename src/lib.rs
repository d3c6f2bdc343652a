// src/lib.rs
//! Furnish
//!
//! A furniture scene viewer built on wgpu and winit: a grid floor with
//! tables, chairs and boxes placed from a text description, Lambert shaded
//! under a movable point light and seen through an orbiting camera.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod viewer;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::ViewerApp;
pub use config::ViewerConfig;
pub use error::{Result, ViewerError};
pub use viewer::SceneViewer;

/// Creates a viewer application with the default configuration
pub fn default() -> Result<ViewerApp> {
    ViewerApp::new(ViewerConfig::default())
}
