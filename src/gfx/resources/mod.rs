// src/gfx/resources/mod.rs
//! GPU resource management
//!
//! Depth buffers and the bind groups shared by every draw.

pub mod global_bindings;
pub mod texture_resource;

// Re-export main types
pub use global_bindings::{GlobalBindings, GlobalUBO, GlobalsContent, ModelBindings, ModelUBO};
pub use texture_resource::TextureResource;
