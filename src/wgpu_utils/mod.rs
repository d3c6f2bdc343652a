// src/wgpu_utils/mod.rs
//! WGPU utility functions and helpers
//!
//! Small wrappers over typed uniform buffers and binding types.

pub mod binding_types;
pub mod uniform_buffer;

// Re-export main types
pub use uniform_buffer::{aligned_stride, DynamicUniformBuffer, UniformBuffer};
