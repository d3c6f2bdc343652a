//! Error Types
//!
//! Every fallible operation in the viewer returns one of the enums below.
//! They are grouped by the stage that produces them and aggregated into
//! [`ViewerError`] for callers that do not care which stage failed.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced when mapping grid coordinates onto a floor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A floor needs at least one cell in each direction.
    #[error("floor dimensions must be at least 1x1 (got {width}x{depth})")]
    InvalidDimensions { width: i32, depth: i32 },

    /// Each side is capped at [`MAX_FLOOR_SIDE`](crate::gfx::scene::floor::MAX_FLOOR_SIDE)
    /// cells so every frame's draws fit one model buffer.
    #[error("floor dimensions {width}x{depth} exceed the {max}x{max} limit")]
    TooLarge { width: i32, depth: i32, max: i32 },

    /// The cell lies outside `[0, width) x [0, depth)`.
    #[error("grid cell ({x}, {z}) is outside the {width}x{depth} floor")]
    OutOfBounds {
        x: i32,
        z: i32,
        width: u32,
        depth: u32,
    },
}

/// Errors produced while building or loading a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    /// The scene file could not be read.
    #[error("failed to read scene file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line of the scene description could not be understood.
    #[error("scene line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Two children were placed on the same grid cell.
    #[error("grid cell ({x}, {z}) already holds a child node")]
    CellOccupied { x: i32, z: i32 },

    /// A child was placed on a node that has no floor to resolve cells against.
    #[error("node has no floor to place children on")]
    MissingFloor,

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Which half of the shader program failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Link,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
            ShaderStage::Link => write!(f, "link"),
        }
    }
}

/// Errors produced while building the shader program.
#[derive(Error, Debug)]
pub enum ShaderError {
    /// A shader source file could not be read.
    #[error("failed to read {stage} shader '{path}': {source}")]
    Source {
        stage: ShaderStage,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The shader toolchain rejected the program; `diagnostics` is its output.
    #[error("{stage} shader build failed:\n{diagnostics}")]
    Build {
        stage: ShaderStage,
        diagnostics: String,
    },
}

/// Errors produced by the GPU side of the viewer.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to create rendering surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("failed to request GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("failed to acquire frame: {0}")]
    Frame(#[from] wgpu::SurfaceError),

    /// The shader program is unusable until it is rebuilt.
    #[error("no usable shader program; rebuild shaders before painting")]
    NoProgram,

    /// The viewer has not been given a GPU context yet.
    #[error("viewer is not initialized")]
    NotInitialized,
}

/// Top-level error for the viewer.
#[derive(Error, Debug)]
pub enum ViewerError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Shader(#[from] ShaderError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
