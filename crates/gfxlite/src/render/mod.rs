//! # Rendering
//!
//! Thin wrappers over GLFW, `image` and `fontdue`, plus sprite atlas
//! addressing.
//!
//! - **Graphics / Window**: subsystem lifetime and OpenGL windows
//! - **Texture / Sprite**: decoded images and atlas frame selection
//! - **Canvas**: software target for drawing sprite frames
//! - **Font / Mesh / Shader**: text rasterization, geometry and shader sources

pub mod canvas;
pub mod font;
pub mod graphics;
pub mod mesh;
pub mod shader;
pub mod sprite;
pub mod texture;
pub mod window;

pub use canvas::{Canvas, CanvasError};
pub use font::{Font, FontError, FontResult};
pub use graphics::{Graphics, GraphicsError, GraphicsResult};
pub use mesh::{Mesh, MeshError, MeshResult, Topology, Vertex};
pub use shader::{ShaderError, ShaderResult, ShaderSources, ShaderStage};
pub use sprite::{GridAxis, RegionRenderer, Sprite, SpriteError, SpriteResult};
pub use texture::{Texture, TextureDimensions};
pub use window::{Window, WindowError, WindowHints, WindowResult};
