//! # gfxlite
//!
//! A small convenience layer over GLFW + OpenGL windows, decoded textures,
//! fonts, meshes and shader sources, with sprite-atlas frame addressing.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gfxlite::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GraphicsConfig::default();
//!     let graphics = Graphics::acquire(&config)?;
//!     let mut window = Window::new(&graphics, &config.window)?;
//!
//!     let atlas = Texture::from_file("assets/explosion.png")?;
//!     let mut sprite = Sprite::new(&atlas);
//!     sprite.set_grid(8, 4)?;
//!
//!     while !window.should_close() {
//!         graphics.wait_events(config.event_timeout());
//!         window.drain_events();
//!         let next = (u64::from(sprite.frame()) + 1) % sprite.frame_count();
//!         sprite.set_frame(u32::try_from(next)?)?;
//!         window.swap_buffers();
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod assets;
pub mod config;
pub mod core;
pub mod foundation;
pub mod render;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        assets::{AssetError, ImageData, SpriteSheet},
        core::config::{Config, ConfigError, GraphicsConfig, LoggingConfig, WindowConfig},
        foundation::math::{Point3, Rect},
        render::{
            Canvas, Font, Graphics, Mesh, RegionRenderer, ShaderSources, Sprite, SpriteError,
            Texture, TextureDimensions, Vertex, Window,
        },
    };
}
