//! Sprite-sheet descriptors
//!
//! A sprite sheet names an atlas image and describes how a region of it is cut
//! into an `hframes x vframes` grid. Descriptors are plain data; validation
//! against the decoded texture happens in [`Sprite::from_sheet`].
//!
//! ```text
//! (
//!     texture: Some("hero.png"),
//!     region: Some((x: 0, y: 0, w: 64, h: 32)),
//!     hframes: 4,
//!     vframes: 2,
//! )
//! ```
//!
//! [`Sprite::from_sheet`]: crate::render::sprite::Sprite::from_sheet

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::foundation::math::Rect;

/// Serializable sprite layout over an atlas image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteSheet {
    /// Atlas image path, relative to the descriptor file
    pub texture: Option<PathBuf>,
    /// Sub-area of the atlas; the whole texture when absent
    pub region: Option<Rect>,
    /// Number of columns
    pub hframes: u32,
    /// Number of rows
    pub vframes: u32,
    /// Initial frame index
    pub frame: u32,
}

impl SpriteSheet {
    /// Descriptor covering the whole texture with the given grid
    pub const fn grid(hframes: u32, vframes: u32) -> Self {
        Self {
            texture: None,
            region: None,
            hframes,
            vframes,
            frame: 0,
        }
    }

    /// Restrict the sheet to a region of the atlas
    #[must_use]
    pub const fn with_region(mut self, region: Rect) -> Self {
        self.region = Some(region);
        self
    }

    /// Atlas path resolved against the directory holding the descriptor
    pub fn texture_path(&self, descriptor: &Path) -> Option<PathBuf> {
        let texture = self.texture.as_ref()?;
        Some(match descriptor.parent() {
            Some(dir) if texture.is_relative() => dir.join(texture),
            _ => texture.clone(),
        })
    }
}

impl Default for SpriteSheet {
    fn default() -> Self {
        Self::grid(1, 1)
    }
}

impl Config for SpriteSheet {}
