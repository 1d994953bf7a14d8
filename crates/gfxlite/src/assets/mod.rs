//! Asset loading
//!
//! Image decoding and sprite-sheet descriptors.

pub mod image_loader;
pub mod sprite_sheet;

pub use image_loader::ImageData;
pub use sprite_sheet::SpriteSheet;

use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// File could not be read
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Decoding failed
    #[error("Asset load failed: {0}")]
    LoadFailed(String),

    /// Decoded data is unusable
    #[error("Invalid asset data: {0}")]
    InvalidData(String),
}

/// Result type for asset operations
pub type AssetResult<T> = Result<T, AssetError>;
