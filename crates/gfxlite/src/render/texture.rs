//! Textures
//!
//! [`TextureDimensions`] is the only thing sprites need from a texture. The
//! [`Texture`] type in this module is a decoded, CPU-resident RGBA8 image that
//! satisfies it; GPU-backed textures can implement the trait as well.

use std::path::Path;

use crate::assets::{AssetResult, ImageData};
use crate::foundation::math::Rect;

/// Pixel dimensions of an image resource
pub trait TextureDimensions {
    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;

    /// Rectangle covering the whole texture
    ///
    /// Dimensions beyond `i32::MAX` saturate.
    fn bounds(&self) -> Rect {
        Rect::from_size(
            i32::try_from(self.width()).unwrap_or(i32::MAX),
            i32::try_from(self.height()).unwrap_or(i32::MAX),
        )
    }
}

impl<T: TextureDimensions + ?Sized> TextureDimensions for &T {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }
}

/// Decoded RGBA8 texture
///
/// Textures are move-only; share them with `Rc` when several meshes or sprites
/// need the same image.
#[derive(Debug)]
pub struct Texture {
    image: ImageData,
    name: Option<String>,
}

impl Texture {
    /// Wrap decoded image data
    pub fn from_image(image: ImageData) -> Self {
        log::trace!("Texture {}x{} created", image.width, image.height);
        Self { image, name: None }
    }

    /// Decode a texture from an image file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AssetResult<Self> {
        let path = path.as_ref();
        let image = ImageData::from_file(path)?;
        Ok(Self::from_image(image).with_name(path.display().to_string()))
    }

    /// Decode a texture from encoded bytes
    pub fn from_bytes(bytes: &[u8]) -> AssetResult<Self> {
        ImageData::from_bytes(bytes).map(Self::from_image)
    }

    /// Attach a debug name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Debug name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Raw RGBA8 pixels
    pub fn pixels(&self) -> &[u8] {
        &self.image.data
    }

    /// Underlying image data
    pub const fn image(&self) -> &ImageData {
        &self.image
    }
}

impl TextureDimensions for Texture {
    fn width(&self) -> u32 {
        self.image.width
    }

    fn height(&self) -> u32 {
        self.image.height
    }
}
