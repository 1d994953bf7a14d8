//! Image loading utilities for texture data
//!
//! Decodes PNG and other image formats into tightly packed RGBA8 pixels.

use std::path::Path;

use crate::assets::{AssetError, AssetResult};
use crate::render::texture::TextureDimensions;

/// Bytes per RGBA8 pixel
const CHANNELS: u8 = 4;

/// Decoded image data ready for texture creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Raw RGBA pixel data, row-major, top row first
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of color channels (always 4 for RGBA)
    pub channels: u8,
}

impl ImageData {
    /// Load an image from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> AssetResult<Self> {
        let path_ref = path.as_ref();

        log::debug!("Loading image from: {:?}", path_ref);

        let img = image::open(path_ref)
            .map_err(|e| AssetError::LoadFailed(format!("{}: {e}", path_ref.display())))?;

        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        log::info!("Loaded image {}x{} from {:?}", width, height, path_ref);

        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
            channels: CHANNELS,
        })
    }

    /// Load image from memory (useful for embedded resources)
    pub fn from_bytes(bytes: &[u8]) -> AssetResult<Self> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| AssetError::LoadFailed(format!("Failed to load image from bytes: {e}")))?;

        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        log::debug!("Loaded image {}x{} from memory", width, height);

        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
            channels: CHANNELS,
        })
    }

    /// Wrap already decoded RGBA8 pixels
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> AssetResult<Self> {
        let expected = pixel_bytes(width, height);
        if data.len() != expected {
            return Err(AssetError::InvalidData(format!(
                "{width}x{height} RGBA image needs {expected} bytes, got {}",
                data.len()
            )));
        }

        Ok(Self {
            data,
            width,
            height,
            channels: CHANNELS,
        })
    }

    /// Create a solid color image (useful for testing and defaults)
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let data = color.repeat(pixel_bytes(width, height) / usize::from(CHANNELS));

        Self {
            data,
            width,
            height,
            channels: CHANNELS,
        }
    }

    /// RGBA value at a pixel, if inside the image
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * usize::from(CHANNELS);
        let px = self.data.get(offset..offset + usize::from(CHANNELS))?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Get the size of the image data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Encode to a file, format chosen by extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> AssetResult<()> {
        let path_ref = path.as_ref();
        image::save_buffer(
            path_ref,
            &self.data,
            self.width,
            self.height,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| {
            AssetError::LoadFailed(format!("Failed to save {}: {e}", path_ref.display()))
        })?;

        log::debug!("Saved image {}x{} to {:?}", self.width, self.height, path_ref);
        Ok(())
    }
}

impl TextureDimensions for ImageData {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

fn pixel_bytes(width: u32, height: u32) -> usize {
    width as usize * height as usize * usize::from(CHANNELS)
}
