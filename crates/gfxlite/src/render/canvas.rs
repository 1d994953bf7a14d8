//! Software render target
//!
//! [`Canvas`] is an RGBA8 pixel buffer that implements [`RegionRenderer`], so
//! sprites can be drawn without a GPU: for previews, thumbnails and tests.
//! Blits use nearest-neighbour scaling and straight-alpha "over" blending.
//! Destination pixels outside the canvas are clipped silently.

use thiserror::Error;

use crate::assets::ImageData;
use crate::foundation::math::Rect;
use crate::render::sprite::RegionRenderer;
use crate::render::texture::{Texture, TextureDimensions};

/// Canvas blit errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    /// Source rectangle reaches outside the texture
    #[error("source region {region} is outside a {width}x{height} texture")]
    SourceOutOfBounds {
        /// Rejected source rectangle
        region: Rect,
        /// Texture width
        width: u32,
        /// Texture height
        height: u32,
    },

    /// Source pixel buffer does not match its stated size
    #[error("{width}x{height} RGBA source has {len} bytes, expected {expected}")]
    MalformedSource {
        /// Stated width
        width: u32,
        /// Stated height
        height: u32,
        /// Actual buffer length
        len: usize,
        /// Length implied by the size
        expected: usize,
    },
}

/// CPU-side RGBA8 render target
#[derive(Debug, Clone)]
pub struct Canvas {
    image: ImageData,
}

impl Canvas {
    /// Transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: ImageData::solid_color(width, height, [0; 4]),
        }
    }

    /// Fill every pixel with `color`
    pub fn clear(&mut self, color: [u8; 4]) {
        for px in self.image.data.chunks_exact_mut(4) {
            px.copy_from_slice(&color);
        }
    }

    /// Rendered pixels
    pub const fn image(&self) -> &ImageData {
        &self.image
    }

    /// Consume the canvas, keeping its pixels
    pub fn into_image(self) -> ImageData {
        self.image
    }

    /// Copy `src` of `source` into `dst`, scaling to fit
    pub fn blit(&mut self, source: &ImageData, src: Rect, dst: Rect) -> Result<(), CanvasError> {
        let expected = source.width as usize * source.height as usize * 4;
        if source.data.len() != expected {
            return Err(CanvasError::MalformedSource {
                width: source.width,
                height: source.height,
                len: source.data.len(),
                expected,
            });
        }
        if !source.bounds().contains(&src) {
            return Err(CanvasError::SourceOutOfBounds {
                region: src,
                width: source.width,
                height: source.height,
            });
        }
        if !src.is_positive() || !dst.is_positive() {
            return Ok(());
        }

        let (canvas_w, canvas_h) = (i64::from(self.image.width), i64::from(self.image.height));
        let x_range = i64::from(dst.x).max(0)..dst.right().min(canvas_w);
        let y_range = i64::from(dst.y).max(0)..dst.bottom().min(canvas_h);
        let (src_w, src_h) = (i64::from(src.w), i64::from(src.h));
        let (dst_w, dst_h) = (i64::from(dst.w), i64::from(dst.h));

        for ty in y_range {
            let sy = i64::from(src.y) + (ty - i64::from(dst.y)) * src_h / dst_h;
            for tx in x_range.clone() {
                let sx = i64::from(src.x) + (tx - i64::from(dst.x)) * src_w / dst_w;
                let from = offset(sx, sy, i64::from(source.width));
                let to = offset(tx, ty, canvas_w);
                let mut color = [0; 4];
                color.copy_from_slice(&source.data[from..from + 4]);
                blend_over(&mut self.image.data[to..to + 4], color);
            }
        }
        Ok(())
    }
}

impl RegionRenderer<ImageData> for Canvas {
    type Error = CanvasError;

    fn draw_region(
        &mut self,
        texture: &ImageData,
        src: Rect,
        dst: Rect,
    ) -> Result<(), CanvasError> {
        self.blit(texture, src, dst)
    }
}

impl RegionRenderer<Texture> for Canvas {
    type Error = CanvasError;

    fn draw_region(&mut self, texture: &Texture, src: Rect, dst: Rect) -> Result<(), CanvasError> {
        self.blit(texture.image(), src, dst)
    }
}

impl TextureDimensions for Canvas {
    fn width(&self) -> u32 {
        self.image.width
    }

    fn height(&self) -> u32 {
        self.image.height
    }
}

// Coordinates are clipped to the buffer before this is called.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const fn offset(x: i64, y: i64, width: i64) -> usize {
    ((y * width + x) * 4) as usize
}

fn blend_over(dst: &mut [u8], src: [u8; 4]) {
    match src[3] {
        0 => {}
        255 => dst.copy_from_slice(&src),
        alpha => {
            let a = u16::from(alpha);
            for (d, s) in dst.iter_mut().take(3).zip(src) {
                let mixed = (u16::from(s) * a + u16::from(*d) * (255 - a)) / 255;
                *d = u8::try_from(mixed).unwrap_or(u8::MAX);
            }
            let out_alpha = a + u16::from(dst[3]) * (255 - a) / 255;
            dst[3] = u8::try_from(out_alpha).unwrap_or(u8::MAX);
        }
    }
}
