//! Fonts and rendered text
//!
//! Fonts are rasterized with `fontdue`. [`Font::render`] lays a string out on a
//! single line and returns it as a [`Texture`]; rendered strings are cached, so
//! drawing the same label every frame rasterizes it once.

use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::assets::ImageData;
use crate::render::texture::Texture;

/// Pixel size used when none is given
pub const DEFAULT_FONT_SIZE: f32 = 72.0;

/// Text color used when none is given
pub const DEFAULT_TEXT_COLOR: [u8; 3] = [0xFF, 0xFF, 0xFF];

/// Result type for font operations
pub type FontResult<T> = Result<T, FontError>;

/// Errors that can occur during font operations
#[derive(Debug, Error)]
pub enum FontError {
    /// Failed to read the font file
    #[error("Failed to read font file: {0}")]
    Io(#[from] std::io::Error),

    /// Font data could not be parsed
    #[error("Failed to load font: {0}")]
    LoadError(String),

    /// Pixel size is not a positive finite number
    #[error("Invalid font size: {0}")]
    InvalidSize(f32),

    /// Nothing to render
    #[error("Cannot render empty text")]
    EmptyText,

    /// Font has no horizontal metrics to lay out a line
    #[error("Font has no horizontal line metrics")]
    MissingLineMetrics,
}

/// TrueType/OpenType font with a rendered-text cache
pub struct Font {
    font: fontdue::Font,
    size: f32,
    color: [u8; 3],
    cache: HashMap<String, Texture>,
}

impl Font {
    /// Load a font from TrueType/OpenType bytes
    pub fn from_bytes(data: &[u8], size: f32) -> FontResult<Self> {
        check_size(size)?;
        let font = fontdue::Font::from_bytes(data, fontdue::FontSettings::default())
            .map_err(|e| FontError::LoadError(e.to_string()))?;

        log::info!("Loaded font at {}px size", size);

        Ok(Self {
            font,
            size,
            color: DEFAULT_TEXT_COLOR,
            cache: HashMap::new(),
        })
    }

    /// Load a font file
    pub fn from_file<P: AsRef<Path>>(path: P, size: f32) -> FontResult<Self> {
        let path = path.as_ref();
        log::debug!("Loading font from: {:?}", path);
        let data = std::fs::read(path)?;
        Self::from_bytes(&data, size)
    }

    /// Use another text color
    #[must_use]
    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.set_color(color);
        self
    }

    /// Change the text color, dropping cached renders
    pub fn set_color(&mut self, color: [u8; 3]) {
        if color != self.color {
            self.color = color;
            self.clear_cache();
        }
    }

    /// Change the pixel size, dropping cached renders
    pub fn set_size(&mut self, size: f32) -> FontResult<()> {
        check_size(size)?;
        if size.to_bits() != self.size.to_bits() {
            self.size = size;
            self.clear_cache();
        }
        Ok(())
    }

    /// Pixel size
    pub const fn size(&self) -> f32 {
        self.size
    }

    /// Render `text` on one line, reusing a cached texture when available
    pub fn render(&mut self, text: &str) -> FontResult<&Texture> {
        if text.is_empty() {
            return Err(FontError::EmptyText);
        }
        if !self.cache.contains_key(text) {
            let image = self.rasterize(text)?;
            log::debug!("Rendered '{}' to {}x{} texture", text, image.width, image.height);
            self.cache
                .insert(text.to_string(), Texture::from_image(image).with_name(text));
        }
        Ok(&self.cache[text])
    }

    /// Number of cached renders
    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    /// Drop every cached render
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    fn rasterize(&self, text: &str) -> FontResult<ImageData> {
        let line = self
            .font
            .horizontal_line_metrics(self.size)
            .ok_or(FontError::MissingLineMetrics)?;

        let mut pen = 0.0_f32;
        let mut glyphs = Vec::with_capacity(text.len());
        for ch in text.chars() {
            let (metrics, coverage) = self.font.rasterize(ch, self.size);
            glyphs.push(PlacedGlyph {
                x: round_px(pen + metrics.xmin as f32),
                ymin: metrics.ymin,
                width: metrics.width,
                height: metrics.height,
                coverage,
            });
            pen += metrics.advance_width;
        }

        Ok(compose_line(
            &glyphs,
            LineBox {
                width: ceil_px(pen),
                ascent: ceil_px(line.ascent),
                descent: ceil_px(-line.descent),
            },
            self.color,
        ))
    }
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("size", &self.size)
            .field("color", &self.color)
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

/// Rasterized glyph positioned on the pen line
struct PlacedGlyph {
    /// Left edge in pixels from the start of the line
    x: i64,
    /// Bottom of the bitmap relative to the baseline (positive is up)
    ymin: i32,
    width: usize,
    height: usize,
    /// Row-major coverage, top row first
    coverage: Vec<u8>,
}

/// Pixel extent of a laid-out line
struct LineBox {
    width: u32,
    ascent: u32,
    descent: u32,
}

/// Paint glyph coverage into an RGBA image, coverage becoming alpha
fn compose_line(glyphs: &[PlacedGlyph], line: LineBox, color: [u8; 3]) -> ImageData {
    let width = line.width.max(1);
    let height = (line.ascent + line.descent).max(1);
    let mut image = ImageData::solid_color(width, height, [color[0], color[1], color[2], 0]);
    let baseline = i64::from(line.ascent);

    for glyph in glyphs {
        let top = baseline - i64::from(glyph.ymin) - glyph.height as i64;
        for (row, coverage_row) in glyph.coverage.chunks(glyph.width.max(1)).enumerate() {
            let y = top + row as i64;
            if y < 0 || y >= i64::from(height) {
                continue;
            }
            for (col, &coverage) in coverage_row.iter().enumerate() {
                let x = glyph.x + col as i64;
                if x < 0 || x >= i64::from(width) {
                    continue;
                }
                #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
                let alpha = ((y * i64::from(width) + x) * 4 + 3) as usize;
                image.data[alpha] = image.data[alpha].max(coverage);
            }
        }
    }
    image
}

fn check_size(size: f32) -> FontResult<()> {
    if size.is_finite() && size > 0.0 {
        Ok(())
    } else {
        Err(FontError::InvalidSize(size))
    }
}

#[allow(clippy::cast_possible_truncation)]
fn round_px(value: f32) -> i64 {
    value.round() as i64
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn ceil_px(value: f32) -> u32 {
    value.ceil().max(0.0) as u32
}
