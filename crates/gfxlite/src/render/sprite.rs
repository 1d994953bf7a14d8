//! Sprites: drawable regions of a texture atlas
//!
//! A [`Sprite`] borrows a texture and describes which part of it to draw: a
//! `region` of the texture, cut into an `hframes x vframes` grid of equally
//! sized frames, and the index of the current `frame`. Frames are numbered in
//! row-major order, so frame 0 is the top-left cell and indices run left to
//! right before wrapping to the next row.
//!
//! Every setter validates its argument before storing it and leaves the sprite
//! untouched on failure. The invariants that hold between calls are:
//!
//! - `region` has positive size and lies inside the texture bounds
//! - `hframes > 0` and `vframes > 0`
//! - `frame < hframes * vframes`
//!
//! Grid changes re-check the stored frame, so shrinking the grid below the
//! current frame is rejected instead of leaving a dangling index behind.
//!
//! # Frame size truncation
//!
//! Frame width and height use integer division (`region.w / hframes`,
//! `region.h / vframes`). When the region does not divide evenly, the
//! trailing columns and rows of the region are never covered by any frame.
//! Existing atlases are laid out against this behaviour, so it is kept.
//!
//! ```
//! use gfxlite::assets::ImageData;
//! use gfxlite::foundation::math::Rect;
//! use gfxlite::render::sprite::Sprite;
//!
//! let atlas = ImageData::solid_color(64, 32, [255; 4]);
//! let mut sprite = Sprite::new(&atlas);
//! sprite.set_grid(4, 2)?;
//! sprite.set_frame(7)?;
//! assert_eq!(sprite.source_rect(), Rect::new(48, 16, 16, 16));
//! # Ok::<(), gfxlite::render::sprite::SpriteError>(())
//! ```

use std::fmt;
use thiserror::Error;

use crate::assets::SpriteSheet;
use crate::foundation::math::Rect;
use crate::render::texture::{Texture, TextureDimensions};

/// Grid axis named in [`SpriteError::InvalidGrid`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridAxis {
    /// Columns (`hframes`)
    Horizontal,
    /// Rows (`vframes`)
    Vertical,
}

impl fmt::Display for GridAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Horizontal => "hframes",
            Self::Vertical => "vframes",
        })
    }
}

/// Sprite contract violations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpriteError {
    /// Region is empty or not fully inside the texture
    #[error("region {region} does not fit inside a {texture_width}x{texture_height} texture")]
    InvalidRegion {
        /// Rejected region
        region: Rect,
        /// Texture width at the time of the call
        texture_width: u32,
        /// Texture height at the time of the call
        texture_height: u32,
    },

    /// Grid dimension of zero
    #[error("{axis} must be greater than zero, got {value}")]
    InvalidGrid {
        /// Offending axis
        axis: GridAxis,
        /// Rejected value
        value: u32,
    },

    /// Frame index not below `hframes * vframes`
    #[error("frame {frame} is out of range for a grid of {frame_count} frames")]
    FrameOutOfRange {
        /// Offending frame index
        frame: u32,
        /// Number of frames in the grid it was checked against
        frame_count: u64,
    },

    /// The external renderer failed to draw
    #[error("sprite draw failed: {0}")]
    Draw(String),
}

/// Result type for sprite operations
pub type SpriteResult<T> = Result<T, SpriteError>;

/// Renderer that can copy a region of a texture into a destination rectangle
pub trait RegionRenderer<T: ?Sized> {
    /// Error reported by the renderer
    type Error: fmt::Display;

    /// Copy `src` of `texture` into `dst`
    fn draw_region(&mut self, texture: &T, src: Rect, dst: Rect) -> Result<(), Self::Error>;
}

/// Drawable region of a borrowed texture, cut into a grid of frames
///
/// The texture is borrowed for `'t`, so a sprite can never outlive it. Sprites
/// own nothing and are `Copy`.
pub struct Sprite<'t, T: TextureDimensions + ?Sized = Texture> {
    texture: &'t T,
    region: Rect,
    hframes: u32,
    vframes: u32,
    frame: u32,
}

impl<'t, T: TextureDimensions + ?Sized> Sprite<'t, T> {
    /// Sprite over the whole texture with a single frame
    ///
    /// A 0x0 texture yields an empty region; use [`Sprite::with_region`] to
    /// have that rejected.
    pub fn new(texture: &'t T) -> Self {
        Self {
            texture,
            region: texture.bounds(),
            hframes: 1,
            vframes: 1,
            frame: 0,
        }
    }

    /// Sprite over an explicit region of the texture
    pub fn with_region(texture: &'t T, region: Rect) -> SpriteResult<Self> {
        let mut sprite = Self::new(texture);
        sprite.set_region(region)?;
        Ok(sprite)
    }

    /// Sprite laid out by a sprite-sheet descriptor
    pub fn from_sheet(texture: &'t T, sheet: &SpriteSheet) -> SpriteResult<Self> {
        let mut sprite = match sheet.region {
            Some(region) => Self::with_region(texture, region)?,
            None => Self::new(texture),
        };
        sprite.set_grid(sheet.hframes, sheet.vframes)?;
        sprite.set_frame(sheet.frame)?;

        log::debug!(
            "Sprite sheet {}x{} over {} ({} frames)",
            sprite.hframes,
            sprite.vframes,
            sprite.region,
            sprite.frame_count()
        );
        Ok(sprite)
    }

    /// Copy of this sprite showing another frame
    pub fn with_frame(&self, frame: u32) -> SpriteResult<Self> {
        let mut sprite = *self;
        sprite.set_frame(frame)?;
        Ok(sprite)
    }

    /// The borrowed texture
    pub const fn texture(&self) -> &'t T {
        self.texture
    }

    /// Region of the texture this sprite draws from
    pub const fn region(&self) -> Rect {
        self.region
    }

    /// Replace the texture region
    ///
    /// The region must have positive size and fit inside the texture's current
    /// bounds. The grid and frame are kept as they are.
    pub fn set_region(&mut self, region: Rect) -> SpriteResult<()> {
        let texture_width = self.texture.width();
        let texture_height = self.texture.height();
        let (tw, th) = (i64::from(texture_width), i64::from(texture_height));
        let (x, y, w, h) = (
            i64::from(region.x),
            i64::from(region.y),
            i64::from(region.w),
            i64::from(region.h),
        );

        let fits_x = x >= 0 && x < tw && w > 0 && w <= tw - x;
        let fits_y = y >= 0 && y < th && h > 0 && h <= th - y;
        if !(fits_x && fits_y) {
            return Err(SpriteError::InvalidRegion {
                region,
                texture_width,
                texture_height,
            });
        }

        self.region = region;
        Ok(())
    }

    /// Number of columns
    pub const fn hframes(&self) -> u32 {
        self.hframes
    }

    /// Number of rows
    pub const fn vframes(&self) -> u32 {
        self.vframes
    }

    /// Set the number of columns
    pub fn set_hframes(&mut self, hframes: u32) -> SpriteResult<()> {
        self.set_grid(hframes, self.vframes)
    }

    /// Set the number of rows
    pub fn set_vframes(&mut self, vframes: u32) -> SpriteResult<()> {
        self.set_grid(self.hframes, vframes)
    }

    /// Set both grid dimensions at once
    ///
    /// Fails with [`SpriteError::FrameOutOfRange`] if the current frame would
    /// not exist in the new grid; reset the frame first when shrinking.
    pub fn set_grid(&mut self, hframes: u32, vframes: u32) -> SpriteResult<()> {
        if hframes == 0 {
            return Err(SpriteError::InvalidGrid {
                axis: GridAxis::Horizontal,
                value: hframes,
            });
        }
        if vframes == 0 {
            return Err(SpriteError::InvalidGrid {
                axis: GridAxis::Vertical,
                value: vframes,
            });
        }
        check_frame(self.frame, grid_size(hframes, vframes))?;

        self.hframes = hframes;
        self.vframes = vframes;
        Ok(())
    }

    /// Current frame index
    pub const fn frame(&self) -> u32 {
        self.frame
    }

    /// Select the frame to draw
    pub fn set_frame(&mut self, frame: u32) -> SpriteResult<()> {
        check_frame(frame, self.frame_count())?;
        self.frame = frame;
        Ok(())
    }

    /// Number of frames in the grid
    pub fn frame_count(&self) -> u64 {
        grid_size(self.hframes, self.vframes)
    }

    /// Width and height of a single frame
    ///
    /// A dimension is zero when the grid has more cells than the region has
    /// pixels along that axis.
    pub fn frame_size(&self) -> (i32, i32) {
        let (w, h) = self.frame_size_wide();
        (narrow(w), narrow(h))
    }

    /// Texture rectangle of the current frame
    pub fn source_rect(&self) -> Rect {
        self.cell(self.frame)
    }

    /// Texture rectangle of an arbitrary frame, without selecting it
    pub fn frame_rect(&self, frame: u32) -> SpriteResult<Rect> {
        check_frame(frame, self.frame_count())?;
        Ok(self.cell(frame))
    }

    /// Draw the current frame into `dst`
    pub fn draw<R>(&self, renderer: &mut R, dst: Rect) -> SpriteResult<()>
    where
        R: RegionRenderer<T> + ?Sized,
    {
        debug_assert!(u64::from(self.frame) < self.frame_count());
        renderer
            .draw_region(self.texture, self.source_rect(), dst)
            .map_err(|e| SpriteError::Draw(e.to_string()))
    }

    fn frame_size_wide(&self) -> (i64, i64) {
        (
            i64::from(self.region.w) / i64::from(self.hframes),
            i64::from(self.region.h) / i64::from(self.vframes),
        )
    }

    fn cell(&self, frame: u32) -> Rect {
        let (frame_w, frame_h) = self.frame_size_wide();
        let col = i64::from(frame % self.hframes);
        let row = i64::from(frame / self.hframes);

        Rect::new(
            narrow(i64::from(self.region.x) + frame_w * col),
            narrow(i64::from(self.region.y) + frame_h * row),
            narrow(frame_w),
            narrow(frame_h),
        )
    }
}

impl<T: TextureDimensions + ?Sized> Clone for Sprite<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: TextureDimensions + ?Sized> Copy for Sprite<'_, T> {}

impl<T: TextureDimensions + ?Sized> fmt::Debug for Sprite<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sprite")
            .field(
                "texture",
                &format_args!("{}x{}", self.texture.width(), self.texture.height()),
            )
            .field("region", &self.region)
            .field("hframes", &self.hframes)
            .field("vframes", &self.vframes)
            .field("frame", &self.frame)
            .finish()
    }
}

fn grid_size(hframes: u32, vframes: u32) -> u64 {
    u64::from(hframes) * u64::from(vframes)
}

fn check_frame(frame: u32, frame_count: u64) -> SpriteResult<()> {
    if u64::from(frame) < frame_count {
        Ok(())
    } else {
        Err(SpriteError::FrameOutOfRange { frame, frame_count })
    }
}

// Every cell lies inside the region, which itself fits in i32 coordinates.
fn narrow(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Atlas {
        width: u32,
        height: u32,
    }

    impl TextureDimensions for Atlas {
        fn width(&self) -> u32 {
            self.width
        }

        fn height(&self) -> u32 {
            self.height
        }
    }

    impl Atlas {
        const fn new(width: u32, height: u32) -> Self {
            Self { width, height }
        }
    }

    const ATLAS: Atlas = Atlas::new(64, 32);

    fn grid_sprite(texture: &Atlas, hframes: u32, vframes: u32) -> Sprite<'_, Atlas> {
        let mut sprite = Sprite::new(texture);
        sprite.set_grid(hframes, vframes).unwrap();
        sprite
    }

    #[derive(Default)]
    struct RecordingRenderer {
        calls: Vec<(Rect, Rect)>,
        fail: bool,
    }

    impl RegionRenderer<Atlas> for RecordingRenderer {
        type Error = String;

        fn draw_region(&mut self, _texture: &Atlas, src: Rect, dst: Rect) -> Result<(), String> {
            if self.fail {
                return Err("device lost".to_string());
            }
            self.calls.push((src, dst));
            Ok(())
        }
    }

    #[test]
    fn test_defaults_cover_whole_texture() {
        let sprite = Sprite::new(&ATLAS);
        assert_eq!(sprite.region(), Rect::from_size(64, 32));
        assert_eq!((sprite.hframes(), sprite.vframes(), sprite.frame()), (1, 1, 0));
        assert_eq!(sprite.source_rect(), Rect::from_size(64, 32));
    }

    #[test]
    fn test_atlas_frames() {
        let mut sprite = grid_sprite(&ATLAS, 4, 2);
        assert_eq!(sprite.frame_size(), (16, 16));

        let expected = [
            (0, Rect::new(0, 0, 16, 16)),
            (3, Rect::new(48, 0, 16, 16)),
            (4, Rect::new(0, 16, 16, 16)),
            (7, Rect::new(48, 16, 16, 16)),
        ];
        for (frame, rect) in expected {
            sprite.set_frame(frame).unwrap();
            assert_eq!(sprite.source_rect(), rect, "frame {frame}");
        }
    }

    #[test]
    fn test_row_major_order() {
        let sprite = grid_sprite(&ATLAS, 4, 2);
        // 5 % 4 = 1 column, 5 / 4 = 1 row
        assert_eq!(sprite.frame_rect(5).unwrap(), Rect::new(16, 16, 16, 16));
    }

    #[test]
    fn test_region_offsets_frames() {
        let mut sprite = Sprite::with_region(&ATLAS, Rect::new(8, 4, 32, 16)).unwrap();
        sprite.set_grid(2, 2).unwrap();
        sprite.set_frame(3).unwrap();
        assert_eq!(sprite.source_rect(), Rect::new(24, 12, 16, 8));
    }

    #[test]
    fn test_truncated_frame_width() {
        let wide = Atlas::new(65, 16);
        let sprite = grid_sprite(&wide, 4, 1);
        assert_eq!(sprite.frame_size(), (16, 16));

        let covered: Vec<i64> = (0..4)
            .map(|frame| sprite.frame_rect(frame).unwrap().right())
            .collect();
        assert_eq!(covered, vec![16, 32, 48, 64]);
        // column 64 is never sampled
        assert!(covered.iter().all(|&right| right <= 64));
    }

    #[test]
    fn test_more_frames_than_pixels() {
        let tiny = Atlas::new(2, 2);
        let sprite = grid_sprite(&tiny, 4, 1);
        assert_eq!(sprite.frame_size(), (0, 2));
        assert_eq!(sprite.frame_rect(3).unwrap(), Rect::new(0, 0, 0, 2));
    }

    #[test]
    fn test_frames_stay_inside_region() {
        let texture = Atlas::new(37, 23);
        let region = Rect::new(3, 2, 31, 19);
        for hframes in 1..=7 {
            for vframes in 1..=5 {
                let mut sprite = Sprite::with_region(&texture, region).unwrap();
                sprite.set_grid(hframes, vframes).unwrap();
                for frame in 0..hframes * vframes {
                    let rect = sprite.frame_rect(frame).unwrap();
                    assert!(
                        region.contains(&rect),
                        "{hframes}x{vframes} frame {frame} -> {rect} escapes {region}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_source_rect_is_idempotent() {
        let mut sprite = grid_sprite(&ATLAS, 4, 2);
        sprite.set_frame(6).unwrap();
        let first = sprite.source_rect();
        for _ in 0..3 {
            assert_eq!(sprite.source_rect(), first);
        }
        assert_eq!(sprite.frame(), 6);
    }

    #[test]
    fn test_set_frame_boundary() {
        let mut sprite = grid_sprite(&ATLAS, 4, 2);
        assert!(sprite.set_frame(7).is_ok());
        assert_eq!(
            sprite.set_frame(8),
            Err(SpriteError::FrameOutOfRange {
                frame: 8,
                frame_count: 8,
            })
        );
        assert_eq!(sprite.frame(), 7);
    }

    #[test]
    fn test_set_region_right_edge() {
        let mut sprite = Sprite::new(&ATLAS);
        assert!(sprite.set_region(Rect::new(10, 0, 54, 32)).is_ok());

        let too_wide = Rect::new(10, 0, 55, 32);
        assert_eq!(
            sprite.set_region(too_wide),
            Err(SpriteError::InvalidRegion {
                region: too_wide,
                texture_width: 64,
                texture_height: 32,
            })
        );
        assert_eq!(sprite.region(), Rect::new(10, 0, 54, 32));
    }

    #[test]
    fn test_set_region_rejects_bad_rects() {
        let mut sprite = Sprite::new(&ATLAS);
        let bad = [
            Rect::new(-1, 0, 8, 8),
            Rect::new(0, -1, 8, 8),
            Rect::new(64, 0, 1, 1),
            Rect::new(0, 32, 1, 1),
            Rect::new(0, 0, 0, 8),
            Rect::new(0, 0, 8, 0),
            Rect::new(0, 0, -4, 8),
            Rect::new(0, 16, 8, 17),
            Rect::new(i32::MAX, 0, i32::MAX, 1),
        ];
        for region in bad {
            assert!(
                matches!(sprite.set_region(region), Err(SpriteError::InvalidRegion { .. })),
                "{region} should be rejected"
            );
        }
        assert_eq!(sprite.region(), ATLAS.bounds());
    }

    #[test]
    fn test_set_region_keeps_grid_and_frame() {
        let mut sprite = grid_sprite(&ATLAS, 4, 2);
        sprite.set_frame(5).unwrap();
        sprite.set_region(Rect::new(0, 0, 32, 16)).unwrap();
        assert_eq!((sprite.hframes(), sprite.vframes(), sprite.frame()), (4, 2, 5));
        assert_eq!(sprite.source_rect(), Rect::new(8, 8, 8, 8));
    }

    #[test]
    fn test_zero_grid_rejected() {
        let mut sprite = Sprite::new(&ATLAS);
        assert_eq!(
            sprite.set_hframes(0),
            Err(SpriteError::InvalidGrid {
                axis: GridAxis::Horizontal,
                value: 0,
            })
        );
        assert_eq!(
            sprite.set_vframes(0),
            Err(SpriteError::InvalidGrid {
                axis: GridAxis::Vertical,
                value: 0,
            })
        );
        assert_eq!((sprite.hframes(), sprite.vframes()), (1, 1));
    }

    #[test]
    fn test_grid_change_revalidates_frame() {
        let mut sprite = grid_sprite(&ATLAS, 4, 2);
        sprite.set_frame(6).unwrap();

        assert_eq!(
            sprite.set_hframes(2),
            Err(SpriteError::FrameOutOfRange {
                frame: 6,
                frame_count: 4,
            })
        );
        assert_eq!(
            sprite.set_vframes(1),
            Err(SpriteError::FrameOutOfRange {
                frame: 6,
                frame_count: 4,
            })
        );
        assert_eq!((sprite.hframes(), sprite.vframes()), (4, 2));

        // growing keeps the frame valid
        sprite.set_hframes(8).unwrap();
        assert_eq!(sprite.frame_count(), 16);

        sprite.set_frame(0).unwrap();
        sprite.set_grid(1, 1).unwrap();
        assert_eq!(sprite.source_rect(), ATLAS.bounds());
    }

    #[test]
    fn test_huge_grid_does_not_overflow() {
        let mut sprite = Sprite::new(&ATLAS);
        sprite.set_grid(u32::MAX, u32::MAX).unwrap();
        assert_eq!(sprite.frame_count(), u64::from(u32::MAX) * u64::from(u32::MAX));
        sprite.set_frame(u32::MAX).unwrap();
        let rect = sprite.source_rect();
        assert_eq!((rect.w, rect.h), (0, 0));
        assert!(sprite.region().contains(&rect));
    }

    #[test]
    fn test_empty_texture_gives_empty_region() {
        let empty = Atlas::new(0, 0);
        let sprite = Sprite::new(&empty);
        assert_eq!(sprite.region(), Rect::new(0, 0, 0, 0));
        assert!(!sprite.region().is_positive());
        assert_eq!(sprite.source_rect(), Rect::new(0, 0, 0, 0));

        assert!(matches!(
            Sprite::with_region(&empty, Rect::new(0, 0, 1, 1)),
            Err(SpriteError::InvalidRegion { .. })
        ));
    }

    #[test]
    fn test_with_frame_copies_layout() {
        let base = grid_sprite(&ATLAS, 4, 2);
        let copy = base.with_frame(3).unwrap();
        assert_eq!(copy.source_rect(), Rect::new(48, 0, 16, 16));
        assert_eq!(base.frame(), 0);
        assert!(base.with_frame(8).is_err());
    }

    #[test]
    fn test_from_sheet() {
        let sheet = SpriteSheet {
            frame: 5,
            ..SpriteSheet::grid(4, 2)
        };
        let sprite = Sprite::from_sheet(&ATLAS, &sheet).unwrap();
        assert_eq!(sprite.source_rect(), Rect::new(16, 16, 16, 16));

        let half = SpriteSheet::grid(2, 1).with_region(Rect::new(32, 0, 32, 32));
        let sprite = Sprite::from_sheet(&ATLAS, &half).unwrap();
        assert_eq!(sprite.frame_rect(1).unwrap(), Rect::new(48, 0, 16, 32));
    }

    #[test]
    fn test_from_sheet_errors() {
        let out_of_bounds = SpriteSheet::grid(1, 1).with_region(Rect::new(0, 0, 65, 32));
        assert!(matches!(
            Sprite::from_sheet(&ATLAS, &out_of_bounds),
            Err(SpriteError::InvalidRegion { .. })
        ));

        let zero = SpriteSheet::grid(0, 1);
        assert!(matches!(
            Sprite::from_sheet(&ATLAS, &zero),
            Err(SpriteError::InvalidGrid { .. })
        ));

        let past_end = SpriteSheet {
            frame: 4,
            ..SpriteSheet::grid(2, 2)
        };
        assert!(matches!(
            Sprite::from_sheet(&ATLAS, &past_end),
            Err(SpriteError::FrameOutOfRange {
                frame: 4,
                frame_count: 4,
            })
        ));
    }

    #[test]
    fn test_draw_passes_source_rect() {
        let mut sprite = grid_sprite(&ATLAS, 4, 2);
        sprite.set_frame(4).unwrap();
        let dst = Rect::new(100, 100, 32, 32);

        let mut renderer = RecordingRenderer::default();
        sprite.draw(&mut renderer, dst).unwrap();
        assert_eq!(renderer.calls, vec![(Rect::new(0, 16, 16, 16), dst)]);
    }

    #[test]
    fn test_draw_error_is_surfaced() {
        let sprite = Sprite::new(&ATLAS);
        let mut renderer = RecordingRenderer {
            fail: true,
            ..RecordingRenderer::default()
        };
        assert_eq!(
            sprite.draw(&mut renderer, Rect::from_size(1, 1)),
            Err(SpriteError::Draw("device lost".to_string()))
        );
    }

    #[test]
    fn test_error_messages() {
        let err = SpriteError::FrameOutOfRange {
            frame: 8,
            frame_count: 8,
        };
        assert_eq!(err.to_string(), "frame 8 is out of range for a grid of 8 frames");
        let err = SpriteError::InvalidGrid {
            axis: GridAxis::Vertical,
            value: 0,
        };
        assert_eq!(err.to_string(), "vframes must be greater than zero, got 0");
    }

    #[test]
    fn test_sprite_over_decoded_texture() {
        let texture = Texture::from_image(crate::assets::ImageData::solid_color(32, 32, [0; 4]));
        let mut sprite = Sprite::new(&texture);
        sprite.set_grid(2, 2).unwrap();
        sprite.set_frame(3).unwrap();
        assert_eq!(sprite.source_rect(), Rect::new(16, 16, 16, 16));
    }
}
