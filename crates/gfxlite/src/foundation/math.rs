//! Math utilities and types
//!
//! Integer rectangles for texture addressing, plus the nalgebra point types
//! used by mesh geometry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Axis-aligned integer rectangle in pixel space
///
/// `x`/`y` name the top-left corner; `w`/`h` extend right and down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub w: i32,
    /// Height in pixels
    pub h: i32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle anchored at the origin
    pub const fn from_size(w: i32, h: i32) -> Self {
        Self::new(0, 0, w, h)
    }

    /// One past the rightmost column
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.w)
    }

    /// One past the bottom row
    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.h)
    }

    /// Whether `other` lies entirely inside this rectangle
    pub fn contains(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Whether both dimensions are positive
    pub const fn is_positive(&self) -> bool {
        self.w > 0 && self.h > 0
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}x{}", self.x, self.y, self.w, self.h)
    }
}
