//! Axis-aligned pixel rectangles
//!
//! Platforms, the player body and collectibles are all integer rectangles in
//! world space. y grows downward, so `top()` is the numerically smallest edge.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in world pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        debug_assert!(width > 0 && height > 0, "rect must have positive size");
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle of the given size centered on (cx, cy)
    pub fn from_center(cx: i32, cy: i32, width: i32, height: i32) -> Self {
        Self::new(cx - width / 2, cy - height / 2, width, height)
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    #[inline]
    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    #[inline]
    pub fn center_y(&self) -> i32 {
        self.y + self.height / 2
    }

    /// Move so the bottom edge sits at `bottom`
    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.height;
    }

    /// Move so the top edge sits at `top`
    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    /// Strict overlap test; rectangles that only share an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}
