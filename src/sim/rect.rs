//! Axis-aligned rectangle geometry
//!
//! All arena geometry is integral: positions are the top-left corner,
//! y grows downward, and edges are inclusive for collision purposes.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in arena units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    #[inline]
    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    #[inline]
    pub fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    /// Top-left corner
    pub fn position(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    /// Place the rect so that `center_x()`/`center_y()` equal the given point
    pub fn set_center(&mut self, center: IVec2) {
        self.x = center.x - self.w / 2;
        self.y = center.y - self.h / 2;
    }

    pub fn translate(&mut self, delta: IVec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Inclusive AABB test: rectangles that share an edge overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        overlaps(self, other)
    }
}

/// True iff `a` and `b` intersect on both axes. Touching edges count.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.left() <= b.right()
        && b.left() <= a.right()
        && a.top() <= b.bottom()
        && b.top() <= a.bottom()
}
