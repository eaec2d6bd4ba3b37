//! Axis-aligned bounding boxes
//!
//! Every entity that can collide carries a `Rect` (top-left origin). All
//! collision tests in the game are strict AABB overlap tests, so boxes that
//! merely touch along an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Positional rectangle shared by players, enemies, bullets and bonus items
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner
    #[inline]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict overlap test
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Distance between top-left corners (used by autopilot proximity)
    #[inline]
    pub fn origin_distance(&self, other: &Rect) -> f32 {
        self.origin().distance(other.origin())
    }
}
