//! Axis-aligned boxes and playfield bounds
//!
//! Field coordinates: origin top-left, y grows downward. Everything here is
//! `Copy` and allocation-free so it can run for every entity every tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height (never negative)
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size: size.max(Vec2::ZERO),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Overlap test; boxes sharing only an edge count as overlapping
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() <= other.right()
            && other.left() <= self.right()
            && self.top() <= other.bottom()
            && other.top() <= self.bottom()
    }

    #[inline]
    pub fn translate(&mut self, delta: Vec2) {
        self.pos += delta;
    }

    /// Pull the box back inside the playable area.
    ///
    /// Returns true if the box had to be moved.
    pub fn clamp_to_field(&mut self, field: &Field) -> bool {
        let min = Vec2::new(field.left(), field.top());
        let max = (Vec2::new(field.right(), field.floor()) - self.size).max(min);
        let clamped = self.pos.clamp(min, max);
        let moved = clamped != self.pos;
        self.pos = clamped;
        moved
    }
}

/// Playfield bounds: the full field inset by padding on every side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
}

impl Field {
    pub fn new(width: f32, height: f32, padding: f32) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.padding
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.width - self.padding
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.padding
    }

    /// The line balls bounce on and the player stands on
    #[inline]
    pub fn floor(&self) -> f32 {
        self.height - self.padding
    }

    #[inline]
    pub fn inner_width(&self) -> f32 {
        self.right() - self.left()
    }

    /// True if the box lies fully inside the playable area
    pub fn contains(&self, rect: &Rect) -> bool {
        rect.left() >= self.left()
            && rect.right() <= self.right()
            && rect.top() >= self.top()
            && rect.bottom() <= self.floor()
    }
}
