//! Wall segment geometry
//!
//! A wall is two endpoints. For collision purposes only its supporting line
//! matters: distances are measured to the infinite line, never clipped to
//! the segment.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::vector::Vector2Ext;

/// An immovable line-segment boundary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Wall {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn from_points(start: Vec2, end: Vec2) -> Self {
        Self::new(start.x, start.y, end.x, end.y)
    }

    #[inline]
    pub fn start(&self) -> Vec2 {
        Vec2::new(self.x1, self.y1)
    }

    #[inline]
    pub fn end(&self) -> Vec2 {
        Vec2::new(self.x2, self.y2)
    }

    /// Vector from start to end
    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.end() - self.start()
    }

    pub fn length(&self) -> f32 {
        self.direction().length()
    }

    /// Unit normal `(-dy, dx)`, or zero for a zero-length wall
    ///
    /// For a wall walked start to end this points to the left.
    pub fn unit_normal(&self) -> Vec2 {
        let dir = self.direction();
        Vec2::new(-dir.y, dir.x).normalized()
    }

    /// Signed distance from `point` to the wall's line, positive on the
    /// side the normal points to. Zero for a zero-length wall.
    pub fn signed_distance(&self, point: Vec2) -> f32 {
        (point - self.start()).dot(self.unit_normal())
    }
}
