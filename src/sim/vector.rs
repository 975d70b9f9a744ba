//! 2D vector helpers
//!
//! `glam::Vec2` already provides add, subtract, scale, dot and length as
//! value operations. The two operations it spells differently (rotation by
//! degrees and zero-safe normalization) are added through [`Vector2Ext`].

use glam::Vec2;

/// Plain 2D float vector used for positions, velocities and normals
pub type Vector2 = Vec2;

/// Geometry helpers the simulation needs on top of `glam`
pub trait Vector2Ext {
    /// Rotate counterclockwise by `angle` degrees
    fn rotate_degrees(self, angle: f32) -> Self;

    /// Unit vector in the same direction, or zero for the zero vector
    fn normalized(self) -> Self;

    /// True for exactly (0, 0), the "no collision" sentinel
    fn is_zero(self) -> bool;
}

impl Vector2Ext for Vec2 {
    #[inline]
    fn rotate_degrees(self, angle: f32) -> Self {
        let (sin, cos) = angle.to_radians().sin_cos();
        Vec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    #[inline]
    fn normalized(self) -> Self {
        let len = self.length();
        if len > 0.0 { self / len } else { Vec2::ZERO }
    }

    #[inline]
    fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}
