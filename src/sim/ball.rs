//! Ball entity and its collision primitives
//!
//! Every check returns a normal: the zero vector means "no contact",
//! anything else is a unit vector ready to be fed to [`Ball::reflect`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::vector::Vector2Ext;
use super::wall::Wall;

/// A moving circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
        }
    }

    /// Wall normal if the ball overlaps the wall's line, else zero
    ///
    /// The distance is signed, so a ball anywhere on the back side of the
    /// line also counts as touching it. Zero-length walls never collide.
    pub fn is_collided_with_wall(&self, wall: &Wall) -> Vec2 {
        let normal = wall.unit_normal();
        let distance = (self.position - wall.start()).dot(normal);

        if distance < self.radius {
            normal
        } else {
            Vec2::ZERO
        }
    }

    /// Unit vector from this ball toward `other` if they overlap, else zero
    ///
    /// Two balls with identical centers overlap but have no direction
    /// between them, so they report zero as well.
    pub fn is_collided_with_ball(&self, other: &Ball) -> Vec2 {
        let between = other.position - self.position;
        if between.length() < self.radius + other.radius {
            between.normalized()
        } else {
            Vec2::ZERO
        }
    }

    /// Elastic reflection of the current velocity: v' = v - 2(v·n)n
    ///
    /// `normal` must be a unit vector.
    #[inline]
    pub fn reflect(&self, normal: Vec2) -> Vec2 {
        self.velocity - normal * (2.0 * self.velocity.dot(normal))
    }

    /// Velocity after bouncing off `wall`, or the current velocity on a miss
    pub fn resolve_collision(&self, wall: &Wall) -> Vec2 {
        let normal = self.is_collided_with_wall(wall);
        if normal.is_zero() {
            self.velocity
        } else {
            self.reflect(normal)
        }
    }

    /// Advance the position by one explicit Euler step
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball_at(x: f32, y: f32, radius: f32) -> Ball {
        Ball::new(Vec2::new(x, y), Vec2::new(10.0, 5.0), radius)
    }

    #[test]
    fn test_wall_contact_within_radius() {
        // Floor along +x, normal +y
        let floor = Wall::new(0.0, 0.0, 100.0, 0.0);
        let ball = ball_at(50.0, 0.5, 1.0);
        assert_eq!(ball.is_collided_with_wall(&floor), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_wall_clear_at_exact_radius() {
        let floor = Wall::new(0.0, 0.0, 100.0, 0.0);
        let ball = ball_at(50.0, 1.0, 1.0);
        assert_eq!(ball.is_collided_with_wall(&floor), Vec2::ZERO);
    }

    #[test]
    fn test_wall_contact_beyond_segment_end() {
        // Line extension still collides
        let floor = Wall::new(0.0, 0.0, 10.0, 0.0);
        let ball = ball_at(1000.0, 0.5, 1.0);
        assert!(!ball.is_collided_with_wall(&floor).is_zero());
    }

    #[test]
    fn test_wall_contact_on_back_side() {
        let floor = Wall::new(0.0, 0.0, 100.0, 0.0);
        let ball = ball_at(50.0, -40.0, 1.0);
        assert_eq!(ball.is_collided_with_wall(&floor), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_degenerate_wall_never_collides() {
        let point = Wall::new(1.0, 1.0, 1.0, 1.0);
        let ball = ball_at(1.0, 1.0, 5.0);
        assert_eq!(ball.is_collided_with_wall(&point), Vec2::ZERO);
        assert_eq!(ball.resolve_collision(&point), ball.velocity);
    }

    #[test]
    fn test_ball_contact_direction() {
        let a = ball_at(0.0, 0.0, 1.0);
        let b = ball_at(1.5, 0.0, 1.0);
        assert_eq!(a.is_collided_with_ball(&b), Vec2::new(1.0, 0.0));
        assert_eq!(b.is_collided_with_ball(&a), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_ball_touching_is_not_contact() {
        let a = ball_at(0.0, 0.0, 1.0);
        let b = ball_at(2.0, 0.0, 1.0);
        assert_eq!(a.is_collided_with_ball(&b), Vec2::ZERO);
    }

    #[test]
    fn test_ball_coincident_centers() {
        let a = ball_at(3.0, 3.0, 1.0);
        assert_eq!(a.is_collided_with_ball(&a), Vec2::ZERO);
    }

    #[test]
    fn test_reflect_velocity() {
        // Ball moving right, hits vertical wall (normal pointing left)
        let ball = Ball::new(Vec2::ZERO, Vec2::new(100.0, 20.0), 1.0);
        let reflected = ball.reflect(Vec2::new(-1.0, 0.0));
        assert!((reflected.x + 100.0).abs() < 0.001);
        assert!((reflected.y - 20.0).abs() < 0.001);
    }

    #[test]
    fn test_resolve_collision_reflects_on_hit() {
        let floor = Wall::new(0.0, 0.0, 100.0, 0.0);
        let ball = Ball::new(Vec2::new(10.0, 0.5), Vec2::new(3.0, -4.0), 1.0);
        assert_eq!(ball.resolve_collision(&floor), Vec2::new(3.0, 4.0));

        let clear = Ball::new(Vec2::new(10.0, 5.0), Vec2::new(3.0, -4.0), 1.0);
        assert_eq!(clear.resolve_collision(&floor), Vec2::new(3.0, -4.0));
    }

    #[test]
    fn test_integrate() {
        let mut ball = Ball::new(Vec2::new(1.0, 1.0), Vec2::new(10.0, -20.0), 1.0);
        ball.integrate(0.5);
        assert_eq!(ball.position, Vec2::new(6.0, -9.0));
    }
}
