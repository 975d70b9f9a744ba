//! World container and the per-frame update step
//!
//! Owns every wall and ball. Walls are checked exhaustively; ball-ball
//! contacts are pruned to the 3×3 cell block around each ball.

use glam::Vec2;

use super::ball::Ball;
use super::grid::{GridIndex, SpatialGrid};
use super::params::{NeighborSnapshot, SimConfig};
use super::vector::Vector2Ext;
use super::wall::Wall;

/// Contact counts from one `update`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Wall reflections applied
    pub wall_hits: usize,
    /// Ball-ball reflections applied
    pub ball_hits: usize,
    /// Balls that were inside the grid when neighbours were queried
    pub gridded: usize,
}

/// The physics world
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimConfig,
    walls: Vec<Wall>,
    balls: Vec<Ball>,
    grid: SpatialGrid,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            walls: Vec::new(),
            balls: Vec::new(),
            grid: SpatialGrid::new(
                config.grid_width_cells,
                config.grid_height_cells,
                config.cell_sizing,
            ),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Walls in insertion order
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    /// Balls in insertion order; a ball's position here is its identity
    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// Append the four edges of a rotated rectangle
    ///
    /// Corners A (+w/2, +h/2), B (-w/2, +h/2), C (-w/2, -h/2),
    /// D (+w/2, -h/2) are rotated about the center by `angle` degrees and
    /// joined A→B→C→D→A.
    pub fn add_rectangle_wall(&mut self, cx: f32, cy: f32, width: f32, height: f32, angle: f32) {
        let center = Vec2::new(cx, cy);
        let (hw, hh) = (width / 2.0, height / 2.0);
        let corners = [
            Vec2::new(hw, hh),
            Vec2::new(-hw, hh),
            Vec2::new(-hw, -hh),
            Vec2::new(hw, -hh),
        ]
        .map(|corner| corner.rotate_degrees(angle) + center);

        for i in 0..corners.len() {
            let next = corners[(i + 1) % corners.len()];
            self.walls.push(Wall::from_points(corners[i], next));
        }
    }

    pub fn add_wall(&mut self, wall: Wall) {
        self.walls.push(wall);
    }

    /// Append a ball, returning its index
    pub fn add_ball(&mut self, x: f32, y: f32, vx: f32, vy: f32, radius: f32) -> usize {
        self.push_ball(Ball::new(Vec2::new(x, y), Vec2::new(vx, vy), radius))
    }

    pub fn push_ball(&mut self, ball: Ball) -> usize {
        self.balls.push(ball);
        self.balls.len() - 1
    }

    /// Remove every wall (balls are untouched)
    pub fn delete_walls(&mut self) {
        self.walls.clear();
    }

    pub fn grid_index_of(&self, ball: &Ball) -> GridIndex {
        self.grid.index_of(ball)
    }

    /// Re-bucket every ball by its current position
    pub fn rebuild_grid(&mut self) -> usize {
        self.grid.rebuild(&self.balls)
    }

    /// Advance the world by `dt`
    ///
    /// Per ball, in index order: integrate, bounce off every wall in turn,
    /// then bounce off every overlapping ball found in the surrounding grid
    /// cells. Reflections compound in sequence. When the grid snapshot is
    /// taken is set by [`SimConfig::neighbor_snapshot`].
    pub fn update(&mut self, dt: f32) -> StepStats {
        let mut stats = StepStats::default();

        match self.config.neighbor_snapshot {
            NeighborSnapshot::FrameStart => {
                self.rebuild_grid();
                for i in 0..self.balls.len() {
                    let ball = &mut self.balls[i];
                    ball.integrate(dt);
                    stats.wall_hits += resolve_walls(ball, &self.walls);
                    self.resolve_neighbors(i, &mut stats);
                }
            }
            NeighborSnapshot::Integrated => {
                for ball in &mut self.balls {
                    ball.integrate(dt);
                    stats.wall_hits += resolve_walls(ball, &self.walls);
                }
                self.rebuild_grid();
                for i in 0..self.balls.len() {
                    self.resolve_neighbors(i, &mut stats);
                }
            }
        }

        log::trace!(
            "step dt={dt}: {} balls, {} wall hits, {} ball hits",
            self.balls.len(),
            stats.wall_hits,
            stats.ball_hits
        );
        stats
    }

    /// Reflect ball `i` off every overlapping ball in its 3×3 cell block
    fn resolve_neighbors(&mut self, i: usize, stats: &mut StepStats) {
        let index = self.grid.index_of(&self.balls[i]);
        if !self.grid.contains(index) {
            return;
        }
        stats.gridded += 1;

        let balls = &mut self.balls;
        for other in self.grid.neighbors(index).filter(|&other| other != i) {
            let normal = balls[i].is_collided_with_ball(&balls[other]);
            if !normal.is_zero() {
                balls[i].velocity = balls[i].reflect(normal);
                stats.ball_hits += 1;
            }
        }
    }
}

/// Bounce `ball` off each wall in order; returns how many reflected it
fn resolve_walls(ball: &mut Ball, walls: &[Wall]) -> usize {
    let mut hits = 0;
    for wall in walls {
        if !ball.is_collided_with_wall(wall).is_zero() {
            hits += 1;
        }
        ball.velocity = ball.resolve_collision(wall);
    }
    hits
}
