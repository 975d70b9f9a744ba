//! Headless frame driver
//!
//! Plays the part of the interactive shell: each frame it may turn the
//! arena, may drop a new ball with a random velocity, rebuilds the arena
//! walls at the current angle and steps the simulation.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::SceneConfig;
use crate::consts::MAX_SUBSTEPS;
use crate::sim::{Ball, Simulation, StepStats, Wall};

/// Arena rotation requested for a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rotation {
    #[default]
    None,
    /// Angle increases
    Counterclockwise,
    /// Angle decreases
    Clockwise,
}

impl Rotation {
    fn sign(self) -> f32 {
        match self {
            Rotation::None => 0.0,
            Rotation::Counterclockwise => 1.0,
            Rotation::Clockwise => -1.0,
        }
    }
}

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Held rotate key
    pub rotate: Rotation,
    /// Drop a ball here (one-shot)
    pub spawn_at: Option<Vec2>,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub frame: u64,
    /// Arena angle (degrees)
    pub angle: f32,
    pub balls: Vec<Ball>,
    pub walls: Vec<Wall>,
}

/// A running scene
#[derive(Debug, Clone)]
pub struct Sandbox {
    scene: SceneConfig,
    sim: Simulation,
    rng: Pcg32,
    angle: f32,
    frame: u64,
    accumulator: f32,
}

impl Sandbox {
    /// Set up the arena and initial balls; the scene is assumed validated
    pub fn new(scene: SceneConfig) -> Self {
        let mut sim = Simulation::new(scene.sim);
        for spec in &scene.balls {
            sim.add_ball(spec.x, spec.y, spec.vx, spec.vy, spec.radius);
        }

        let mut sandbox = Self {
            rng: Pcg32::seed_from_u64(scene.seed),
            angle: scene.arena.angle,
            sim,
            scene,
            frame: 0,
            accumulator: 0.0,
        };
        sandbox.rebuild_arena();
        log::info!(
            "Sandbox ready: {} balls, {} walls, seed {}",
            sandbox.sim.balls().len(),
            sandbox.sim.walls().len(),
            sandbox.scene.seed
        );
        sandbox
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn scene(&self) -> &SceneConfig {
        &self.scene
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Add a ball at `position` with a random velocity from the spawn range
    pub fn spawn_ball(&mut self, position: Vec2) -> usize {
        let max = self.scene.spawn.max_speed;
        let (vx, vy) = if max > 0.0 {
            (self.rng.random_range(-max..max), self.rng.random_range(-max..max))
        } else {
            (0.0, 0.0)
        };
        let index = self
            .sim
            .add_ball(position.x, position.y, vx, vy, self.scene.spawn.radius);
        log::debug!(
            "Spawned ball {index} at ({:.1}, {:.1}) vel ({vx:.1}, {vy:.1})",
            position.x,
            position.y
        );
        index
    }

    /// A uniformly random point inside the unrotated arena, inset by the
    /// spawn radius
    pub fn random_point_in_arena(&mut self) -> Vec2 {
        let arena = self.scene.arena;
        let inset = self.scene.spawn.radius;
        let half_w = (arena.width / 2.0 - inset).max(0.0);
        let half_h = (arena.height / 2.0 - inset).max(0.0);
        let offset = Vec2::new(
            if half_w > 0.0 { self.rng.random_range(-half_w..half_w) } else { 0.0 },
            if half_h > 0.0 { self.rng.random_range(-half_h..half_h) } else { 0.0 },
        );
        Vec2::new(arena.center_x, arena.center_y) + offset
    }

    /// Replace the arena walls with the rectangle at the current angle
    fn rebuild_arena(&mut self) {
        let arena = self.scene.arena;
        self.sim.delete_walls();
        self.sim.add_rectangle_wall(
            arena.center_x,
            arena.center_y,
            arena.width,
            arena.height,
            self.angle,
        );
    }

    /// Run one frame of the shell loop with the scene's fixed dt
    pub fn step(&mut self, input: &FrameInput) -> StepStats {
        if let Some(at) = input.spawn_at {
            self.spawn_ball(at);
        }

        self.angle += input.rotate.sign() * self.scene.arena.rotation_step;
        self.rebuild_arena();

        let stats = self.sim.update(self.scene.dt);
        self.frame += 1;
        stats
    }

    /// Consume `elapsed` seconds of wall-clock time in fixed steps
    ///
    /// At most `MAX_SUBSTEPS` steps run per call; leftover time beyond that
    /// is dropped. A spawn request fires on the first step only.
    /// Returns the number of steps taken.
    pub fn advance(&mut self, elapsed: f32, input: &FrameInput) -> u32 {
        let dt = self.scene.dt;
        self.accumulator += elapsed.max(0.0);

        let mut input = input.clone();
        let mut substeps = 0;
        while self.accumulator >= dt && substeps < MAX_SUBSTEPS {
            self.step(&input);
            self.accumulator -= dt;
            substeps += 1;

            // Clear one-shot inputs after processing
            input.spawn_at = None;
        }

        if substeps == MAX_SUBSTEPS && self.accumulator >= dt {
            log::warn!(
                "Dropping {:.4}s of simulation time (substep cap {MAX_SUBSTEPS})",
                self.accumulator
            );
            self.accumulator = 0.0;
        }
        substeps
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            frame: self.frame,
            angle: self.angle,
            balls: self.sim.balls().to_vec(),
            walls: self.sim.walls().to_vec(),
        }
    }
}
