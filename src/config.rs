//! Simulation and scene configuration
//!
//! `SimConfig` tunes the physics step itself. `SceneConfig` describes a whole
//! run (arena, initial balls, spawning, seed) and is loaded from JSON.
//! Every field has a default, so an empty object is a valid scene.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

pub use crate::sim::params::{CellSizing, NeighborSnapshot, SimConfig};

impl SimConfig {
    /// Reject grids with no cells and non-positive fixed cell sizes
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.grid_width_cells == 0 || self.grid_height_cells == 0 {
            return Err(SceneError::invalid("grid dimensions must be non-zero"));
        }
        if let CellSizing::Fixed { cell_size } = self.cell_sizing {
            if !(cell_size > 0.0 && cell_size.is_finite()) {
                return Err(SceneError::invalid(format!(
                    "fixed cell size must be positive, got {cell_size}"
                )));
            }
        }
        Ok(())
    }
}

/// The rotating rectangle enclosing the balls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub center_x: f32,
    pub center_y: f32,
    pub width: f32,
    pub height: f32,
    /// Starting angle (degrees)
    pub angle: f32,
    /// Degrees turned per rotate input
    pub rotation_step: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            center_x: ARENA_WIDTH / 2.0,
            center_y: ARENA_HEIGHT / 2.0,
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            angle: 0.0,
            rotation_step: WALL_ROTATION_STEP,
        }
    }
}

/// A ball placed when the scene starts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSpec {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub vx: f32,
    #[serde(default)]
    pub vy: f32,
    #[serde(default = "default_radius")]
    pub radius: f32,
}

fn default_radius() -> f32 {
    SPAWN_RADIUS
}

/// Parameters for balls spawned during the run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub radius: f32,
    /// Velocity components are drawn uniformly from [-max_speed, max_speed]
    pub max_speed: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            radius: SPAWN_RADIUS,
            max_speed: SPAWN_SPEED,
        }
    }
}

/// A complete run description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Fixed timestep per frame
    pub dt: f32,
    /// RNG seed for spawned velocities
    pub seed: u64,
    pub arena: ArenaConfig,
    pub spawn: SpawnConfig,
    pub balls: Vec<BallSpec>,
    pub sim: SimConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            dt: SIM_DT,
            seed: 0,
            arena: ArenaConfig::default(),
            spawn: SpawnConfig::default(),
            balls: Vec::new(),
            sim: SimConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Parse and validate a scene from JSON text
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let scene: SceneConfig = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Load and validate a scene file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scene = Self::from_json(&json)?;
        log::info!(
            "Loaded scene from {} ({} balls, dt={})",
            path.display(),
            scene.balls.len(),
            scene.dt
        );
        Ok(scene)
    }

    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        if !(self.dt > 0.0 && self.dt.is_finite()) {
            return Err(SceneError::invalid(format!(
                "dt must be positive, got {}",
                self.dt
            )));
        }
        if !(self.spawn.radius > 0.0) {
            return Err(SceneError::invalid("spawn radius must be positive"));
        }
        if self.spawn.max_speed < 0.0 {
            return Err(SceneError::invalid("spawn max_speed must not be negative"));
        }
        if let Some((i, ball)) = self
            .balls
            .iter()
            .enumerate()
            .find(|(_, b)| !(b.radius > 0.0))
        {
            return Err(SceneError::invalid(format!(
                "ball {i} has non-positive radius {}",
                ball.radius
            )));
        }
        self.sim.validate()
    }
}

/// Scene loading failures
#[derive(Error, Debug)]
pub enum SceneError {
    /// Scene file could not be read
    #[error("failed to read scene {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Scene JSON is malformed
    #[error("scene parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Scene parsed but describes an impossible setup
    #[error("invalid scene: {reason}")]
    Invalid { reason: String },
}

impl SceneError {
    fn invalid(reason: impl Into<String>) -> Self {
        SceneError::Invalid {
            reason: reason.into(),
        }
    }
}
