//! Ricochet - bouncing circles inside a rotating box
//!
//! Core modules:
//! - `sim`: Discrete-time physics (vectors, walls, balls, spatial grid, update step)
//! - `config`: Simulation and scene configuration (JSON, validated)
//! - `sandbox`: Headless frame driver that animates the arena and spawns balls

pub mod config;
pub mod sandbox;
pub mod sim;

pub use config::{CellSizing, NeighborSnapshot, SceneConfig, SceneError, SimConfig};
pub use sandbox::{FrameInput, Rotation, Sandbox, Snapshot};
pub use sim::{Ball, Simulation, SpatialGrid, Vector2, Vector2Ext, Wall};

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 0.001;
    /// Maximum substeps per `Sandbox::advance` call
    pub const MAX_SUBSTEPS: u32 = 64;

    /// Arena dimensions (the box is centered on the arena)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Grid cell counts
    pub const GRID_WIDTH_CELLS: usize = 80;
    pub const GRID_HEIGHT_CELLS: usize = 60;

    /// Degrees the arena turns per rotate input
    pub const WALL_ROTATION_STEP: f32 = 1.0;

    /// Spawned ball defaults
    pub const SPAWN_RADIUS: f32 = 10.0;
    /// Spawned velocity components are drawn from [-SPAWN_SPEED, SPAWN_SPEED]
    pub const SPAWN_SPEED: f32 = 200.0;
}
