//! Discrete-time physics module
//!
//! Everything the per-frame step touches lives here. This module must stay
//! pure and deterministic:
//! - Caller-supplied timestep only
//! - Stable iteration order (by ball index)
//! - No rendering or platform dependencies

pub mod ball;
pub mod grid;
pub mod params;
pub mod simulation;
pub mod vector;
pub mod wall;

pub use ball::Ball;
pub use grid::{GridIndex, SpatialGrid};
pub use params::{CellSizing, NeighborSnapshot, SimConfig};
pub use simulation::{Simulation, StepStats};
pub use vector::{Vector2, Vector2Ext};
pub use wall::Wall;
