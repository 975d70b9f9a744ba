//! Physics step parameters
//!
//! Plain data that tunes how the grid is sized and when it is rebuilt.
//! Loading and validation live in `crate::config`.

use serde::{Deserialize, Serialize};

use crate::consts::{GRID_HEIGHT_CELLS, GRID_WIDTH_CELLS};

/// How each ball's grid cell size is derived
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CellSizing {
    /// Cell edge is `grid cells × 2 × radius` of the ball being placed, so
    /// differently sized balls bucket against different grids
    #[default]
    PerBallRadius,
    /// One cell edge length shared by every ball
    Fixed { cell_size: f32 },
}

/// Which positions the neighbour grid reflects during `update`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NeighborSnapshot {
    /// Rebuilt once when `update` starts, before any ball moves. Each ball
    /// then integrates, bounces off walls and checks neighbours in one pass.
    #[default]
    FrameStart,
    /// All balls integrate and bounce off walls first, then the grid is
    /// rebuilt and ball-ball contacts are resolved in a second pass.
    Integrated,
}

impl NeighborSnapshot {
    pub fn as_str(&self) -> &'static str {
        match self {
            NeighborSnapshot::FrameStart => "frame_start",
            NeighborSnapshot::Integrated => "integrated",
        }
    }
}

/// Physics step configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of grid columns
    pub grid_width_cells: usize,
    /// Number of grid rows
    pub grid_height_cells: usize,
    pub cell_sizing: CellSizing,
    pub neighbor_snapshot: NeighborSnapshot,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_width_cells: GRID_WIDTH_CELLS,
            grid_height_cells: GRID_HEIGHT_CELLS,
            cell_sizing: CellSizing::PerBallRadius,
            neighbor_snapshot: NeighborSnapshot::FrameStart,
        }
    }
}
