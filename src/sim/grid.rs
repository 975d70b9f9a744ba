//! Uniform spatial grid for ball-ball broad phase
//!
//! Balls are bucketed by index into `width_cells × height_cells` cells.
//! The grid is a cache: it is cleared and refilled wholesale, never patched.
//! Balls whose cell falls outside the grid are simply left out.

use super::ball::Ball;
use super::params::CellSizing;

/// Cell coordinates `(x_index, y_index)`; may be out of range
pub type GridIndex = (i64, i64);

/// Row-major grid of ball indices
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    width_cells: usize,
    height_cells: usize,
    sizing: CellSizing,
    cells: Vec<Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(width_cells: usize, height_cells: usize, sizing: CellSizing) -> Self {
        Self {
            width_cells,
            height_cells,
            sizing,
            cells: vec![Vec::new(); width_cells * height_cells],
        }
    }

    pub fn width_cells(&self) -> usize {
        self.width_cells
    }

    pub fn height_cells(&self) -> usize {
        self.height_cells
    }

    pub fn sizing(&self) -> CellSizing {
        self.sizing
    }

    /// Cell edge lengths `(x, y)` used to place `ball`
    pub fn cell_size_for(&self, ball: &Ball) -> (f32, f32) {
        match self.sizing {
            CellSizing::PerBallRadius => (
                self.width_cells as f32 * 2.0 * ball.radius,
                self.height_cells as f32 * 2.0 * ball.radius,
            ),
            CellSizing::Fixed { cell_size } => (cell_size, cell_size),
        }
    }

    /// Cell the ball's center falls in, unbounded
    ///
    /// Division truncates toward zero, so the strip just left of or above
    /// the origin (-cell < x < 0) shares cell 0 with the first column/row.
    pub fn index_of(&self, ball: &Ball) -> GridIndex {
        let (cell_w, cell_h) = self.cell_size_for(ball);
        (
            (ball.position.x / cell_w) as i64,
            (ball.position.y / cell_h) as i64,
        )
    }

    pub fn contains(&self, (x, y): GridIndex) -> bool {
        x >= 0 && y >= 0 && (x as u64) < self.width_cells as u64 && (y as u64) < self.height_cells as u64
    }

    fn slot(&self, index: GridIndex) -> Option<usize> {
        self.contains(index)
            .then(|| index.1 as usize * self.width_cells + index.0 as usize)
    }

    /// Ball indices in one cell; empty for out-of-range cells
    pub fn cell(&self, index: GridIndex) -> &[usize] {
        match self.slot(index) {
            Some(slot) => &self.cells[slot],
            None => &[],
        }
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    /// Bucket `ball_index` at `index`; returns false if out of range
    pub fn insert(&mut self, index: GridIndex, ball_index: usize) -> bool {
        match self.slot(index) {
            Some(slot) => {
                self.cells[slot].push(ball_index);
                true
            }
            None => false,
        }
    }

    /// Clear every cell, then bucket each ball by its current position
    ///
    /// Returns how many balls landed in the grid.
    pub fn rebuild(&mut self, balls: &[Ball]) -> usize {
        self.clear();
        let mut placed = 0;
        for (i, ball) in balls.iter().enumerate() {
            if self.insert(self.index_of(ball), i) {
                placed += 1;
            }
        }
        placed
    }

    /// Ball indices in the 3×3 block of cells centered on `index`
    ///
    /// Cells past the grid edge are skipped.
    pub fn neighbors(&self, index: GridIndex) -> impl Iterator<Item = usize> + '_ {
        let (x, y) = index;
        (-1..=1)
            .flat_map(move |dx: i64| {
                (-1..=1).filter_map(move |dy: i64| Some((x.checked_add(dx)?, y.checked_add(dy)?)))
            })
            .flat_map(move |cell| self.cell(cell).iter().copied())
    }

    /// Number of ball indices currently bucketed
    pub fn len(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Vec::is_empty)
    }
}
