//! Common traits shared by planners and renderers

use crate::common::error::MazeResult;
use crate::common::types::*;

/// Trait for grid-based path planning algorithms
pub trait GridPathPlanner {
    /// Plan a path on the grid from start to goal.
    ///
    /// `Ok(None)` means the goal is not reachable; errors are reserved for
    /// coordinates outside the grid.
    fn plan(&self, start: GridCell, goal: GridCell) -> MazeResult<Option<GridSolution>>;
}

/// Trait for visualizable algorithms
pub trait Visualizable {
    /// Draw current state to visualizer
    fn visualize(&self, vis: &mut crate::utils::Visualizer);
}
