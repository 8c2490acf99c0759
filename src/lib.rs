//! rrt_maze - RRT path planning through line-segment mazes
//!
//! This crate provides a sampling-based planner that grows a tree of
//! collision-free motions from a start point until it lands next to the
//! goal, together with a breadth-first grid solver, a maze generator and
//! gnuplot rendering for the results.

// Core modules
pub mod common;
pub mod geometry;
pub mod utils;

// Algorithm modules
pub mod mapping;
pub mod path_planning;

// Re-export common types for convenience
pub use common::{Point2D, Segment, Path2D, Grid, GridCell, GridSolution};
pub use common::{GridPathPlanner, Visualizable};
pub use common::{MazeError, MazeResult};
pub use path_planning::{RRTConfig, RRTPlanner, PlanResult, PlannerState};
