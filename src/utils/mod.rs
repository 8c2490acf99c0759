//! Utility modules for rrt_maze

pub mod visualization;

pub use visualization::{Visualizer, PathStyle, PointStyle, colors};
