// Path Planning algorithms module

pub mod obstacle_set;
pub mod tree;
pub mod rrt;
pub mod grid_bfs;

pub use obstacle_set::*;
pub use tree::*;
pub use rrt::*;
pub use grid_bfs::*;
