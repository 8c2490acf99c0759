// Maze generation module

pub mod maze_generator;

pub use maze_generator::*;
