//! Common types, traits, and error definitions for rrt_maze
//!
//! This module provides the foundational building blocks shared by the
//! planner, its grid collaborators and the renderer.

pub mod types;
pub mod traits;
pub mod error;

pub use types::*;
pub use traits::*;
pub use error::*;
