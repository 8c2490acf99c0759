//! Error types for rrt_maze

use thiserror::Error;

/// Main error type for the planner and its grid collaborators
#[derive(Debug, Error)]
pub enum MazeError {
    /// Planner constructed with an unusable parameter
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// Grid collaborator given bad dimensions or coordinates
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),
    /// Visualization error
    #[error("Visualization error: {0}")]
    Visualization(String),
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for planner operations
pub type MazeResult<T> = Result<T, MazeError>;
