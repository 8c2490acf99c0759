//! Common types used throughout rrt_maze

use itertools::Itertools;
use nalgebra::{DMatrix, Vector2};

/// 2D point representation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn distance(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn to_vector(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from(tuple: (f64, f64)) -> Self {
        Self { x: tuple.0, y: tuple.1 }
    }
}

impl From<Vector2<f64>> for Point2D {
    fn from(v: Vector2<f64>) -> Self {
        Self { x: v[0], y: v[1] }
    }
}

/// Obstacle boundary edge between two endpoints.
///
/// Endpoint order has no geometric meaning but is kept as authored so
/// obstacles can be reported back unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Point2D,
    pub b: Point2D,
}

impl Segment {
    pub fn new(a: Point2D, b: Point2D) -> Self {
        Self { a, b }
    }

    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            a: Point2D::new(x1, y1),
            b: Point2D::new(x2, y2),
        }
    }

    pub fn length(&self) -> f64 {
        self.a.distance(&self.b)
    }
}

impl From<((f64, f64), (f64, f64))> for Segment {
    fn from(ends: ((f64, f64), (f64, f64))) -> Self {
        Self {
            a: ends.0.into(),
            b: ends.1.into(),
        }
    }
}

/// Path represented as a sequence of 2D points
#[derive(Debug, Clone, PartialEq)]
pub struct Path2D {
    pub points: Vec<Point2D>,
}

impl Path2D {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn from_points(points: Vec<Point2D>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Point2D> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point2D> {
        self.points.last()
    }

    pub fn x_coords(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    pub fn y_coords(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    pub fn total_length(&self) -> f64 {
        self.points
            .iter()
            .tuple_windows()
            .map(|(a, b)| a.distance(b))
            .sum()
    }
}

impl Default for Path2D {
    fn default() -> Self {
        Self::new()
    }
}

/// Cell coordinate on a 0/1 grid, row first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
}

impl GridCell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for GridCell {
    fn from(rc: (usize, usize)) -> Self {
        Self { row: rc.0, col: rc.1 }
    }
}

/// Occupancy grid, `0` is free and anything else is wall
pub type Grid = DMatrix<u8>;

/// Result of a grid search
#[derive(Debug, Clone, PartialEq)]
pub struct GridSolution {
    /// Start to goal, both included
    pub path: Vec<GridCell>,
    /// Cells in the order the search expanded them
    pub explored: Vec<GridCell>,
}
