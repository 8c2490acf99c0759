//! Slope-intercept form of line segments
//!
//! Obstacle segments are converted once and reused for every collision
//! query; candidate edges are converted per query.

use crate::common::Segment;

/// Absolute tolerance for every zero and equality comparison in the kernel
pub const EPSILON: f64 = 1e-6;

/// Infinite line through a segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineForm {
    /// `y = slope * x + intercept`
    Sloped { slope: f64, intercept: f64 },
    /// `x = x`
    Vertical { x: f64 },
}

impl LineForm {
    /// Line form of an authored obstacle segment.
    ///
    /// Obstacles are fixed input data, so a vertical segment is detected by
    /// exact equality of the endpoint x-coordinates.
    pub fn from_segment(segment: &Segment) -> Self {
        let (p, q) = (segment.a, segment.b);
        if p.x == q.x {
            LineForm::Vertical { x: p.x }
        } else {
            Self::sloped(segment)
        }
    }

    /// Line form of a steered candidate edge.
    ///
    /// Edge endpoints come out of floating point steering, so anything
    /// within `EPSILON` of vertical (including a zero-length edge) is
    /// treated as vertical.
    pub fn from_edge(edge: &Segment) -> Self {
        let (p, q) = (edge.a, edge.b);
        if (p.x - q.x).abs() < EPSILON {
            LineForm::Vertical { x: p.x }
        } else {
            Self::sloped(edge)
        }
    }

    fn sloped(segment: &Segment) -> Self {
        let (p, q) = (segment.a, segment.b);
        let slope = (p.y - q.y) / (p.x - q.x);
        LineForm::Sloped {
            slope,
            intercept: p.y - slope * p.x,
        }
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self, LineForm::Vertical { .. })
    }

    /// y-coordinate of the line at `x`, `None` for vertical lines
    pub fn y_at(&self, x: f64) -> Option<f64> {
        match *self {
            LineForm::Sloped { slope, intercept } => Some(slope * x + intercept),
            LineForm::Vertical { .. } => None,
        }
    }
}
