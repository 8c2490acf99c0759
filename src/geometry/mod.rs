//! Geometry kernel for segment obstacles
//!
//! Converts segments to line equations and decides whether two segments
//! intersect within their finite extents, tolerating vertical, parallel
//! and degenerate inputs.

pub mod line_form;
pub mod intersection;

pub use line_form::*;
pub use intersection::*;
