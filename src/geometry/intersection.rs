//! Segment/segment intersection with vertical and parallel degeneracies

use crate::common::{Point2D, Segment};
use crate::geometry::line_form::{LineForm, EPSILON};

/// Check if `point` lies within the axis-aligned bounding box of `segment`,
/// inflated by `EPSILON` on every side.
pub fn within_bounds(segment: &Segment, point: &Point2D) -> bool {
    let (p, q) = (segment.a, segment.b);
    p.x.min(q.x) - EPSILON <= point.x
        && point.x <= p.x.max(q.x) + EPSILON
        && p.y.min(q.y) - EPSILON <= point.y
        && point.y <= p.y.max(q.y) + EPSILON
}

/// Check whether two segments intersect within their finite extents.
///
/// `first` is treated as the query edge and `second` as an authored
/// obstacle, which only matters for how verticality is detected.
pub fn segments_intersect(first: &Segment, second: &Segment) -> bool {
    edge_intersects(
        first,
        &LineForm::from_edge(first),
        second,
        &LineForm::from_segment(second),
    )
}

/// Intersection test with both line forms already computed.
pub fn edge_intersects(
    edge: &Segment,
    edge_form: &LineForm,
    obstacle: &Segment,
    obstacle_form: &LineForm,
) -> bool {
    let candidate = match (*edge_form, *obstacle_form) {
        (LineForm::Vertical { x: x1 }, LineForm::Vertical { x: x2 }) => {
            // Same vertical line: any shared y-range is a collision
            return (x1 - x2).abs() < EPSILON && y_ranges_overlap(edge, obstacle);
        }
        (LineForm::Vertical { x }, LineForm::Sloped { slope, intercept })
        | (LineForm::Sloped { slope, intercept }, LineForm::Vertical { x }) => {
            Point2D::new(x, slope * x + intercept)
        }
        (
            LineForm::Sloped { slope: a1, intercept: b1 },
            LineForm::Sloped { slope: a2, intercept: b2 },
        ) => {
            if (a1 - a2).abs() < EPSILON {
                return (b1 - b2).abs() < EPSILON && x_ranges_overlap(edge, obstacle);
            }
            let x = (b2 - b1) / (a1 - a2);
            Point2D::new(x, a1 * x + b1)
        }
    };

    within_bounds(edge, &candidate) && within_bounds(obstacle, &candidate)
}

fn y_ranges_overlap(s1: &Segment, s2: &Segment) -> bool {
    let (min1, max1) = (s1.a.y.min(s1.b.y), s1.a.y.max(s1.b.y));
    let (min2, max2) = (s2.a.y.min(s2.b.y), s2.a.y.max(s2.b.y));
    !(max1 < min2 || min1 > max2)
}

fn x_ranges_overlap(s1: &Segment, s2: &Segment) -> bool {
    let (min1, max1) = (s1.a.x.min(s1.b.x), s1.a.x.max(s1.b.x));
    let (min2, max2) = (s2.a.x.min(s2.b.x), s2.a.x.max(s2.b.x));
    max1 + EPSILON >= min2 && min1 - EPSILON <= max2
}
