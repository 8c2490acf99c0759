//! Fixed set of segment obstacles with cached line forms

use crate::common::{Point2D, Segment};
use crate::geometry::{edge_intersects, LineForm};

/// Obstacle segments and their line forms, index-aligned.
///
/// Built once; there is no way to mutate the segments afterwards, so the
/// cached forms always match.
#[derive(Debug, Clone)]
pub struct ObstacleSet {
    segments: Vec<Segment>,
    line_forms: Vec<LineForm>,
}

impl ObstacleSet {
    pub fn new(segments: Vec<Segment>) -> Self {
        let line_forms = segments.iter().map(LineForm::from_segment).collect();
        ObstacleSet { segments, line_forms }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segment(&self, index: usize) -> &Segment {
        &self.segments[index]
    }

    pub fn line_form(&self, index: usize) -> &LineForm {
        &self.line_forms[index]
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Index of the first obstacle the edge `from -> to` hits, if any
    pub fn first_collision(&self, from: Point2D, to: Point2D) -> Option<usize> {
        let edge = Segment::new(from, to);
        let edge_form = LineForm::from_edge(&edge);

        self.segments
            .iter()
            .zip(self.line_forms.iter())
            .position(|(segment, form)| edge_intersects(&edge, &edge_form, segment, form))
    }

    /// Check if the edge `from -> to` stays clear of every obstacle
    pub fn is_edge_free(&self, from: Point2D, to: Point2D) -> bool {
        self.first_collision(from, to).is_none()
    }
}

impl From<Vec<Segment>> for ObstacleSet {
    fn from(segments: Vec<Segment>) -> Self {
        Self::new(segments)
    }
}
