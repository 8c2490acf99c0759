//! Append-only RRT tree and path reconstruction
//!
//! Nearest-neighbour lookup is a linear scan. For large workspaces a k-d
//! tree could replace it behind the same `nearest` signature.

use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::common::{Path2D, Point2D};

/// Node of the RRT tree
#[derive(Debug, Clone, PartialEq)]
pub struct RRTNode {
    pub x: f64,
    pub y: f64,
    /// Index of the parent node in the tree, `None` only for the root
    pub parent: Option<usize>,
    /// Accumulated path length from the root
    pub cost: f64,
}

impl RRTNode {
    pub fn new(x: f64, y: f64) -> Self {
        RRTNode {
            x,
            y,
            parent: None,
            cost: 0.0,
        }
    }

    pub fn from_point(point: Point2D) -> Self {
        Self::new(point.x, point.y)
    }

    pub fn to_point(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    pub fn distance_to(&self, point: &Point2D) -> f64 {
        self.to_point().distance(point)
    }
}

/// Tree of explored positions in discovery order; index 0 is the root
#[derive(Debug, Clone)]
pub struct RRTTree {
    nodes: Vec<RRTNode>,
}

impl RRTTree {
    pub fn new(root: Point2D) -> Self {
        RRTTree {
            nodes: vec![RRTNode::from_point(root)],
        }
    }

    /// Index of the node closest to `point`; ties go to the earliest node
    pub fn nearest(&self, point: &Point2D) -> usize {
        // position_min_by_key keeps the first of several equal minima
        self.nodes
            .iter()
            .position_min_by_key(|node| OrderedFloat(node.distance_to(point)))
            .unwrap_or(0)
    }

    /// Append a node whose parent is already in the tree, returning its index
    pub fn append(&mut self, node: RRTNode) -> usize {
        debug_assert!(
            matches!(node.parent, Some(p) if p < self.nodes.len()),
            "appended node must reference an existing parent"
        );
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn node(&self, index: usize) -> &RRTNode {
        &self.nodes[index]
    }

    pub fn root(&self) -> &RRTNode {
        &self.nodes[0]
    }

    pub fn nodes(&self) -> &[RRTNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false, the root is never removed
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn into_nodes(self) -> Vec<RRTNode> {
        self.nodes
    }

    /// Parent/child position pairs for every non-root node
    pub fn edges(&self) -> impl Iterator<Item = (Point2D, Point2D)> + '_ {
        self.nodes.iter().filter_map(move |node| {
            node.parent
                .map(|p| (self.nodes[p].to_point(), node.to_point()))
        })
    }
}

/// Walk parent links from `terminal` back to the root.
///
/// The returned path starts at the root and ends at `terminal`.
pub fn reconstruct_path(nodes: &[RRTNode], terminal: usize) -> Path2D {
    let mut points = Vec::new();
    let mut node_index = Some(terminal);

    while let Some(index) = node_index {
        let node = &nodes[index];
        points.push(node.to_point());
        node_index = node.parent;
    }

    points.reverse();
    Path2D::from_points(points)
}
