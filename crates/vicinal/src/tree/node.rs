//! Arena node storage for spatial trees.
//!
//! Nodes live in a flat arena and address each other by index, keeping the
//! grown tree free of pointer linkage so read-only traversals can run
//! concurrently.

use serde::{Deserialize, Serialize};

use crate::data::Value;

/// Index of a node within the tree arena.
pub(crate) type NodeId = u32;

/// A node of a grown ball tree.
///
/// Every node carries the centroid and bounding radius of the region it
/// encloses; the pruning test during range queries needs nothing else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) enum Node {
    /// An internal splitting node.
    Ball {
        centroid: Vec<f64>,
        radius: f64,
        left: NodeId,
        right: NodeId,
    },
    /// A terminal node holding the points of its region.
    Leaf {
        centroid: Vec<f64>,
        radius: f64,
        samples: Vec<Vec<f64>>,
        labels: Vec<Value>,
    },
}

impl Node {
    /// The centroid of the region this node encloses.
    pub fn centroid(&self) -> &[f64] {
        match self {
            Node::Ball { centroid, .. } | Node::Leaf { centroid, .. } => centroid,
        }
    }

    /// The bounding radius of the region this node encloses.
    pub fn radius(&self) -> f64 {
        match self {
            Node::Ball { radius, .. } | Node::Leaf { radius, .. } => *radius,
        }
    }
}
