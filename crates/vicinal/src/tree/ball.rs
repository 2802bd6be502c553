//! Ball tree spatial index.
//!
//! The tree recursively encloses regions of the training set in bounding
//! balls. Each split picks two pole points of the current region and hands
//! the rows to [`Labeled::spatial_partition`]; regions at or below the leaf
//! threshold, or regions that no longer shrink, become leaves holding their
//! points. Range queries descend only into subtrees whose bounding ball can
//! intersect the search ball.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::data::{Labeled, ValueType};
use crate::kernels::{Distance, Euclidean};
use crate::tree::node::{Node, NodeId};
use crate::tree::{RangeQueryResult, Spatial, TreeError};

/// Default maximum number of points held by a leaf.
const DEFAULT_LEAF_SIZE: usize = 30;

/// A ball tree for exact radius-bounded neighbor search.
///
/// Grown once per training call and never updated incrementally; growing
/// again replaces the whole index. Queries take `&self` and may run
/// concurrently with each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallTree<K: Distance = Euclidean> {
    leaf_size: usize,
    kernel: K,
    nodes: Vec<Node>,
    height: usize,
}

impl Default for BallTree<Euclidean> {
    fn default() -> Self {
        Self {
            leaf_size: DEFAULT_LEAF_SIZE,
            kernel: Euclidean,
            nodes: Vec::new(),
            height: 0,
        }
    }
}

impl<K: Distance> BallTree<K> {
    /// Create a bare ball tree with the given leaf threshold and distance
    /// kernel.
    ///
    /// # Errors
    ///
    /// Fails with [`TreeError::InvalidLeafSize`] if `leaf_size` is 0.
    pub fn new(leaf_size: usize, kernel: K) -> Result<Self, TreeError> {
        if leaf_size < 1 {
            return Err(TreeError::InvalidLeafSize(leaf_size));
        }

        Ok(Self {
            leaf_size,
            kernel,
            nodes: Vec::new(),
            height: 0,
        })
    }

    /// The maximum number of points a leaf may hold.
    pub fn leaf_size(&self) -> usize {
        self.leaf_size
    }

    /// The distance kernel measuring the space.
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Number of nodes in the arena.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// The centroid and bounding radius enclosing a set of points.
    fn enclose(&self, points: &[Vec<f64>]) -> (Vec<f64>, f64) {
        let dimensions = points.first().map_or(0, Vec::len);

        let mut centroid = vec![0.0; dimensions];

        for point in points {
            for (sum, value) in centroid.iter_mut().zip(point) {
                *sum += value;
            }
        }

        for sum in centroid.iter_mut() {
            *sum /= points.len() as f64;
        }

        let radius = points
            .iter()
            .map(|point| self.kernel.compute(&centroid, point))
            .fold(0.0, f64::max);

        (centroid, radius)
    }

    /// The point of a region farthest from `from`, ties to the lowest row.
    fn farthest<'a>(&self, points: &'a [Vec<f64>], from: &[f64]) -> &'a [f64] {
        let mut best = 0;
        let mut best_distance = f64::NEG_INFINITY;

        for (index, point) in points.iter().enumerate() {
            let distance = self.kernel.compute(from, point);

            if distance > best_distance {
                best = index;
                best_distance = distance;
            }
        }

        &points[best]
    }

    /// Recursively grow the subtree for a region, returning its arena index
    /// and height.
    fn grow_region(
        &self,
        dataset: Labeled,
        nodes: &mut Vec<Node>,
    ) -> Result<(NodeId, usize), TreeError> {
        let points = dataset.dataset().continuous_samples()?;

        let (centroid, radius) = self.enclose(&points);

        if dataset.num_rows() > self.leaf_size {
            let left_pole = self.farthest(&points, &centroid).to_vec();
            let right_pole = self.farthest(&points, &left_pole).to_vec();

            let (left, right) =
                dataset.spatial_partition(&left_pole, &right_pole, &self.kernel)?;

            // A one-sided partition means every point is coincident with the
            // poles; the region's radius cannot shrink any further.
            if !left.is_empty() && !right.is_empty() {
                let id = nodes.len() as NodeId;

                nodes.push(Node::Ball {
                    centroid,
                    radius,
                    left: 0,
                    right: 0,
                });

                let (left_id, left_height) = self.grow_region(left, nodes)?;
                let (right_id, right_height) = self.grow_region(right, nodes)?;

                if let Node::Ball { left, right, .. } = &mut nodes[id as usize] {
                    *left = left_id;
                    *right = right_id;
                }

                return Ok((id, 1 + left_height.max(right_height)));
            }
        }

        let id = nodes.len() as NodeId;

        nodes.push(Node::Leaf {
            centroid,
            radius,
            samples: points,
            labels: dataset.labels().to_vec(),
        });

        Ok((id, 1))
    }
}

impl<K: Distance> Spatial for BallTree<K> {
    fn grow(&mut self, dataset: &Labeled) -> Result<(), TreeError> {
        if dataset.is_empty() {
            return Err(TreeError::EmptyDataset);
        }

        for (column, value_type) in dataset.dataset().types().into_iter().enumerate() {
            if value_type != ValueType::Continuous {
                return Err(TreeError::Dataset(
                    crate::data::DatasetError::NonContinuous { column },
                ));
            }
        }

        let mut nodes = Vec::new();

        let (_, height) = self.grow_region(dataset.clone(), &mut nodes)?;

        self.nodes = nodes;
        self.height = height;

        debug!(
            "grew ball tree over {} points: {} nodes, height {}",
            dataset.num_rows(),
            self.nodes.len(),
            self.height,
        );

        Ok(())
    }

    fn bare(&self) -> bool {
        self.nodes.is_empty()
    }

    fn height(&self) -> usize {
        self.height
    }

    fn range(&self, sample: &[f64], radius: f64) -> Result<RangeQueryResult, TreeError> {
        if self.bare() {
            return Err(TreeError::Untrained);
        }

        if radius < 0.0 || !radius.is_finite() {
            return Err(TreeError::InvalidRadius(radius));
        }

        let mut result = RangeQueryResult::default();

        let mut stack: Vec<NodeId> = vec![0];

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id as usize];

            // A subtree whose bounding ball lies entirely outside the search
            // ball cannot contain a match.
            if self.kernel.compute(sample, node.centroid()) > radius + node.radius() {
                continue;
            }

            match node {
                Node::Ball { left, right, .. } => {
                    stack.push(*left);
                    stack.push(*right);
                }
                Node::Leaf {
                    samples, labels, ..
                } => {
                    for (point, label) in samples.iter().zip(labels) {
                        let distance = self.kernel.compute(sample, point);

                        if distance <= radius {
                            result.push(point.clone(), label.clone(), distance);
                        }
                    }
                }
            }
        }

        Ok(result)
    }
}
