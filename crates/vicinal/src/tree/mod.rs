//! Spatial trees for exact range queries.
//!
//! A spatial tree is grown once from a labeled dataset and then answers
//! radius-bounded range queries over the indexed points. Trees start out
//! *bare* and become *grown* after a successful [`Spatial::grow`];
//! retraining means regrowing from scratch.

mod ball;
mod node;

pub use ball::BallTree;

use serde::{Deserialize, Serialize};

use crate::data::{DatasetError, Labeled, Value};

/// Errors raised by spatial tree construction and queries.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TreeError {
    /// A query against a tree that has not been grown.
    #[error("the spatial index has not been grown")]
    Untrained,

    /// Leaf threshold below 1.
    #[error("leaf size must be at least 1, {0} given")]
    InvalidLeafSize(usize),

    /// Growing from a dataset with no rows.
    #[error("cannot grow a spatial tree from an empty dataset")]
    EmptyDataset,

    /// A negative or non-finite search radius.
    #[error("search radius must be finite and non-negative, {0} given")]
    InvalidRadius(f64),

    /// A dataset error surfaced while partitioning or extracting points.
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// The result of a range query: parallel sequences of matched samples,
/// their labels, and their distances to the query point.
///
/// Entry order is implementation defined. An empty result is valid and
/// means the query point has no neighbors within the radius.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeQueryResult {
    samples: Vec<Vec<f64>>,
    labels: Vec<Value>,
    distances: Vec<f64>,
}

impl RangeQueryResult {
    /// The matched samples.
    pub fn samples(&self) -> &[Vec<f64>] {
        &self.samples
    }

    /// The labels of the matched samples.
    pub fn labels(&self) -> &[Value] {
        &self.labels
    }

    /// The distance from the query point to each matched sample.
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Number of neighbors found.
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Were no neighbors found?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Decompose into `(samples, labels, distances)`.
    pub fn into_parts(self) -> (Vec<Vec<f64>>, Vec<Value>, Vec<f64>) {
        (self.samples, self.labels, self.distances)
    }

    pub(crate) fn push(&mut self, sample: Vec<f64>, label: Value, distance: f64) {
        self.samples.push(sample);
        self.labels.push(label);
        self.distances.push(distance);
    }
}

/// A spatial index over a labeled dataset.
pub trait Spatial {
    /// Grow the tree from a labeled dataset, replacing any previous index.
    ///
    /// # Errors
    ///
    /// Fails if the dataset is empty or contains categorical feature
    /// columns.
    fn grow(&mut self, dataset: &Labeled) -> Result<(), TreeError>;

    /// True until a `grow` call has succeeded.
    fn bare(&self) -> bool;

    /// The longest root-to-leaf path length, 0 for a bare tree.
    fn height(&self) -> usize;

    /// Every indexed point within `radius` of the query point.
    ///
    /// # Errors
    ///
    /// Fails with [`TreeError::Untrained`] on a bare tree or
    /// [`TreeError::InvalidRadius`] on a negative radius.
    fn range(&self, sample: &[f64], radius: f64) -> Result<RangeQueryResult, TreeError>;
}
