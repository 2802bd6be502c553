//! Cross validation of estimators.
//!
//! A [`Validator`] measures the generalization performance of a learner by
//! training and testing it on disjoint subsets of a labeled dataset and
//! scoring the predictions with a [`Metric`]. All metrics follow the
//! maximize convention: higher scores are better.

mod holdout;
mod metrics;

pub use holdout::HoldOut;
pub use metrics::{Accuracy, MeanSquaredError, Metric, RSquared, Rmse};

use crate::data::{DatasetError, Labeled};
use crate::estimator::{EstimatorError, Learner};

/// Errors raised while validating an estimator.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ValidationError {
    /// Hold out ratio outside the open unit interval.
    #[error("ratio must be strictly between 0 and 1, {0} given")]
    InvalidRatio(f64),

    /// Prediction and label counts disagree.
    #[error("the number of predictions ({predictions}) must equal the number of labels ({labels})")]
    LengthMismatch { predictions: usize, labels: usize },

    /// Scoring an empty prediction set.
    #[error("cannot score an empty set of predictions")]
    Empty,

    /// A regression metric fed a categorical outcome.
    #[error("metric requires continuous outcomes, found a categorical value at index {index}")]
    NonContinuousOutcome { index: usize },

    /// An error surfaced by the estimator under test.
    #[error(transparent)]
    Estimator(#[from] EstimatorError),

    /// An error surfaced by the dataset layer.
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// A technique for scoring how well an estimator generalizes.
pub trait Validator {
    /// Train and test the estimator on the dataset, returning a validation
    /// score.
    fn test(
        &self,
        estimator: &mut dyn Learner,
        dataset: &Labeled,
        metric: &dyn Metric,
    ) -> Result<f64, ValidationError>;
}
