//! Estimator traits and shared estimator errors.
//!
//! [`Learner`] is the train/predict seam every supervised estimator
//! implements; [`Probabilistic`] adds calibrated probability estimates.
//! Compatibility between a dataset and an estimator is the same check the
//! whole library uses: every feature column's type must appear in the
//! estimator's compatibility list.

use std::collections::BTreeMap;

use crate::data::{Dataset, DatasetError, Labeled, Value, ValueType};
use crate::tree::TreeError;

/// The kind of predictions an estimator makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimatorType {
    /// Predicts categorical outcomes.
    Classifier,
    /// Predicts continuous outcomes.
    Regressor,
}

/// Errors raised by estimator construction, training, and inference.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EstimatorError {
    /// Neighbor radius outside `(0, inf)`.
    #[error("radius must be greater than 0, {0} given")]
    InvalidRadius(f64),

    /// Prediction requested before a successful train.
    #[error("the estimator has not been trained")]
    Untrained,

    /// A feature column the estimator cannot consume.
    #[error("estimator is only compatible with {expected:?} features, column {column} is {got}")]
    IncompatibleDataset {
        column: usize,
        got: ValueType,
        expected: &'static [ValueType],
    },

    /// Labels of the wrong type for the estimator.
    #[error("estimator requires {expected} labels, {got} given")]
    IncompatibleLabels { expected: ValueType, got: ValueType },

    /// An ensemble with no members.
    #[error("committee must contain at least 1 expert, none given")]
    NoExperts,

    /// Influence count disagrees with the expert count.
    #[error("the number of influence values ({influences}) must equal the number of experts ({experts})")]
    InfluenceCountMismatch { influences: usize, experts: usize },

    /// Experts of differing estimator types in one ensemble.
    #[error("experts must all be of the same estimator type")]
    MixedExpertTypes,

    /// Experts with no feature type they can all consume.
    #[error("experts must have at least 1 data type in common that they are compatible with")]
    NoCommonCompatibility,

    /// An error surfaced by the spatial index.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// An error surfaced by the dataset layer.
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// Base estimator introspection.
pub trait Estimator {
    /// The kind of predictions this estimator makes.
    fn estimator_type(&self) -> EstimatorType;

    /// The feature data types this estimator can consume.
    fn compatibility(&self) -> &'static [ValueType];
}

/// A supervised estimator that learns from a labeled dataset.
pub trait Learner: Estimator {
    /// Has the learner been trained?
    fn trained(&self) -> bool;

    /// Train the learner with a dataset.
    fn train(&mut self, dataset: &Labeled) -> Result<(), EstimatorError>;

    /// Make a prediction for each row of a dataset.
    fn predict(&self, dataset: &Dataset) -> Result<Vec<Value>, EstimatorError>;
}

/// An estimator that can estimate a full probability distribution over the
/// class universe for every prediction.
pub trait Probabilistic: Learner {
    /// Estimate the probability of each possible outcome for each row.
    ///
    /// Every returned distribution covers the same class universe and sums
    /// to 1.
    fn proba(&self, dataset: &Dataset) -> Result<Vec<BTreeMap<String, f64>>, EstimatorError>;
}

/// Check that every feature column of a dataset is a type the estimator can
/// consume.
pub(crate) fn check_compatibility<E>(dataset: &Dataset, estimator: &E) -> Result<(), EstimatorError>
where
    E: Estimator + ?Sized,
{
    let expected = estimator.compatibility();

    for (column, value_type) in dataset.types().into_iter().enumerate() {
        if !expected.contains(&value_type) {
            return Err(EstimatorError::IncompatibleDataset {
                column,
                got: value_type,
                expected,
            });
        }
    }

    Ok(())
}
