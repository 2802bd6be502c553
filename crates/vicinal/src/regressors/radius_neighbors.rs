//! Radius neighbors regressor.
//!
//! The regression counterpart of the radius neighbors classifier: the
//! prediction for a query point is the mean outcome of the training points
//! within the radius, optionally weighted by inverse distance. A query with
//! no neighbors predicts NaN, the regression analogue of the anomaly flag.

use log::info;
use serde::{Deserialize, Serialize};

use crate::data::{Dataset, Labeled, Value, ValueType};
use crate::estimator::{
    check_compatibility, Estimator, EstimatorError, EstimatorType, Learner,
};
use crate::kernels::Euclidean;
use crate::tree::{BallTree, Spatial};
use crate::utils::EPSILON;

/// A regressor that averages the outcomes of all training points within a
/// fixed radius of each query point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadiusNeighborsRegressor<T: Spatial = BallTree> {
    radius: f64,
    weighted: bool,
    tree: T,
}

impl RadiusNeighborsRegressor {
    /// Create a regressor with distance-weighted averaging over a default
    /// ball tree.
    ///
    /// # Errors
    ///
    /// Fails with [`EstimatorError::InvalidRadius`] unless `radius` is
    /// positive and finite.
    pub fn new(radius: f64) -> Result<Self, EstimatorError> {
        Self::with_tree(radius, true, BallTree::<Euclidean>::default())
    }
}

impl<T: Spatial> RadiusNeighborsRegressor<T> {
    /// Create a regressor over a caller-supplied spatial tree.
    pub fn with_tree(radius: f64, weighted: bool, tree: T) -> Result<Self, EstimatorError> {
        if radius <= 0.0 || !radius.is_finite() {
            return Err(EstimatorError::InvalidRadius(radius));
        }

        Ok(Self {
            radius,
            weighted,
            tree,
        })
    }

    /// The neighbor radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Are outcomes weighted by inverse distance?
    pub fn weighted(&self) -> bool {
        self.weighted
    }

    /// The underlying spatial tree.
    pub fn tree(&self) -> &T {
        &self.tree
    }
}

impl<T: Spatial> Estimator for RadiusNeighborsRegressor<T> {
    fn estimator_type(&self) -> EstimatorType {
        EstimatorType::Regressor
    }

    fn compatibility(&self) -> &'static [ValueType] {
        &[ValueType::Continuous]
    }
}

impl<T: Spatial> Learner for RadiusNeighborsRegressor<T> {
    fn trained(&self) -> bool {
        !self.tree.bare()
    }

    fn train(&mut self, dataset: &Labeled) -> Result<(), EstimatorError> {
        let label_type = dataset.label_type()?;

        if label_type != ValueType::Continuous {
            return Err(EstimatorError::IncompatibleLabels {
                expected: ValueType::Continuous,
                got: label_type,
            });
        }

        check_compatibility(dataset.dataset(), self)?;

        self.tree.grow(dataset)?;

        info!(
            "trained radius neighbors regressor on {} samples, radius {}",
            dataset.num_rows(),
            self.radius,
        );

        Ok(())
    }

    fn predict(&self, dataset: &Dataset) -> Result<Vec<Value>, EstimatorError> {
        if self.tree.bare() {
            return Err(EstimatorError::Untrained);
        }

        check_compatibility(dataset, self)?;

        let mut predictions = Vec::with_capacity(dataset.num_rows());

        for sample in dataset.continuous_samples()? {
            let result = self.tree.range(&sample, self.radius)?;

            if result.is_empty() {
                predictions.push(Value::from(f64::NAN));

                continue;
            }

            let mut numerator = 0.0;
            let mut denominator = 0.0;

            for (label, &distance) in result.labels().iter().zip(result.distances()) {
                let outcome = label.as_continuous().unwrap_or(f64::NAN);

                let weight = if self.weighted {
                    1.0 / (1.0 + distance)
                } else {
                    1.0
                };

                numerator += weight * outcome;
                denominator += weight;
            }

            predictions.push(Value::from(numerator / denominator.max(EPSILON)));
        }

        Ok(predictions)
    }
}
