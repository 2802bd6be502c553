//! Radius neighbors classifier.
//!
//! A spatial tree based classifier that takes the weighted vote of every
//! neighbor within a fixed radius. Because the search is bounded, it is more
//! robust to outliers than a k-nearest-neighbors vote, and it doubles as a
//! quasi anomaly detector: samples with no neighbors inside the radius are
//! assigned a dedicated anomaly class.

use std::collections::BTreeMap;

use log::info;
use serde::{Deserialize, Serialize};

use crate::data::{Dataset, Labeled, Value, ValueType};
use crate::estimator::{
    check_compatibility, Estimator, EstimatorError, EstimatorType, Learner, Probabilistic,
};
use crate::kernels::Euclidean;
use crate::tree::{BallTree, Spatial};
use crate::utils::{argmax, EPSILON};

/// Class assigned to samples with no neighbors within the radius.
const DEFAULT_ANOMALY_CLASS: &str = "outlier";

/// A classifier that votes among all training points within a fixed radius
/// of each query point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadiusNeighbors<T: Spatial = BallTree> {
    radius: f64,
    weighted: bool,
    anomaly_class: String,
    classes: Vec<String>,
    tree: T,
}

impl RadiusNeighbors {
    /// Create a classifier with distance-weighted voting over a default
    /// ball tree.
    ///
    /// # Errors
    ///
    /// Fails with [`EstimatorError::InvalidRadius`] unless `radius` is
    /// positive and finite.
    pub fn new(radius: f64) -> Result<Self, EstimatorError> {
        Self::with_tree(radius, true, BallTree::<Euclidean>::default(), DEFAULT_ANOMALY_CLASS)
    }
}

impl<T: Spatial> RadiusNeighbors<T> {
    /// Create a classifier over a caller-supplied spatial tree.
    ///
    /// The anomaly class is trimmed of surrounding whitespace.
    pub fn with_tree(
        radius: f64,
        weighted: bool,
        tree: T,
        anomaly_class: &str,
    ) -> Result<Self, EstimatorError> {
        if radius <= 0.0 || !radius.is_finite() {
            return Err(EstimatorError::InvalidRadius(radius));
        }

        Ok(Self {
            radius,
            weighted,
            anomaly_class: anomaly_class.trim().to_string(),
            classes: Vec::new(),
            tree,
        })
    }

    /// The neighbor radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Are votes weighted by inverse distance?
    pub fn weighted(&self) -> bool {
        self.weighted
    }

    /// The class assigned to zero-neighbor samples.
    pub fn anomaly_class(&self) -> &str {
        &self.anomaly_class
    }

    /// The class universe observed at training time, anomaly class included.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// The underlying spatial tree.
    pub fn tree(&self) -> &T {
        &self.tree
    }

    /// Accumulate a vote weight per distinct neighbor label.
    fn vote(&self, labels: &[Value], distances: &[f64]) -> BTreeMap<String, f64> {
        let mut weights: BTreeMap<String, f64> = BTreeMap::new();

        for (label, &distance) in labels.iter().zip(distances) {
            let weight = if self.weighted {
                1.0 / (1.0 + distance)
            } else {
                1.0
            };

            *weights.entry(label.to_string()).or_insert(0.0) += weight;
        }

        weights
    }
}

impl<T: Spatial> Estimator for RadiusNeighbors<T> {
    fn estimator_type(&self) -> EstimatorType {
        EstimatorType::Classifier
    }

    fn compatibility(&self) -> &'static [ValueType] {
        &[ValueType::Continuous]
    }
}

impl<T: Spatial> Learner for RadiusNeighbors<T> {
    fn trained(&self) -> bool {
        !self.tree.bare()
    }

    fn train(&mut self, dataset: &Labeled) -> Result<(), EstimatorError> {
        let label_type = dataset.label_type()?;

        if label_type != ValueType::Categorical {
            return Err(EstimatorError::IncompatibleLabels {
                expected: ValueType::Categorical,
                got: label_type,
            });
        }

        check_compatibility(dataset.dataset(), self)?;

        let mut classes: Vec<String> = dataset
            .possible_outcomes()
            .iter()
            .map(Value::to_string)
            .collect();

        if !classes.contains(&self.anomaly_class) {
            classes.push(self.anomaly_class.clone());
        }

        self.tree.grow(dataset)?;

        self.classes = classes;

        info!(
            "trained radius neighbors on {} samples, {} classes, radius {}",
            dataset.num_rows(),
            self.classes.len(),
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
                predictions.push(Value::from(self.anomaly_class.clone()));

                continue;
            }

            let weights = self.vote(result.labels(), result.distances());

            let prediction = match argmax(&weights) {
                Some(class) => class.clone(),
                None => self.anomaly_class.clone(),
            };

            predictions.push(Value::from(prediction));
        }

        Ok(predictions)
    }
}

impl<T: Spatial> Probabilistic for RadiusNeighbors<T> {
    fn proba(&self, dataset: &Dataset) -> Result<Vec<BTreeMap<String, f64>>, EstimatorError> {
        if self.tree.bare() {
            return Err(EstimatorError::Untrained);
        }

        check_compatibility(dataset, self)?;

        let template: BTreeMap<String, f64> = self
            .classes
            .iter()
            .map(|class| (class.clone(), 0.0))
            .collect();

        let mut probabilities = Vec::with_capacity(dataset.num_rows());

        for sample in dataset.continuous_samples()? {
            let result = self.tree.range(&sample, self.radius)?;

            let mut distribution = template.clone();

            if result.is_empty() {
                distribution.insert(self.anomaly_class.clone(), 1.0);

                probabilities.push(distribution);

                continue;
            }

            let weights = self.vote(result.labels(), result.distances());

            let total: f64 = weights.values().sum::<f64>().max(EPSILON);

            for (class, weight) in weights {
                distribution.insert(class, weight / total);
            }

            probabilities.push(distribution);
        }

        Ok(probabilities)
    }
}
