//! Hold out validation.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::data::{Labeled, ValueType};
use crate::estimator::Learner;
use crate::validation::{Metric, ValidationError, Validator};

/// Validates an estimator against a testing set *held out* from the
/// training data.
///
/// Quick, at the cost of never training on the full dataset. Datasets with
/// categorical labels are split stratified so both sides keep the full class
/// mix.
#[derive(Debug, Clone, Copy)]
pub struct HoldOut {
    ratio: f64,
    seed: u64,
}

impl HoldOut {
    /// Create a validator holding out `ratio` of the rows for testing.
    pub fn new(ratio: f64) -> Result<Self, ValidationError> {
        if ratio <= 0.0 || ratio >= 1.0 {
            return Err(ValidationError::InvalidRatio(ratio));
        }

        Ok(Self { ratio, seed: 42 })
    }

    /// Reseed the shuffle for a different train/test assignment.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// The ratio of rows held out for testing.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }
}

impl Validator for HoldOut {
    fn test(
        &self,
        estimator: &mut dyn Learner,
        dataset: &Labeled,
        metric: &dyn Metric,
    ) -> Result<f64, ValidationError> {
        let mut rng = StdRng::seed_from_u64(self.seed);

        let shuffled = dataset.randomize(&mut rng);

        let (testing, training) = if shuffled.label_type()? == ValueType::Categorical {
            shuffled.stratified_split(self.ratio)?
        } else {
            shuffled.split(self.ratio)?
        };

        estimator.train(&training)?;

        let predictions = estimator.predict(testing.dataset())?;

        metric.score(&predictions, testing.labels())
    }
}

#[cfg(test)]
mod tests {
    use rand::prelude::*;

    use super::*;
    use crate::classifiers::RadiusNeighbors;
    use crate::data::Value;
    use crate::regressors::RadiusNeighborsRegressor;
    use crate::validation::{Accuracy, RSquared};

    #[test]
    fn ratio_validated() {
        assert!(matches!(
            HoldOut::new(0.0),
            Err(ValidationError::InvalidRatio(_))
        ));
        assert!(matches!(
            HoldOut::new(1.0),
            Err(ValidationError::InvalidRatio(_))
        ));
    }

    #[test]
    fn scores_separable_classification() {
        let mut rng = StdRng::seed_from_u64(3);

        let mut samples = Vec::new();
        let mut labels = Vec::new();

        for _ in 0..40 {
            let near: f64 = rng.gen();
            samples.push(vec![near.into(), near.into()]);
            labels.push(Value::from("near"));

            let far: f64 = 20.0 + rng.gen::<f64>();
            samples.push(vec![far.into(), far.into()]);
            labels.push(Value::from("far"));
        }

        let dataset = Labeled::new(samples, labels).unwrap();

        let mut estimator = RadiusNeighbors::new(3.0).unwrap();

        let score = HoldOut::new(0.2)
            .unwrap()
            .test(&mut estimator, &dataset, &Accuracy)
            .unwrap();

        assert!(score >= 0.9, "expected separable clusters, got {}", score);
    }

    #[test]
    fn scores_smooth_regression() {
        let mut rng = StdRng::seed_from_u64(5);

        let mut samples = Vec::new();
        let mut labels = Vec::new();

        for _ in 0..100 {
            let x: f64 = rng.gen::<f64>() * 10.0;
            samples.push(vec![x.into()]);
            labels.push(Value::from(3.0 * x));
        }

        let dataset = Labeled::new(samples, labels).unwrap();

        let mut estimator = RadiusNeighborsRegressor::new(2.0).unwrap();

        let score = HoldOut::new(0.2)
            .unwrap()
            .test(&mut estimator, &dataset, &RSquared)
            .unwrap();

        assert!(score >= 0.8, "expected a good fit, got {}", score);
    }
}
