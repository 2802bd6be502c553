//! Committee machine voting ensemble.
//!
//! A committee aggregates the predictions of heterogeneous same-type experts
//! using normalized influence values. Expert training and prediction are
//! independent units of work and fan out over the rayon pool when parallel
//! execution is enabled; each individual expert call stays a plain
//! synchronous computation.
//!
//! References:
//! [1] H. Drucker. (1997). Fast Committee Machines for Regression and
//! Classification.

use std::collections::BTreeMap;

use log::info;

use crate::data::{Dataset, Labeled, Value, ValueType};
use crate::estimator::{
    check_compatibility, Estimator, EstimatorError, EstimatorType, Learner,
};
use crate::utils::{argmax, Parallelism, EPSILON};

/// A boxed committee member.
pub type Expert = Box<dyn Learner + Send + Sync>;

/// A voting ensemble of same-type experts with influence-weighted
/// aggregation.
pub struct CommitteeMachine {
    experts: Vec<Expert>,
    influences: Vec<f64>,
    estimator_type: EstimatorType,
    compatibility: &'static [ValueType],
    classes: Vec<String>,
    parallelism: Parallelism,
}

impl CommitteeMachine {
    /// Create a committee from experts and optional influence values.
    ///
    /// Influences may be arbitrary non-negative magnitudes; they are
    /// normalized to sum to 1. When omitted, every expert gets equal
    /// influence.
    pub fn new(experts: Vec<Expert>, influences: Option<Vec<f64>>) -> Result<Self, EstimatorError> {
        let k = experts.len();

        if k < 1 {
            return Err(EstimatorError::NoExperts);
        }

        let estimator_type = experts[0].estimator_type();

        if experts
            .iter()
            .any(|expert| expert.estimator_type() != estimator_type)
        {
            return Err(EstimatorError::MixedExpertTypes);
        }

        let influences = match influences {
            Some(mut influences) => {
                if influences.len() != k {
                    return Err(EstimatorError::InfluenceCountMismatch {
                        influences: influences.len(),
                        experts: k,
                    });
                }

                let total: f64 = influences.iter().sum::<f64>().max(EPSILON);

                for influence in influences.iter_mut() {
                    *influence /= total;
                }

                influences
            }
            None => vec![1.0 / k as f64; k],
        };

        let categorical = experts
            .iter()
            .all(|expert| expert.compatibility().contains(&ValueType::Categorical));
        let continuous = experts
            .iter()
            .all(|expert| expert.compatibility().contains(&ValueType::Continuous));

        let compatibility: &'static [ValueType] = match (categorical, continuous) {
            (true, true) => &[ValueType::Categorical, ValueType::Continuous],
            (true, false) => &[ValueType::Categorical],
            (false, true) => &[ValueType::Continuous],
            (false, false) => return Err(EstimatorError::NoCommonCompatibility),
        };

        Ok(Self {
            experts,
            influences,
            estimator_type,
            compatibility,
            classes: Vec::new(),
            parallelism: Parallelism::Sequential,
        })
    }

    /// Allow expert training and prediction to fan out over the rayon pool.
    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// The committee members.
    pub fn experts(&self) -> &[Expert] {
        &self.experts
    }

    /// The normalized influence of each expert.
    pub fn influences(&self) -> &[f64] {
        &self.influences
    }

    /// Decide on a class outcome from one vote per expert.
    fn decide_class(&self, votes: &[&Value]) -> Value {
        let mut scores: BTreeMap<String, f64> = self
            .classes
            .iter()
            .map(|class| (class.clone(), 0.0))
            .collect();

        for (expert, vote) in votes.iter().enumerate() {
            *scores.entry(vote.to_string()).or_insert(0.0) += self.influences[expert];
        }

        match argmax(&scores) {
            Some(class) => Value::from(class.clone()),
            None => (*votes[0]).clone(),
        }
    }

    /// Decide on a real valued outcome from one vote per expert.
    fn decide_value(&self, votes: &[&Value]) -> Value {
        let mut numerator = 0.0;
        let mut denominator = 0.0;

        for (expert, vote) in votes.iter().enumerate() {
            let outcome = vote.as_continuous().unwrap_or(f64::NAN);

            numerator += self.influences[expert] * outcome;
            denominator += self.influences[expert];
        }

        Value::from(numerator / denominator.max(EPSILON))
    }
}

impl Estimator for CommitteeMachine {
    fn estimator_type(&self) -> EstimatorType {
        self.estimator_type
    }

    fn compatibility(&self) -> &'static [ValueType] {
        self.compatibility
    }
}

impl Learner for CommitteeMachine {
    fn trained(&self) -> bool {
        self.experts.first().is_some_and(|expert| expert.trained())
    }

    fn train(&mut self, dataset: &Labeled) -> Result<(), EstimatorError> {
        check_compatibility(dataset.dataset(), self)?;

        info!(
            "training committee of {} experts over {} samples",
            self.experts.len(),
            dataset.num_rows(),
        );

        let results = self
            .parallelism
            .maybe_par_map(self.experts.as_mut_slice(), |expert| expert.train(dataset));

        for result in results {
            result?;
        }

        if self.estimator_type == EstimatorType::Classifier {
            self.classes = dataset
                .possible_outcomes()
                .iter()
                .map(Value::to_string)
                .collect();
        }

        Ok(())
    }

    fn predict(&self, dataset: &Dataset) -> Result<Vec<Value>, EstimatorError> {
        if !self.trained() {
            return Err(EstimatorError::Untrained);
        }

        let results = self
            .parallelism
            .maybe_par_map(self.experts.as_slice(), |expert| expert.predict(dataset));

        let mut aggregate = Vec::with_capacity(results.len());

        for result in results {
            aggregate.push(result?);
        }

        let predictions = (0..dataset.num_rows())
            .map(|row| {
                let votes: Vec<&Value> = aggregate.iter().map(|expert| &expert[row]).collect();

                match self.estimator_type {
                    EstimatorType::Classifier => self.decide_class(&votes),
                    EstimatorType::Regressor => self.decide_value(&votes),
                }
            })
            .collect();

        Ok(predictions)
    }
}
