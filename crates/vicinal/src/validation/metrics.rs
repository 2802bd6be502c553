//! Validation metrics.

use crate::data::Value;
use crate::utils::EPSILON;
use crate::validation::ValidationError;

/// A scoring function over predictions and ground-truth labels.
///
/// Scores follow the maximize convention; error metrics output the negative
/// of the error so that higher is always better.
pub trait Metric {
    /// The output range of the metric as `(min, max)`.
    fn range(&self) -> (f64, f64);

    /// Score a set of predictions against their ground-truth labels.
    fn score(&self, predictions: &[Value], labels: &[Value]) -> Result<f64, ValidationError>;
}

fn check_lengths(predictions: &[Value], labels: &[Value]) -> Result<(), ValidationError> {
    if predictions.is_empty() {
        return Err(ValidationError::Empty);
    }

    if predictions.len() != labels.len() {
        return Err(ValidationError::LengthMismatch {
            predictions: predictions.len(),
            labels: labels.len(),
        });
    }

    Ok(())
}

fn continuous_pairs(
    predictions: &[Value],
    labels: &[Value],
) -> Result<Vec<(f64, f64)>, ValidationError> {
    predictions
        .iter()
        .zip(labels)
        .enumerate()
        .map(|(index, (prediction, label))| {
            match (prediction.as_continuous(), label.as_continuous()) {
                (Some(p), Some(l)) => Ok((p, l)),
                _ => Err(ValidationError::NonContinuousOutcome { index }),
            }
        })
        .collect()
}

/// The fraction of predictions that exactly match their label.
#[derive(Debug, Clone, Copy, Default)]
pub struct Accuracy;

impl Metric for Accuracy {
    fn range(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn score(&self, predictions: &[Value], labels: &[Value]) -> Result<f64, ValidationError> {
        check_lengths(predictions, labels)?;

        let correct = predictions
            .iter()
            .zip(labels)
            .filter(|(prediction, label)| prediction == label)
            .count();

        Ok(correct as f64 / predictions.len() as f64)
    }
}

/// The negated mean of the squared error residuals.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanSquaredError;

impl Metric for MeanSquaredError {
    fn range(&self) -> (f64, f64) {
        (f64::NEG_INFINITY, 0.0)
    }

    fn score(&self, predictions: &[Value], labels: &[Value]) -> Result<f64, ValidationError> {
        check_lengths(predictions, labels)?;

        let pairs = continuous_pairs(predictions, labels)?;

        let sum: f64 = pairs
            .iter()
            .map(|(prediction, label)| (prediction - label).powi(2))
            .sum();

        Ok(-(sum / pairs.len() as f64))
    }
}

/// The negated root mean squared error, the standard deviation of the error
/// residuals.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rmse;

impl Metric for Rmse {
    fn range(&self) -> (f64, f64) {
        (f64::NEG_INFINITY, 0.0)
    }

    fn score(&self, predictions: &[Value], labels: &[Value]) -> Result<f64, ValidationError> {
        let mse = MeanSquaredError.score(predictions, labels)?;

        Ok(-(-mse).sqrt())
    }
}

/// The coefficient of determination, the proportion of outcome variance
/// explained by the predictions.
#[derive(Debug, Clone, Copy, Default)]
pub struct RSquared;

impl Metric for RSquared {
    fn range(&self) -> (f64, f64) {
        (f64::NEG_INFINITY, 1.0)
    }

    fn score(&self, predictions: &[Value], labels: &[Value]) -> Result<f64, ValidationError> {
        check_lengths(predictions, labels)?;

        let pairs = continuous_pairs(predictions, labels)?;

        let mean: f64 = pairs.iter().map(|(_, label)| label).sum::<f64>() / pairs.len() as f64;

        let residual: f64 = pairs
            .iter()
            .map(|(prediction, label)| (label - prediction).powi(2))
            .sum();

        let total: f64 = pairs
            .iter()
            .map(|(_, label)| (label - mean).powi(2))
            .sum::<f64>()
            .max(EPSILON);

        Ok(1.0 - residual / total)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn continuous(values: &[f64]) -> Vec<Value> {
        values.iter().copied().map(Value::from).collect()
    }

    #[test]
    fn accuracy_counts_matches() {
        let predictions: Vec<Value> = vec!["a".into(), "b".into(), "a".into(), "a".into()];
        let labels: Vec<Value> = vec!["a".into(), "b".into(), "b".into(), "a".into()];

        assert_abs_diff_eq!(Accuracy.score(&predictions, &labels).unwrap(), 0.75);
    }

    #[test]
    fn perfect_predictions() {
        let outcomes = continuous(&[1.0, 2.0, 3.0]);

        assert_abs_diff_eq!(MeanSquaredError.score(&outcomes, &outcomes).unwrap(), 0.0);
        assert_abs_diff_eq!(Rmse.score(&outcomes, &outcomes).unwrap(), 0.0);
        assert_abs_diff_eq!(RSquared.score(&outcomes, &outcomes).unwrap(), 1.0);
    }

    #[test]
    fn mse_and_rmse_are_negated() {
        let predictions = continuous(&[1.0, 2.0]);
        let labels = continuous(&[3.0, 4.0]);

        let mse = MeanSquaredError.score(&predictions, &labels).unwrap();
        let rmse = Rmse.score(&predictions, &labels).unwrap();

        assert_abs_diff_eq!(mse, -4.0);
        assert_abs_diff_eq!(rmse, -2.0);
    }

    #[test]
    fn length_mismatch_rejected() {
        let predictions = continuous(&[1.0]);
        let labels = continuous(&[1.0, 2.0]);

        assert!(matches!(
            Accuracy.score(&predictions, &labels),
            Err(ValidationError::LengthMismatch { predictions: 1, labels: 2 })
        ));
    }

    #[test]
    fn empty_rejected() {
        assert!(matches!(
            Accuracy.score(&[], &[]),
            Err(ValidationError::Empty)
        ));
    }

    #[test]
    fn regression_metric_rejects_categorical() {
        let predictions: Vec<Value> = vec!["a".into()];
        let labels = continuous(&[1.0]);

        assert!(matches!(
            MeanSquaredError.score(&predictions, &labels),
            Err(ValidationError::NonContinuousOutcome { index: 0 })
        ));
    }
}
