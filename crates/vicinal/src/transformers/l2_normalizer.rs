//! L2 vector normalization.

use serde::{Deserialize, Serialize};

use crate::data::{Value, ValueType};
use crate::transformers::{Transformer, TransformerError};
use crate::utils::EPSILON;

/// Divides each sample vector by its L2 norm so every row has unit
/// magnitude. Stateless; requires all-continuous features.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct L2Normalizer;

impl Transformer for L2Normalizer {
    fn compatibility(&self) -> &'static [ValueType] {
        &[ValueType::Continuous]
    }

    fn transform(&self, samples: &mut Vec<Vec<Value>>) -> Result<(), TransformerError> {
        for sample in samples.iter_mut() {
            let norm: f64 = sample
                .iter()
                .filter_map(Value::as_continuous)
                .map(|number| number * number)
                .sum();

            let norm = norm.max(EPSILON).sqrt();

            for value in sample.iter_mut() {
                if let Value::Continuous(number) = value {
                    *number /= norm;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::data::Dataset;

    #[test]
    fn rows_have_unit_norm() {
        let mut dataset = Dataset::new(vec![
            vec![3.0.into(), 4.0.into()],
            vec![1.0.into(), 0.0.into()],
        ])
        .unwrap();

        dataset.apply(&mut L2Normalizer).unwrap();

        assert_abs_diff_eq!(dataset.row(0)[0].as_continuous().unwrap(), 0.6);
        assert_abs_diff_eq!(dataset.row(0)[1].as_continuous().unwrap(), 0.8);
        assert_abs_diff_eq!(dataset.row(1)[0].as_continuous().unwrap(), 1.0);
    }

    #[test]
    fn rejects_categorical_features() {
        let mut dataset = Dataset::new(vec![vec!["red".into(), 1.0.into()]]).unwrap();

        assert!(dataset.apply(&mut L2Normalizer).is_err());
    }
}
