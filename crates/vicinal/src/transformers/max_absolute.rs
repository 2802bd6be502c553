//! Max absolute scaling.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::{Dataset, Value, ValueType};
use crate::transformers::{Transformer, TransformerError, ALL_TYPES};
use crate::utils::EPSILON;

/// Scales continuous features into `[-1, 1]` by dividing each column by its
/// maximum absolute value. Categorical columns pass through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaxAbsoluteScaler {
    maxabs: BTreeMap<usize, f64>,
}

impl MaxAbsoluteScaler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fitted maximum absolute value of each continuous column.
    pub fn maxabs(&self) -> &BTreeMap<usize, f64> {
        &self.maxabs
    }
}

impl Transformer for MaxAbsoluteScaler {
    fn compatibility(&self) -> &'static [ValueType] {
        ALL_TYPES
    }

    fn fitted(&self) -> bool {
        !self.maxabs.is_empty()
    }

    fn fit(&mut self, dataset: &Dataset) -> Result<(), TransformerError> {
        self.maxabs.clear();

        for (column, value_type) in dataset.types().into_iter().enumerate() {
            if value_type == ValueType::Continuous {
                self.maxabs.insert(column, f64::NEG_INFINITY);
            }
        }

        self.update(dataset)
    }

    fn update(&mut self, dataset: &Dataset) -> Result<(), TransformerError> {
        if self.maxabs.is_empty() {
            return self.fit(dataset);
        }

        for (column, values) in dataset.columns_by_type(ValueType::Continuous) {
            let mut max = self
                .maxabs
                .get(&column)
                .copied()
                .unwrap_or(f64::NEG_INFINITY);

            for value in &values {
                if let Some(number) = value.as_continuous() {
                    max = max.max(number.abs());
                }
            }

            self.maxabs
                .insert(column, if max > 0.0 { max } else { EPSILON });
        }

        Ok(())
    }

    fn transform(&self, samples: &mut Vec<Vec<Value>>) -> Result<(), TransformerError> {
        if self.maxabs.is_empty() {
            return Err(TransformerError::Unfitted);
        }

        for sample in samples.iter_mut() {
            for (&column, &maxabs) in &self.maxabs {
                if let Some(Value::Continuous(number)) = sample.get_mut(column) {
                    *number /= maxabs;
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

    #[test]
    fn scales_by_max_absolute() {
        let mut dataset = Dataset::new(vec![
            vec![(-4.0).into()],
            vec![2.0.into()],
            vec![1.0.into()],
        ])
        .unwrap();

        let mut transformer = MaxAbsoluteScaler::new();

        dataset.apply(&mut transformer).unwrap();

        let rescaled: Vec<f64> = dataset
            .column(0)
            .unwrap()
            .iter()
            .filter_map(Value::as_continuous)
            .collect();

        assert_abs_diff_eq!(rescaled[0], -1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(rescaled[1], 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(rescaled[2], 0.25, epsilon = 1e-9);
    }

    #[test]
    fn all_zero_column_survives() {
        let mut dataset = Dataset::new(vec![vec![0.0.into()], vec![0.0.into()]]).unwrap();

        let mut transformer = MaxAbsoluteScaler::new();

        dataset.apply(&mut transformer).unwrap();

        for value in dataset.column(0).unwrap() {
            assert_abs_diff_eq!(value.as_continuous().unwrap(), 0.0);
        }
    }

    #[test]
    fn transform_unfitted_rejected() {
        let transformer = MaxAbsoluteScaler::new();

        let mut samples = vec![vec![1.0.into()]];

        assert!(matches!(
            transformer.transform(&mut samples),
            Err(TransformerError::Unfitted)
        ));
    }
}
