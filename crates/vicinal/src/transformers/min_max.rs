//! Min max normalization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::{Dataset, Value, ValueType};
use crate::transformers::{Transformer, TransformerError, ALL_TYPES};
use crate::utils::EPSILON;

/// Scales continuous features to a user-specified output range, 0 to 1 by
/// default. Categorical columns pass through untouched.
///
/// The fit is elastic: [`Transformer::update`] widens the observed bounds
/// with new batches instead of refitting from scratch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinMaxNormalizer {
    min: f64,
    max: f64,
    minimums: BTreeMap<usize, f64>,
    maximums: BTreeMap<usize, f64>,
    scales: BTreeMap<usize, f64>,
    offsets: BTreeMap<usize, f64>,
}

impl MinMaxNormalizer {
    /// Create a normalizer targeting the `[min, max]` output range.
    pub fn new(min: f64, max: f64) -> Result<Self, TransformerError> {
        if min > max {
            return Err(TransformerError::InvalidRange { min, max });
        }

        Ok(Self {
            min,
            max,
            minimums: BTreeMap::new(),
            maximums: BTreeMap::new(),
            scales: BTreeMap::new(),
            offsets: BTreeMap::new(),
        })
    }

    /// The fitted minimum of each continuous column.
    pub fn minimums(&self) -> &BTreeMap<usize, f64> {
        &self.minimums
    }

    /// The fitted maximum of each continuous column.
    pub fn maximums(&self) -> &BTreeMap<usize, f64> {
        &self.maximums
    }
}

impl Default for MinMaxNormalizer {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 1.0,
            minimums: BTreeMap::new(),
            maximums: BTreeMap::new(),
            scales: BTreeMap::new(),
            offsets: BTreeMap::new(),
        }
    }
}

impl Transformer for MinMaxNormalizer {
    fn compatibility(&self) -> &'static [ValueType] {
        ALL_TYPES
    }

    fn fitted(&self) -> bool {
        !self.scales.is_empty()
    }

    fn fit(&mut self, dataset: &Dataset) -> Result<(), TransformerError> {
        self.minimums.clear();
        self.maximums.clear();
        self.scales.clear();
        self.offsets.clear();

        for (column, value_type) in dataset.types().into_iter().enumerate() {
            if value_type == ValueType::Continuous {
                self.minimums.insert(column, f64::INFINITY);
                self.maximums.insert(column, f64::NEG_INFINITY);
            }
        }

        self.update(dataset)
    }

    fn update(&mut self, dataset: &Dataset) -> Result<(), TransformerError> {
        if self.minimums.is_empty() {
            return self.fit(dataset);
        }

        for (column, values) in dataset.columns_by_type(ValueType::Continuous) {
            let mut min = self.minimums.get(&column).copied().unwrap_or(f64::INFINITY);
            let mut max = self
                .maximums
                .get(&column)
                .copied()
                .unwrap_or(f64::NEG_INFINITY);

            for value in &values {
                if let Some(number) = value.as_continuous() {
                    min = min.min(number);
                    max = max.max(number);
                }
            }

            let spread = max - min;
            let spread = if spread == 0.0 { EPSILON } else { spread };

            let scale = (self.max - self.min) / spread;
            let offset = self.min - min * scale;

            self.minimums.insert(column, min);
            self.maximums.insert(column, max);
            self.scales.insert(column, scale);
            self.offsets.insert(column, offset);
        }

        Ok(())
    }

    fn transform(&self, samples: &mut Vec<Vec<Value>>) -> Result<(), TransformerError> {
        if self.scales.is_empty() {
            return Err(TransformerError::Unfitted);
        }

        for sample in samples.iter_mut() {
            for (&column, &scale) in &self.scales {
                if let Some(Value::Continuous(number)) = sample.get_mut(column) {
                    *number *= scale;
                    *number += self.offsets.get(&column).copied().unwrap_or(0.0);
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

    fn continuous(column: &[f64]) -> Dataset {
        Dataset::new(column.iter().map(|&x| vec![x.into()]).collect()).unwrap()
    }

    #[test]
    fn invalid_range_rejected() {
        assert!(matches!(
            MinMaxNormalizer::new(1.0, 0.0),
            Err(TransformerError::InvalidRange { .. })
        ));
    }

    #[test]
    fn scales_to_unit_range() {
        let mut dataset = continuous(&[0.0, 5.0, 10.0]);
        let mut transformer = MinMaxNormalizer::default();

        dataset.apply(&mut transformer).unwrap();

        let rescaled: Vec<f64> = dataset
            .column(0)
            .unwrap()
            .iter()
            .filter_map(Value::as_continuous)
            .collect();

        assert_abs_diff_eq!(rescaled[0], 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(rescaled[1], 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(rescaled[2], 1.0, epsilon = 1e-9);
    }

    #[test]
    fn custom_output_range() {
        let mut dataset = continuous(&[0.0, 10.0]);
        let mut transformer = MinMaxNormalizer::new(-1.0, 1.0).unwrap();

        dataset.apply(&mut transformer).unwrap();

        let rescaled: Vec<f64> = dataset
            .column(0)
            .unwrap()
            .iter()
            .filter_map(Value::as_continuous)
            .collect();

        assert_abs_diff_eq!(rescaled[0], -1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(rescaled[1], 1.0, epsilon = 1e-9);
    }

    #[test]
    fn categorical_columns_untouched() {
        let mut dataset = Dataset::new(vec![
            vec!["red".into(), 0.0.into()],
            vec!["blue".into(), 4.0.into()],
        ])
        .unwrap();

        let mut transformer = MinMaxNormalizer::default();

        dataset.apply(&mut transformer).unwrap();

        assert_eq!(dataset.row(0)[0], "red".into());
        assert_abs_diff_eq!(dataset.row(1)[1].as_continuous().unwrap(), 1.0);
    }

    #[test]
    fn elastic_update_widens_bounds() {
        let mut transformer = MinMaxNormalizer::default();

        transformer.fit(&continuous(&[0.0, 10.0])).unwrap();
        transformer.update(&continuous(&[-10.0, 5.0])).unwrap();

        assert_abs_diff_eq!(transformer.minimums()[&0], -10.0);
        assert_abs_diff_eq!(transformer.maximums()[&0], 10.0);
    }

    #[test]
    fn transform_unfitted_rejected() {
        let transformer = MinMaxNormalizer::default();

        let mut samples = vec![vec![1.0.into()]];

        assert!(matches!(
            transformer.transform(&mut samples),
            Err(TransformerError::Unfitted)
        ));
    }
}
