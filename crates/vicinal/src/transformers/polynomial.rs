//! Polynomial feature expansion.

use serde::{Deserialize, Serialize};

use crate::data::{Value, ValueType};
use crate::transformers::{Transformer, TransformerError};

/// Expands every continuous feature into its powers `1..=degree`, letting
/// linear estimators fit polynomial relationships. Stateless; requires
/// all-continuous features.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PolynomialExpander {
    degree: usize,
}

impl PolynomialExpander {
    /// Create an expander generating polynomials up to `degree`.
    pub fn new(degree: usize) -> Result<Self, TransformerError> {
        if degree < 1 {
            return Err(TransformerError::InvalidDegree(degree));
        }

        Ok(Self { degree })
    }

    /// The highest power generated per feature.
    pub fn degree(&self) -> usize {
        self.degree
    }
}

impl Default for PolynomialExpander {
    fn default() -> Self {
        Self { degree: 2 }
    }
}

impl Transformer for PolynomialExpander {
    fn compatibility(&self) -> &'static [ValueType] {
        &[ValueType::Continuous]
    }

    fn transform(&self, samples: &mut Vec<Vec<Value>>) -> Result<(), TransformerError> {
        for sample in samples.iter_mut() {
            let mut expanded = Vec::with_capacity(sample.len() * self.degree);

            for value in sample.iter() {
                let number = value.as_continuous().unwrap_or(f64::NAN);

                for power in 1..=self.degree as i32 {
                    expanded.push(Value::from(number.powi(power)));
                }
            }

            *sample = expanded;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;

    #[test]
    fn degree_validated() {
        assert!(matches!(
            PolynomialExpander::new(0),
            Err(TransformerError::InvalidDegree(0))
        ));
    }

    #[test]
    fn expands_powers_in_place() {
        let mut dataset = Dataset::new(vec![
            vec![2.0.into(), 3.0.into()],
            vec![(-1.0).into(), 0.5.into()],
        ])
        .unwrap();

        dataset.apply(&mut PolynomialExpander::default()).unwrap();

        assert_eq!(dataset.num_columns(), 4);
        assert_eq!(
            dataset.row(0),
            &[2.0.into(), 4.0.into(), 3.0.into(), 9.0.into()]
        );
        assert_eq!(
            dataset.row(1),
            &[(-1.0).into(), 1.0.into(), 0.5.into(), 0.25.into()]
        );
    }

    #[test]
    fn cubic_expansion() {
        let mut dataset = Dataset::new(vec![vec![2.0.into()]]).unwrap();

        dataset
            .apply(&mut PolynomialExpander::new(3).unwrap())
            .unwrap();

        assert_eq!(dataset.row(0), &[2.0.into(), 4.0.into(), 8.0.into()]);
    }
}
