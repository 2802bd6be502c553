//! Dataset transformations.
//!
//! Transformers rewrite the sample matrix in place through
//! [`Dataset::apply`](crate::data::Dataset::apply). Stateless transformers
//! implement [`Transformer::transform`] alone; stateful ones override
//! [`Transformer::fit`] and [`Transformer::fitted`] and are fitted
//! automatically on first application. Elastic transformers additionally
//! override [`Transformer::update`] to refine their fit from new batches.

mod l2_normalizer;
mod max_absolute;
mod min_max;
mod polynomial;

pub use l2_normalizer::L2Normalizer;
pub use max_absolute::MaxAbsoluteScaler;
pub use min_max::MinMaxNormalizer;
pub use polynomial::PolynomialExpander;

use crate::data::{Dataset, Value, ValueType};

/// Errors raised by transformer construction and application.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransformerError {
    /// Transform called before a fit.
    #[error("transformer has not been fitted")]
    Unfitted,

    /// A feature column the transformer cannot consume.
    #[error("transformer is only compatible with {expected:?} features, column {column} is {got}")]
    IncompatibleColumn {
        column: usize,
        got: ValueType,
        expected: &'static [ValueType],
    },

    /// Polynomial degree below 1.
    #[error("the degree of the polynomial must be greater than 0, {0} given")]
    InvalidDegree(usize),

    /// An output range whose minimum exceeds its maximum.
    #[error("minimum cannot be greater than maximum, [{min}, {max}] given")]
    InvalidRange { min: f64, max: f64 },
}

/// A transformation over the sample matrix.
pub trait Transformer {
    /// The feature data types this transformer can consume.
    fn compatibility(&self) -> &'static [ValueType];

    /// Is the transformer ready to transform?
    ///
    /// Stateless transformers are always fitted.
    fn fitted(&self) -> bool {
        true
    }

    /// Fit the transformer to a dataset.
    ///
    /// A no-op for stateless transformers.
    fn fit(&mut self, _dataset: &Dataset) -> Result<(), TransformerError> {
        Ok(())
    }

    /// Refine the fit with another batch of data.
    ///
    /// Defaults to refitting from scratch.
    fn update(&mut self, dataset: &Dataset) -> Result<(), TransformerError> {
        self.fit(dataset)
    }

    /// Transform the sample matrix in place.
    fn transform(&self, samples: &mut Vec<Vec<Value>>) -> Result<(), TransformerError>;
}

/// Check that every feature column of a dataset is a type the transformer
/// can consume.
pub(crate) fn check_compatibility<T>(
    dataset: &Dataset,
    transformer: &T,
) -> Result<(), TransformerError>
where
    T: Transformer + ?Sized,
{
    let expected = transformer.compatibility();

    for (column, value_type) in dataset.types().into_iter().enumerate() {
        if !expected.contains(&value_type) {
            return Err(TransformerError::IncompatibleColumn {
                column,
                got: value_type,
                expected,
            });
        }
    }

    Ok(())
}

/// Both feature data types; compatibility list for transformers that pass
/// categorical columns through untouched.
pub(crate) const ALL_TYPES: &[ValueType] = &[ValueType::Categorical, ValueType::Continuous];
