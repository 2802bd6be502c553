//! Dataset validation and access errors.

use crate::data::ValueType;
use crate::transformers::TransformerError;

/// Errors raised by dataset construction, introspection, and wrangling.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DatasetError {
    /// Introspection on a dataset with no rows.
    #[error("cannot determine the data type of an empty dataset")]
    EmptyDataset,

    /// Column access out of range.
    #[error("column {column} does not exist, dataset has {n_columns} columns")]
    ColumnIndex { column: usize, n_columns: usize },

    /// A row with a different number of columns than the first row.
    #[error("the number of feature columns must be equal for all samples, {expected} expected but {got} given at row {row}")]
    RowLengthMismatch {
        row: usize,
        expected: usize,
        got: usize,
    },

    /// A value whose type disagrees with its column.
    #[error("columns must contain feature values of a single data type, column {column} is {expected} but row {row} holds a {got} value")]
    ColumnTypeMismatch {
        row: usize,
        column: usize,
        expected: ValueType,
        got: ValueType,
    },

    /// An in-place rewrite that would change a column's inferred type.
    #[error("datasets cannot be mutated through this path, rewriting column {column} would change its type from {expected} to {got}")]
    Immutable {
        column: usize,
        expected: ValueType,
        got: ValueType,
    },

    /// A without-replacement subset larger than the dataset.
    #[error("sample size must not exceed the number of rows, {requested} requested but only {available} available")]
    SampleSize { requested: usize, available: usize },

    /// Weight vector length disagrees with the row count.
    #[error("the number of weights ({weights}) must equal the number of rows ({rows})")]
    WeightLenMismatch { weights: usize, rows: usize },

    /// A negative sampling weight.
    #[error("weights must be non-negative, {weight} given at index {index}")]
    NegativeWeight { index: usize, weight: f64 },

    /// Label vector length disagrees with the row count.
    #[error("the number of labels ({labels}) must equal the number of rows ({rows})")]
    LabelLenMismatch { labels: usize, rows: usize },

    /// A label whose type disagrees with the first label.
    #[error("labels must share a single data type, the first label is {expected} but row {row} holds a {got} label")]
    LabelTypeMismatch {
        row: usize,
        expected: ValueType,
        got: ValueType,
    },

    /// Split ratio outside the open unit interval.
    #[error("ratio must be strictly between 0 and 1, {0} given")]
    InvalidRatio(f64),

    /// Fold or batch count that cannot be satisfied.
    #[error("cannot fold a dataset of {rows} rows {folds} times")]
    FoldCount { folds: usize, rows: usize },

    /// A partition value whose type disagrees with the column.
    #[error("partition value must match the column type, column {column} is {expected} but a {got} value was given")]
    PartitionValue {
        column: usize,
        expected: ValueType,
        got: ValueType,
    },

    /// A geometric operation over a categorical column.
    #[error("operation requires continuous features, column {column} is categorical")]
    NonContinuous { column: usize },

    /// Stratification over continuous labels.
    #[error("stratification requires categorical labels")]
    NonCategoricalLabels,

    /// A transformer failed while being applied to the dataset.
    #[error(transparent)]
    Transform(#[from] TransformerError),
}
