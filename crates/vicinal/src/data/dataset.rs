//! The typed sample table.
//!
//! [`Dataset`] is an in-memory table of heterogeneous feature values with an
//! internal type system and operations for wrangling. Rows are fixed-length
//! vectors of [`Value`]; every column holds values of a single [`ValueType`],
//! inferred from the first row and enforced at construction and after every
//! in-place transform.
//!
//! Datasets are immutable by index: wrangling operations return new instances
//! rather than mutating the receiver. The only in-place paths are
//! [`Dataset::transform_column`] and [`Dataset::apply`], which re-validate the
//! column type invariant and refuse rewrites that would break it.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::data::error::DatasetError;
use crate::data::value::{Value, ValueType};
use crate::kernels::Distance;
use crate::transformers::Transformer;
use crate::utils::EPSILON;

/// An unlabeled table of samples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    samples: Vec<Vec<Value>>,
}

impl Dataset {
    /// Create a dataset from rows of feature values.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if rows differ in length or a column mixes
    /// value types.
    pub fn new(samples: Vec<Vec<Value>>) -> Result<Self, DatasetError> {
        Self::validate(&samples)?;

        Ok(Self { samples })
    }

    /// Stack a number of datasets on top of each other to form a single
    /// dataset.
    pub fn stack(datasets: &[Dataset]) -> Result<Self, DatasetError> {
        let mut samples = Vec::new();

        for dataset in datasets {
            samples.extend_from_slice(&dataset.samples);
        }

        Self::new(samples)
    }

    /// Check the row length and column type invariants.
    pub(crate) fn validate(samples: &[Vec<Value>]) -> Result<(), DatasetError> {
        let Some(first) = samples.first() else {
            return Ok(());
        };

        let n_columns = first.len();
        let types: Vec<ValueType> = first.iter().map(Value::value_type).collect();

        for (row, sample) in samples.iter().enumerate() {
            if sample.len() != n_columns {
                return Err(DatasetError::RowLengthMismatch {
                    row,
                    expected: n_columns,
                    got: sample.len(),
                });
            }

            for (column, value) in sample.iter().enumerate() {
                if value.value_type() != types[column] {
                    return Err(DatasetError::ColumnTypeMismatch {
                        row,
                        column,
                        expected: types[column],
                        got: value.value_type(),
                    });
                }
            }
        }

        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The sample matrix.
    pub fn samples(&self) -> &[Vec<Value>] {
        &self.samples
    }

    /// The sample at the given row index.
    ///
    /// # Panics
    ///
    /// Panics if the row is out of range.
    pub fn row(&self, index: usize) -> &[Value] {
        &self.samples[index]
    }

    /// Number of rows.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.samples.len()
    }

    /// Number of feature columns.
    #[inline]
    pub fn num_columns(&self) -> usize {
        self.samples.first().map_or(0, Vec::len)
    }

    /// Is the dataset empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The `(rows, columns)` shape of the dataset.
    pub fn shape(&self) -> (usize, usize) {
        (self.num_rows(), self.num_columns())
    }

    /// The number of elements in the dataset.
    pub fn size(&self) -> usize {
        self.num_rows() * self.num_columns()
    }

    /// Iterate over the rows of the dataset.
    pub fn iter(&self) -> impl Iterator<Item = &[Value]> {
        self.samples.iter().map(Vec::as_slice)
    }

    /// The values of a feature column.
    pub fn column(&self, column: usize) -> Result<Vec<Value>, DatasetError> {
        if column >= self.num_columns() {
            return Err(DatasetError::ColumnIndex {
                column,
                n_columns: self.num_columns(),
            });
        }

        Ok(self.samples.iter().map(|row| row[column].clone()).collect())
    }

    // =========================================================================
    // Type Introspection
    // =========================================================================

    /// The data type of each feature column, autodetected from the first row.
    pub fn types(&self) -> Vec<ValueType> {
        self.samples
            .first()
            .map(|row| row.iter().map(Value::value_type).collect())
            .unwrap_or_default()
    }

    /// The distinct column data types.
    pub fn unique_types(&self) -> Vec<ValueType> {
        let mut unique = Vec::with_capacity(2);

        for value_type in self.types() {
            if !unique.contains(&value_type) {
                unique.push(value_type);
            }
        }

        unique
    }

    /// Does the dataset consist of a single data type?
    pub fn homogeneous(&self) -> bool {
        self.unique_types().len() == 1
    }

    /// The data type of the feature column at the given index.
    ///
    /// # Errors
    ///
    /// Fails on an empty dataset or an out-of-range column.
    pub fn column_type(&self, column: usize) -> Result<ValueType, DatasetError> {
        let first = self.samples.first().ok_or(DatasetError::EmptyDataset)?;

        match first.get(column) {
            Some(value) => Ok(value.value_type()),
            None => Err(DatasetError::ColumnIndex {
                column,
                n_columns: first.len(),
            }),
        }
    }

    /// Rotate the dataset, returning the columns as rows.
    pub fn columns(&self) -> Vec<Vec<Value>> {
        let n = self.num_columns();

        let mut columns = vec![Vec::with_capacity(self.num_rows()); n];

        for row in &self.samples {
            for (column, value) in row.iter().enumerate() {
                columns[column].push(value.clone());
            }
        }

        columns
    }

    /// The columns matching a given data type, keyed by column index.
    pub fn columns_by_type(&self, value_type: ValueType) -> Vec<(usize, Vec<Value>)> {
        self.types()
            .into_iter()
            .enumerate()
            .filter(|(_, t)| *t == value_type)
            .map(|(column, _)| {
                let values = self.samples.iter().map(|row| row[column].clone()).collect();

                (column, values)
            })
            .collect()
    }

    /// Extract the rows as continuous feature vectors.
    ///
    /// # Errors
    ///
    /// Fails with [`DatasetError::NonContinuous`] if any column is
    /// categorical.
    pub fn continuous_samples(&self) -> Result<Vec<Vec<f64>>, DatasetError> {
        self.samples
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(column, value)| {
                        value
                            .as_continuous()
                            .ok_or(DatasetError::NonContinuous { column })
                    })
                    .collect()
            })
            .collect()
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Clone the rows at the given indices into a new dataset.
    pub(crate) fn select(&self, indices: &[usize]) -> Self {
        let samples = indices
            .iter()
            .map(|&index| self.samples[index].clone())
            .collect();

        Self { samples }
    }

    /// A dataset containing only the first `n` samples.
    pub fn head(&self, n: usize) -> Self {
        let n = n.min(self.num_rows());

        Self {
            samples: self.samples[..n].to_vec(),
        }
    }

    /// A dataset containing only the last `n` samples.
    pub fn tail(&self, n: usize) -> Self {
        let n = n.min(self.num_rows());

        Self {
            samples: self.samples[self.num_rows() - n..].to_vec(),
        }
    }

    /// An `n` row portion of the dataset starting at `offset`.
    pub fn slice(&self, offset: usize, n: usize) -> Self {
        let start = offset.min(self.num_rows());
        let end = (offset + n).min(self.num_rows());

        Self {
            samples: self.samples[start..end].to_vec(),
        }
    }

    /// Remove an `n` row chunk starting at `offset`, returning the chunk and
    /// the remainder as new datasets.
    pub fn splice(&self, offset: usize, n: usize) -> (Self, Self) {
        let start = offset.min(self.num_rows());
        let end = (offset + n).min(self.num_rows());

        let chunk = self.samples[start..end].to_vec();

        let mut rest = self.samples[..start].to_vec();
        rest.extend_from_slice(&self.samples[end..]);

        (Self { samples: chunk }, Self { samples: rest })
    }

    /// Append another dataset below this one.
    pub fn append(&self, other: &Self) -> Result<Self, DatasetError> {
        Self::stack(&[self.clone(), other.clone()])
    }

    /// Prepend another dataset above this one.
    pub fn prepend(&self, other: &Self) -> Result<Self, DatasetError> {
        Self::stack(&[other.clone(), self.clone()])
    }

    // =========================================================================
    // Splitting
    // =========================================================================

    /// Split the dataset into two subsets, the first holding `ratio` of the
    /// rows.
    pub fn split(&self, ratio: f64) -> Result<(Self, Self), DatasetError> {
        if ratio <= 0.0 || ratio >= 1.0 {
            return Err(DatasetError::InvalidRatio(ratio));
        }

        let n = (ratio * self.num_rows() as f64).floor() as usize;

        Ok((self.head(n), self.tail(self.num_rows() - n)))
    }

    /// Fold the dataset `k` times to form `k` equal size datasets.
    ///
    /// Remainder rows that do not fill a fold are dropped.
    pub fn fold(&self, k: usize) -> Result<Vec<Self>, DatasetError> {
        if k < 1 || k > self.num_rows() {
            return Err(DatasetError::FoldCount {
                folds: k,
                rows: self.num_rows(),
            });
        }

        let per_fold = self.num_rows() / k;

        Ok((0..k)
            .map(|fold| self.slice(fold * per_fold, per_fold))
            .collect())
    }

    /// Chunk the dataset into batches of at most `n` rows.
    pub fn batch(&self, n: usize) -> Vec<Self> {
        debug_assert!(n >= 1, "batch size must be at least 1");

        self.samples
            .chunks(n.max(1))
            .map(|chunk| Self {
                samples: chunk.to_vec(),
            })
            .collect()
    }

    // =========================================================================
    // Partitioning
    // =========================================================================

    /// Row indices for a value partition on a feature column.
    ///
    /// Categorical columns send rows equal to `value` left; continuous
    /// columns send rows strictly less than `value` left.
    pub(crate) fn partition_indices(
        &self,
        column: usize,
        value: &Value,
    ) -> Result<(Vec<usize>, Vec<usize>), DatasetError> {
        let column_type = self.column_type(column)?;

        if value.value_type() != column_type {
            return Err(DatasetError::PartitionValue {
                column,
                expected: column_type,
                got: value.value_type(),
            });
        }

        let mut left = Vec::new();
        let mut right = Vec::new();

        for (index, row) in self.samples.iter().enumerate() {
            let goes_left = match (&row[column], value) {
                (Value::Categorical(a), Value::Categorical(b)) => a == b,
                (Value::Continuous(a), Value::Continuous(b)) => a < b,
                _ => false,
            };

            if goes_left {
                left.push(index);
            } else {
                right.push(index);
            }
        }

        Ok((left, right))
    }

    /// Partition the dataset into left and right subsets by a feature column.
    pub fn partition(&self, column: usize, value: &Value) -> Result<(Self, Self), DatasetError> {
        let (left, right) = self.partition_indices(column, value)?;

        Ok((self.select(&left), self.select(&right)))
    }

    /// Row indices for a spatial partition between two centroids.
    ///
    /// A row joins the left partition when its distance to the left centroid
    /// is less than or equal to its distance to the right centroid.
    pub(crate) fn spatial_partition_indices<K>(
        &self,
        left_centroid: &[f64],
        right_centroid: &[f64],
        kernel: &K,
    ) -> Result<(Vec<usize>, Vec<usize>), DatasetError>
    where
        K: Distance + ?Sized,
    {
        let mut left = Vec::new();
        let mut right = Vec::new();

        for (index, row) in self.continuous_samples()?.into_iter().enumerate() {
            let to_left = kernel.compute(&row, left_centroid);
            let to_right = kernel.compute(&row, right_centroid);

            if to_left <= to_right {
                left.push(index);
            } else {
                right.push(index);
            }
        }

        Ok((left, right))
    }

    /// Partition the dataset into left and right subsets based on the
    /// distance of each row to a pair of centroids.
    ///
    /// Original row order is preserved within each partition. Equidistant
    /// rows resolve to the left partition.
    pub fn spatial_partition<K>(
        &self,
        left_centroid: &[f64],
        right_centroid: &[f64],
        kernel: &K,
    ) -> Result<(Self, Self), DatasetError>
    where
        K: Distance + ?Sized,
    {
        let (left, right) = self.spatial_partition_indices(left_centroid, right_centroid, kernel)?;

        Ok((self.select(&left), self.select(&right)))
    }

    // =========================================================================
    // Randomization & Sampling
    // =========================================================================

    /// A shuffled copy of the dataset.
    pub fn randomize<R: Rng>(&self, rng: &mut R) -> Self {
        let mut indices: Vec<usize> = (0..self.num_rows()).collect();
        indices.shuffle(rng);

        self.select(&indices)
    }

    /// A random subset of `n` unique rows.
    pub fn random_subset<R: Rng>(&self, n: usize, rng: &mut R) -> Result<Self, DatasetError> {
        if n > self.num_rows() {
            return Err(DatasetError::SampleSize {
                requested: n,
                available: self.num_rows(),
            });
        }

        let mut indices: Vec<usize> = (0..self.num_rows()).collect();
        indices.shuffle(rng);
        indices.truncate(n);

        Ok(self.select(&indices))
    }

    /// A random subset of `n` rows drawn with replacement.
    ///
    /// An empty dataset yields an empty subset.
    pub fn random_subset_with_replacement<R: Rng>(&self, n: usize, rng: &mut R) -> Self {
        if self.is_empty() {
            return Self::default();
        }

        let indices: Vec<usize> = (0..n).map(|_| rng.gen_range(0..self.num_rows())).collect();

        self.select(&indices)
    }

    /// Row indices for a weighted draw of `n` rows with replacement.
    pub(crate) fn weighted_indices<R: Rng>(
        &self,
        n: usize,
        weights: &[f64],
        rng: &mut R,
    ) -> Result<Vec<usize>, DatasetError> {
        if weights.len() != self.num_rows() {
            return Err(DatasetError::WeightLenMismatch {
                weights: weights.len(),
                rows: self.num_rows(),
            });
        }

        for (index, &weight) in weights.iter().enumerate() {
            if weight < 0.0 {
                return Err(DatasetError::NegativeWeight { index, weight });
            }
        }

        if self.is_empty() {
            return Ok(Vec::new());
        }

        let total: f64 = weights.iter().sum::<f64>().max(EPSILON);

        let indices = (0..n)
            .map(|_| {
                let threshold = rng.gen::<f64>() * total;

                let mut cumulative = 0.0;

                for (index, &weight) in weights.iter().enumerate() {
                    cumulative += weight;

                    if cumulative >= threshold {
                        return index;
                    }
                }

                weights.len() - 1
            })
            .collect();

        Ok(indices)
    }

    /// A random weighted subset of `n` rows drawn with replacement.
    ///
    /// Weights are normalized internally and must be non-negative, one per
    /// row.
    pub fn random_weighted_subset_with_replacement<R: Rng>(
        &self,
        n: usize,
        weights: &[f64],
        rng: &mut R,
    ) -> Result<Self, DatasetError> {
        let indices = self.weighted_indices(n, weights, rng)?;

        Ok(self.select(&indices))
    }

    // =========================================================================
    // Filtering & Sorting
    // =========================================================================

    /// Row indices passing a predicate over a feature column.
    pub(crate) fn filter_indices<F>(
        &self,
        column: usize,
        predicate: F,
    ) -> Result<Vec<usize>, DatasetError>
    where
        F: Fn(&Value) -> bool,
    {
        self.column_type(column)?;

        Ok(self
            .samples
            .iter()
            .enumerate()
            .filter(|(_, row)| predicate(&row[column]))
            .map(|(index, _)| index)
            .collect())
    }

    /// Keep the rows whose value in the given column passes a predicate.
    pub fn filter_by_column<F>(&self, column: usize, predicate: F) -> Result<Self, DatasetError>
    where
        F: Fn(&Value) -> bool,
    {
        let indices = self.filter_indices(column, predicate)?;

        Ok(self.select(&indices))
    }

    /// The row permutation that sorts the dataset by a feature column.
    pub(crate) fn sort_indices(
        &self,
        column: usize,
        descending: bool,
    ) -> Result<Vec<usize>, DatasetError> {
        self.column_type(column)?;

        let mut indices: Vec<usize> = (0..self.num_rows()).collect();

        indices.sort_by(|&a, &b| {
            let ordering = self.samples[a][column].compare(&self.samples[b][column]);

            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        });

        Ok(indices)
    }

    /// Sort the dataset by a feature column into a new dataset.
    pub fn sort_by_column(&self, column: usize, descending: bool) -> Result<Self, DatasetError> {
        let indices = self.sort_indices(column, descending)?;

        Ok(self.select(&indices))
    }

    /// A dataset with all duplicate rows removed, keeping first occurrences.
    pub fn deduplicate(&self) -> Self {
        let mut samples: Vec<Vec<Value>> = Vec::with_capacity(self.num_rows());

        for row in &self.samples {
            if !samples.contains(row) {
                samples.push(row.clone());
            }
        }

        Self { samples }
    }

    // =========================================================================
    // In-place Transformation
    // =========================================================================

    /// Rewrite a feature column with a callback.
    ///
    /// This is the explicit in-place mutation path. The rewrite must preserve
    /// the column's data type.
    ///
    /// # Errors
    ///
    /// Fails with [`DatasetError::Immutable`] if the callback changes the
    /// column's type, leaving the dataset untouched.
    pub fn transform_column<F>(&mut self, column: usize, callback: F) -> Result<(), DatasetError>
    where
        F: Fn(&Value) -> Value,
    {
        if self.is_empty() {
            return Ok(());
        }

        let expected = self.column_type(column)?;

        let rewritten: Vec<Value> = self
            .samples
            .iter()
            .map(|row| callback(&row[column]))
            .collect();

        for value in &rewritten {
            if value.value_type() != expected {
                return Err(DatasetError::Immutable {
                    column,
                    expected,
                    got: value.value_type(),
                });
            }
        }

        for (row, value) in self.samples.iter_mut().zip(rewritten) {
            row[column] = value;
        }

        Ok(())
    }

    /// Apply a transformation to the dataset in place.
    ///
    /// Stateful transformers that have not been fitted are fitted to this
    /// dataset first. The table invariants are re-checked afterwards.
    pub fn apply<T>(&mut self, transformer: &mut T) -> Result<(), DatasetError>
    where
        T: Transformer + ?Sized,
    {
        crate::transformers::check_compatibility(self, transformer)?;

        if !transformer.fitted() {
            transformer.fit(self)?;
        }

        transformer.transform(&mut self.samples)?;

        Self::validate(&self.samples)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::kernels::Euclidean;

    fn monsters() -> Dataset {
        Dataset::new(vec![
            vec!["nice".into(), "furry".into(), 4.0.into()],
            vec!["mean".into(), "furry".into(), (-1.5).into()],
            vec!["nice".into(), "rough".into(), 2.6.into()],
            vec!["mean".into(), "rough".into(), (-1.0).into()],
        ])
        .unwrap()
    }

    fn points() -> Dataset {
        Dataset::new(vec![
            vec![0.0.into(), 0.0.into()],
            vec![1.0.into(), 1.0.into()],
            vec![9.0.into(), 9.0.into()],
            vec![10.0.into(), 10.0.into()],
        ])
        .unwrap()
    }

    #[test]
    fn build_and_introspect() {
        let dataset = monsters();

        assert_eq!(dataset.shape(), (4, 3));
        assert_eq!(dataset.size(), 12);
        assert!(!dataset.is_empty());
        assert!(!dataset.homogeneous());
        assert_eq!(
            dataset.types(),
            vec![
                ValueType::Categorical,
                ValueType::Categorical,
                ValueType::Continuous
            ]
        );
        assert_eq!(dataset.column_type(2).unwrap(), ValueType::Continuous);
    }

    #[test]
    fn ragged_rows_rejected() {
        let result = Dataset::new(vec![
            vec![1.0.into(), 2.0.into()],
            vec![3.0.into()],
        ]);

        assert!(matches!(
            result,
            Err(DatasetError::RowLengthMismatch { row: 1, expected: 2, got: 1 })
        ));
    }

    #[test]
    fn mixed_column_rejected() {
        let result = Dataset::new(vec![
            vec![1.0.into(), "red".into()],
            vec![2.0.into(), 3.0.into()],
        ]);

        assert!(matches!(
            result,
            Err(DatasetError::ColumnTypeMismatch { row: 1, column: 1, .. })
        ));
    }

    #[test]
    fn column_type_empty_dataset() {
        let dataset = Dataset::default();

        assert!(matches!(
            dataset.column_type(0),
            Err(DatasetError::EmptyDataset)
        ));
    }

    #[test]
    fn column_type_out_of_range() {
        assert!(matches!(
            monsters().column_type(9),
            Err(DatasetError::ColumnIndex { column: 9, n_columns: 3 })
        ));
    }

    #[test]
    fn columns_transpose() {
        let columns = monsters().columns();

        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0][1], "mean".into());
        assert_eq!(columns[2][0], 4.0.into());
    }

    #[test]
    fn columns_by_type() {
        let continuous = monsters().columns_by_type(ValueType::Continuous);

        assert_eq!(continuous.len(), 1);
        assert_eq!(continuous[0].0, 2);
    }

    #[test]
    fn head_tail_slice_splice() {
        let dataset = points();

        assert_eq!(dataset.head(2).num_rows(), 2);
        assert_eq!(dataset.tail(3).num_rows(), 3);
        assert_eq!(dataset.tail(3).row(0), points().row(1));

        let slice = dataset.slice(1, 2);
        assert_eq!(slice.num_rows(), 2);
        assert_eq!(slice.row(0), points().row(1));

        let (chunk, rest) = dataset.splice(1, 2);
        assert_eq!(chunk.num_rows(), 2);
        assert_eq!(rest.num_rows(), 2);
        assert_eq!(rest.row(1), points().row(3));

        // Receiver is untouched.
        assert_eq!(dataset.num_rows(), 4);
    }

    #[test]
    fn split_ratio() {
        let (left, right) = points().split(0.5).unwrap();

        assert_eq!(left.num_rows(), 2);
        assert_eq!(right.num_rows(), 2);

        assert!(matches!(
            points().split(1.5),
            Err(DatasetError::InvalidRatio(_))
        ));
    }

    #[test]
    fn fold_and_batch() {
        let folds = points().fold(2).unwrap();

        assert_eq!(folds.len(), 2);
        assert_eq!(folds[0].num_rows(), 2);
        assert_eq!(folds[1].num_rows(), 2);

        let batches = points().batch(3);

        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].num_rows(), 3);
        assert_eq!(batches[1].num_rows(), 1);

        assert!(matches!(
            points().fold(9),
            Err(DatasetError::FoldCount { folds: 9, rows: 4 })
        ));
    }

    #[test]
    fn partition_by_value() {
        let (left, right) = monsters().partition(1, &"rough".into()).unwrap();

        assert_eq!(left.num_rows(), 2);
        assert_eq!(right.num_rows(), 2);

        let (low, high) = monsters().partition(2, &1.0.into()).unwrap();

        assert_eq!(low.num_rows(), 2);
        assert_eq!(high.num_rows(), 2);
    }

    #[test]
    fn partition_value_type_mismatch() {
        assert!(matches!(
            monsters().partition(0, &1.0.into()),
            Err(DatasetError::PartitionValue { column: 0, .. })
        ));
    }

    #[test]
    fn spatial_partition_assigns_by_distance() {
        let (left, right) = points()
            .spatial_partition(&[0.0, 0.0], &[10.0, 10.0], &Euclidean)
            .unwrap();

        assert_eq!(left.num_rows(), 2);
        assert_eq!(right.num_rows(), 2);
        assert_eq!(left.row(0), points().row(0));
        assert_eq!(right.row(0), points().row(2));
    }

    #[test]
    fn spatial_partition_tie_goes_left() {
        let dataset = Dataset::new(vec![vec![5.0.into()]]).unwrap();

        let (left, right) = dataset
            .spatial_partition(&[0.0], &[10.0], &Euclidean)
            .unwrap();

        assert_eq!(left.num_rows(), 1);
        assert_eq!(right.num_rows(), 0);
    }

    #[test]
    fn spatial_partition_requires_continuous() {
        assert!(matches!(
            monsters().spatial_partition(&[0.0; 3], &[1.0; 3], &Euclidean),
            Err(DatasetError::NonContinuous { column: 0 })
        ));
    }

    #[test]
    fn randomize_permutes() {
        let mut rng = StdRng::seed_from_u64(42);

        let shuffled = points().randomize(&mut rng);

        assert_eq!(shuffled.num_rows(), 4);
        assert_eq!(shuffled.deduplicate().num_rows(), 4);
    }

    #[test]
    fn random_subset_bounds() {
        let mut rng = StdRng::seed_from_u64(42);

        let subset = points().random_subset(3, &mut rng).unwrap();
        assert_eq!(subset.num_rows(), 3);
        assert_eq!(subset.deduplicate().num_rows(), 3);

        assert!(matches!(
            points().random_subset(5, &mut rng),
            Err(DatasetError::SampleSize { requested: 5, available: 4 })
        ));
    }

    #[test]
    fn random_subset_with_replacement_size() {
        let mut rng = StdRng::seed_from_u64(42);

        let subset = points().random_subset_with_replacement(10, &mut rng);

        assert_eq!(subset.num_rows(), 10);
    }

    #[test]
    fn weighted_subset_validation() {
        let mut rng = StdRng::seed_from_u64(42);

        assert!(matches!(
            points().random_weighted_subset_with_replacement(3, &[1.0, 1.0], &mut rng),
            Err(DatasetError::WeightLenMismatch { weights: 2, rows: 4 })
        ));

        assert!(matches!(
            points().random_weighted_subset_with_replacement(3, &[1.0, -1.0, 1.0, 1.0], &mut rng),
            Err(DatasetError::NegativeWeight { index: 1, .. })
        ));
    }

    #[test]
    fn weighted_subset_favors_heavy_rows() {
        let mut rng = StdRng::seed_from_u64(42);

        let subset = points()
            .random_weighted_subset_with_replacement(50, &[0.0, 0.0, 0.0, 1.0], &mut rng)
            .unwrap();

        for row in subset.iter() {
            assert_eq!(row, points().row(3));
        }
    }

    #[test]
    fn filter_and_sort() {
        let friendly = monsters()
            .filter_by_column(0, |value| value.as_categorical() == Some("nice"))
            .unwrap();

        assert_eq!(friendly.num_rows(), 2);

        let sorted = monsters().sort_by_column(2, false).unwrap();
        assert_eq!(sorted.row(0)[2], (-1.5).into());
        assert_eq!(sorted.row(3)[2], 4.0.into());

        let reversed = monsters().sort_by_column(2, true).unwrap();
        assert_eq!(reversed.row(0)[2], 4.0.into());
    }

    #[test]
    fn deduplicate_keeps_first() {
        let dataset = Dataset::new(vec![
            vec![1.0.into()],
            vec![2.0.into()],
            vec![1.0.into()],
        ])
        .unwrap();

        let unique = dataset.deduplicate();

        assert_eq!(unique.num_rows(), 2);
        assert_eq!(unique.row(0), &[1.0.into()]);
    }

    #[test]
    fn transform_column_in_place() {
        let mut dataset = monsters();

        dataset
            .transform_column(2, |value| match value {
                Value::Continuous(number) => Value::Continuous(number.abs()),
                other => other.clone(),
            })
            .unwrap();

        assert_eq!(dataset.column(2).unwrap(), vec![
            4.0.into(),
            1.5.into(),
            2.6.into(),
            1.0.into(),
        ]);
    }

    #[test]
    fn transform_column_type_change_rejected() {
        let mut dataset = monsters();

        let result = dataset.transform_column(2, |_| "oops".into());

        assert!(matches!(
            result,
            Err(DatasetError::Immutable { column: 2, .. })
        ));

        // Refused rewrites leave the dataset untouched.
        assert_eq!(dataset.column(2).unwrap()[0], 4.0.into());
    }

    #[test]
    fn stack_datasets() {
        let stacked = Dataset::stack(&[points(), points()]).unwrap();

        assert_eq!(stacked.num_rows(), 8);

        let appended = points().append(&points()).unwrap();
        assert_eq!(appended.num_rows(), 8);

        let prepended = monsters().prepend(&monsters()).unwrap();
        assert_eq!(prepended.num_rows(), 8);
    }

    #[test]
    fn stack_incompatible_rejected() {
        assert!(matches!(
            Dataset::stack(&[points(), monsters()]),
            Err(DatasetError::RowLengthMismatch { .. })
        ));
    }
}
