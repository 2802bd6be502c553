//! The labeled sample table.
//!
//! [`Labeled`] couples a [`Dataset`] with a parallel sequence of labels, one
//! per row. Every operation that reorders, filters, or splits the table
//! applies the identical permutation to the labels so the row/label
//! correspondence is never broken.

use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::data::error::DatasetError;
use crate::data::value::{Value, ValueType};
use crate::data::Dataset;
use crate::kernels::Distance;

/// A dataset with one label per row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Labeled {
    dataset: Dataset,
    labels: Vec<Value>,
}

impl Labeled {
    /// Create a labeled dataset from rows and their labels.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the samples fail table validation, the
    /// label count disagrees with the row count, or the labels mix types.
    pub fn new(samples: Vec<Vec<Value>>, labels: Vec<Value>) -> Result<Self, DatasetError> {
        let dataset = Dataset::new(samples)?;

        if labels.len() != dataset.num_rows() {
            return Err(DatasetError::LabelLenMismatch {
                labels: labels.len(),
                rows: dataset.num_rows(),
            });
        }

        if let Some(first) = labels.first() {
            let expected = first.value_type();

            for (row, label) in labels.iter().enumerate() {
                if label.value_type() != expected {
                    return Err(DatasetError::LabelTypeMismatch {
                        row,
                        expected,
                        got: label.value_type(),
                    });
                }
            }
        }

        Ok(Self { dataset, labels })
    }

    /// Stack a number of labeled datasets on top of each other.
    pub fn stack(datasets: &[Labeled]) -> Result<Self, DatasetError> {
        let mut samples = Vec::new();
        let mut labels = Vec::new();

        for dataset in datasets {
            samples.extend_from_slice(dataset.dataset.samples());
            labels.extend_from_slice(&dataset.labels);
        }

        Self::new(samples, labels)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The underlying unlabeled table.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Drop the labels, returning the feature table.
    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }

    /// The labels, one per row.
    pub fn labels(&self) -> &[Value] {
        &self.labels
    }

    /// The label at the given row index.
    ///
    /// # Panics
    ///
    /// Panics if the row is out of range.
    pub fn label(&self, index: usize) -> &Value {
        &self.labels[index]
    }

    /// Number of rows.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.dataset.num_rows()
    }

    /// Number of feature columns.
    #[inline]
    pub fn num_columns(&self) -> usize {
        self.dataset.num_columns()
    }

    /// Is the dataset empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    /// Iterate over rows paired with their labels.
    pub fn zip(&self) -> impl Iterator<Item = (&[Value], &Value)> {
        self.dataset.iter().zip(self.labels.iter())
    }

    /// The data type of the labels, autodetected from the first label.
    ///
    /// # Errors
    ///
    /// Fails with [`DatasetError::EmptyDataset`] on an empty dataset.
    pub fn label_type(&self) -> Result<ValueType, DatasetError> {
        self.labels
            .first()
            .map(Value::value_type)
            .ok_or(DatasetError::EmptyDataset)
    }

    /// The distinct label values in order of first appearance.
    pub fn possible_outcomes(&self) -> Vec<Value> {
        let mut outcomes: Vec<Value> = Vec::new();

        for label in &self.labels {
            if !outcomes.contains(label) {
                outcomes.push(label.clone());
            }
        }

        outcomes
    }

    /// Extract the labels as continuous values.
    ///
    /// # Errors
    ///
    /// Fails with [`DatasetError::LabelTypeMismatch`] if any label is
    /// categorical.
    pub fn continuous_labels(&self) -> Result<Vec<f64>, DatasetError> {
        self.labels
            .iter()
            .enumerate()
            .map(|(row, label)| {
                label
                    .as_continuous()
                    .ok_or(DatasetError::LabelTypeMismatch {
                        row,
                        expected: ValueType::Continuous,
                        got: label.value_type(),
                    })
            })
            .collect()
    }

    // =========================================================================
    // Label Transformation
    // =========================================================================

    /// Rewrite the labels with a callback.
    ///
    /// The rewrite must preserve the label type.
    pub fn transform_labels<F>(&mut self, callback: F) -> Result<(), DatasetError>
    where
        F: Fn(&Value) -> Value,
    {
        let Some(first) = self.labels.first() else {
            return Ok(());
        };

        let expected = first.value_type();

        let rewritten: Vec<Value> = self.labels.iter().map(callback).collect();

        for (row, label) in rewritten.iter().enumerate() {
            if label.value_type() != expected {
                return Err(DatasetError::LabelTypeMismatch {
                    row,
                    expected,
                    got: label.value_type(),
                });
            }
        }

        self.labels = rewritten;

        Ok(())
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Clone the rows and labels at the given indices.
    pub(crate) fn select(&self, indices: &[usize]) -> Self {
        Self {
            dataset: self.dataset.select(indices),
            labels: indices
                .iter()
                .map(|&index| self.labels[index].clone())
                .collect(),
        }
    }

    /// A labeled dataset containing only the first `n` rows.
    pub fn head(&self, n: usize) -> Self {
        let indices: Vec<usize> = (0..n.min(self.num_rows())).collect();

        self.select(&indices)
    }

    /// A labeled dataset containing only the last `n` rows.
    pub fn tail(&self, n: usize) -> Self {
        let n = n.min(self.num_rows());
        let indices: Vec<usize> = (self.num_rows() - n..self.num_rows()).collect();

        self.select(&indices)
    }

    /// An `n` row portion of the dataset starting at `offset`.
    pub fn slice(&self, offset: usize, n: usize) -> Self {
        let start = offset.min(self.num_rows());
        let end = (offset + n).min(self.num_rows());
        let indices: Vec<usize> = (start..end).collect();

        self.select(&indices)
    }

    /// Remove an `n` row chunk starting at `offset`, returning the chunk and
    /// the remainder.
    pub fn splice(&self, offset: usize, n: usize) -> (Self, Self) {
        let start = offset.min(self.num_rows());
        let end = (offset + n).min(self.num_rows());

        let chunk: Vec<usize> = (start..end).collect();
        let rest: Vec<usize> = (0..start).chain(end..self.num_rows()).collect();

        (self.select(&chunk), self.select(&rest))
    }

    /// Append another labeled dataset below this one.
    pub fn append(&self, other: &Self) -> Result<Self, DatasetError> {
        Self::stack(&[self.clone(), other.clone()])
    }

    /// Prepend another labeled dataset above this one.
    pub fn prepend(&self, other: &Self) -> Result<Self, DatasetError> {
        Self::stack(&[other.clone(), self.clone()])
    }

    // =========================================================================
    // Splitting
    // =========================================================================

    /// Split into two subsets, the first holding `ratio` of the rows.
    pub fn split(&self, ratio: f64) -> Result<(Self, Self), DatasetError> {
        if ratio <= 0.0 || ratio >= 1.0 {
            return Err(DatasetError::InvalidRatio(ratio));
        }

        let n = (ratio * self.num_rows() as f64).floor() as usize;

        Ok((self.head(n), self.tail(self.num_rows() - n)))
    }

    /// Fold the dataset `k` times to form `k` equal size datasets.
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

        let n = n.max(1);

        (0..self.num_rows())
            .step_by(n)
            .map(|offset| self.slice(offset, n))
            .collect()
    }

    // =========================================================================
    // Partitioning
    // =========================================================================

    /// Partition into left and right subsets by a feature column.
    pub fn partition(&self, column: usize, value: &Value) -> Result<(Self, Self), DatasetError> {
        let (left, right) = self.dataset.partition_indices(column, value)?;

        Ok((self.select(&left), self.select(&right)))
    }

    /// Partition into left and right subsets based on the distance of each
    /// row to a pair of centroids.
    ///
    /// Labels follow their rows. Equidistant rows resolve to the left
    /// partition and original row order is preserved within each side.
    pub fn spatial_partition<K>(
        &self,
        left_centroid: &[f64],
        right_centroid: &[f64],
        kernel: &K,
    ) -> Result<(Self, Self), DatasetError>
    where
        K: Distance + ?Sized,
    {
        let (left, right) = self
            .dataset
            .spatial_partition_indices(left_centroid, right_centroid, kernel)?;

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

    /// A random weighted subset of `n` rows drawn with replacement.
    pub fn random_weighted_subset_with_replacement<R: Rng>(
        &self,
        n: usize,
        weights: &[f64],
        rng: &mut R,
    ) -> Result<Self, DatasetError> {
        let indices = self.dataset.weighted_indices(n, weights, rng)?;

        Ok(self.select(&indices))
    }

    // =========================================================================
    // Filtering & Sorting
    // =========================================================================

    /// Keep the rows whose value in the given column passes a predicate.
    pub fn filter_by_column<F>(&self, column: usize, predicate: F) -> Result<Self, DatasetError>
    where
        F: Fn(&Value) -> bool,
    {
        let indices = self.dataset.filter_indices(column, predicate)?;

        Ok(self.select(&indices))
    }

    /// Keep the rows whose label passes a predicate.
    pub fn filter_by_label<F>(&self, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool,
    {
        let indices: Vec<usize> = self
            .labels
            .iter()
            .enumerate()
            .filter(|(_, label)| predicate(label))
            .map(|(index, _)| index)
            .collect();

        self.select(&indices)
    }

    /// Sort by a feature column into a new dataset, labels following rows.
    pub fn sort_by_column(&self, column: usize, descending: bool) -> Result<Self, DatasetError> {
        let indices = self.dataset.sort_indices(column, descending)?;

        Ok(self.select(&indices))
    }

    /// Sort by label into a new dataset.
    pub fn sort_by_label(&self, descending: bool) -> Self {
        let mut indices: Vec<usize> = (0..self.num_rows()).collect();

        indices.sort_by(|&a, &b| {
            let ordering = self.labels[a].compare(&self.labels[b]);

            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        });

        self.select(&indices)
    }

    // =========================================================================
    // Stratification
    // =========================================================================

    /// Group the rows by label value.
    ///
    /// # Errors
    ///
    /// Fails with [`DatasetError::NonCategoricalLabels`] unless the labels
    /// are categorical.
    pub fn stratify(&self) -> Result<BTreeMap<String, Labeled>, DatasetError> {
        if self.label_type()? != ValueType::Categorical {
            return Err(DatasetError::NonCategoricalLabels);
        }

        let mut strata: BTreeMap<String, Vec<usize>> = BTreeMap::new();

        for (index, label) in self.labels.iter().enumerate() {
            strata.entry(label.to_string()).or_default().push(index);
        }

        Ok(strata
            .into_iter()
            .map(|(label, indices)| (label, self.select(&indices)))
            .collect())
    }

    /// Split into two subsets such that both contain every label in the same
    /// proportion as the full dataset.
    pub fn stratified_split(&self, ratio: f64) -> Result<(Self, Self), DatasetError> {
        if ratio <= 0.0 || ratio >= 1.0 {
            return Err(DatasetError::InvalidRatio(ratio));
        }

        let mut left = Vec::new();
        let mut right = Vec::new();

        for stratum in self.stratify()?.into_values() {
            let n = (ratio * stratum.num_rows() as f64).floor() as usize;

            left.push(stratum.head(n));
            right.push(stratum.tail(stratum.num_rows() - n));
        }

        Ok((Self::stack(&left)?, Self::stack(&right)?))
    }

    /// Fold the dataset `k` times such that every fold contains every label
    /// in the same proportion as the full dataset.
    pub fn stratified_fold(&self, k: usize) -> Result<Vec<Self>, DatasetError> {
        if k < 1 || k > self.num_rows() {
            return Err(DatasetError::FoldCount {
                folds: k,
                rows: self.num_rows(),
            });
        }

        let strata = self.stratify()?;

        let mut folds = Vec::with_capacity(k);

        for fold in 0..k {
            let mut parts = Vec::with_capacity(strata.len());

            for stratum in strata.values() {
                let per_fold = stratum.num_rows() / k;

                parts.push(stratum.slice(fold * per_fold, per_fold));
            }

            folds.push(Self::stack(&parts)?);
        }

        Ok(folds)
    }
}
