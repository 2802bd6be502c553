//! Common utilities used across the crate.

use std::collections::BTreeMap;

use rayon::prelude::*;

/// A small positive constant used to floor denominators.
pub const EPSILON: f64 = 1e-8;

/// The key holding the maximum value in an ordered map.
///
/// Ties resolve to the first key in map order, i.e. the lexically smallest
/// label.
pub(crate) fn argmax(weights: &BTreeMap<String, f64>) -> Option<&String> {
    let mut best: Option<(&String, f64)> = None;

    for (key, &value) in weights {
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((key, value)),
        }
    }

    best.map(|(key, _)| key)
}

// =============================================================================
// Parallelism Configuration
// =============================================================================

/// Whether parallel execution is allowed.
///
/// Components receiving this flag may fan work out over the rayon pool when
/// `Parallel` and must iterate sequentially when `Sequential`. Only ensemble
/// level work is ever dispatched this way; individual train and predict
/// calls are synchronous computations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Parallelism {
    #[default]
    Sequential,
    Parallel,
}

impl Parallelism {
    /// Create from thread count semantics: 0 = auto, 1 = sequential,
    /// >1 = parallel.
    #[inline]
    pub fn from_threads(n_threads: usize) -> Self {
        if n_threads == 1 || (n_threads == 0 && rayon::current_num_threads() == 1) {
            Parallelism::Sequential
        } else {
            Parallelism::Parallel
        }
    }

    /// Returns `true` if parallel execution is allowed.
    #[inline]
    pub fn is_parallel(self) -> bool {
        matches!(self, Parallelism::Parallel)
    }

    /// Map over items, in parallel when allowed.
    #[inline]
    pub fn maybe_par_map<T, B, I, F>(self, iter: I, f: F) -> Vec<B>
    where
        T: Send,
        B: Send,
        I: IntoIterator<Item = T> + IntoParallelIterator<Item = T>,
        F: Fn(T) -> B + Sync + Send,
    {
        if self.is_parallel() {
            iter.into_par_iter().map(f).collect()
        } else {
            iter.into_iter().map(f).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_picks_heaviest() {
        let mut weights = BTreeMap::new();
        weights.insert("yes".to_string(), 0.8);
        weights.insert("no".to_string(), 0.2);
        weights.insert("maybe".to_string(), 0.0);

        assert_eq!(argmax(&weights), Some(&"yes".to_string()));
    }

    #[test]
    fn argmax_tie_breaks_lexically() {
        let mut weights = BTreeMap::new();
        weights.insert("b".to_string(), 1.0);
        weights.insert("a".to_string(), 1.0);

        assert_eq!(argmax(&weights), Some(&"a".to_string()));
    }

    #[test]
    fn argmax_empty() {
        assert_eq!(argmax(&BTreeMap::new()), None);
    }

    #[test]
    fn parallelism_from_threads() {
        assert!(!Parallelism::from_threads(1).is_parallel());
        assert!(Parallelism::from_threads(2).is_parallel());
        assert!(Parallelism::from_threads(8).is_parallel());
    }

    #[test]
    fn maybe_par_map_matches_sequential() {
        let sequential: Vec<_> = Parallelism::Sequential.maybe_par_map(0..10usize, |i| i * 2);
        let parallel: Vec<_> = Parallelism::Parallel.maybe_par_map(0..10usize, |i| i * 2);

        assert_eq!(sequential, parallel);
    }
}
