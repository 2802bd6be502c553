//! Distance kernels.
//!
//! A [`Distance`] kernel is a pure function over fixed-length continuous
//! feature vectors: non-negative, symmetric, and zero between a vector and
//! itself. The spatial subsystem is agnostic to which metric is plugged in.

mod euclidean;
mod manhattan;

pub use euclidean::Euclidean;
pub use manhattan::Manhattan;

/// A distance function between two continuous feature vectors.
pub trait Distance: Send + Sync {
    /// Compute the distance between vectors `a` and `b`.
    ///
    /// Implementations must be symmetric, return a non-negative value, and
    /// return 0 for identical vectors.
    fn compute(&self, a: &[f64], b: &[f64]) -> f64;
}

impl<K: Distance + ?Sized> Distance for &K {
    fn compute(&self, a: &[f64], b: &[f64]) -> f64 {
        (**self).compute(a, b)
    }
}
