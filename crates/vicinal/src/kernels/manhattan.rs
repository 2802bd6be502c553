//! Taxicab distance.

use serde::{Deserialize, Serialize};

use super::Distance;

/// The taxicab (L1) distance between two points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manhattan;

impl Distance for Manhattan {
    fn compute(&self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len(), "vectors must have equal dimensions");

        a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn known_distances() {
        assert_abs_diff_eq!(Manhattan.compute(&[0.0, 0.0], &[3.0, 4.0]), 7.0);
        assert_abs_diff_eq!(Manhattan.compute(&[-1.0], &[-1.0]), 0.0);
    }
}
