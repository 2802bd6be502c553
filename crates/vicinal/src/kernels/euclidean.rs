//! Straight-line distance.

use serde::{Deserialize, Serialize};

use super::Distance;

/// The straight-line (L2) distance between two points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Euclidean;

impl Distance for Euclidean {
    fn compute(&self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len(), "vectors must have equal dimensions");

        a.iter()
            .zip(b)
            .map(|(x, y)| (x - y).powi(2))
            .sum::<f64>()
            .sqrt()
    }
}
