//! vicinal: radius-based neighbor search and estimation for Rust.
//!
//! Estimators, transformers, and validation tools over an in-memory typed
//! sample table, built around an exact radius-bounded neighbor search
//! subsystem.
//!
//! # Key Types
//!
//! - [`Dataset`] / [`Labeled`] - Typed sample tables with wrangling and
//!   spatial partitioning operations
//! - [`BallTree`] - Spatial index answering exact range queries
//! - [`RadiusNeighbors`] - Classifier voting among neighbors within a fixed
//!   radius, with a first-class anomaly outcome for lonely query points
//! - [`RadiusNeighborsRegressor`] - Its regression counterpart
//! - [`CommitteeMachine`] - Influence-weighted voting ensemble
//! - [`HoldOut`] - Cross validation with hold out testing sets
//!
//! # Training
//!
//! Build a [`Labeled`] dataset of continuous features, then call
//! [`Learner::train`] followed by [`Learner::predict`] or
//! [`Probabilistic::proba`]. See the [`classifiers`] module for details.
//!
//! # Persistence
//!
//! Grown trees and configured estimators round-trip through opaque blobs
//! via [`Persistable`]; see the [`persist`] module.

// Re-export approx traits for users who want to compare predictions
pub use approx;

pub mod classifiers;
pub mod data;
pub mod ensemble;
pub mod estimator;
pub mod kernels;
pub mod persist;
pub mod regressors;
pub mod transformers;
pub mod tree;
pub mod utils;
pub mod validation;

// =============================================================================
// Convenience Re-exports
// =============================================================================

// High-level estimator types
pub use classifiers::RadiusNeighbors;
pub use ensemble::CommitteeMachine;
pub use regressors::RadiusNeighborsRegressor;

// Estimator seams
pub use estimator::{Estimator, EstimatorError, EstimatorType, Learner, Probabilistic};

// Data types (for preparing training data)
pub use data::{Dataset, DatasetError, Labeled, Value, ValueType};

// Spatial index types
pub use kernels::{Distance, Euclidean, Manhattan};
pub use tree::{BallTree, RangeQueryResult, Spatial, TreeError};

// Persistence
pub use persist::{PersistError, Persistable};

// Validation
pub use validation::{Accuracy, HoldOut, Metric, Validator};

// Shared utilities
pub use utils::{Parallelism, EPSILON};
