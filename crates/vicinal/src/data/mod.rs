//! Typed in-memory sample tables.
//!
//! Data are passed around in specialized containers: [`Dataset`] for bare
//! feature tables and [`Labeled`] for tables with one outcome per row. Both
//! enforce the column type system described by [`Value`] and [`ValueType`]
//! and expose the
//! wrangling operations estimators build on, including the spatial partition
//! primitive used to grow ball trees.

mod dataset;
mod error;
mod labeled;
mod value;

pub use dataset::Dataset;
pub use error::DatasetError;
pub use labeled::Labeled;
pub use value::{Value, ValueType};
